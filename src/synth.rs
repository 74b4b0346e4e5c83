//! Seeded synthetic object sequences
//!
//! Produces valid, reproducible sequences for the demo binary and for tests
//! that need long or varied input. Same seed and options, same sequence.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::NORMALIZED_RADIUS;
use crate::difficulty::{DifficultyObject, DifficultyObjects, HitObject, HitObjectKind};
use crate::error::Result;
use crate::{fade_in_from_preempt, preempt_from_approach_rate};

/// Playfield size every position is kept within
pub const PLAYFIELD: DVec2 = DVec2::new(512.0, 384.0);
/// Floor applied to gaps when deriving strain time (ms)
pub const MIN_STRAIN_TIME: f64 = 25.0;

/// Shape of a generated sequence
#[derive(Debug, Clone)]
pub struct SynthOptions {
    /// Approach rate used to derive preempt and fade-in
    pub approach_rate: f64,
    pub radius: f64,
    /// Gap between consecutive objects (ms)
    pub min_gap: f64,
    pub max_gap: f64,
    /// Chance that an object is stacked on the previous one
    pub stack_chance: f64,
    pub path_chance: f64,
    pub break_chance: f64,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            approach_rate: 9.0,
            radius: 32.0,
            min_gap: 100.0,
            max_gap: 400.0,
            stack_chance: 0.15,
            path_chance: 0.25,
            break_chance: 0.02,
        }
    }
}

/// Generate `count` objects deterministically from `seed`
pub fn generate(seed: u64, count: usize, options: &SynthOptions) -> Result<DifficultyObjects> {
    let mut rng = Pcg32::seed_from_u64(seed);

    let preempt = preempt_from_approach_rate(options.approach_rate);
    let fade_in = fade_in_from_preempt(preempt);
    let scale = NORMALIZED_RADIUS / options.radius;

    let mut objects: Vec<DifficultyObject> = Vec::with_capacity(count);
    let mut time = 0.0;

    for i in 0..count {
        let gap = if i == 0 {
            0.0
        } else {
            rng.random_range(options.min_gap..=options.max_gap)
        };
        time += gap;

        let roll: f64 = rng.random();
        let kind = if i > 0 && roll < options.break_chance {
            HitObjectKind::Break
        } else if roll < options.break_chance + options.path_chance {
            HitObjectKind::Path {
                repeat_count: rng.random_range(0..3),
            }
        } else {
            HitObjectKind::Point
        };

        let base = HitObject::new(kind, options.radius, preempt, fade_in);
        let mut obj = DifficultyObject::new(base, time);
        obj.delta_time = gap;
        obj.strain_time = gap.max(MIN_STRAIN_TIME);

        let last_end = objects.last().map(|o| o.stacked_end_position);

        obj.stacked_position = match (kind, last_end) {
            (HitObjectKind::Break, _) => PLAYFIELD / 2.0,
            (_, Some(end)) if rng.random_bool(options.stack_chance) => {
                let jitter = DVec2::new(rng.random_range(-2.0..2.0), rng.random_range(-2.0..2.0));
                (end + jitter).clamp(DVec2::ZERO, PLAYFIELD)
            }
            _ => DVec2::new(
                rng.random_range(0.0..PLAYFIELD.x),
                rng.random_range(0.0..PLAYFIELD.y),
            ),
        };

        obj.stacked_end_position = obj.stacked_position;
        if let HitObjectKind::Path { .. } = kind {
            let direction = rng.random_range(0.0..std::f64::consts::TAU);
            let length: f64 = rng.random_range(40.0..220.0);
            let end = obj.stacked_position + DVec2::from_angle(direction) * length;
            obj.stacked_end_position = end.clamp(DVec2::ZERO, PLAYFIELD);
            obj.lazy_travel_distance =
                obj.stacked_position.distance(obj.stacked_end_position) * scale;
            obj.travel_time = rng.random_range(80.0..300.0f64).max(MIN_STRAIN_TIME);
        }

        if !matches!(kind, HitObjectKind::Break) {
            if let Some(end) = last_end {
                let jump = obj.stacked_position.distance(end) * scale;
                obj.lazy_jump_distance = jump;
                obj.minimum_jump_distance = jump;
            }
            obj.angle = angle_between(&objects, obj.stacked_position);
        }

        objects.push(obj);
    }

    log::debug!("Generated {} synthetic objects from seed {}", objects.len(), seed);

    DifficultyObjects::new(objects)
}

/// Angle at the last object formed by the one before it and `pos`
fn angle_between(objects: &[DifficultyObject], pos: DVec2) -> Option<f64> {
    let [.., last_last, last] = objects else {
        return None;
    };

    let v1 = last_last.stacked_position - last.stacked_end_position;
    let v2 = pos - last.stacked_end_position;
    let dot = v1.dot(v2);
    let det = v1.perp_dot(v2);

    Some(det.abs().atan2(dot))
}
