//! Flashlight memorization strain
//!
//! Under a restricted view, distant and faded objects among the last few
//! must be remembered rather than read. Repeated angles make patterns easier
//! to memorize, long fast paths make them harder.

use super::object::{DifficultyObject, HitObjectKind, Lookback};
use crate::consts::*;

pub struct FlashlightEvaluator;

impl FlashlightEvaluator {
    pub fn evaluate_diff_of<L: Lookback + ?Sized>(
        curr: &DifficultyObject,
        objects: &L,
        hidden: bool,
    ) -> f64 {
        if curr.base.is_break() {
            return 0.0;
        }

        let scale = NORMALIZED_RADIUS / curr.base.radius;

        let mut small_dist_nerf = 1.0;
        let mut cumulative_strain_time = 0.0;
        let mut result = 0.0;
        let mut angle_repeat_count = 0.0;
        let mut last_obj = curr;

        for i in 0..curr.idx.min(FLASHLIGHT_HISTORY) {
            let Some(prev) = curr.previous(i, objects) else {
                break;
            };

            // Positive from the first step, strain time is checked on construction
            cumulative_strain_time += last_obj.strain_time;

            if !prev.base.is_break() {
                let jump_distance = curr.stacked_position.distance(prev.stacked_end_position);

                // Nerf when the previous object is close enough to stay in view anyway
                if i == 0 {
                    small_dist_nerf = (jump_distance / SMALL_DIST_NERF_DISTANCE).min(1.0);
                }

                let stack_nerf =
                    ((prev.lazy_jump_distance / scale) / STACK_NERF_DISTANCE).min(1.0);
                let opacity_bonus =
                    1.0 + MAX_OPACITY_BONUS * (1.0 - curr.opacity_at(prev.start_time, hidden));

                result +=
                    stack_nerf * opacity_bonus * scale * jump_distance / cumulative_strain_time;

                if let (Some(curr_angle), Some(prev_angle)) = (curr.angle, prev.angle) {
                    if (curr_angle - prev_angle).abs() < ANGLE_REPEAT_THRESHOLD {
                        angle_repeat_count += (1.0 - 0.1 * i as f64).max(0.0);
                    }
                }
            }

            last_obj = prev;
        }

        result *= small_dist_nerf;
        result *= result;

        if hidden {
            result *= FLASHLIGHT_HIDDEN_BONUS;
        }

        result *= MIN_ANGLE_MULTIPLIER + (1.0 - MIN_ANGLE_MULTIPLIER) / (angle_repeat_count + 1.0);

        if let HitObjectKind::Path { repeat_count } = curr.base.kind {
            result += Self::path_bonus(curr, scale, repeat_count) * PATH_MULTIPLIER;
        }

        result
    }

    /// Bonus for travelling a path faster than the minimum velocity
    fn path_bonus(curr: &DifficultyObject, scale: f64, repeat_count: u32) -> f64 {
        let travel_distance = curr.lazy_travel_distance / scale;
        let velocity_excess = (travel_distance / curr.travel_time - MIN_PATH_VELOCITY).max(0.0);

        velocity_excess.sqrt() * travel_distance / (f64::from(repeat_count) + 1.0)
    }
}
