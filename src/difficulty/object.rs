//! Difficulty objects and the sequence they live in
//!
//! Timing and geometry fields are precomputed upstream; this module only
//! validates them once and offers bounded look-back access.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::HIDDEN_FADE_OUT_MULTIPLIER;
use crate::error::{ReadingError, Result};

/// Object variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HitObjectKind {
    /// Single tap target
    Point,
    /// Target followed along a path, possibly repeated
    Path { repeat_count: u32 },
    /// Non-interactive break marker
    Break,
}

/// The underlying object a difficulty node was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitObject {
    pub kind: HitObjectKind,
    pub radius: f64,
    /// Time (ms) the object is on screen before its start time
    pub time_preempt: f64,
    /// Time (ms) the object takes to fade in fully
    pub time_fade_in: f64,
}

impl HitObject {
    pub fn new(kind: HitObjectKind, radius: f64, time_preempt: f64, time_fade_in: f64) -> Self {
        Self {
            kind,
            radius,
            time_preempt,
            time_fade_in,
        }
    }

    #[inline]
    pub fn is_break(&self) -> bool {
        matches!(self.kind, HitObjectKind::Break)
    }
}

/// One node of the sequence, with everything the evaluators read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyObject {
    /// Position in the sequence, assigned by [`DifficultyObjects::new`]
    #[serde(skip)]
    pub idx: usize,
    pub base: HitObject,

    pub start_time: f64,
    /// Gap since the previous object (ms)
    #[serde(default)]
    pub delta_time: f64,
    /// Gap since the previous object, floored upstream (ms)
    #[serde(default)]
    pub strain_time: f64,
    /// Time spent travelling along a path (ms), only meaningful for paths
    #[serde(default)]
    pub travel_time: f64,

    pub stacked_position: DVec2,
    pub stacked_end_position: DVec2,

    #[serde(default)]
    pub lazy_jump_distance: f64,
    #[serde(default)]
    pub minimum_jump_distance: f64,
    #[serde(default)]
    pub lazy_travel_distance: f64,

    /// Angle (radians) formed with the two previous objects
    #[serde(default)]
    pub angle: Option<f64>,
}

impl DifficultyObject {
    /// A node at `start_time` with zeroed geometry
    pub fn new(base: HitObject, start_time: f64) -> Self {
        Self {
            idx: 0,
            base,
            start_time,
            delta_time: 0.0,
            strain_time: 0.0,
            travel_time: 0.0,
            stacked_position: DVec2::ZERO,
            stacked_end_position: DVec2::ZERO,
            lazy_jump_distance: 0.0,
            minimum_jump_distance: 0.0,
            lazy_travel_distance: 0.0,
            angle: None,
        }
    }

    /// The `n`-th predecessor (0 = immediately prior)
    #[inline]
    pub fn previous<'a, L: Lookback + ?Sized>(
        &self,
        n: usize,
        objects: &'a L,
    ) -> Option<&'a DifficultyObject> {
        objects.previous(self.idx, n)
    }

    /// How visible this object is at `time`, in [0, 1]
    ///
    /// Objects fade in over `time_fade_in` starting `time_preempt` before
    /// their start. With hidden they also fade out right after fading in.
    pub fn opacity_at(&self, time: f64, hidden: bool) -> f64 {
        if time > self.start_time {
            return 0.0;
        }

        let fade_in_start = self.start_time - self.base.time_preempt;
        let fade_in = fade_fraction(time - fade_in_start, self.base.time_fade_in);

        if hidden {
            let fade_out_start = fade_in_start + self.base.time_fade_in;
            let fade_out_duration = self.base.time_preempt * HIDDEN_FADE_OUT_MULTIPLIER;
            fade_in.min(1.0 - fade_fraction(time - fade_out_start, fade_out_duration))
        } else {
            fade_in
        }
    }

    fn validate(&self, index: usize) -> Result<()> {
        let radius = self.base.radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ReadingError::InvalidRadius { index, radius });
        }

        let times = [
            ("start_time", self.start_time),
            ("delta_time", self.delta_time),
            ("strain_time", self.strain_time),
            ("time_preempt", self.base.time_preempt),
            ("time_fade_in", self.base.time_fade_in),
        ];
        for (field, value) in times {
            if !value.is_finite() || value < 0.0 {
                return Err(ReadingError::InvalidTime {
                    index,
                    field,
                    value,
                });
            }
        }

        // Flashlight divides by accumulated strain time from the second object on
        if index > 0 && self.strain_time <= 0.0 {
            return Err(ReadingError::InvalidTime {
                index,
                field: "strain_time",
                value: self.strain_time,
            });
        }

        // Path velocity divides by travel time
        if let HitObjectKind::Path { .. } = self.base.kind {
            if !self.travel_time.is_finite() || self.travel_time <= 0.0 {
                return Err(ReadingError::InvalidTime {
                    index,
                    field: "travel_time",
                    value: self.travel_time,
                });
            }
        }

        let distances = [
            ("lazy_jump_distance", self.lazy_jump_distance),
            ("minimum_jump_distance", self.minimum_jump_distance),
            ("lazy_travel_distance", self.lazy_travel_distance),
        ];
        for (field, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(ReadingError::InvalidDistance {
                    index,
                    field,
                    value,
                });
            }
        }

        let positions = [
            ("stacked_position", self.stacked_position),
            ("stacked_end_position", self.stacked_end_position),
        ];
        for (field, pos) in positions {
            if !pos.is_finite() {
                return Err(ReadingError::InvalidDistance {
                    index,
                    field,
                    value: if pos.x.is_finite() { pos.y } else { pos.x },
                });
            }
        }

        Ok(())
    }
}

/// Linear progress through a fade, clamped to [0, 1]; zero-length fades are instant
#[inline]
fn fade_fraction(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        if elapsed >= 0.0 { 1.0 } else { 0.0 }
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

/// Read-only backward access into a sequence
pub trait Lookback {
    /// The `n`-th predecessor of the object at `idx`, if history reaches that far
    fn previous(&self, idx: usize, n: usize) -> Option<&DifficultyObject>;
}

/// Validated, index-ordered, immutable object sequence
#[derive(Debug, Clone, Default, Serialize)]
pub struct DifficultyObjects {
    objects: Vec<DifficultyObject>,
}

impl DifficultyObjects {
    /// Assign indices and check every object once
    pub fn new(mut objects: Vec<DifficultyObject>) -> Result<Self> {
        let mut last_start = f64::NEG_INFINITY;
        for (index, obj) in objects.iter_mut().enumerate() {
            obj.idx = index;
            obj.validate(index)?;
            if obj.start_time < last_start {
                return Err(ReadingError::UnorderedStartTime {
                    index,
                    previous: last_start,
                    current: obj.start_time,
                });
            }
            last_start = obj.start_time;
        }
        Ok(Self { objects })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&DifficultyObject> {
        self.objects.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DifficultyObject> {
        self.objects.iter()
    }

    pub fn as_slice(&self) -> &[DifficultyObject] {
        &self.objects
    }
}

impl Lookback for DifficultyObjects {
    #[inline]
    fn previous(&self, idx: usize, n: usize) -> Option<&DifficultyObject> {
        idx.checked_sub(n)?
            .checked_sub(1)
            .and_then(|i| self.objects.get(i))
    }
}

impl<'a> IntoIterator for &'a DifficultyObjects {
    type Item = &'a DifficultyObject;
    type IntoIter = std::slice::Iter<'a, DifficultyObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;

    /// Point of radius 26 (scale factor 2) at `start_time`, spaced `gap` after its predecessor
    pub fn point(start_time: f64, gap: f64) -> DifficultyObject {
        DifficultyObject {
            delta_time: gap,
            strain_time: gap,
            ..DifficultyObject::new(
                HitObject::new(HitObjectKind::Point, 26.0, 600.0, 400.0),
                start_time,
            )
        }
    }

    /// Evenly spaced points along the x axis, each `spacing` from its neighbour
    pub fn spaced_points(count: usize, gap: f64, spacing: f64) -> Vec<DifficultyObject> {
        (0..count)
            .map(|i| {
                let pos = DVec2::new(i as f64 * spacing, 0.0);
                DifficultyObject {
                    stacked_position: pos,
                    stacked_end_position: pos,
                    lazy_jump_distance: spacing,
                    minimum_jump_distance: spacing,
                    ..point(i as f64 * gap, if i == 0 { 0.0 } else { gap })
                }
            })
            .collect()
    }
}
