//! Reading Strain - reading difficulty for timed object sequences
//!
//! Core modules:
//! - `difficulty`: Deterministic strain calculation (objects, evaluators, accumulator, peaks)
//! - `settings`: Approach rate and visibility modifier configuration
//! - `report`: Serializable results with the hardest sections
//! - `synth`: Seeded synthetic sequences for demos and tests

pub mod difficulty;
pub mod error;
pub mod report;
pub mod settings;
pub mod synth;

pub use difficulty::{DifficultyObject, DifficultyObjects, HitObject, HitObjectKind, calculate};
pub use error::{ReadingError, Result};
pub use report::{HardestSections, SectionPeak, StrainReport};
pub use settings::{ModPreset, Settings};

/// Tuned constants shared by the evaluators and the accumulator
pub mod consts {
    /// Strain remaining after one second without objects
    pub const STRAIN_DECAY_BASE: f64 = 0.15;
    /// Scale applied to the summed evaluator output before accumulation
    pub const SKILL_MULTIPLIER: f64 = 0.05512;
    /// Default peak section length (ms)
    pub const SECTION_LENGTH: f64 = 400.0;

    /// Radius every distance is normalized against
    pub const NORMALIZED_RADIUS: f64 = 52.0;

    /// Approach rate below which low-AR reading bonus applies
    pub const LOW_AR_THRESHOLD: f64 = 8.67;
    /// Approach rate above which high-AR reading bonus applies
    pub const HIGH_AR_THRESHOLD: f64 = 10.33;
    /// Low-AR bonus multiplier when hidden is active
    pub const LOW_AR_HIDDEN_MULTIPLIER: f64 = 1.75;

    /// Distance below which an object counts as stacked on its neighbour
    pub const STACK_DISTANCE: f64 = 15.0;

    /// Maximum predecessors inspected by the flashlight evaluator
    pub const FLASHLIGHT_HISTORY: usize = 10;
    /// Jump distance at which the small distance nerf stops applying
    pub const SMALL_DIST_NERF_DISTANCE: f64 = 75.0;
    /// Normalized lazy jump distance at which the stack nerf stops applying
    pub const STACK_NERF_DISTANCE: f64 = 25.0;
    pub const MAX_OPACITY_BONUS: f64 = 0.4;
    pub const FLASHLIGHT_HIDDEN_BONUS: f64 = 1.2;
    /// Angle difference (radians) treated as a repeated angle
    pub const ANGLE_REPEAT_THRESHOLD: f64 = 0.02;
    /// Share of flashlight strain kept no matter how often angles repeat
    pub const MIN_ANGLE_MULTIPLIER: f64 = 0.2;
    /// Path velocity (normalized px/ms) below which no path bonus is given
    pub const MIN_PATH_VELOCITY: f64 = 0.5;
    pub const PATH_MULTIPLIER: f64 = 1.3;

    /// Fraction of preempt over which hidden fades an object out
    pub const HIDDEN_FADE_OUT_MULTIPLIER: f64 = 0.3;
    /// Preempt (ms) at approach rate 0, 5 and 10
    pub const PREEMPT_MAX: f64 = 1800.0;
    pub const PREEMPT_MID: f64 = 1200.0;
    pub const PREEMPT_MIN: f64 = 450.0;
    /// Full fade-in duration (ms) once preempt reaches `PREEMPT_MIN`
    pub const FADE_IN_DURATION: f64 = 400.0;
}

/// Exponential strain decay over `ms` milliseconds, in (0, 1] for `ms >= 0`
#[inline]
pub fn strain_decay(ms: f64) -> f64 {
    consts::STRAIN_DECAY_BASE.powf(ms / 1000.0)
}

/// Convert an approach rate to preempt time (ms)
///
/// Piecewise linear: 1800 ms at AR 0, 1200 ms at AR 5, 450 ms at AR 10.
#[inline]
pub fn preempt_from_approach_rate(approach_rate: f64) -> f64 {
    use consts::*;
    if approach_rate < 5.0 {
        PREEMPT_MID + (PREEMPT_MAX - PREEMPT_MID) * (5.0 - approach_rate) / 5.0
    } else if approach_rate > 5.0 {
        PREEMPT_MID - (PREEMPT_MID - PREEMPT_MIN) * (approach_rate - 5.0) / 5.0
    } else {
        PREEMPT_MID
    }
}

/// Fade-in duration for a given preempt, shortened for very fast approach rates
#[inline]
pub fn fade_in_from_preempt(preempt: f64) -> f64 {
    consts::FADE_IN_DURATION * (preempt / consts::PREEMPT_MIN).min(1.0)
}
