//! Deterministic reading strain calculation
//!
//! Everything here is a pure function of the object sequence and settings:
//! - Sequences are validated once and never mutated
//! - Each run owns exactly one accumulator
//! - Look-back loops run in fixed index order
//!
//! Independent runs over the same sequence may execute on separate threads.

pub mod flashlight;
pub mod object;
pub mod peaks;
pub mod reading;
pub mod stack;
pub mod strain;

pub use flashlight::FlashlightEvaluator;
pub use object::{DifficultyObject, DifficultyObjects, HitObject, HitObjectKind, Lookback};
pub use peaks::{StrainPeaks, StrainSkill};
pub use reading::ReadingEvaluator;
pub use stack::StackEvaluator;
pub use strain::ReadingStrain;

use crate::error::Result;
use crate::report::StrainReport;
use crate::settings::Settings;

/// Run a fresh reading strain over the whole sequence
pub fn calculate(objects: &DifficultyObjects, settings: &Settings) -> Result<StrainReport> {
    settings.validate()?;

    let mut skill = ReadingStrain::new(settings);
    let mut peaks = StrainPeaks::new(settings.section_length);

    for curr in objects {
        peaks.process(&mut skill, curr, objects);
    }

    let report = StrainReport::new(
        settings.clone(),
        objects.len(),
        peaks.difficulty_value(),
        peaks.sections(),
    );
    log::debug!(
        "{} objects, AR {}, {}: {} sections, difficulty {}",
        objects.len(),
        settings.approach_rate,
        settings.preset().as_str(),
        report.sections.len(),
        report.difficulty
    );

    Ok(report)
}

/// Running strain after each object, in sequence order
pub fn strain_trace(objects: &DifficultyObjects, settings: &Settings) -> Result<Vec<f64>> {
    settings.validate()?;

    let mut skill = ReadingStrain::new(settings);
    Ok(objects
        .iter()
        .map(|curr| skill.strain_value_at(curr, objects))
        .collect())
}
