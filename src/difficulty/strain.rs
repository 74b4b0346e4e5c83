//! Reading strain accumulator
//!
//! One running strain value per run, decayed by the gap to each object and
//! bumped by the active evaluators. Owned by a single run, never shared.

use super::flashlight::FlashlightEvaluator;
use super::object::{DifficultyObject, Lookback};
use super::peaks::StrainSkill;
use super::reading::ReadingEvaluator;
use super::stack::StackEvaluator;
use crate::consts::SKILL_MULTIPLIER;
use crate::settings::Settings;
use crate::strain_decay;

#[derive(Debug, Clone)]
pub struct ReadingStrain {
    approach_rate: f64,
    hidden: bool,
    flashlight: bool,
    current_strain: f64,
}

impl ReadingStrain {
    pub fn new(settings: &Settings) -> Self {
        Self {
            approach_rate: settings.approach_rate,
            hidden: settings.hidden,
            flashlight: settings.flashlight,
            current_strain: 0.0,
        }
    }

    #[inline]
    pub fn current_strain(&self) -> f64 {
        self.current_strain
    }

    /// Sum of the active evaluators for `curr`, before the skill multiplier
    pub fn strain_value_of<L: Lookback + ?Sized>(&self, curr: &DifficultyObject, objects: &L) -> f64 {
        let mut strain = ReadingEvaluator::evaluate_diff_of(self.hidden, self.approach_rate);

        if self.hidden {
            strain += StackEvaluator::evaluate_diff_of(curr, objects);
        }

        if self.flashlight {
            strain += FlashlightEvaluator::evaluate_diff_of(curr, objects, self.hidden);
        }

        strain
    }
}

impl StrainSkill for ReadingStrain {
    fn initial_strain<L: Lookback + ?Sized>(
        &self,
        time: f64,
        curr: &DifficultyObject,
        objects: &L,
    ) -> f64 {
        curr.previous(0, objects).map_or(0.0, |prev| {
            self.current_strain * strain_decay(time - prev.start_time)
        })
    }

    fn strain_value_at<L: Lookback + ?Sized>(
        &mut self,
        curr: &DifficultyObject,
        objects: &L,
    ) -> f64 {
        self.current_strain *= strain_decay(curr.delta_time);
        self.current_strain += self.strain_value_of(curr, objects) * SKILL_MULTIPLIER;

        self.current_strain
    }
}
