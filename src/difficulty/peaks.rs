//! Peak sectioning
//!
//! Time is cut into fixed-length sections. Each section keeps the highest
//! strain seen in it, starting from the strain carried over from the last
//! object. The sum of all section peaks is the difficulty value.

use super::object::{DifficultyObject, Lookback};
use crate::report::SectionPeak;

/// The two hooks a strain skill offers the aggregator
pub trait StrainSkill {
    /// Strain at `time` carried over from the previous object, without mutating
    ///
    /// Only called for objects that have a predecessor.
    fn initial_strain<L: Lookback + ?Sized>(
        &self,
        time: f64,
        curr: &DifficultyObject,
        objects: &L,
    ) -> f64;

    /// Fold `curr` into the running strain and return the new value
    fn strain_value_at<L: Lookback + ?Sized>(
        &mut self,
        curr: &DifficultyObject,
        objects: &L,
    ) -> f64;
}

/// Per-section strain maxima for one run
#[derive(Debug, Clone)]
pub struct StrainPeaks {
    section_length: f64,
    current_section_end: f64,
    current_section_peak: f64,
    sections: Vec<SectionPeak>,
}

impl StrainPeaks {
    pub fn new(section_length: f64) -> Self {
        Self {
            section_length,
            current_section_end: 0.0,
            current_section_peak: 0.0,
            sections: Vec::new(),
        }
    }

    /// Feed the next object, in sequence order
    pub fn process<S, L>(&mut self, skill: &mut S, curr: &DifficultyObject, objects: &L)
    where
        S: StrainSkill,
        L: Lookback + ?Sized,
    {
        // Anchor the section grid on the first object
        if curr.idx == 0 {
            self.current_section_end =
                (curr.start_time / self.section_length).ceil() * self.section_length;
        }

        while curr.start_time > self.current_section_end {
            self.save_current_peak();
            self.start_new_section_from(skill, self.current_section_end, curr, objects);
            self.current_section_end += self.section_length;
        }

        self.current_section_peak = skill
            .strain_value_at(curr, objects)
            .max(self.current_section_peak);
    }

    fn save_current_peak(&mut self) {
        log::trace!(
            "Section ending {} closed at {}",
            self.current_section_end,
            self.current_section_peak
        );
        self.sections.push(SectionPeak {
            start_time: self.current_section_end - self.section_length,
            strain: self.current_section_peak,
        });
    }

    fn start_new_section_from<S, L>(
        &mut self,
        skill: &S,
        time: f64,
        curr: &DifficultyObject,
        objects: &L,
    ) where
        S: StrainSkill,
        L: Lookback + ?Sized,
    {
        self.current_section_peak = skill.initial_strain(time, curr, objects);
    }

    /// All closed sections plus the one still open
    pub fn sections(&self) -> Vec<SectionPeak> {
        let mut sections = self.sections.clone();
        sections.push(SectionPeak {
            start_time: self.current_section_end - self.section_length,
            strain: self.current_section_peak,
        });
        sections
    }

    pub fn peaks(&self) -> Vec<f64> {
        self.sections().into_iter().map(|s| s.strain).collect()
    }

    /// Sum of all section peaks, in section order
    pub fn difficulty_value(&self) -> f64 {
        self.peaks().iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::object::DifficultyObjects;
    use crate::difficulty::object::test_util::spaced_points;

    /// Returns a fixed strain per object and records hook calls
    #[derive(Default)]
    struct ScriptedSkill {
        values: Vec<f64>,
        seed: f64,
        seeded_at: std::cell::RefCell<Vec<(f64, usize)>>,
    }

    impl StrainSkill for ScriptedSkill {
        fn initial_strain<L: Lookback + ?Sized>(
            &self,
            time: f64,
            curr: &DifficultyObject,
            _objects: &L,
        ) -> f64 {
            self.seeded_at.borrow_mut().push((time, curr.idx));
            self.seed
        }

        fn strain_value_at<L: Lookback + ?Sized>(
            &mut self,
            curr: &DifficultyObject,
            _objects: &L,
        ) -> f64 {
            self.values[curr.idx]
        }
    }

    fn run(objects: &DifficultyObjects, skill: &mut ScriptedSkill) -> StrainPeaks {
        let mut peaks = StrainPeaks::new(400.0);
        for curr in objects {
            peaks.process(skill, curr, objects);
        }
        peaks
    }

    #[test]
    fn test_one_peak_per_section() {
        // Objects at 0, 150, 300, 450, 600, 750
        let objects = DifficultyObjects::new(spaced_points(6, 150.0, 50.0)).unwrap();
        let mut skill = ScriptedSkill {
            values: vec![1.0, 3.0, 2.0, 5.0, 4.0, 0.5],
            ..Default::default()
        };
        let peaks = run(&objects, &mut skill);

        // Grid anchored at 0: (-400, 0], (0, 400], (400, 800]
        assert_eq!(peaks.peaks(), vec![1.0, 3.0, 5.0]);
        assert_eq!(peaks.difficulty_value(), 9.0);
        assert_eq!(*skill.seeded_at.borrow(), vec![(0.0, 1), (400.0, 3)]);
    }

    #[test]
    fn test_seed_is_section_floor() {
        let objects = DifficultyObjects::new(spaced_points(3, 500.0, 50.0)).unwrap();
        let mut skill = ScriptedSkill {
            values: vec![1.0, 0.5, 0.5],
            seed: 2.0,
            ..Default::default()
        };
        let peaks = run(&objects, &mut skill);

        // Object at 1000 crosses two boundaries: (400, 800] holds only the seed
        assert_eq!(peaks.peaks(), vec![1.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_first_object_never_seeded() {
        let mut objs = spaced_points(2, 300.0, 50.0);
        objs[0].start_time = 1250.0;
        objs[1].start_time = 1300.0;
        let objects = DifficultyObjects::new(objs).unwrap();
        let mut skill = ScriptedSkill {
            values: vec![1.0, 2.0],
            ..Default::default()
        };
        let peaks = run(&objects, &mut skill);

        assert!(skill.seeded_at.borrow().is_empty());
        assert_eq!(peaks.sections()[0].start_time, 1200.0);
        assert_eq!(peaks.peaks(), vec![2.0]);
    }

    #[test]
    fn test_empty_run() {
        let peaks = StrainPeaks::new(400.0);
        assert_eq!(peaks.difficulty_value(), 0.0);
    }
}
