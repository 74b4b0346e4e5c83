//! Calculation report
//!
//! The difficulty value plus per-section peaks and a leaderboard of the
//! hardest sections, exportable as JSON.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::settings::Settings;

/// Maximum number of hardest sections to keep
pub const MAX_HARDEST_SECTIONS: usize = 10;

/// Highest strain reached in one section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionPeak {
    /// Section start (ms)
    pub start_time: f64,
    pub strain: f64,
}

/// Hardest sections, highest strain first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HardestSections {
    pub entries: Vec<SectionPeak>,
}

impl HardestSections {
    /// Pick the strongest sections; equal strains keep section order
    pub fn from_sections(sections: &[SectionPeak]) -> Self {
        let mut entries: Vec<SectionPeak> =
            sections.iter().copied().filter(|s| s.strain > 0.0).collect();
        entries.sort_by(|a, b| b.strain.total_cmp(&a.strain));
        entries.truncate(MAX_HARDEST_SECTIONS);

        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<&SectionPeak> {
        self.entries.first()
    }
}

/// Result of one reading strain run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrainReport {
    /// Sum of all section peaks
    pub difficulty: f64,
    pub object_count: usize,
    pub settings: Settings,
    pub sections: Vec<SectionPeak>,
    pub hardest: HardestSections,
}

impl StrainReport {
    pub fn new(
        settings: Settings,
        object_count: usize,
        difficulty: f64,
        sections: Vec<SectionPeak>,
    ) -> Self {
        let hardest = HardestSections::from_sections(&sections);

        Self {
            difficulty,
            object_count,
            settings,
            sections,
            hardest,
        }
    }

    pub fn peaks(&self) -> Vec<f64> {
        self.sections.iter().map(|s| s.strain).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(start_time: f64, strain: f64) -> SectionPeak {
        SectionPeak { start_time, strain }
    }

    #[test]
    fn test_sorted_descending() {
        let sections = [section(0.0, 1.0), section(400.0, 3.0), section(800.0, 2.0)];
        let hardest = HardestSections::from_sections(&sections);

        let strains: Vec<f64> = hardest.entries.iter().map(|e| e.strain).collect();
        assert_eq!(strains, vec![3.0, 2.0, 1.0]);
        assert_eq!(hardest.top().map(|e| e.start_time), Some(400.0));
    }

    #[test]
    fn test_ties_keep_earlier_first() {
        let sections = [section(0.0, 2.0), section(400.0, 1.0), section(800.0, 2.0)];
        let hardest = HardestSections::from_sections(&sections);
        let starts: Vec<f64> = hardest.entries.iter().map(|e| e.start_time).collect();
        assert_eq!(starts, vec![0.0, 800.0, 400.0]);
    }

    #[test]
    fn test_zero_strain_left_out() {
        let hardest = HardestSections::from_sections(&[section(0.0, 0.0)]);
        assert!(hardest.is_empty());
        assert!(hardest.top().is_none());
    }

    #[test]
    fn test_capped_at_max() {
        let sections: Vec<SectionPeak> = (0..15)
            .map(|i| section(i as f64 * 400.0, (i + 1) as f64))
            .collect();
        let hardest = HardestSections::from_sections(&sections);
        assert_eq!(hardest.entries.len(), MAX_HARDEST_SECTIONS);
        assert_eq!(hardest.top().map(|e| e.strain), Some(15.0));
        assert_eq!(hardest.entries.last().map(|e| e.strain), Some(6.0));
    }

    #[test]
    fn test_report_json() {
        let sections = vec![section(0.0, 1.5), section(400.0, 0.0), section(800.0, 2.5)];
        let report = StrainReport::new(Settings::default(), 3, 4.0, sections);
        assert_eq!(report.difficulty, 4.0);
        assert_eq!(report.hardest.entries.len(), 2);
        assert_eq!(report.peaks(), vec![1.5, 0.0, 2.5]);

        let json = report.to_json().unwrap();
        let parsed: StrainReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.difficulty, 4.0);
    }
}
