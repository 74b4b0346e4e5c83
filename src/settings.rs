//! Calculation settings and modifier presets
//!
//! Loaded from JSON alongside an object sequence, or built from a preset.

use serde::{Deserialize, Serialize};

use crate::consts::SECTION_LENGTH;
use crate::error::{ReadingError, Result};

/// Visibility modifier combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ModPreset {
    #[default]
    NoMod,
    Hidden,
    Flashlight,
    HiddenFlashlight,
}

impl ModPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModPreset::NoMod => "NoMod",
            ModPreset::Hidden => "Hidden",
            ModPreset::Flashlight => "Flashlight",
            ModPreset::HiddenFlashlight => "HiddenFlashlight",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nomod" | "nm" | "none" => Some(ModPreset::NoMod),
            "hidden" | "hd" => Some(ModPreset::Hidden),
            "flashlight" | "fl" => Some(ModPreset::Flashlight),
            "hiddenflashlight" | "hdfl" | "flhd" => Some(ModPreset::HiddenFlashlight),
            _ => None,
        }
    }

    /// Whether objects fade out before they must be hit
    pub fn hidden(&self) -> bool {
        matches!(self, ModPreset::Hidden | ModPreset::HiddenFlashlight)
    }

    /// Whether the visible area is restricted
    pub fn flashlight(&self) -> bool {
        matches!(self, ModPreset::Flashlight | ModPreset::HiddenFlashlight)
    }
}

fn default_approach_rate() -> f64 {
    9.0
}

fn default_section_length() -> f64 {
    SECTION_LENGTH
}

/// Configuration for one reading strain run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Approach rate (0-11 typical, not enforced)
    #[serde(default = "default_approach_rate")]
    pub approach_rate: f64,

    // === Modifiers ===
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub flashlight: bool,

    /// Length of each peak section (ms)
    #[serde(default = "default_section_length")]
    pub section_length: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            approach_rate: default_approach_rate(),
            hidden: false,
            flashlight: false,
            section_length: default_section_length(),
        }
    }
}

impl Settings {
    /// Create settings from a modifier preset
    pub fn from_preset(preset: ModPreset, approach_rate: f64) -> Self {
        let mut settings = Self {
            approach_rate,
            ..Self::default()
        };
        settings.apply_preset(preset);
        settings
    }

    /// Replace both modifier flags with the preset's
    pub fn apply_preset(&mut self, preset: ModPreset) {
        self.hidden = preset.hidden();
        self.flashlight = preset.flashlight();
    }

    /// Preset matching the current modifier flags
    pub fn preset(&self) -> ModPreset {
        match (self.hidden, self.flashlight) {
            (false, false) => ModPreset::NoMod,
            (true, false) => ModPreset::Hidden,
            (false, true) => ModPreset::Flashlight,
            (true, true) => ModPreset::HiddenFlashlight,
        }
    }

    /// Reject settings that would poison the decay chain
    pub fn validate(&self) -> Result<()> {
        if !self.approach_rate.is_finite() {
            return Err(ReadingError::NonFiniteApproachRate(self.approach_rate));
        }
        if !self.section_length.is_finite() || self.section_length <= 0.0 {
            return Err(ReadingError::InvalidSectionLength(self.section_length));
        }
        if !(0.0..=11.0).contains(&self.approach_rate) {
            log::warn!(
                "Approach rate {} is outside the usual 0-11 range",
                self.approach_rate
            );
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
