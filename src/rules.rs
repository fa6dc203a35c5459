//! rules.rs
//!
//! Slot rules (hour-of-day -> value ranges) and the tunable constants the
//! synthesizer reads from `GeneratorConfig`.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::{BloodPressure, SleepQuality};

/// Default heart rate above which a reading is flagged `Irregular`.
pub const IRREGULAR_HEART_RATE_BPM: u32 = 130;
pub const OXYGEN_SATURATION_PERCENT: u32 = 98;
/// Full width of the symmetric body-composition jitter.
pub const BODY_COMPOSITION_JITTER: f64 = 0.2;

/// An integer value that is either fixed or drawn uniformly from `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueRange {
    Fixed(u32),
    Uniform { min: u32, max: u32 },
}

impl ValueRange {
    pub const fn uniform(min: u32, max: u32) -> Self {
        ValueRange::Uniform { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        match *self {
            ValueRange::Fixed(value) => value,
            ValueRange::Uniform { min, max } if max <= min => min,
            ValueRange::Uniform { min, max } => rng.gen_range(min..max),
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        match *self {
            ValueRange::Fixed(fixed) => value == fixed,
            ValueRange::Uniform { min, max } if max <= min => value == min,
            ValueRange::Uniform { min, max } => (min..max).contains(&value),
        }
    }
}

/// How one hour-of-day slot is synthesized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotRule {
    pub label: &'static str,
    /// Whether a heart rate above the configured threshold marks the ECG
    /// `Irregular`. Only the exercise slot sets this.
    pub checks_ecg: bool,
    pub steps: ValueRange,
    pub heart_rate: ValueRange,
    pub calories: ValueRange,
    pub blood_pressure: BloodPressure,
}

const SLEEP: SlotRule = SlotRule {
    label: "sleep",
    checks_ecg: false,
    steps: ValueRange::Fixed(0),
    heart_rate: ValueRange::uniform(50, 55),
    calories: ValueRange::uniform(20, 25),
    blood_pressure: BloodPressure::new(110, 70),
};

const FALLBACK: SlotRule = SlotRule {
    label: "fallback",
    checks_ecg: false,
    steps: ValueRange::Fixed(500),
    heart_rate: ValueRange::Fixed(75),
    calories: ValueRange::Fixed(80),
    blood_pressure: BloodPressure::new(120, 80),
};

impl SlotRule {
    /// Look up the rule for an hour of the day. Hours without an entry
    /// (odd hours, anything past 23) get the fallback rule.
    pub fn for_hour(hour: u8) -> SlotRule {
        match hour {
            0 | 2 | 4 => SLEEP,
            6 => SlotRule {
                label: "waking",
                checks_ecg: false,
                steps: ValueRange::uniform(100, 200),
                heart_rate: ValueRange::uniform(65, 70),
                calories: ValueRange::uniform(40, 50),
                blood_pressure: BloodPressure::new(115, 75),
            },
            8 => SlotRule {
                label: "morning activity",
                checks_ecg: false,
                steps: ValueRange::uniform(600, 1000),
                heart_rate: ValueRange::uniform(70, 80),
                calories: ValueRange::uniform(80, 100),
                blood_pressure: BloodPressure::new(120, 80),
            },
            10 => SlotRule {
                label: "mid-morning",
                checks_ecg: false,
                steps: ValueRange::uniform(1000, 1500),
                heart_rate: ValueRange::uniform(80, 85),
                calories: ValueRange::uniform(120, 150),
                blood_pressure: BloodPressure::new(120, 80),
            },
            12 => SlotRule {
                label: "noon",
                checks_ecg: false,
                steps: ValueRange::uniform(500, 700),
                heart_rate: ValueRange::Fixed(75),
                calories: ValueRange::uniform(80, 100),
                blood_pressure: BloodPressure::new(118, 78),
            },
            14 => SlotRule {
                label: "sedentary",
                checks_ecg: false,
                steps: ValueRange::uniform(300, 500),
                heart_rate: ValueRange::Fixed(70),
                calories: ValueRange::uniform(50, 60),
                blood_pressure: BloodPressure::new(117, 76),
            },
            16 => SlotRule {
                label: "exercise peak",
                checks_ecg: true,
                steps: ValueRange::uniform(1500, 3000),
                heart_rate: ValueRange::uniform(100, 140),
                calories: ValueRange::uniform(120, 170),
                blood_pressure: BloodPressure::new(145, 95),
            },
            18 => SlotRule {
                label: "evening activity",
                checks_ecg: false,
                steps: ValueRange::uniform(800, 1200),
                heart_rate: ValueRange::uniform(80, 90),
                calories: ValueRange::uniform(110, 130),
                blood_pressure: BloodPressure::new(120, 80),
            },
            20 => SlotRule {
                label: "wind-down",
                checks_ecg: false,
                steps: ValueRange::uniform(300, 500),
                heart_rate: ValueRange::Fixed(70),
                calories: ValueRange::uniform(60, 70),
                blood_pressure: BloodPressure::new(118, 78),
            },
            22 => SlotRule {
                label: "pre-sleep",
                checks_ecg: false,
                steps: ValueRange::uniform(100, 200),
                heart_rate: ValueRange::uniform(65, 70),
                calories: ValueRange::uniform(40, 50),
                blood_pressure: BloodPressure::new(120, 80),
            },
            _ => FALLBACK,
        }
    }
}

/// Baseline percentages the body-composition jitter is applied to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyCompositionBaseline {
    pub body_fat: f64,
    pub muscle_mass: f64,
    pub water_percentage: f64,
}

impl Default for BodyCompositionBaseline {
    fn default() -> Self {
        Self {
            body_fat: 17.5,
            muscle_mass: 38.1,
            water_percentage: 57.2,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Body composition jitter must be finite and non-negative, got {0}")]
    InvalidJitter(f64),
}

/// Constants the synthesizer reads. Every field is optional in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub oxygen_saturation: u32,
    pub sleep_quality: SleepQuality,
    /// Applied only to slot rules with `checks_ecg` set (16:00).
    pub irregular_heart_rate_threshold: u32,
    pub body_composition_baseline: BodyCompositionBaseline,
    pub body_composition_jitter: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            oxygen_saturation: OXYGEN_SATURATION_PERCENT,
            sleep_quality: SleepQuality::Good,
            irregular_heart_rate_threshold: IRREGULAR_HEART_RATE_BPM,
            body_composition_baseline: BodyCompositionBaseline::default(),
            body_composition_jitter: BODY_COMPOSITION_JITTER,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded generator config from {}", path.as_ref().display());
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let jitter = self.body_composition_jitter;
        if !jitter.is_finite() || jitter < 0.0 {
            return Err(ConfigError::InvalidJitter(jitter));
        }
        Ok(())
    }
}
