//! record.rs
//!
//! The HealthRecord value object and the small typed pieces it is built from.
//! Records serialize to the flat JSON shape the dashboard consumes: dates as
//! `YYYY-MM-DD`, slots as `HH:00`, blood pressure as `"systolic/diastolic"`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Hour-of-day a record was sampled at. Only even hours are generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u8);

impl TimeSlot {
    /// The 12 slots generated for every day, in ascending order.
    pub const ALL: [TimeSlot; 12] = [
        TimeSlot(0),
        TimeSlot(2),
        TimeSlot(4),
        TimeSlot(6),
        TimeSlot(8),
        TimeSlot(10),
        TimeSlot(12),
        TimeSlot(14),
        TimeSlot(16),
        TimeSlot(18),
        TimeSlot(20),
        TimeSlot(22),
    ];

    /// Returns `None` for hours outside 0..24.
    pub fn new(hour: u8) -> Option<Self> {
        (hour < 24).then_some(Self(hour))
    }

    pub fn hour(self) -> u8 {
        self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRecordError {
    #[error("Invalid time slot: {0:?}")]
    TimeSlot(String),

    #[error("Invalid blood pressure: {0:?}")]
    BloodPressure(String),
}

impl FromStr for TimeSlot {
    type Err = ParseRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseRecordError::TimeSlot(s.to_string());
        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        if minute != "00" || hour.len() != 2 {
            return Err(invalid());
        }
        hour.parse::<u8>()
            .ok()
            .and_then(TimeSlot::new)
            .ok_or_else(invalid)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// ECG classification attached to a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ecg {
    Normal,
    Irregular,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepQuality {
    #[default]
    Good,
    Moderate,
}

impl SleepQuality {
    pub fn as_str(self) -> &'static str {
        match self {
            SleepQuality::Good => "Good",
            SleepQuality::Moderate => "Moderate",
        }
    }
}

/// Blood pressure reading in mmHg.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BloodPressure {
    pub systolic: u16,
    pub diastolic: u16,
}

impl BloodPressure {
    pub const fn new(systolic: u16, diastolic: u16) -> Self {
        Self { systolic, diastolic }
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

impl FromStr for BloodPressure {
    type Err = ParseRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseRecordError::BloodPressure(s.to_string());
        let (systolic, diastolic) = s.split_once('/').ok_or_else(invalid)?;
        Ok(Self {
            systolic: systolic.trim().parse().map_err(|_| invalid())?,
            diastolic: diastolic.trim().parse().map_err(|_| invalid())?,
        })
    }
}

impl Serialize for BloodPressure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BloodPressure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Body composition percentages.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyComposition {
    pub body_fat: f64,
    pub muscle_mass: f64,
    pub water_percentage: f64,
}

/// One synthetic health observation.
///
/// Field order matches the JSON layout the dashboard was built against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub steps: u32,
    pub calories_burned: u32,
    pub oxygen_saturation: u32,
    pub heart_rate: u32,
    pub ecg: Ecg,
    pub body_composition: BodyComposition,
    pub sleep_quality: SleepQuality,
    pub blood_pressure: BloodPressure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_slot_formatting() {
        assert_eq!(TimeSlot::ALL[0].to_string(), "00:00");
        assert_eq!(TimeSlot::ALL[11].to_string(), "22:00");
        assert_eq!("08:00".parse::<TimeSlot>().unwrap().hour(), 8);
        assert!("8:00".parse::<TimeSlot>().is_err());
        assert!("24:00".parse::<TimeSlot>().is_err());
        assert!("08:30".parse::<TimeSlot>().is_err());
        assert!(TimeSlot::new(24).is_none());
    }

    #[test]
    fn test_time_slots_are_even_and_ordered() {
        let hours: Vec<u8> = TimeSlot::ALL.iter().map(|s| s.hour()).collect();
        assert_eq!(hours, (0..24).step_by(2).collect::<Vec<u8>>());
    }

    #[test]
    fn test_blood_pressure_parsing() {
        let bp: BloodPressure = "145/95".parse().unwrap();
        assert_eq!(bp, BloodPressure::new(145, 95));
        assert_eq!(bp.to_string(), "145/95");
        assert!("145-95".parse::<BloodPressure>().is_err());
        assert!("high/95".parse::<BloodPressure>().is_err());
    }

    #[test]
    fn test_record_json_shape() {
        let record = HealthRecord {
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            time: TimeSlot::ALL[8],
            steps: 2100,
            calories_burned: 140,
            oxygen_saturation: 98,
            heart_rate: 133,
            ecg: Ecg::Irregular,
            body_composition: BodyComposition {
                body_fat: 17.5,
                muscle_mass: 38.2,
                water_percentage: 57.1,
            },
            sleep_quality: SleepQuality::Good,
            blood_pressure: BloodPressure::new(145, 95),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["date"], "2025-03-01");
        assert_eq!(value["time"], "16:00");
        assert_eq!(value["ecg"], "Irregular");
        assert_eq!(value["sleep_quality"], "Good");
        assert_eq!(value["blood_pressure"], "145/95");
        assert_eq!(value["body_composition"]["muscle_mass"], 38.2);

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert!(keys.contains(&"calories_burned"));
        assert!(keys.contains(&"oxygen_saturation"));
    }
}
