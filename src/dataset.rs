//! dataset.rs
//!
//! Ordered collection of generated records, serialized under `health_data`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::HealthRecord;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthDataset {
    health_data: Vec<HealthRecord>,
}

impl HealthDataset {
    pub fn new(records: Vec<HealthRecord>) -> Self {
        Self {
            health_data: records,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn records(&self) -> &[HealthRecord] {
        &self.health_data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HealthRecord> {
        self.health_data.iter()
    }

    pub fn len(&self) -> usize {
        self.health_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.health_data.is_empty()
    }

    pub fn into_records(self) -> Vec<HealthRecord> {
        self.health_data
    }

    /// Distinct dates present, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.group_by_date().into_keys().collect()
    }

    /// Records for one date, in slot order.
    pub fn records_on(&self, date: NaiveDate) -> Vec<&HealthRecord> {
        let mut records: Vec<&HealthRecord> =
            self.health_data.iter().filter(|r| r.date == date).collect();
        records.sort_by_key(|r| r.time);
        records
    }

    pub fn group_by_date(&self) -> BTreeMap<NaiveDate, Vec<&HealthRecord>> {
        let mut groups: BTreeMap<NaiveDate, Vec<&HealthRecord>> = BTreeMap::new();
        for record in &self.health_data {
            groups.entry(record.date).or_default().push(record);
        }
        groups
    }
}

impl<'a> IntoIterator for &'a HealthDataset {
    type Item = &'a HealthRecord;
    type IntoIter = std::slice::Iter<'a, HealthRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two days, deliberately out of order, as a hand-edited asset might be.
    const SAMPLE: &str = r#"{
      "health_data": [
        {
          "date": "2025-03-02", "time": "02:00", "steps": 0, "calories_burned": 21,
          "oxygen_saturation": 98, "heart_rate": 52, "ecg": "Normal",
          "body_composition": {"body_fat": 17.5, "muscle_mass": 38.1, "water_percentage": 57.2},
          "sleep_quality": "Good", "blood_pressure": "110/70"
        },
        {
          "date": "2025-03-01", "time": "16:00", "steps": 2400, "calories_burned": 150,
          "oxygen_saturation": 98, "heart_rate": 135, "ecg": "Irregular",
          "body_composition": {"body_fat": 17.4, "muscle_mass": 38.0, "water_percentage": 57.3},
          "sleep_quality": "Good", "blood_pressure": "145/95"
        },
        {
          "date": "2025-03-02", "time": "00:00", "steps": 0, "calories_burned": 23,
          "oxygen_saturation": 98, "heart_rate": 50, "ecg": "Normal",
          "body_composition": {"body_fat": 17.6, "muscle_mass": 38.2, "water_percentage": 57.1},
          "sleep_quality": "Moderate", "blood_pressure": "110/70"
        }
      ]
    }"#;

    #[test]
    fn test_load_static_asset() {
        let dataset = HealthDataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records()[1].blood_pressure.systolic, 145);
    }

    #[test]
    fn test_dates_sorted_and_distinct() {
        let dataset = HealthDataset::from_json_str(SAMPLE).unwrap();
        let dates: Vec<String> = dataset.dates().iter().map(|d| d.to_string()).collect();
        assert_eq!(dates, vec!["2025-03-01", "2025-03-02"]);
    }

    #[test]
    fn test_records_on_sorts_by_slot() {
        let dataset = HealthDataset::from_json_str(SAMPLE).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let times: Vec<String> = dataset.records_on(date).iter().map(|r| r.time.to_string()).collect();
        assert_eq!(times, vec!["00:00", "02:00"]);

        let absent = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert!(dataset.records_on(absent).is_empty());
    }

    #[test]
    fn test_pretty_output_uses_two_space_indent() {
        let dataset = HealthDataset::from_json_str(SAMPLE).unwrap();
        let json = dataset.to_json_pretty().unwrap();
        assert!(json.starts_with("{\n  \"health_data\": [\n    {\n      \"date\": \"2025-03-02\""));
    }

    #[test]
    fn test_empty_dataset_serializes_empty_array() {
        let json = serde_json::to_value(HealthDataset::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "health_data": [] }));
    }
}
