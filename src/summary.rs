//! summary.rs
//!
//! Per-day aggregates and per-metric series, the derived values a dashboard
//! shows for a selected date and metric.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::HealthDataset;
use crate::record::{HealthRecord, TimeSlot};

/// Totals and rounded means for one day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub record_count: usize,
    pub total_steps: u64,
    pub total_calories: u64,
    pub avg_heart_rate: u32,
    pub avg_oxygen_saturation: u32,
}

impl DailySummary {
    /// `None` when there are no records to summarize.
    pub fn from_records(date: NaiveDate, records: &[&HealthRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let total_steps = records.iter().map(|r| u64::from(r.steps)).sum();
        let total_calories = records.iter().map(|r| u64::from(r.calories_burned)).sum();
        let heart_rate_sum: u64 = records.iter().map(|r| u64::from(r.heart_rate)).sum();
        let oxygen_sum: u64 = records.iter().map(|r| u64::from(r.oxygen_saturation)).sum();

        Some(Self {
            date,
            record_count: records.len(),
            total_steps,
            total_calories,
            avg_heart_rate: rounded_mean(heart_rate_sum, records.len()),
            avg_oxygen_saturation: rounded_mean(oxygen_sum, records.len()),
        })
    }
}

fn rounded_mean(sum: u64, count: usize) -> u32 {
    (sum as f64 / count as f64).round() as u32
}

impl HealthDataset {
    pub fn daily_summary(&self, date: NaiveDate) -> Option<DailySummary> {
        DailySummary::from_records(date, &self.records_on(date))
    }

    /// One summary per date, ascending.
    pub fn daily_summaries(&self) -> Vec<DailySummary> {
        self.group_by_date()
            .into_iter()
            .filter_map(|(date, records)| DailySummary::from_records(date, &records))
            .collect()
    }
}

/// A metric that can be selected for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[default]
    HeartRate,
    Steps,
    Calories,
    OxygenSaturation,
    SleepQuality,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::HeartRate,
        Metric::Steps,
        Metric::Calories,
        Metric::OxygenSaturation,
        Metric::SleepQuality,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Metric::HeartRate => "Heart Rate",
            Metric::Steps => "Steps",
            Metric::Calories => "Calories",
            Metric::OxygenSaturation => "Oxygen",
            Metric::SleepQuality => "Sleep",
        }
    }

    pub fn value_of(self, record: &HealthRecord) -> MetricValue {
        match self {
            Metric::HeartRate => MetricValue::Number(f64::from(record.heart_rate)),
            Metric::Steps => MetricValue::Number(f64::from(record.steps)),
            Metric::Calories => MetricValue::Number(f64::from(record.calories_burned)),
            Metric::OxygenSaturation => MetricValue::Number(f64::from(record.oxygen_saturation)),
            Metric::SleepQuality => MetricValue::Label(record.sleep_quality.as_str().to_string()),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown metric: {0:?}")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "heartrate" => Ok(Metric::HeartRate),
            "steps" => Ok(Metric::Steps),
            "calories" | "caloriesburned" => Ok(Metric::Calories),
            "oxygen" | "oxygensaturation" => Ok(Metric::OxygenSaturation),
            "sleep" | "sleepquality" => Ok(Metric::SleepQuality),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Label(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: TimeSlot,
    pub value: MetricValue,
}

/// Chart points for one metric on one date, in slot order.
pub fn series(dataset: &HealthDataset, date: NaiveDate, metric: Metric) -> Vec<SeriesPoint> {
    dataset
        .records_on(date)
        .into_iter()
        .map(|record| SeriesPoint {
            time: record.time,
            value: metric.value_of(record),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dataset() -> HealthDataset {
        generate("2025-03-01", "2025-03-03", &mut StdRng::seed_from_u64(11)).unwrap()
    }

    #[test]
    fn test_daily_summary_matches_records() {
        let dataset = dataset();
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let summary = dataset.daily_summary(date).unwrap();
        let records = dataset.records_on(date);

        assert_eq!(summary.record_count, 12);
        assert_eq!(
            summary.total_steps,
            records.iter().map(|r| u64::from(r.steps)).sum::<u64>()
        );
        assert_eq!(
            summary.total_calories,
            records.iter().map(|r| u64::from(r.calories_burned)).sum::<u64>()
        );
        assert_eq!(summary.avg_oxygen_saturation, 98);
        assert!((50..=140).contains(&summary.avg_heart_rate));
    }

    #[test]
    fn test_missing_day_has_no_summary() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert!(dataset().daily_summary(date).is_none());
        assert!(HealthDataset::default().daily_summaries().is_empty());
    }

    #[test]
    fn test_summaries_cover_each_day_in_order() {
        let summaries = dataset().daily_summaries();
        let dates: Vec<String> = summaries.iter().map(|s| s.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-03-01", "2025-03-02", "2025-03-03"]);
    }

    #[test]
    fn test_rounded_mean_rounds_half_up() {
        assert_eq!(rounded_mean(145, 2), 73);
        assert_eq!(rounded_mean(144, 2), 72);
        assert_eq!(rounded_mean(10, 3), 3);
    }

    #[test]
    fn test_metric_names() {
        assert_eq!("Heart Rate".parse::<Metric>().unwrap(), Metric::HeartRate);
        assert_eq!("heart_rate".parse::<Metric>().unwrap(), Metric::HeartRate);
        assert_eq!("OXYGEN".parse::<Metric>().unwrap(), Metric::OxygenSaturation);
        assert_eq!("calories-burned".parse::<Metric>().unwrap(), Metric::Calories);
        assert!("blood sugar".parse::<Metric>().is_err());
        for metric in Metric::ALL {
            assert_eq!(metric.display_name().parse::<Metric>().unwrap(), metric);
        }
        assert_eq!(Metric::default(), Metric::HeartRate);
    }

    #[test]
    fn test_series_for_selected_metric() {
        let dataset = dataset();
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let steps = series(&dataset, date, Metric::Steps);
        assert_eq!(steps.len(), 12);
        assert_eq!(steps[0].value, MetricValue::Number(0.0));
        assert_eq!(steps[0].time.to_string(), "00:00");

        let sleep = series(&dataset, date, Metric::SleepQuality);
        assert!(sleep.iter().all(|p| p.value == MetricValue::Label("Good".into())));

        let json = serde_json::to_value(&steps[8]).unwrap();
        assert_eq!(json["time"], "16:00");
        assert!(json["value"].is_number());
    }
}
