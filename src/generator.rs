//! generator.rs
//!
//! The record synthesizer: one record per even hour for every day in an
//! inclusive date range, values drawn from the hour's slot rule with a little
//! body-composition jitter on top.
//!
//! The random source is always passed in. A seeded `StdRng` reproduces a
//! dataset exactly; concurrent callers should each bring their own.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rand::Rng;

use crate::dataset::HealthDataset;
use crate::error::GenerateError;
use crate::record::{BodyComposition, Ecg, HealthRecord, TimeSlot};
use crate::rules::{BodyCompositionBaseline, GeneratorConfig, SlotRule};

/// Parse a calendar date, dropping any time-of-day component.
///
/// Accepts `2025-03-01`, `2025-03-01T13:45:00` (optionally with fractional
/// seconds) and full RFC 3339 timestamps.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, GenerateError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime.date());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }

    Err(GenerateError::InvalidDate {
        input: input.to_string(),
    })
}

/// Generate a dataset with the default configuration.
pub fn generate<R: Rng + ?Sized>(
    from: &str,
    to: &str,
    rng: &mut R,
) -> Result<HealthDataset, GenerateError> {
    let config = GeneratorConfig::default();
    Synthesizer::new(&config).generate_str(from, to, rng)
}

pub struct Synthesizer<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Synthesizer<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Parse both bounds, then generate. Only unparseable dates are errors.
    pub fn generate_str<R: Rng + ?Sized>(
        &self,
        from: &str,
        to: &str,
        rng: &mut R,
    ) -> Result<HealthDataset, GenerateError> {
        let from = parse_calendar_date(from)?;
        let to = parse_calendar_date(to)?;
        Ok(self.generate(from, to, rng))
    }

    /// Records for every day in `from..=to`. A reversed range is empty.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        rng: &mut R,
    ) -> HealthDataset {
        if to < from {
            log::debug!("Reversed range {} > {}, producing no records", from, to);
            return HealthDataset::default();
        }

        let mut records = Vec::new();
        for date in from.iter_days().take_while(|date| *date <= to) {
            for slot in TimeSlot::ALL {
                records.push(self.generate_record(date, slot, rng));
            }
        }

        log::info!(
            "Generated {} records for {} through {}",
            records.len(),
            from,
            to
        );
        HealthDataset::new(records)
    }

    pub fn generate_record<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        slot: TimeSlot,
        rng: &mut R,
    ) -> HealthRecord {
        let rule = SlotRule::for_hour(slot.hour());

        let steps = rule.steps.sample(rng);
        let heart_rate = rule.heart_rate.sample(rng);
        let calories_burned = rule.calories.sample(rng);

        let ecg = if rule.checks_ecg && heart_rate > self.config.irregular_heart_rate_threshold {
            Ecg::Irregular
        } else {
            Ecg::Normal
        };

        HealthRecord {
            date,
            time: slot,
            steps,
            calories_burned,
            oxygen_saturation: self.config.oxygen_saturation,
            heart_rate,
            ecg,
            body_composition: self.body_composition(rng),
            sleep_quality: self.config.sleep_quality,
            blood_pressure: rule.blood_pressure,
        }
    }

    fn body_composition<R: Rng + ?Sized>(&self, rng: &mut R) -> BodyComposition {
        let BodyCompositionBaseline {
            body_fat,
            muscle_mass,
            water_percentage,
        } = self.config.body_composition_baseline;
        let jitter = self.config.body_composition_jitter;

        BodyComposition {
            body_fat: jittered(body_fat, jitter, rng),
            muscle_mass: jittered(muscle_mass, jitter, rng),
            water_percentage: jittered(water_percentage, jitter, rng),
        }
    }
}

/// `baseline + U[-width/2, width/2)`, rounded to one decimal place.
fn jittered<R: Rng + ?Sized>(baseline: f64, width: f64, rng: &mut R) -> f64 {
    let offset = (rng.gen::<f64>() - 0.5) * width;
    round_one_decimal(baseline + offset)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
