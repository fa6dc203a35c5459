// Vitalsynth - Synthetic health-metrics records for dashboard development

pub mod analysis;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod record;
pub mod rules;
pub mod summary;

pub use analysis::{analyze_cancellable, AnalysisError, CannedAnalyzer, HealthAnalysis, HealthSummary};
pub use dataset::HealthDataset;
pub use error::GenerateError;
pub use generator::{generate, parse_calendar_date, Synthesizer};
pub use record::{BloodPressure, BodyComposition, Ecg, HealthRecord, SleepQuality, TimeSlot};
pub use rules::{ConfigError, GeneratorConfig, SlotRule, ValueRange};
pub use summary::{series, DailySummary, Metric, MetricValue, SeriesPoint};
