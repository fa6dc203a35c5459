//! analysis.rs
//!
//! Asynchronous health analysis behind a trait. The only implementation is
//! `CannedAnalyzer`, which waits a configurable delay and returns fixed text.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::oneshot;

use crate::summary::DailySummary;

pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_secs(2);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No records to analyze for {0}")]
    NoData(NaiveDate),

    #[error("Analysis cancelled")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricNarratives {
    pub heart_rate: String,
    pub steps: String,
    pub sleep: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub summary: MetricNarratives,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[async_trait]
pub trait HealthAnalysis: Send + Sync {
    async fn analyze(&self, day: &DailySummary) -> Result<HealthSummary, AnalysisError>;
}

/// Returns the same summary for every day after an artificial delay.
#[derive(Clone, Debug)]
pub struct CannedAnalyzer {
    delay: Duration,
}

impl CannedAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn canned_summary() -> HealthSummary {
        HealthSummary {
            summary: MetricNarratives {
                heart_rate: "Your heart rate has been within normal range over the past 24 hours, \
                             with a slight elevation during afternoon activities."
                    .to_string(),
                steps: "You've reached your daily step goal of 8,000 steps. \
                        Great job maintaining your activity level!"
                    .to_string(),
                sleep: "Sleep quality has been consistently good with one moderate period. \
                        Your sleep pattern is regular and healthy."
                    .to_string(),
            },
            recommendations: vec![
                "Continue your current activity level to maintain cardiovascular health".to_string(),
                "Consider adding some strength training to complement your walking routine"
                    .to_string(),
                "Maintain your consistent sleep schedule for optimal rest".to_string(),
            ],
            warning: Some(
                "No significant health concerns detected based on current metrics.".to_string(),
            ),
        }
    }
}

impl Default for CannedAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYSIS_DELAY)
    }
}

#[async_trait]
impl HealthAnalysis for CannedAnalyzer {
    async fn analyze(&self, day: &DailySummary) -> Result<HealthSummary, AnalysisError> {
        if day.record_count == 0 {
            return Err(AnalysisError::NoData(day.date));
        }
        log::debug!("Analyzing {} ({} records)", day.date, day.record_count);
        tokio::time::sleep(self.delay).await;
        Ok(Self::canned_summary())
    }
}

/// Run an analysis until it finishes or `cancel` fires.
///
/// Dropping the sender counts as cancellation.
pub async fn analyze_cancellable(
    analyzer: &dyn HealthAnalysis,
    day: &DailySummary,
    cancel: oneshot::Receiver<()>,
) -> Result<HealthSummary, AnalysisError> {
    tokio::select! {
        result = analyzer.analyze(day) => result,
        _ = cancel => {
            log::info!("Analysis for {} cancelled", day.date);
            Err(AnalysisError::Cancelled)
        }
    }
}
