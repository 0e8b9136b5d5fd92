//! Snapshot types for serializing benchmark reports.
//!
//! A [`Report`] carries `Duration`s and `Result`s; the snapshot types
//! flatten those into plain numbers and optional fields so any serde format
//! can carry them.
//!
//! # Feature Flag
//!
//! This module requires the `serde` feature:
//!
//! ```toml
//! [dependencies]
//! contesa = { version = "0.1", features = ["serde"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use contesa::benchmark::Benchmark;
//! use contesa::snapshot::ReportSnapshot;
//!
//! let report = Benchmark::default().run();
//! let snapshot = ReportSnapshot::from(&report);
//!
//! let json = serde_json::to_string(&snapshot).unwrap();
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::harness::{Measurement, RoundStyle};
use crate::report::{ReductionOutcome, Report};

/// Saturating conversion of a duration to whole nanoseconds.
fn nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

/// One reduction strategy's result.
///
/// Exactly one of `sum` and `error` is present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReductionSnapshot {
    /// Strategy name.
    pub strategy: String,
    /// Strategy description.
    pub description: String,
    /// Wall-clock time in nanoseconds.
    pub elapsed_ns: u64,
    /// The computed sum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<i32>,
    /// The failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ReductionOutcome> for ReductionSnapshot {
    fn from(outcome: &ReductionOutcome) -> Self {
        Self {
            strategy: outcome.strategy.clone(),
            description: outcome.description.clone(),
            elapsed_ns: nanos(outcome.elapsed),
            sum: outcome.sum.as_ref().ok().copied(),
            error: outcome.sum.as_ref().err().cloned(),
        }
    }
}

/// One counter strategy measured in one round style.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeasurementSnapshot {
    /// Counter strategy name.
    pub strategy: String,
    /// Round style.
    pub style: RoundStyle,
    /// Number of rounds.
    pub rounds: u32,
    /// Actors per round.
    pub actors: usize,
    /// Accumulated actor time in nanoseconds.
    pub total_ns: u64,
    /// Accumulated actor time divided by the number of rounds.
    pub average_ns: u64,
    /// Actors that did not complete.
    pub failures: usize,
    /// Counter value after the last round.
    pub final_value: i64,
}

impl From<&Measurement> for MeasurementSnapshot {
    fn from(m: &Measurement) -> Self {
        Self {
            strategy: m.strategy.clone(),
            style: m.style,
            rounds: m.rounds,
            actors: m.actors,
            total_ns: nanos(m.total),
            average_ns: nanos(m.average()),
            failures: m.failures,
            final_value: m.final_value,
        }
    }
}

/// A whole benchmark run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSnapshot {
    /// Optional timestamp in milliseconds since Unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,
    /// Reduction results, in strategy order.
    pub reductions: Vec<ReductionSnapshot>,
    /// Contention results, grouped by round style.
    pub contention: Vec<MeasurementSnapshot>,
}

impl ReportSnapshot {
    /// Attaches a timestamp to the snapshot.
    pub fn with_timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = Some(timestamp_ms);
        self
    }

    /// Finds a reduction by strategy name.
    pub fn reduction(&self, strategy: &str) -> Option<&ReductionSnapshot> {
        self.reductions.iter().find(|r| r.strategy == strategy)
    }

    /// Finds a measurement by strategy name and round style.
    pub fn measurement(&self, strategy: &str, style: RoundStyle) -> Option<&MeasurementSnapshot> {
        self.contention
            .iter()
            .find(|m| m.strategy == strategy && m.style == style)
    }
}

impl From<&Report> for ReportSnapshot {
    fn from(report: &Report) -> Self {
        Self {
            timestamp_ms: None,
            reductions: report.reductions.iter().map(ReductionSnapshot::from).collect(),
            contention: report.contention.iter().map(MeasurementSnapshot::from).collect(),
        }
    }
}
