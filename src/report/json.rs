//! JSON renderer for benchmark reports.
//!
//! [`JsonRenderer`] serializes a [`Report`] through
//! [`ReportSnapshot`](crate::snapshot::ReportSnapshot).
//!
//! # Feature Flag
//!
//! This module requires the `json` feature:
//!
//! ```toml
//! [dependencies]
//! contesa = { version = "0.1", features = ["json"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use contesa::benchmark::Benchmark;
//! use contesa::report::json::JsonRenderer;
//!
//! let report = Benchmark::default().run();
//! let json = JsonRenderer::new().pretty(true).to_json(&report)?;
//! // {
//! //   "reductions": [
//! //     { "strategy": "Sequential", "description": "single-thread sum", "elapsed_ns": 812344, "sum": 49502311 },
//! //     ...
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use crate::report::Report;
use crate::snapshot::ReportSnapshot;

/// Configuration for the JSON renderer.
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Whether to pretty-print the JSON output.
    pub pretty: bool,
    /// Whether to include a timestamp in the output.
    pub include_timestamp: bool,
}

/// Serializes reports to JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    config: JsonConfig,
}

impl JsonRenderer {
    /// Creates a renderer producing compact JSON without a timestamp.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer with the specified configuration.
    pub fn with_config(config: JsonConfig) -> Self {
        Self { config }
    }

    /// Enables or disables pretty-printing.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.config.pretty = enabled;
        self
    }

    /// Enables or disables timestamp inclusion.
    pub fn include_timestamp(mut self, enabled: bool) -> Self {
        self.config.include_timestamp = enabled;
        self
    }

    /// Builds the snapshot that [`to_json`](Self::to_json) serializes.
    pub fn collect(&self, report: &Report) -> ReportSnapshot {
        let snapshot = ReportSnapshot::from(report);
        if self.config.include_timestamp {
            snapshot.with_timestamp(current_timestamp_ms())
        } else {
            snapshot
        }
    }

    /// Serializes the report to a JSON string.
    pub fn to_json(&self, report: &Report) -> Result<String, serde_json::Error> {
        let snapshot = self.collect(report);
        if self.config.pretty {
            serde_json::to_string_pretty(&snapshot)
        } else {
            serde_json::to_string(&snapshot)
        }
    }
}

/// Returns the current timestamp in milliseconds since Unix epoch.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_report;

    #[test]
    fn test_json_shape() {
        let json = JsonRenderer::new().to_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("timestamp_ms").is_none());
        assert_eq!(value["reductions"][0]["strategy"], "Sequential");
        assert_eq!(value["reductions"][0]["sum"], 15);
        assert!(value["reductions"][0].get("error").is_none());
        assert_eq!(value["contention"][0]["style"], "Threads");
        assert_eq!(value["contention"][0]["average_ns"], 300);
        assert_eq!(value["contention"][1]["final_value"], 6);
    }

    #[test]
    fn test_json_roundtrip_snapshot() {
        let renderer = JsonRenderer::new();
        let report = sample_report();
        let json = renderer.to_json(&report).unwrap();
        let parsed: ReportSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, renderer.collect(&report));
    }

    #[test]
    fn test_pretty() {
        let json = JsonRenderer::new()
            .pretty(true)
            .to_json(&sample_report())
            .unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("  "));
    }

    #[test]
    fn test_timestamp() {
        let json = JsonRenderer::new()
            .include_timestamp(true)
            .to_json(&Report::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["timestamp_ms"].as_u64().unwrap() > 0);
        assert_eq!(value["reductions"], serde_json::json!([]));
    }
}
