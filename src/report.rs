//! Benchmark report model and renderers.
//!
//! A [`Report`] holds one [`ReductionOutcome`] per reduction strategy and one
//! [`Measurement`] per counter strategy and round style. It renders as:
//!
//! - plain lines, through [`Report::render_plain`] or `Display`,
//! - tables, through [`table::TableRenderer`] (feature `table`),
//! - JSON, through [`json::JsonRenderer`] (feature `json`).
//!
//! # Plain format
//!
//! ```text
//! Sequential (single-thread sum) elapsed ns: 812344
//! ...
//! Sequential sum: 49502311
//! ...
//!
//! Contention, fresh threads per round (average ns per round):
//! StripedCounter: 301234
//! ...
//! ```

use std::fmt::Display;
use std::time::Duration;

use crate::harness::{Measurement, RoundStyle};

#[cfg(feature = "table")]
pub mod table;

#[cfg(feature = "json")]
pub mod json;

/// Result of running one reduction strategy once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReductionOutcome {
    /// Strategy name.
    pub strategy: String,
    /// Strategy description used in headings.
    pub description: String,
    /// Wall-clock time of the reduction.
    pub elapsed: Duration,
    /// The computed sum, or the error message if the strategy failed.
    pub sum: Result<i32, String>,
}

impl ReductionOutcome {
    /// Returns `"name (description)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.strategy, self.description)
    }
}

/// Everything one benchmark run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Reduction results, in strategy order.
    pub reductions: Vec<ReductionOutcome>,
    /// Contention results, grouped by round style, then counter strategy.
    pub contention: Vec<Measurement>,
}

impl Report {
    /// Returns the contention measurements taken in `style`.
    pub fn measurements(&self, style: RoundStyle) -> impl Iterator<Item = &Measurement> {
        self.contention.iter().filter(move |m| m.style == style)
    }

    /// Returns `true` when every reduction agrees with the first one and
    /// every counter ended at the value its completed actors imply.
    pub fn is_consistent(&self) -> bool {
        let mut sums = self.reductions.iter().map(|r| &r.sum);
        let sums_agree = match sums.next() {
            Some(Ok(first)) => sums.all(|s| s.as_ref() == Ok(first)),
            Some(Err(_)) => false,
            None => true,
        };
        sums_agree && self.contention.iter().all(Measurement::is_consistent)
    }

    /// Returns the report as plain text lines.
    pub fn plain_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for outcome in &self.reductions {
            lines.push(format!(
                "{} elapsed ns: {}",
                outcome.label(),
                outcome.elapsed.as_nanos()
            ));
        }
        for outcome in &self.reductions {
            match &outcome.sum {
                Ok(sum) => lines.push(format!("{} sum: {}", outcome.strategy, sum)),
                Err(err) => lines.push(format!("{} failed: {}", outcome.strategy, err)),
            }
        }

        for style in RoundStyle::ALL {
            let mut measurements = self.measurements(style).peekable();
            if measurements.peek().is_none() {
                continue;
            }
            lines.push(String::new());
            lines.push(format!(
                "Contention, {} (average ns per round):",
                style.title()
            ));
            for m in measurements {
                lines.push(format!("{}: {}", m.strategy, m.average().as_nanos()));
            }
        }

        lines
    }

    /// Returns the plain report as a single string.
    pub fn render_plain(&self) -> String {
        self.plain_lines().join("\n")
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.plain_lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_report() -> Report {
        Report {
            reductions: vec![
                ReductionOutcome {
                    strategy: "Sequential".to_string(),
                    description: "single-thread sum".to_string(),
                    elapsed: Duration::from_nanos(1_500),
                    sum: Ok(15),
                },
                ReductionOutcome {
                    strategy: "ForkJoinRange".to_string(),
                    description: "fork-join over index ranges".to_string(),
                    elapsed: Duration::from_nanos(900),
                    sum: Ok(15),
                },
            ],
            contention: vec![
                Measurement {
                    strategy: "AtomicCounter".to_string(),
                    style: RoundStyle::Threads,
                    rounds: 2,
                    actors: 3,
                    total: Duration::from_nanos(600),
                    failures: 0,
                    final_value: 6,
                },
                Measurement {
                    strategy: "AtomicCounter".to_string(),
                    style: RoundStyle::Pooled,
                    rounds: 2,
                    actors: 3,
                    total: Duration::from_nanos(200),
                    failures: 0,
                    final_value: 6,
                },
            ],
        }
    }

    #[test]
    fn test_plain_lines_order() {
        let lines = sample_report().plain_lines();
        assert_eq!(
            lines,
            vec![
                "Sequential (single-thread sum) elapsed ns: 1500",
                "ForkJoinRange (fork-join over index ranges) elapsed ns: 900",
                "Sequential sum: 15",
                "ForkJoinRange sum: 15",
                "",
                "Contention, fresh threads per round (average ns per round):",
                "AtomicCounter: 300",
                "",
                "Contention, bounded worker pool per round (average ns per round):",
                "AtomicCounter: 100",
            ]
        );
    }

    #[test]
    fn test_failed_reduction_line() {
        let mut report = sample_report();
        report.reductions[1].sum = Err("pool error".to_string());
        assert!(report
            .plain_lines()
            .contains(&"ForkJoinRange failed: pool error".to_string()));
        assert!(!report.is_consistent());
    }

    #[test]
    fn test_consistency() {
        let mut report = sample_report();
        assert!(report.is_consistent());
        report.contention[0].final_value = 5;
        assert!(!report.is_consistent());
        assert!(Report::default().is_consistent());
    }

    #[test]
    fn test_display_matches_plain() {
        let report = sample_report();
        assert_eq!(format!("{}", report), report.render_plain() + "\n");
    }
}
