//! Table renderer for benchmark reports.
//!
//! [`TableRenderer`] renders a [`Report`] as two tables built with the
//! `tabled` crate: one row per reduction strategy, then one row per counter
//! strategy and round style.
//!
//! # Feature Flag
//!
//! This module requires the `table` feature:
//!
//! ```toml
//! [dependencies]
//! contesa = { version = "0.1", features = ["table"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use contesa::benchmark::Benchmark;
//! use contesa::report::table::{TableRenderer, TableStyle};
//!
//! let report = Benchmark::default().run();
//! println!("{}", TableRenderer::new().with_style(TableStyle::Sharp).render(&report));
//! // Reductions
//! // ┌───────────────┬────────────────────────────┬────────────┬──────────┐
//! // │ Strategy      │ Description                │ Elapsed ns │ Sum      │
//! // ├───────────────┼────────────────────────────┼────────────┼──────────┤
//! // │ Sequential    │ single-thread sum          │ 812344     │ 49502311 │
//! // ...
//! ```

use tabled::{settings::Style, Table, Tabled};

use crate::harness::Measurement;
use crate::report::{ReductionOutcome, Report};

/// Available table styles for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// ASCII table with simple characters: +, -, |
    Ascii,
    /// Modern rounded corners (default)
    #[default]
    Rounded,
    /// Sharp corners with box-drawing characters
    Sharp,
    /// Modern style with clean lines
    Modern,
    /// GitHub-flavored Markdown table
    Markdown,
    /// No borders, just spacing
    Blank,
}

/// Configuration for the table renderer.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// The style to use for rendering.
    pub style: TableStyle,
    /// Whether to show the header row.
    pub show_header: bool,
    /// Whether to print a title line above each table.
    pub show_titles: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            style: TableStyle::default(),
            show_header: true,
            show_titles: true,
        }
    }
}

#[derive(Tabled)]
struct ReductionRow {
    #[tabled(rename = "Strategy")]
    strategy: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Elapsed ns")]
    elapsed_ns: String,
    #[tabled(rename = "Sum")]
    sum: String,
}

impl From<&ReductionOutcome> for ReductionRow {
    fn from(outcome: &ReductionOutcome) -> Self {
        ReductionRow {
            strategy: outcome.strategy.clone(),
            description: outcome.description.clone(),
            elapsed_ns: outcome.elapsed.as_nanos().to_string(),
            sum: match &outcome.sum {
                Ok(sum) => sum.to_string(),
                Err(err) => format!("failed: {}", err),
            },
        }
    }
}

#[derive(Tabled)]
struct ContentionRow {
    #[tabled(rename = "Strategy")]
    strategy: String,
    #[tabled(rename = "Style")]
    style: String,
    #[tabled(rename = "Average ns")]
    average_ns: String,
    #[tabled(rename = "Failures")]
    failures: String,
    #[tabled(rename = "Final value")]
    final_value: String,
}

impl From<&Measurement> for ContentionRow {
    fn from(m: &Measurement) -> Self {
        ContentionRow {
            strategy: m.strategy.clone(),
            style: m.style.to_string(),
            average_ns: m.average().as_nanos().to_string(),
            failures: m.failures.to_string(),
            final_value: m.final_value.to_string(),
        }
    }
}

/// Renders a [`Report`] as formatted tables.
///
/// # Examples
///
/// ```rust,ignore
/// use contesa::report::table::{TableRenderer, TableStyle};
///
/// let renderer = TableRenderer::new()
///     .with_style(TableStyle::Markdown)
///     .with_titles(false);
/// let output = renderer.render(&report);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableRenderer {
    config: TableConfig,
}

impl TableRenderer {
    /// Creates a renderer with rounded borders, headers and titles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer with the specified configuration.
    pub fn with_config(config: TableConfig) -> Self {
        Self { config }
    }

    /// Sets the table style.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.config.style = style;
        self
    }

    /// Sets whether to show the header rows.
    pub fn with_header(mut self, show: bool) -> Self {
        self.config.show_header = show;
        self
    }

    /// Sets whether to print a title line above each table.
    pub fn with_titles(mut self, show: bool) -> Self {
        self.config.show_titles = show;
        self
    }

    fn apply_style(&self, table: &mut Table) {
        match self.config.style {
            TableStyle::Ascii => {
                table.with(Style::ascii());
            }
            TableStyle::Rounded => {
                table.with(Style::rounded());
            }
            TableStyle::Sharp => {
                table.with(Style::sharp());
            }
            TableStyle::Modern => {
                table.with(Style::modern());
            }
            TableStyle::Markdown => {
                table.with(Style::markdown());
            }
            TableStyle::Blank => {
                table.with(Style::blank());
            }
        }

        if !self.config.show_header {
            table.with(tabled::settings::Remove::row(
                tabled::settings::object::Rows::first(),
            ));
        }
    }

    fn section(&self, title: &str, mut table: Table) -> String {
        self.apply_style(&mut table);
        if self.config.show_titles {
            format!("{}\n{}", title, table)
        } else {
            table.to_string()
        }
    }

    /// Renders the reduction results only.
    pub fn render_reductions(&self, report: &Report) -> String {
        let rows: Vec<ReductionRow> = report.reductions.iter().map(ReductionRow::from).collect();
        self.section("Reductions", Table::new(&rows))
    }

    /// Renders the contention results only.
    pub fn render_contention(&self, report: &Report) -> String {
        let rows: Vec<ContentionRow> = report.contention.iter().map(ContentionRow::from).collect();
        self.section("Contention (average ns per round)", Table::new(&rows))
    }

    /// Renders both tables, separated by a blank line.
    pub fn render(&self, report: &Report) -> String {
        format!(
            "{}\n\n{}",
            self.render_reductions(report),
            self.render_contention(report)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_report;

    #[test]
    fn test_render_contains_rows() {
        let output = TableRenderer::new().render(&sample_report());

        assert!(output.contains("Reductions"));
        assert!(output.contains("Sequential"));
        assert!(output.contains("single-thread sum"));
        assert!(output.contains("1500"));
        assert!(output.contains("AtomicCounter"));
        assert!(output.contains("pooled"));
        assert!(output.contains("Final value"));
    }

    #[test]
    fn test_render_failed_reduction() {
        let mut report = sample_report();
        report.reductions[0].sum = Err("no workers".to_string());
        let output = TableRenderer::new().render_reductions(&report);
        assert!(output.contains("failed: no workers"));
    }

    #[test]
    fn test_render_empty_report() {
        let output = TableRenderer::new().render(&Report::default());
        assert!(output.contains("Reductions"));
        assert!(output.contains("Contention"));
    }

    #[test]
    fn test_render_with_different_styles() {
        let report = sample_report();
        for style in [
            TableStyle::Ascii,
            TableStyle::Rounded,
            TableStyle::Sharp,
            TableStyle::Modern,
            TableStyle::Markdown,
            TableStyle::Blank,
        ] {
            let output = TableRenderer::new().with_style(style).render(&report);
            assert!(output.contains("ForkJoinRange"), "{style:?}");
        }
    }

    #[test]
    fn test_render_without_header_and_titles() {
        let output = TableRenderer::new()
            .with_header(false)
            .with_titles(false)
            .render_contention(&sample_report());

        assert!(!output.contains("Average ns"));
        assert!(!output.contains("Contention"));
        assert!(output.contains("AtomicCounter"));
    }

    #[test]
    fn test_config_builder() {
        let config = TableConfig {
            style: TableStyle::Markdown,
            show_header: false,
            show_titles: false,
        };
        let output = TableRenderer::with_config(config).render_reductions(&sample_report());
        assert!(output.contains('|'));
        assert!(!output.contains("Elapsed ns"));
    }
}
