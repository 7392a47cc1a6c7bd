//! Pipeline driver: load, value, aggregate, render, write.
//!
//! Progress and the final summary are written to a caller-supplied writer
//! (stdout in the binary). They are for the operator only; nothing parses them.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use aforro_market_data::ValuationProvider;
use chrono::NaiveDate;
use log::{info, warn};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result};
use crate::portfolio::{
    AggregateReport, AggregationProgress, AggregationService, ValuationResult, ValuationStatus,
};
use crate::report::{format_amount, format_ratio, DisplayLocale, ReportRenderer};
use crate::subscriptions::load_subscriptions;

/// Inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub subscriptions_path: PathBuf,
    pub output_path: PathBuf,
    pub locale: DisplayLocale,
    /// Reference date for every valuation in the run.
    pub as_of: NaiveDate,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub report: AggregateReport,
    pub failed: Vec<ValuationResult>,
    pub output_path: PathBuf,
}

pub struct ReportPipeline {
    aggregation: AggregationService,
    provider_id: &'static str,
}

impl ReportPipeline {
    pub fn new(provider: Arc<dyn ValuationProvider>) -> Self {
        let provider_id = provider.id();
        Self {
            aggregation: AggregationService::new(provider),
            provider_id,
        }
    }

    /// Runs the whole pipeline, printing progress and the summary to `out`.
    ///
    /// Individual fetch failures are reported and tolerated. The run fails when
    /// there is nothing to value, when every fetch failed, or when the report
    /// cannot be written.
    pub async fn run<W: Write>(
        &self,
        options: &PipelineOptions,
        out: &mut W,
    ) -> Result<PipelineSummary> {
        let records = load_subscriptions(&options.subscriptions_path)?;
        info!(
            "Valuing {} subscriptions as of {}",
            records.len(),
            options.as_of
        );

        let _ = writeln!(out, "Fetching current values from {}...", self.provider_id);
        let locale = options.locale;
        let aggregation = self
            .aggregation
            .aggregate(&records, options.as_of, |progress| {
                let _ = writeln!(out, "{}", progress_line(&progress, locale));
            })
            .await?;

        if aggregation.all_failed() {
            return Err(Error::AllFetchesFailed(aggregation.results.len()));
        }

        let _ = writeln!(out, "\nGenerating HTML report...");
        let html = ReportRenderer::new(locale).render(&aggregation.report);
        write_report(&options.output_path, &html)?;
        info!("Report written to {}", options.output_path.display());

        let failed: Vec<ValuationResult> = aggregation.failed().cloned().collect();
        let summary = PipelineSummary {
            report: aggregation.report,
            failed,
            output_path: options.output_path.clone(),
        };
        print_summary(&summary, locale, out);
        Ok(summary)
    }
}

/// `[i/n] fetching <series>-<id>... <ok|fail> <value>`
pub fn progress_line(progress: &AggregationProgress<'_>, locale: DisplayLocale) -> String {
    let outcome = match &progress.result.status {
        ValuationStatus::Succeeded(value) => format!(
            "ok {} EUR",
            format_amount(*value, DISPLAY_DECIMAL_PRECISION, locale)
        ),
        ValuationStatus::Failed(reason) => format!("fail {}", reason),
    };
    format!(
        "  [{}/{}] fetching {}... {}",
        progress.index,
        progress.total,
        progress.result.subscription.label(),
        outcome
    )
}

fn print_summary<W: Write>(summary: &PipelineSummary, locale: DisplayLocale, out: &mut W) {
    let report = &summary.report;
    let _ = writeln!(out, "Report generated: {}", summary.output_path.display());
    let _ = writeln!(
        out,
        "\nTotal current value: {} EUR",
        format_amount(report.total_current_value(), DISPLAY_DECIMAL_PRECISION, locale)
    );
    let _ = writeln!(
        out,
        "Total invested value: {} EUR",
        format_amount(report.total_invested_value(), DISPLAY_DECIMAL_PRECISION, locale)
    );
    let _ = writeln!(out, "Ratio (current/invested): {}", format_ratio(report.ratio()));

    if !summary.failed.is_empty() {
        warn!(
            "{} subscriptions could not be valued; the ratio is understated",
            summary.failed.len()
        );
        let _ = writeln!(
            out,
            "\nWarning: {} subscription(s) excluded from current value but counted as invested:",
            summary.failed.len()
        );
        for result in &summary.failed {
            let _ = writeln!(
                out,
                "  {}: {}",
                result.subscription.label(),
                result.failure_reason().unwrap_or_default()
            );
        }
    }
}

/// Writes the rendered document, creating missing parent directories.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    let to_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, contents).map_err(to_error)
}
