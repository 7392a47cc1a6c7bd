use std::sync::Arc;

use aforro_core::{PipelineOptions, ReportPipeline};
use aforro_market_data::IgcpProvider;
use chrono::{Local, NaiveDate};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr; stdout carries the progress lines and summary.
    if config.log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_pipeline(config: &Config) -> ReportPipeline {
    let provider = IgcpProvider::new(config.api_base_url.clone(), config.request_timeout);
    ReportPipeline::new(Arc::new(provider))
}

pub fn build_options(config: &Config, as_of: NaiveDate) -> PipelineOptions {
    PipelineOptions {
        subscriptions_path: config.subscriptions_path.clone(),
        output_path: config.output_path.clone(),
        locale: config.locale,
        as_of,
    }
}

/// Valuations are "as of now", in the operator's local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
