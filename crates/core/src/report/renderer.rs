//! Renders an [`AggregateReport`] into the static HTML page scraped downstream.
//!
//! The page contract is a single element with `id="currentMarketPrice_value"`
//! whose text is the ratio in [`format_ratio`] notation. Everything else on the
//! page is for humans and may change freely.

use std::fmt::Write;

use crate::constants::{DISPLAY_DECIMAL_PRECISION, RATIO_ELEMENT_ID};
use crate::portfolio::AggregateReport;

use super::formatting::{format_amount, format_ratio, DisplayLocale};

/// Renders aggregate reports as HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer {
    locale: DisplayLocale,
}

impl ReportRenderer {
    pub fn new(locale: DisplayLocale) -> Self {
        Self { locale }
    }

    /// Produces the full HTML document. Deterministic: no clock, no I/O.
    pub fn render(&self, report: &AggregateReport) -> String {
        let ratio = format_ratio(report.ratio());
        let current = format_amount(
            report.total_current_value(),
            DISPLAY_DECIMAL_PRECISION,
            self.locale,
        );
        let invested = format_amount(
            report.total_invested_value(),
            DISPLAY_DECIMAL_PRECISION,
            self.locale,
        );

        let mut html = String::with_capacity(640);
        html.push_str("<!DOCTYPE html>\n");
        let _ = writeln!(html, "<html lang=\"{}\">", self.locale);
        html.push_str(
            "<head>\n    <meta charset=\"utf-8\">\n    <title>CA</title>\n    <style>\n    body { font-family: Arial; font-size: 0.3cm }\n    </style>\n</head>\n\n",
        );
        html.push_str("<body>\n    <h1>CA</h1>\n");
        html.push_str("    <div id=\"currentMarketPrice\" class=\"container\">\n");
        html.push_str("        <h2 class=\"title\">Most Recent Value:</h2>\n");
        let _ = writeln!(html, "        <h3 id=\"{}\">{}</h3>", RATIO_ELEMENT_ID, ratio);
        html.push_str("    </div>\n");
        html.push_str("    <div id=\"totals\" class=\"container\">\n");
        let _ = writeln!(
            html,
            "        <p>Current value: <span id=\"totalCurrentValue\">{} EUR</span></p>",
            current
        );
        let _ = writeln!(
            html,
            "        <p>Invested value: <span id=\"totalInvestedValue\">{} EUR</span></p>",
            invested
        );
        html.push_str("    </div>\n</body>\n</html>\n");
        html
    }
}
