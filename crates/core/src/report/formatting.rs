//! Number formatting for the report and the console summary.
//!
//! Two formats exist and must not be mixed up:
//! - [`format_ratio`]: the machine-readable ratio, always dot-decimal with no
//!   grouping, whatever the display locale.
//! - [`format_amount`]: human display of money amounts with the separators of
//!   a [`DisplayLocale`]. This is the only place locale rules are applied.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::constants::RATIO_DECIMAL_PLACES;

/// Locale used for human-facing amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayLocale {
    /// `43 387,20` (no-break space grouping, decimal comma)
    #[default]
    PtPt,
    /// `43,387.20`
    EnUs,
}

impl DisplayLocale {
    /// `(thousands, decimal)` separators.
    fn separators(&self) -> (char, char) {
        match self {
            Self::PtPt => ('\u{a0}', ','),
            Self::EnUs => (',', '.'),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PtPt => "pt-PT",
            Self::EnUs => "en-US",
        }
    }
}

impl fmt::Display for DisplayLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported display locale '{0}', expected pt-PT or en-US")]
pub struct ParseLocaleError(pub String);

impl FromStr for DisplayLocale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "pt-pt" | "pt" => Ok(Self::PtPt),
            "en-us" | "en" => Ok(Self::EnUs),
            _ => Err(ParseLocaleError(s.to_string())),
        }
    }
}

/// Rounds half away from zero and renders exactly `decimals` places.
fn fixed_point(value: Decimal, decimals: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);
    let mut text = rounded.to_string();
    // `rescale` stops short when the padded mantissa would not fit in 96 bits.
    let missing = decimals.saturating_sub(rounded.scale()) as usize;
    if missing > 0 {
        if rounded.scale() == 0 {
            text.push('.');
        }
        text.push_str(&"0".repeat(missing));
    }
    text
}

/// Formats the ratio for machines: `1.08468`.
pub fn format_ratio(ratio: Decimal) -> String {
    fixed_point(ratio, RATIO_DECIMAL_PLACES)
}

/// Formats a money amount for humans using the locale's separators.
pub fn format_amount(value: Decimal, decimals: u32, locale: DisplayLocale) -> String {
    let (thousands_sep, decimal_sep) = locale.separators();
    let plain = fixed_point(value.abs(), decimals);
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (plain.as_str(), None),
    };

    let mut out = String::with_capacity(plain.len() + int_part.len() / 3 + 1);
    if value.is_sign_negative() && plain.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        out.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(thousands_sep);
        }
        out.push(digit);
    }
    if let Some(frac_part) = frac_part {
        out.push(decimal_sep);
        out.push_str(frac_part);
    }
    out
}
