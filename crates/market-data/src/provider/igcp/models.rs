//! IGCP simulator API response models.
//!
//! The simulator answers with a JSON array holding one object per query.
//! Amounts have been observed both as JSON numbers and as numeric strings,
//! so both are accepted.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

/// One row of the simulator response
#[derive(Debug, Deserialize)]
pub struct SimulatorRow {
    pub field_value: Option<SimulatorAmount>,
    pub field_acquisition_value: Option<SimulatorAmount>,
}

/// An amount as sent by the simulator
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SimulatorAmount {
    Number(serde_json::Number),
    Text(String),
}

impl SimulatorAmount {
    /// Converts the raw amount into a `Decimal`, or `None` when it is not numeric.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(number) => parse_decimal(&number.to_string()),
            Self::Text(text) => {
                let text = text.trim();
                // Accept a decimal comma when no dot is present ("32563,80").
                if text.contains(',') && !text.contains('.') {
                    parse_decimal(&text.replace(',', "."))
                } else {
                    parse_decimal(text)
                }
            }
        }
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
