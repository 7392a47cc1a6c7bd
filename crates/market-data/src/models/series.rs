use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Certificados de Aforro series.
///
/// Each letter is a product variant issued by the state savings program with
/// its own interest rules. The set is closed: anything else is rejected at
/// load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Series {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Series {
    pub const ALL: [Series; 6] = [
        Series::A,
        Series::B,
        Series::C,
        Series::D,
        Series::E,
        Series::F,
    ];

    /// The letter used on the wire and in subscription files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown series '{0}', expected one of A, B, C, D, E, F")]
pub struct ParseSeriesError(pub String);

impl FromStr for Series {
    type Err = ParseSeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Series::ALL
            .into_iter()
            .find(|series| series.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSeriesError(s.to_string()))
    }
}
