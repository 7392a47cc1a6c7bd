use chrono::NaiveDate;

use super::series::Series;

/// Everything a provider needs to value one subscription.
///
/// `series` and `subscription_number` identify the holding; the IGCP
/// simulator additionally prices by acquisition month and unit count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValuationRequest {
    pub series: Series,
    pub subscription_number: String,
    pub acquisition_date: NaiveDate,
    pub units: u32,
    /// Reference date ("value as of").
    pub as_of: NaiveDate,
}

impl ValuationRequest {
    /// `<series>-<number>` label used in logs and error messages.
    pub fn label(&self) -> String {
        format!("{}-{}", self.series, self.subscription_number)
    }
}
