use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Value of one unit at acquisition, in EUR
pub const BASE_UNIT_VALUE: Decimal = dec!(1.00);

/// Decimal places of the published ratio
pub const RATIO_DECIMAL_PLACES: u32 = 5;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// `id` of the element holding the ratio. Scrapers depend on it; never change it.
pub const RATIO_ELEMENT_ID: &str = "currentMarketPrice_value";

/// Default location of the generated report
pub const DEFAULT_OUTPUT_PATH: &str = "out/index.html";

/// Default location of the subscriptions file
pub const DEFAULT_SUBSCRIPTIONS_PATH: &str = "subscriptions.json";
