use std::borrow::Cow;

/// Currency code (ISO 4217) - mostly static
pub type Currency = Cow<'static, str>;

/// The only currency subscriptions are denominated in.
pub const EUR: Currency = Cow::Borrowed("EUR");
