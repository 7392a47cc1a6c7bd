//! Subscription records and the file they are loaded from.

mod subscriptions_loader;
mod subscriptions_model;

pub use subscriptions_loader::*;
pub use subscriptions_model::*;
