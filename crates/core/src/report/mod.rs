//! HTML report rendering and number formatting.

mod formatting;
mod renderer;

pub use formatting::*;
pub use renderer::*;
