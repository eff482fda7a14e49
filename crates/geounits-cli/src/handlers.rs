//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod convert;
mod factors;
mod units;
mod utils;

pub use completions::handle_completions;
pub use convert::handle_convert;
pub use factors::handle_factors;
pub use units::handle_units;
