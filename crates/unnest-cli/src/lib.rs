//! CLI library components for the unnest tool.

pub mod input;
pub mod logging;
pub mod output;
pub mod select;
