//! Text rendering for flattened tables.
//!
//! - **label**: default cell labels
//! - **markdown**: pipe-delimited Markdown tables
//! - **terminal**: boxed tables for interactive output

pub mod label;
pub mod markdown;
pub mod terminal;

pub use label::{RowLabels, cell_label, cell_labels, is_numeric};
pub use markdown::{render_markdown, render_table_markdown};
pub use terminal::render_terminal;
