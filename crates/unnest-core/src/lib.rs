//! Flatten nested records into grouped, span-annotated table rows.
//!
//! This crate provides the engine behind the table view:
//!
//! - **unwrap**: collapse nested arrays into flat item lists
//! - **flatten**: walk a property tree over nested data, merging sibling branches by index
//! - **merger**: fold aligned branch rows together and collect conflicting columns
//! - **spans**: compute how many rows each cell covers within its group
//! - **table**: query, filter and sort the flattened rows
//! - **unnest**: entry point tying items, groups and the schema together

pub mod flatten;
pub mod merger;
pub mod spans;
pub mod table;
pub mod unnest;
pub mod unwrap;

pub use flatten::flatten;
pub use merger::Merger;
pub use spans::update_spans;
pub use table::Table;
pub use unnest::{Unnest, unnest};
pub use unwrap::unwrap;
