//! Data model for flattening nested records into table rows.
//!
//! - **property**: the canonical schema tree and its shorthand normalization
//! - **table**: groups, cells, rows and the query helper types built on them
//! - **error**: schema construction errors

pub mod error;
pub mod property;
pub mod table;

pub use error::{Result, UnnestError};
pub use property::{NAME_KEY, Property, ROOT_NAME};
pub use table::{Adjacent, Cell, CellInfo, Group, Row, RowCells, RowData, RowFilter};
