//! SQL generation for content listings.
//!
//! Builds the parameterized page and count statements from a
//! [`ContentQuery`](crate::catalog::ContentQuery). Column names only ever
//! come from [`ContentColumn`](crate::catalog::ContentColumn), so nothing a
//! client sends is spliced into the SQL text.

pub mod error;
pub mod filter;
pub mod filter_order;
pub mod filter_where;
pub mod types;

pub use error::FilterError;
pub use filter::Filter;
pub use types::*;
