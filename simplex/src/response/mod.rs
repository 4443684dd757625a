//! Owned representation of statement results.

mod row_set;

pub use row_set::{ResultRowSet, Row};
