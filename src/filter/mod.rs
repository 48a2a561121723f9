//! Translation of request query parameters into store queries.
//!
//! Each listing endpoint owns one strategy enum. Parsing picks exactly one
//! strategy per request; handlers then execute it against the store.

pub mod categories;
pub mod error;
pub mod products;

pub use categories::{CategoryParams, CategoryQuery};
pub use error::FilterError;
pub use products::{ProductFlag, ProductParams, ProductQuery};

use crate::database::RecordId;

/// Parse a client-supplied identifier, rejecting anything that is not a
/// store object id.
pub fn parse_id(raw: &str) -> Result<RecordId, FilterError> {
    raw.trim()
        .parse()
        .map_err(|_| FilterError::InvalidId(raw.to_string()))
}
