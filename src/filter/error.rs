use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Invalid page: {0}")]
    InvalidPage(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Page {page} with limit {limit} is out of range")]
    PageOutOfRange { page: u64, limit: u64 },
}
