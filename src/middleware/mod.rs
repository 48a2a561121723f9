pub mod auth;

pub use auth::{bearer_credential, require_bearer_token};
