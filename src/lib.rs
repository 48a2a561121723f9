pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod fixture;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod shuffle;
pub mod state;

pub use routes::app;
pub use state::AppState;
