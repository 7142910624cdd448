#![forbid(unsafe_code)]

mod auth;
mod config;
mod error;
pub mod handler;
mod routes;

pub use config::ServerConfig;
pub use error::ApiError;
pub use handler::{AppState, Reply, execute_command};
pub use routes::build_router;
