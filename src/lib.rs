pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod search;
pub mod server;
pub mod session;
pub mod tools;

pub use error::{AskWebError, Result};
pub use orchestrator::Orchestrator;
