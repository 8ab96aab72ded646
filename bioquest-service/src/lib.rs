pub mod config;
pub mod handlers;
pub mod history;
pub mod models;
pub mod prompts;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};
