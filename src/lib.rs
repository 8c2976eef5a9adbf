pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod progress;
pub mod query;
pub mod repl;
pub mod session;
