//! CLI commands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod output;
pub mod transcriber;
pub mod validate;
