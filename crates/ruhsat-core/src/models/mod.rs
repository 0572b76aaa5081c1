//! Data models: the extracted record, the reference catalog, configuration.

pub mod catalog;
pub mod config;
pub mod registration;
