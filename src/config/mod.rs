//! Configuration module for the likes-exporter.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Default storage locations and run options
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{ApiConfig, Config, OptionsConfig, StorageConfig};
pub use validation::validate_config;
