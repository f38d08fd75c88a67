//! Configuration module for erp-cli
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ErpPaths;
pub use settings::Settings;
