//! Configuration module for finplan
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FinplanPaths;
pub use settings::Settings;
