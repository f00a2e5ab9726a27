// Shared utilities: errors, configuration, logging, sanitization
pub mod config;
pub mod error;
pub mod logging;
pub mod validation;
