//! Input/output surfaces, configuration and error handling

/// Command-line interface and run orchestration
pub mod cli;
/// Generation constants and defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// PNG snapshot export
pub mod image;
/// Typed parameter snapshot and flat document conversion
pub mod parameters;
/// Search progress display
pub mod progress;
