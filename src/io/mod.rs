//! Input/output collaborators around the solver

/// Command-line parsing and batch orchestration
pub mod cli;
/// Defaults, model parameters and batch files
pub mod configuration;
/// Error types
pub mod error;
/// PNG export
pub mod image;
/// ASCII previews
pub mod preview;
/// Progress bars
pub mod progress;
