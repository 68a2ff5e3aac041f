//! Sample conversion and pattern statistics

/// Pattern catalog extraction and weights
pub mod catalog;
/// Sample images as palette-index grids
pub mod sample;
