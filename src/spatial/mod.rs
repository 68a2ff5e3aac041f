//! Spatial data structures
//!
//! This module contains:
//! - Square patterns with symmetry transformations
//! - The wave field of per-cell possibilities

/// Pattern extraction, symmetry and overlap tests
pub mod patterns;
/// Wave field state
pub mod wave;

pub use wave::WaveField;
