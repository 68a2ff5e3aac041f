//! Overlapping wave function collapse for synthesizing images from small samples
//!
//! Every N×N window of a sample becomes a pattern. An output wave starts with
//! every pattern possible at every cell; the solver repeatedly collapses the
//! cell of lowest entropy and propagates overlap constraints until the wave is
//! fully determined or some cell runs out of options.

#![forbid(unsafe_code)]

/// Solver core: observation, propagation, run loop and decoding
pub mod algorithm;
/// Sample conversion and pattern catalog extraction
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Entropy and weighted sampling helpers
pub mod math;
/// Patterns and the wave field
pub mod spatial;

pub use algorithm::executor::{OverlappingModel, RunOutcome, RunReport};
pub use io::error::{ModelError, Result};
