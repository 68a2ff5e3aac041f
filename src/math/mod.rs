//! Mathematical utilities for the solver

/// Entropy and weighted sampling helpers
pub mod probability;
