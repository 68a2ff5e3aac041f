/// Bitsets of still-possible patterns per cell
pub mod bitset;
/// Conversion of a wave into an RGBA image
pub mod decoder;
/// Run loop and model orchestration
pub mod executor;
/// Compatibility table and constraint propagation
pub mod propagation;
/// Minimum-entropy observation and weighted collapse
pub mod selection;
