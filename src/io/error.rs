//! Error types for catalog construction, sample loading and batch configuration

use std::fmt;
use std::path::PathBuf;

/// Main error type for all model operations
///
/// Contradictions reached while solving are not errors; they are reported
/// through [`crate::algorithm::executor::RunOutcome`].
#[derive(Debug)]
pub enum ModelError {
    /// Failed to load a sample image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Sample data cannot produce a pattern catalog
    ///
    /// Raised for empty samples, palettes without colors, or samples that
    /// admit no window position for the configured pattern size.
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Run configuration validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Pattern index exceeds the catalog size
    InvalidPatternIndex {
        /// The invalid pattern index
        index: usize,
        /// Number of patterns in the catalog
        pattern_count: usize,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Batch file could not be parsed
    Config {
        /// Path of the batch file
        path: PathBuf,
        /// Parser diagnostic
        reason: String,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load sample '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidPatternIndex {
                index,
                pattern_count,
            } => {
                write!(
                    f,
                    "Pattern index {index} is out of bounds (catalog holds {pattern_count})"
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Config { path, reason } => {
                write!(f, "Invalid batch file '{}': {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for model results
pub type Result<T> = std::result::Result<T, ModelError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ModelError {
    ModelError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> ModelError {
    ModelError::InvalidSourceData {
        reason: reason.to_string(),
    }
}
