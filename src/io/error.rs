//! Error types and path context for engine and file operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all strand synthesis operations
#[derive(Debug)]
pub enum StrandError {
    /// The encoded raster buffer could not be decoded
    ImageDecode {
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Configuration value failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A rendered image could not be encoded or written
    ImageEncode {
        /// Output file
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// A caller-supplied peg cannot be used
    InvalidPeg {
        /// Position of the peg in the supplied sequence
        index: usize,
        /// Description of the problem
        reason: String,
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

    /// JSON encoding or decoding of pegs or blueprints failed
    Serialization {
        /// File being read or written
        path: PathBuf,
        /// Underlying serde error
        source: serde_json::Error,
    },
}

impl fmt::Display for StrandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageDecode { source } => write!(f, "Failed to decode image: {source}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageEncode { path, source } => {
                write!(f, "Failed to write image '{}': {source}", path.display())
            }
            Self::InvalidPeg { index, reason } => write!(f, "Invalid peg #{index}: {reason}"),
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
            Self::Serialization { path, source } => {
                write!(f, "Invalid JSON in '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StrandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecode { source } | Self::ImageEncode { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            Self::InvalidParameter { .. } | Self::InvalidPeg { .. } => None,
        }
    }
}

/// Convenience type alias for engine results
pub type Result<T> = std::result::Result<T, StrandError>;

impl From<image::ImageError> for StrandError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageDecode { source: err }
    }
}

/// Attaches the file path and operation to I/O failures
pub trait WithPath<T> {
    /// Convert an I/O error into [`StrandError::FileSystem`]
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation attached
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| StrandError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> StrandError {
    StrandError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
