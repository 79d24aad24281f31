//! Error types and context management for map generation

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum GenerationError {
    /// Rule list is empty or asymmetric
    InvalidRules {
        /// Description of what's wrong with the rules
        reason: String,
    },

    /// Requested map has a zero width or height
    ZeroDimension {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// No consistent fully-collapsed map was reached
    ///
    /// Occurs when:
    /// - The backtrack budget is spent
    /// - Every alternative has been tried
    /// - Pinned tiles contradict each other
    Unsatisfiable {
        /// Backtrack escalations performed before giving up
        escalations: usize,
        /// Configured escalation budget
        max_retries: usize,
    },

    /// Cancellation or deadline observed between cycles
    Cancelled {
        /// Completed solver cycles when the signal was seen
        cycles: usize,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load a prefill image from disk
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered map or animation
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
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
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRules { reason } => write!(f, "Invalid rules: {reason}"),
            Self::ZeroDimension { width, height } => {
                write!(f, "Map dimensions must be positive (got {width}x{height})")
            }
            Self::Unsatisfiable {
                escalations,
                max_retries,
            } => {
                write!(
                    f,
                    "No valid map found after {escalations} backtrack escalations (budget {max_retries})"
                )
            }
            Self::Cancelled { cycles } => {
                write!(f, "Generation cancelled after {cycles} cycles")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
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
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

impl GenerationError {
    /// Whether the error came from the solver rather than from input or I/O
    pub const fn is_search_failure(&self) -> bool {
        matches!(self, Self::Unsatisfiable { .. } | Self::Cancelled { .. })
    }
}

impl From<image::ImageError> for GenerationError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
