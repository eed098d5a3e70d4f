//! Error types and context management for venation builds

use std::fmt;
use std::path::PathBuf;

/// Main error type for all network build and export operations
#[derive(Debug)]
pub enum VenationError {
    /// Summed direction polynomial vanished before normalization
    ///
    /// Fatal to the current build attempt. The parameter set must be
    /// discarded rather than patched with a fallback direction.
    DegenerateDirection {
        /// One-based index of the vein being generated
        root_index: usize,
        /// Generation of the segment whose direction vanished
        generation: u32,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Polygon operation on a self-intersecting, zero-area or otherwise malformed shape
    MalformedGeometry {
        /// Name of the geometry operation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
        /// Interveinal region being processed, when known
        region: Option<usize>,
    },

    /// Failed to save rendered image to disk
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

impl VenationError {
    /// Whether a randomized search should treat this error as a rejected candidate
    ///
    /// Candidate failures mean "try new parameters". Anything touching the
    /// file system is a real failure of the process.
    pub const fn is_candidate_rejection(&self) -> bool {
        matches!(
            self,
            Self::DegenerateDirection { .. }
                | Self::InvalidParameter { .. }
                | Self::MalformedGeometry { .. }
        )
    }
}

impl fmt::Display for VenationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateDirection {
                root_index,
                generation,
            } => {
                write!(
                    f,
                    "Degenerate direction for vein {root_index} at generation {generation}: summed vector has zero length"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MalformedGeometry {
                operation,
                reason,
                region,
            } => match region {
                Some(region) => write!(
                    f,
                    "Malformed geometry in {operation} (region {region}): {reason}"
                ),
                None => write!(f, "Malformed geometry in {operation}: {reason}"),
            },
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

impl std::error::Error for VenationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for venation results
pub type Result<T> = std::result::Result<T, VenationError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Interveinal region being processed
    pub region: Option<usize>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with build state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the region context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the region index applied
    fn with_region(self, region: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<VenationError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only geometry failures are tied to a particular region
            if let VenationError::MalformedGeometry {
                region, operation, ..
            } = &mut error
            {
                if context.region.is_some() {
                    *region = context.region;
                }
                if let Some(op) = context.operation {
                    *operation = op;
                }
            }
            error
        })
    }

    fn with_region(self, region: usize) -> Result<T> {
        self.with_context(ErrorContext {
            region: Some(region),
            ..Default::default()
        })
    }
}

impl From<std::io::Error> for VenationError {
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
) -> VenationError {
    VenationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a malformed geometry error without region context
pub fn geometry_error(operation: &'static str, reason: &impl ToString) -> VenationError {
    VenationError::MalformedGeometry {
        operation,
        reason: reason.to_string(),
        region: None,
    }
}
