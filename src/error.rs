//! Error types for sparrow operations

/// Errors raised while building, validating or traversing sparse storage
#[derive(Debug, thiserror::Error)]
pub enum SparrowError {
    /// Offsets, sizes or shapes are inconsistent with each other
    #[error("invalid dimensions: {reason}")]
    InvalidDimensions { reason: String },

    /// A row, column or vertex index exceeds its declared bound
    #[error("index {index} out of range (bound = {bound})")]
    IndexOutOfRange { index: usize, bound: usize },

    /// An entry's coordinates exceed the declared matrix shape
    #[error(
        "invalid matrix data, nrows or ncols exceeded at ({row}, {column}); \
         last valid entry ({last_valid_row}, {last_valid_column}, {last_valid_seq})"
    )]
    MalformedMatrixData {
        row: usize,
        column: usize,
        last_valid_row: usize,
        last_valid_column: usize,
        last_valid_seq: usize,
    },

    /// The number of entries observed differs from the declared count
    #[error("number of nonzeros does not match nnz: expected {expected}, found {actual}")]
    NonzeroCountMismatch { expected: usize, actual: usize },

    /// A supplied row degree did not match the entries written for that row
    #[error("row {row} declared {expected} nonzeros but received {actual}")]
    DegreeMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A side-channel degree file could not be parsed
    #[error("invalid degree data: {reason}")]
    InvalidDegrees { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SparrowError {
    pub(crate) fn invalid_dimensions(reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            reason: reason.into(),
        }
    }
}

/// Result type for sparrow operations
pub type Result<T> = std::result::Result<T, SparrowError>;
