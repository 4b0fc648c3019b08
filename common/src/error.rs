use thiserror::Error;

/// Convenience alias used throughout the workspace
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when windowing, fitting or evaluating a network
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The window parameters do not fit the series they are applied to
    #[error("invalid window configuration: {0}")]
    InvalidWindowConfig(String),

    /// A model parameter outside of its valid range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operand shapes or lengths disagree
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The operation that rejected its operands
        context: &'static str,
        /// Human readable description of the expected shape
        expected: String,
        /// Human readable description of the received shape
        found: String,
    },

    /// A row or column index outside of the valid range
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// The number of valid indices
        len: usize,
    },

    /// The matrix can not be inverted within numerical tolerance
    #[error("matrix is singular (reciprocal condition number {rcond:e})")]
    SingularMatrix {
        /// Ratio of smallest to largest singular value
        rcond: f64,
    },

    /// A desired value of zero makes the relative accuracy undefined
    #[error("desired value at index {index} is zero, relative accuracy is undefined")]
    DegenerateAccuracyInput {
        /// Position of the zero in the desired sequence
        index: usize,
    },
}

impl Error {
    /// Shorthand for building a `DimensionMismatch`
    pub fn dimension_mismatch(
        context: &'static str,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        Error::DimensionMismatch {
            context,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}
