//! Error types for pagesim.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagesim.
///
/// The simulator is pure computation, so there are only two families:
/// bad parameters (caught before a simulation starts) and trace references
/// that fall outside the instruction universe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A simulation parameter is unusable.
    ///
    /// Raised for zero capacity, an empty capacity range, a zero access
    /// count, a zero page or memory size, or an unknown policy name.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An instruction index fell outside `[0, limit)`.
    ///
    /// This indicates a bug in whatever produced the trace. The driver
    /// aborts the current simulation point only.
    #[error("Instruction index {index} out of range [0, {limit})")]
    OutOfRangeReference { index: usize, limit: usize },
}

impl Error {
    /// Shorthand for building an [`Error::InvalidConfiguration`].
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::InvalidConfiguration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::OutOfRangeReference {
            index: 400,
            limit: 400,
        };
        assert_eq!(
            format!("{}", err),
            "Instruction index 400 out of range [0, 400)"
        );

        let err = Error::config("capacity must be > 0");
        assert_eq!(
            format!("{}", err),
            "Invalid configuration: capacity must be > 0"
        );
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
