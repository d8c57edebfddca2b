//! Error types for runtime-validated sizes.

use std::error::Error;
use std::fmt;

/// Errors from the fallible [`PowerOfTwo`](crate::PowerOfTwo) constructors.
///
/// Everything else in the crate either cannot fail or reports a violated
/// precondition through an assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemError {
    /// The value has zero or more than one bit set.
    NotPowerOfTwo {
        /// The rejected value.
        value: usize,
    },
    /// No power of two at least as large as the value fits in a `usize`.
    PowerOfTwoOverflow {
        /// The value that could not be rounded up.
        value: usize,
    },
}

impl fmt::Display for MemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPowerOfTwo { value } => {
                write!(f, "{value} is not a power of two")
            }
            Self::PowerOfTwoOverflow { value } => {
                write!(f, "next power of two after {value} overflows usize")
            }
        }
    }
}

impl Error for MemError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_value() {
        let err = MemError::NotPowerOfTwo { value: 12 };
        assert_eq!(err.to_string(), "12 is not a power of two");
    }

    #[test]
    fn overflow_display() {
        let err = MemError::PowerOfTwoOverflow { value: usize::MAX };
        assert!(err.to_string().contains("overflows usize"));
    }

    #[test]
    fn usable_as_boxed_error() {
        let err: Box<dyn Error> = Box::new(MemError::NotPowerOfTwo { value: 0 });
        assert!(err.source().is_none());
    }
}
