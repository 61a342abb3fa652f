//! Failure modes surfaced by the public API. Every fallible operation
//! returns `Result<_, LargeIntError>`; narrowing numeric conversions stay
//! silent and lossy by design (documented on the methods that perform
//! them), per the crate's error-handling contract.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum LargeIntError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("modulus must be positive, got {value}")]
    InvalidModulus { value: String },

    #[error("reciprocal requires an active modulus scope")]
    UnsetModulus,

    #[error("malformed number in radix {radix}: {input:?} ({reason})")]
    ParseError { input: String, radix: u32, reason: ParseFailure },

    #[error("destination buffer too small: need {need} bytes, have {have}")]
    BufferTooSmall { need: usize, have: usize },
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParseFailure {
    Empty,
    InvalidDigit(char),
    InvalidRadix,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseFailure::Empty => write!(f, "empty digit run"),
            ParseFailure::InvalidDigit(c) => write!(f, "invalid digit {c:?}"),
            ParseFailure::InvalidRadix => write!(f, "radix must be in [2, 36]"),
        }
    }
}

pub type Result<T> = std::result::Result<T, LargeIntError>;
