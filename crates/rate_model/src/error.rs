//! Error types

use thiserror::Error;

/// Numeric failures. Every variant is terminal for the call that raised it.
#[repr(u32)]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    // Range errors (0-99)
    #[error("fixed-point overflow")]
    Overflow = 0,

    #[error("fixed-point underflow")]
    Underflow = 1,

    // Arithmetic errors (100-199)
    #[error("division by zero")]
    DivisionByZero = 100,

    // Time errors (200-299)
    #[error("invalid interval: from {from} is after to {to}")]
    InvalidInterval { from: u64, to: u64 } = 200,

    // Parse errors (300-399)
    #[error("invalid decimal literal")]
    InvalidLiteral = 300,
}

impl NumericError {
    /// Range error for a result whose sign is `negative`.
    #[inline]
    pub(crate) fn out_of_range(negative: bool) -> Self {
        if negative {
            NumericError::Underflow
        } else {
            NumericError::Overflow
        }
    }

    /// Stable numeric code
    pub fn code(&self) -> u32 {
        match self {
            NumericError::Overflow => 0,
            NumericError::Underflow => 1,
            NumericError::DivisionByZero => 100,
            NumericError::InvalidInterval { .. } => 200,
            NumericError::InvalidLiteral => 300,
        }
    }
}

impl From<NumericError> for u32 {
    fn from(e: NumericError) -> u32 {
        e.code()
    }
}

pub type Result<T> = core::result::Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_grouped() {
        assert_eq!(u32::from(NumericError::Overflow), 0);
        assert_eq!(u32::from(NumericError::DivisionByZero), 100);
        assert_eq!(u32::from(NumericError::InvalidInterval { from: 2, to: 1 }), 200);
        assert_eq!(u32::from(NumericError::InvalidLiteral), 300);
    }

    #[test]
    fn test_out_of_range_follows_sign() {
        assert_eq!(NumericError::out_of_range(false), NumericError::Overflow);
        assert_eq!(NumericError::out_of_range(true), NumericError::Underflow);
    }

    #[test]
    fn test_interval_message() {
        let e = NumericError::InvalidInterval { from: 10, to: 5 };
        assert_eq!(e.to_string(), "invalid interval: from 10 is after to 5");
    }
}
