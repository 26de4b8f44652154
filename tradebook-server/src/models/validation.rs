//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field must be zero or greater
    Negative { field: &'static str },

    /// Field must be strictly greater than zero
    NotPositive { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative { field } => write!(f, "{} cannot be negative", field),
            Self::NotPositive { field } => write!(f, "{} must be greater than zero", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Input checks run by handlers before anything reaches a repository.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

pub(crate) fn non_negative<T>(field: &'static str, value: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Default,
{
    if value < T::default() {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

pub(crate) fn positive<T>(field: &'static str, value: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Default,
{
    if value <= T::default() {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}
