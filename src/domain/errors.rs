use thiserror::Error;

/// Reasons an entity refuses to be constructed.
///
/// The `Display` output is returned to clients verbatim, so messages stay
/// short and free of internal detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} length should not exceed {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} should be between {min} and {max}")]
    OutOfRange { field: &'static str, min: i64, max: i64 },

    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("{field} cannot be in the future")]
    InFuture { field: &'static str },

    #[error("invalid {field}, must be {expected}")]
    Invalid { field: &'static str, expected: &'static str },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::TooLong { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::Negative { field }
            | Self::InFuture { field }
            | Self::Invalid { field, .. } => field,
        }
    }
}
