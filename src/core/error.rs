// ============================================================================
// spark-foundation - Errors
// Failure taxonomy shared by the collections and application-model modules
// ============================================================================

use thiserror::Error;

/// Result alias used by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, FoundationError>;

/// Errors raised synchronously at the point of the offending call.
///
/// These are programmer errors: the caller is expected to fix the call site,
/// not to retry. A failed operation never leaves a container partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoundationError {
    /// A strict insert found the key already present.
    #[error("an item with the key `{key}` has already been added")]
    KeyCollision { key: String },

    /// An argument was missing or out of range.
    #[error("invalid argument `{param}`: {reason}")]
    InvalidArgument {
        param: &'static str,
        reason: &'static str,
    },
}

impl FoundationError {
    pub(crate) fn key_collision(key: impl Into<String>) -> Self {
        Self::KeyCollision { key: key.into() }
    }

    pub(crate) fn invalid_argument(param: &'static str, reason: &'static str) -> Self {
        Self::InvalidArgument { param, reason }
    }

    /// True for [`FoundationError::KeyCollision`].
    pub fn is_key_collision(&self) -> bool {
        matches!(self, Self::KeyCollision { .. })
    }

    /// True for [`FoundationError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

// =============================================================================
// TESTS
// =============================================================================
