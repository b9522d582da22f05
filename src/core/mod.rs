// ============================================================================
// spark-foundation - Core Module
// Value model and error types shared across the crate
// ============================================================================

pub mod error;
pub mod value;

// Re-export commonly used items
pub use error::{FoundationError, Result};
pub use value::{Value, ValueKind};
