// ============================================================================
// spark-foundation - App-Platform Foundation Types for Rust
// ============================================================================
//
// Observable value sets for settings-like key/value bags, and the deferral
// contract used by background lifecycle events.
// ============================================================================

pub mod application_model;
pub mod collections;
pub mod core;
#[macro_use]
mod macros;

// Re-export core items at crate root for ergonomic access
pub use crate::core::error::{FoundationError, Result};
pub use crate::core::value::{Value, ValueKind};

// Re-export collections
pub use collections::{
    CollectionChange, Entry, ListenerId, MapChangedEventArgs, MapChangedHandler, ValueSet,
};

// Re-export application model
pub use application_model::{
    Deferral, DeferralCompletedHandler, DeferralManager, EnteredBackground,
    EnteredBackgroundEventArgs,
};

// =============================================================================
// TESTS
// =============================================================================
