// ============================================================================
// spark-foundation - Application Model
// Lifecycle event contracts consumed by an external app host
// ============================================================================

pub mod background;
pub mod deferral;

pub use background::{EnteredBackground, EnteredBackgroundEventArgs};
pub use deferral::{Deferral, DeferralCompletedHandler, DeferralManager};
