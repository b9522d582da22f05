// ============================================================================
// spark-foundation - Observable Collections
// String-keyed value sets that report each mutation to their listeners
// ============================================================================
//
// Listeners run synchronously on the mutating thread, in registration order,
// after the mutation has been applied and before the mutating call returns.
// ============================================================================

mod changes;
mod value_set;

pub use changes::{CollectionChange, ListenerId, MapChangedEventArgs, MapChangedHandler};
pub use value_set::{Entry, ValueSet};
