// ============================================================================
// spark-foundation - Background Transition
// Event arguments raised when an app moves into the background
// ============================================================================

use crate::application_model::deferral::{Deferral, DeferralManager};

/// Arguments of the "entered background" lifecycle event.
///
/// A handler that needs to finish work before the app is suspended takes a
/// deferral and completes it when done. The lifecycle manager owns the
/// deadline and may terminate the process if the deferral is never
/// completed.
pub trait EnteredBackgroundEventArgs {
    /// Delay the transition to the suspended state until the returned
    /// deferral completes or the deadline passes.
    fn get_deferral(&self) -> Deferral;
}

/// [`EnteredBackgroundEventArgs`] backed by a [`DeferralManager`].
///
/// # Example
///
/// ```
/// use spark_foundation::{DeferralManager, EnteredBackground, EnteredBackgroundEventArgs};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let suspended = Arc::new(AtomicBool::new(false));
/// let flag = suspended.clone();
/// let args = EnteredBackground::new(DeferralManager::new(move || {
///     flag.store(true, Ordering::SeqCst);
/// }));
///
/// let deferral = args.get_deferral();
/// args.raise_completed();
/// assert!(!suspended.load(Ordering::SeqCst));
///
/// deferral.complete();
/// assert!(suspended.load(Ordering::SeqCst));
/// ```
#[derive(Debug, Clone)]
pub struct EnteredBackground {
    manager: DeferralManager,
}

impl EnteredBackground {
    pub fn new(manager: DeferralManager) -> Self {
        Self { manager }
    }

    /// Called by the host once every handler has seen the event.
    pub fn raise_completed(&self) {
        self.manager.seal();
    }

    pub fn manager(&self) -> &DeferralManager {
        &self.manager
    }
}

impl EnteredBackgroundEventArgs for EnteredBackground {
    fn get_deferral(&self) -> Deferral {
        self.manager.get_deferral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn take_one(args: &dyn EnteredBackgroundEventArgs) -> Deferral {
        args.get_deferral()
    }

    #[test]
    fn usable_as_trait_object() {
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();
        let args = EnteredBackground::new(DeferralManager::new(move || {
            flag.store(true, Ordering::SeqCst);
        }));

        let deferral = take_one(&args);
        assert_eq!(args.manager().outstanding(), 1);

        args.raise_completed();
        deferral.complete();
        assert!(done.load(Ordering::SeqCst));
    }
}
