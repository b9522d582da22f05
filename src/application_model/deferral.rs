// ============================================================================
// spark-foundation - Deferrals
// Tokens that hold a lifecycle transition open until work completes
// ============================================================================
//
// A Deferral wraps a one-shot completion handler. Whoever receives it calls
// complete() when its asynchronous work is done. The DeferralManager is the
// issuing side: it counts outstanding deferrals and runs a single callback
// once the event has been raised and every deferral it issued is complete.
// ============================================================================

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace, warn};

// =============================================================================
// DEFERRAL
// =============================================================================

/// Handler run when a [`Deferral`] completes.
#[cfg(not(feature = "sync"))]
pub type DeferralCompletedHandler = Box<dyn FnOnce()>;

/// Handler run when a [`Deferral`] completes.
#[cfg(feature = "sync")]
pub type DeferralCompletedHandler = Box<dyn FnOnce() + Send>;

/// Signals to a lifecycle manager that work started by an event is still
/// in progress.
///
/// Call [`Deferral::complete`] once the work is done. Dropping a deferral
/// without completing it does not complete it; the manager's deadline
/// applies.
///
/// # Example
///
/// ```
/// use spark_foundation::Deferral;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let done = Arc::new(AtomicBool::new(false));
/// let flag = done.clone();
/// let deferral = Deferral::new(move || flag.store(true, Ordering::SeqCst));
///
/// deferral.complete();
/// assert!(done.load(Ordering::SeqCst));
/// ```
pub struct Deferral {
    handler: Option<DeferralCompletedHandler>,
}

impl Deferral {
    /// Create a deferral that runs `handler` on completion.
    #[cfg(not(feature = "sync"))]
    pub fn new<F>(handler: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            handler: Some(Box::new(handler)),
        }
    }

    /// Create a deferral that runs `handler` on completion.
    #[cfg(feature = "sync")]
    pub fn new<F>(handler: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            handler: Some(Box::new(handler)),
        }
    }

    /// Signal that the deferred work is finished.
    pub fn complete(mut self) {
        if let Some(handler) = self.handler.take() {
            trace!("deferral completed");
            handler();
        }
    }
}

impl Drop for Deferral {
    fn drop(&mut self) {
        if self.handler.is_some() {
            warn!("deferral dropped without being completed");
        }
    }
}

impl fmt::Debug for Deferral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferral")
            .field("pending", &self.handler.is_some())
            .finish()
    }
}

// =============================================================================
// DEFERRAL MANAGER
// =============================================================================

type AllCompleteFn = Box<dyn FnOnce() + Send>;

struct ManagerState {
    outstanding: usize,
    sealed: bool,
    on_all_complete: Option<AllCompleteFn>,
}

/// Issues deferrals for one raised event and reports when all are done.
///
/// The host raises its event, lets handlers take deferrals, then calls
/// [`DeferralManager::seal`]. The completion callback runs exactly once:
/// immediately on `seal` if nothing is outstanding, otherwise when the last
/// outstanding deferral completes.
#[derive(Clone)]
pub struct DeferralManager {
    state: Arc<Mutex<ManagerState>>,
}

impl DeferralManager {
    pub fn new<F>(on_all_complete: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            state: Arc::new(Mutex::new(ManagerState {
                outstanding: 0,
                sealed: false,
                on_all_complete: Some(Box::new(on_all_complete)),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ManagerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hand out a new deferral and count it as outstanding.
    pub fn get_deferral(&self) -> Deferral {
        {
            let mut state = self.lock();
            if state.on_all_complete.is_none() {
                debug!("deferral requested after the transition already completed");
            }
            state.outstanding += 1;
        }

        let manager = self.clone();
        Deferral::new(move || manager.deferral_completed())
    }

    /// Mark the event as fully raised. No deferral taken after this point
    /// can hold the transition open once everything outstanding is done.
    pub fn seal(&self) {
        let ready = {
            let mut state = self.lock();
            state.sealed = true;
            Self::take_if_ready(&mut state)
        };
        Self::run(ready);
    }

    /// Deferrals handed out and not yet completed.
    pub fn outstanding(&self) -> usize {
        self.lock().outstanding
    }

    /// True once the completion callback has run.
    pub fn is_completed(&self) -> bool {
        self.lock().on_all_complete.is_none()
    }

    fn deferral_completed(&self) {
        let ready = {
            let mut state = self.lock();
            state.outstanding = state.outstanding.saturating_sub(1);
            trace!(outstanding = state.outstanding, "deferral released");
            Self::take_if_ready(&mut state)
        };
        Self::run(ready);
    }

    fn take_if_ready(state: &mut ManagerState) -> Option<AllCompleteFn> {
        if state.sealed && state.outstanding == 0 {
            state.on_all_complete.take()
        } else {
            None
        }
    }

    // Runs outside the lock so the callback may query the manager.
    fn run(ready: Option<AllCompleteFn>) {
        if let Some(callback) = ready {
            debug!("all deferrals complete");
            callback();
        }
    }
}

impl fmt::Debug for DeferralManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("DeferralManager")
            .field("outstanding", &state.outstanding)
            .field("sealed", &state.sealed)
            .field("completed", &state.on_all_complete.is_none())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
