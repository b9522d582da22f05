// ============================================================================
// spark-foundation - Map Change Notifications
// Change descriptors and listener plumbing for observable collections
// ============================================================================

use std::fmt;

// =============================================================================
// COLLECTION CHANGE
// =============================================================================

/// What kind of mutation a map went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionChange {
    /// Every entry was dropped at once. Carries no key.
    Reset,
    /// A key that was absent is now present.
    ItemInserted,
    /// A present key was removed.
    ItemRemoved,
    /// A present key had its value replaced.
    ItemChanged,
}

impl fmt::Display for CollectionChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollectionChange::Reset => "reset",
            CollectionChange::ItemInserted => "item-inserted",
            CollectionChange::ItemRemoved => "item-removed",
            CollectionChange::ItemChanged => "item-changed",
        };
        f.write_str(name)
    }
}

// =============================================================================
// MAP CHANGED EVENT ARGS
// =============================================================================

/// Change descriptor delivered to listeners after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapChangedEventArgs {
    change: CollectionChange,
    key: Option<String>,
}

impl MapChangedEventArgs {
    pub(crate) fn item(change: CollectionChange, key: &str) -> Self {
        Self {
            change,
            key: Some(key.to_owned()),
        }
    }

    pub(crate) fn reset() -> Self {
        Self {
            change: CollectionChange::Reset,
            key: None,
        }
    }

    pub fn collection_change(&self) -> CollectionChange {
        self.change
    }

    /// The affected key, `None` for [`CollectionChange::Reset`].
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

// =============================================================================
// LISTENERS
// =============================================================================

/// Handle returned when registering a listener; pass it back to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

/// Listener callback: receives the map that changed and the change descriptor.
#[cfg(not(feature = "sync"))]
pub type MapChangedHandler<M> = Box<dyn Fn(&M, &MapChangedEventArgs)>;

/// Listener callback: receives the map that changed and the change descriptor.
#[cfg(feature = "sync")]
pub type MapChangedHandler<M> = Box<dyn Fn(&M, &MapChangedEventArgs) + Send + Sync>;

/// Registered listeners, kept in registration order.
pub(crate) struct ListenerList<M> {
    next_id: u64,
    entries: Vec<(ListenerId, MapChangedHandler<M>)>,
}

impl<M> ListenerList<M> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, handler: MapChangedHandler<M>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, handler));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Invoke every listener in order. A panicking listener unwinds through
    /// here and the remaining listeners are skipped.
    pub(crate) fn dispatch(&self, source: &M, args: &MapChangedEventArgs) {
        for (_, handler) in &self.entries {
            handler(source, args);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_args_carry_key() {
        let args = MapChangedEventArgs::item(CollectionChange::ItemInserted, "a");
        assert_eq!(args.collection_change(), CollectionChange::ItemInserted);
        assert_eq!(args.key(), Some("a"));
    }

    #[test]
    fn reset_args_have_no_key() {
        let args = MapChangedEventArgs::reset();
        assert_eq!(args.collection_change(), CollectionChange::Reset);
        assert_eq!(args.key(), None);
    }

    #[test]
    fn change_display() {
        assert_eq!(CollectionChange::ItemChanged.to_string(), "item-changed");
        assert_eq!(CollectionChange::Reset.to_string(), "reset");
    }

    #[cfg(not(feature = "sync"))]
    #[test]
    fn dispatch_runs_in_registration_order() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let order: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
        let mut list: ListenerList<()> = ListenerList::new();

        for n in 0..3 {
            let order = order.clone();
            list.add(Box::new(move |_, _| order.borrow_mut().push(n)));
        }

        list.dispatch(&(), &MapChangedEventArgs::reset());
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn remove_by_id() {
        let mut list: ListenerList<()> = ListenerList::new();
        let first = list.add(Box::new(|_, _| {}));
        let second = list.add(Box::new(|_, _| {}));
        assert_ne!(first, second);

        assert!(list.remove(first));
        assert!(!list.remove(first));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut list: ListenerList<()> = ListenerList::new();
        let first = list.add(Box::new(|_, _| {}));
        list.remove(first);
        let second = list.add(Box::new(|_, _| {}));
        assert!(second > first);
    }
}
