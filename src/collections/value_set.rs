// ============================================================================
// spark-foundation - ValueSet
// A string-keyed map of nullable values that reports every mutation
// ============================================================================

use std::collections::hash_map::{Iter, Keys, Values};
use std::collections::HashMap;
use std::ops::Index;

use tracing::{debug, trace};

use crate::collections::changes::{
    CollectionChange, ListenerId, ListenerList, MapChangedEventArgs,
};
use crate::core::error::{FoundationError, Result};
use crate::core::value::Value;

/// A key/value pair as stored in a [`ValueSet`]. `None` is an explicit null.
pub type Entry<V = Value> = (String, Option<V>);

// =============================================================================
// VALUE SET
// =============================================================================

/// A mutable string-keyed map whose values may be null.
///
/// Every mutation that changes observable state synchronously calls the
/// registered listeners, in registration order, before returning:
///
/// - `add` / `upsert` of a new key: [`CollectionChange::ItemInserted`]
/// - `upsert` of a present key: [`CollectionChange::ItemChanged`]
/// - `remove` of a present key: [`CollectionChange::ItemRemoved`]
/// - `clear`: one [`CollectionChange::Reset`], even when already empty
///
/// Lookups distinguish three states: absent (`None`), present with null
/// (`Some(None)`) and present with a value (`Some(Some(v))`).
///
/// Not thread-safe; callers that share a set across threads must
/// synchronize externally.
///
/// # Example
///
/// ```
/// use spark_foundation::{CollectionChange, Value, ValueSet};
/// use std::sync::{Arc, Mutex};
///
/// let mut settings: ValueSet = ValueSet::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// settings.on_map_changed(move |_, args| {
///     sink.lock().unwrap().push(args.collection_change());
/// });
///
/// settings.add("theme", "dark").unwrap();
/// assert!(settings.add("theme", "light").is_err());
/// settings.upsert("theme", "light");
///
/// assert_eq!(settings.get("theme"), Some(Some(&Value::from("light"))));
/// assert_eq!(
///     *seen.lock().unwrap(),
///     vec![CollectionChange::ItemInserted, CollectionChange::ItemChanged]
/// );
/// ```
pub struct ValueSet<V = Value> {
    data: HashMap<String, Option<V>>,
    listeners: ListenerList<ValueSet<V>>,
}

impl<V> ValueSet<V> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            listeners: ListenerList::new(),
        }
    }

    /// Create an empty set with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: HashMap::with_capacity(capacity),
            listeners: ListenerList::new(),
        }
    }

    // =========================================================================
    // LISTENERS
    // =========================================================================

    /// Register a change listener. It receives the set and the change
    /// descriptor after each successful mutation.
    #[cfg(not(feature = "sync"))]
    pub fn on_map_changed<F>(&mut self, handler: F) -> ListenerId
    where
        F: Fn(&Self, &MapChangedEventArgs) + 'static,
    {
        self.listeners.add(Box::new(handler))
    }

    /// Register a change listener. It receives the set and the change
    /// descriptor after each successful mutation.
    #[cfg(feature = "sync")]
    pub fn on_map_changed<F>(&mut self, handler: F) -> ListenerId
    where
        F: Fn(&Self, &MapChangedEventArgs) + Send + Sync + 'static,
    {
        self.listeners.add(Box::new(handler))
    }

    /// Unregister a listener. Returns false if the id was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&self, args: MapChangedEventArgs) {
        trace!(change = %args.collection_change(), key = ?args.key(), "value set changed");
        self.listeners.dispatch(self, &args);
    }

    // =========================================================================
    // SIZE
    // =========================================================================

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Always false: a `ValueSet` is never read-only.
    pub fn is_read_only(&self) -> bool {
        false
    }

    // =========================================================================
    // INSERT
    // =========================================================================

    /// Strict insert. Fails with [`FoundationError::KeyCollision`] if the key
    /// is already present, leaving the set untouched and firing nothing.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<V>) -> Result<()> {
        self.insert_new(key.into(), Some(value.into()))
    }

    /// Strict insert of an explicit null.
    pub fn add_null(&mut self, key: impl Into<String>) -> Result<()> {
        self.insert_new(key.into(), None)
    }

    /// Strict insert of a `(key, value)` pair.
    pub fn add_entry(&mut self, entry: Entry<V>) -> Result<()> {
        let (key, value) = entry;
        self.insert_new(key, value)
    }

    fn insert_new(&mut self, key: String, value: Option<V>) -> Result<()> {
        if self.data.contains_key(&key) {
            debug!(key = %key, "rejected add of existing key");
            return Err(FoundationError::key_collision(key));
        }

        let args = MapChangedEventArgs::item(CollectionChange::ItemInserted, &key);
        self.data.insert(key, value);
        self.notify(args);
        Ok(())
    }

    /// Unconditional set. Fires `ItemChanged` if the key was present and
    /// `ItemInserted` otherwise. Returns the replaced value slot, if any.
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<V>) -> Option<Option<V>> {
        self.set(key.into(), Some(value.into()))
    }

    /// Unconditional set to an explicit null.
    pub fn upsert_null(&mut self, key: impl Into<String>) -> Option<Option<V>> {
        self.set(key.into(), None)
    }

    fn set(&mut self, key: String, value: Option<V>) -> Option<Option<V>> {
        let change = if self.data.contains_key(&key) {
            CollectionChange::ItemChanged
        } else {
            CollectionChange::ItemInserted
        };

        let args = MapChangedEventArgs::item(change, &key);
        let previous = self.data.insert(key, value);
        self.notify(args);
        previous
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Look up a key. `None` if absent, `Some(None)` if present with null.
    pub fn get(&self, key: &str) -> Option<Option<&V>> {
        self.data.get(key).map(Option::as_ref)
    }

    /// Look up a key that may itself be missing, as keys arriving from a
    /// platform bridge can be.
    ///
    /// A missing key is an [`FoundationError::InvalidArgument`]; an absent
    /// entry is not an error and yields `Ok(None)`.
    pub fn try_get(&self, key: Option<&str>) -> Result<Option<Option<&V>>> {
        let Some(key) = key else {
            debug!("try_get called without a key");
            return Err(FoundationError::invalid_argument("key", "must not be null"));
        };
        Ok(self.get(key))
    }

    /// True iff `key` is present and its value equals `value`. Null is
    /// equal only to null.
    pub fn contains_entry(&self, key: &str, value: Option<&V>) -> bool
    where
        V: PartialEq,
    {
        match self.data.get(key) {
            Some(stored) => stored.as_ref() == value,
            None => false,
        }
    }

    // =========================================================================
    // REMOVE
    // =========================================================================

    /// Remove a key. Returns whether anything was removed; fires
    /// `ItemRemoved` only in that case.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.data.remove(key).is_none() {
            return false;
        }

        self.notify(MapChangedEventArgs::item(CollectionChange::ItemRemoved, key));
        true
    }

    /// Remove by the key of a pair. The value half is not compared.
    pub fn remove_entry(&mut self, entry: &Entry<V>) -> bool {
        self.remove(&entry.0)
    }

    /// Drop every entry and fire a single `Reset`, whether or not the set
    /// was empty.
    pub fn clear(&mut self) {
        self.data.clear();
        self.notify(MapChangedEventArgs::reset());
    }

    // =========================================================================
    // COPY
    // =========================================================================

    /// Copy every entry into `destination`, starting at `offset`, in
    /// enumeration order.
    ///
    /// Fails with [`FoundationError::InvalidArgument`] before writing
    /// anything if the destination is missing, the offset is negative, or
    /// fewer than `len()` slots remain from `offset`.
    pub fn copy_to(&self, destination: Option<&mut [Option<Entry<V>>]>, offset: isize) -> Result<()>
    where
        V: Clone,
    {
        let Some(destination) = destination else {
            return Err(FoundationError::invalid_argument(
                "destination",
                "must not be null",
            ));
        };

        let Ok(offset) = usize::try_from(offset) else {
            return Err(FoundationError::invalid_argument(
                "offset",
                "must not be negative",
            ));
        };

        let remaining = destination.len().saturating_sub(offset);
        if offset > destination.len() || remaining < self.data.len() {
            debug!(
                capacity = destination.len(),
                offset,
                needed = self.data.len(),
                "copy_to destination too small"
            );
            return Err(FoundationError::invalid_argument(
                "destination",
                "too small to hold every entry from offset",
            ));
        }

        for (slot, (key, value)) in destination[offset..].iter_mut().zip(&self.data) {
            *slot = Some((key.clone(), value.clone()));
        }
        Ok(())
    }

    // =========================================================================
    // ITERATION
    // =========================================================================

    /// The keys, borrowed from the live set.
    pub fn keys(&self) -> Keys<'_, String, Option<V>> {
        self.data.keys()
    }

    /// The value slots, borrowed from the live set.
    pub fn values(&self) -> Values<'_, String, Option<V>> {
        self.data.values()
    }

    /// Iterate `(key, value)` pairs. Order is unspecified.
    pub fn iter(&self) -> Iter<'_, String, Option<V>> {
        self.data.iter()
    }
}

impl<V> Default for ValueSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clones copy the entries but not the listeners.
impl<V: Clone> Clone for ValueSet<V> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            listeners: ListenerList::new(),
        }
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for ValueSet<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueSet")
            .field("data", &self.data)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Panics if the key is absent, like `HashMap`'s index.
impl<V> Index<&str> for ValueSet<V> {
    type Output = Option<V>;

    fn index(&self, key: &str) -> &Self::Output {
        match self.data.get(key) {
            Some(slot) => slot,
            None => panic!("key `{key}` not present in ValueSet"),
        }
    }
}

/// Builds a set without notifying anyone; later duplicates win.
impl<V> FromIterator<Entry<V>> for ValueSet<V> {
    fn from_iter<I: IntoIterator<Item = Entry<V>>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
            listeners: ListenerList::new(),
        }
    }
}

impl<'a, V> IntoIterator for &'a ValueSet<V> {
    type Item = (&'a String, &'a Option<V>);
    type IntoIter = Iter<'a, String, Option<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
