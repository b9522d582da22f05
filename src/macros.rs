// ============================================================================
// spark-foundation - Ergonomic Macros
// ============================================================================

/// Helper macro to clone variables into a move closure.
///
/// Handy for listeners, which must own whatever they capture.
///
/// # Usage
///
/// ```rust
/// use spark_foundation::{cloned, ValueSet};
/// use std::sync::{Arc, Mutex};
///
/// let hits = Arc::new(Mutex::new(0));
/// let mut set: ValueSet = ValueSet::new();
/// set.on_map_changed(cloned!(hits => move |_, _| *hits.lock().unwrap() += 1));
///
/// set.upsert("a", 1);
/// assert_eq!(*hits.lock().unwrap(), 1);
/// ```
#[macro_export]
macro_rules! cloned {
    ($($n:ident),+ => $e:expr) => {
        {
            $( let $n = $n.clone(); )+
            $e
        }
    };
}

/// Build a `ValueSet` of [`Value`](crate::Value)s from `key => value` pairs.
///
/// No listener exists yet, so nothing is notified. Later duplicates win.
///
/// # Usage
///
/// ```rust
/// use spark_foundation::{value_set, Value};
///
/// let set = value_set! {
///     "theme" => "dark",
///     "volume" => 7,
/// };
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.get("volume"), Some(Some(&Value::Int(7))));
/// ```
#[macro_export]
macro_rules! value_set {
    () => {
        $crate::ValueSet::<$crate::Value>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut set = $crate::ValueSet::<$crate::Value>::new();
            $( set.upsert($key, $value); )+
            set
        }
    };
}
