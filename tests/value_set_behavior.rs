use spark_foundation::{cloned, CollectionChange, Entry, MapChangedEventArgs, Value, ValueSet};
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn recorded(set: &mut ValueSet) -> Arc<Mutex<Vec<MapChangedEventArgs>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    set.on_map_changed(cloned!(log => move |_, args| log.lock().unwrap().push(args.clone())));
    log
}

#[test]
fn count_tracks_net_present_keys() {
    init_tracing();

    let mut set: ValueSet = ValueSet::new();
    let log = recorded(&mut set);
    let mut model: HashSet<String> = HashSet::new();
    let mut expected_events = 0;

    // small LCG so the sequence is reproducible
    let mut seed: u64 = 0x2545_f491;
    for _ in 0..500 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let key = format!("k{}", (seed >> 33) % 16);
        let insert = (seed >> 20) & 1 == 0;

        if insert {
            let result = set.add(key.clone(), (seed % 100) as i64);
            if model.insert(key) {
                assert!(result.is_ok());
                expected_events += 1;
            } else {
                assert!(result.unwrap_err().is_key_collision());
            }
        } else {
            let removed = set.remove(&key);
            assert_eq!(removed, model.remove(&key));
            if removed {
                expected_events += 1;
            }
        }

        assert_eq!(set.len(), model.len());
    }

    assert_eq!(log.lock().unwrap().len(), expected_events);
    let keys: HashSet<String> = set.keys().cloned().collect();
    assert_eq!(keys, model);
}

#[test]
fn add_then_remove_round_trip() {
    let mut set: ValueSet = ValueSet::new();
    set.add("k", "v").unwrap();
    assert_eq!(set.try_get(Some("k")).unwrap(), Some(Some(&Value::from("v"))));

    assert!(set.remove("k"));
    assert_eq!(set.try_get(Some("k")).unwrap(), None);
}

#[test]
fn remove_fires_exactly_one_event_with_key() {
    let mut set: ValueSet = ValueSet::new();
    set.add("gone", 1).unwrap();
    let log = recorded(&mut set);

    assert!(set.remove("gone"));
    assert!(!set.remove("gone"));

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].collection_change(), CollectionChange::ItemRemoved);
    assert_eq!(log[0].key(), Some("gone"));
}

#[test]
fn copy_to_capacity_boundaries() {
    let mut set: ValueSet = ValueSet::new();
    for (i, key) in ["a", "b", "c"].into_iter().enumerate() {
        set.add(key, i as i64).unwrap();
    }

    let mut exact: Vec<Option<Entry>> = vec![None; 3];
    set.copy_to(Some(exact.as_mut_slice()), 0).unwrap();
    let copied: HashSet<String> = exact.into_iter().flatten().map(|(k, _)| k).collect();
    assert_eq!(copied.len(), 3);
    assert!(copied.contains("b"));

    let mut short: Vec<Option<Entry>> = vec![None; 2];
    let err = set.copy_to(Some(short.as_mut_slice()), 0).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(short.iter().all(Option::is_none));
}

#[test]
fn listeners_run_in_registration_order() {
    let mut set: ValueSet = ValueSet::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    for name in ["first", "second", "third"] {
        set.on_map_changed(cloned!(order => move |_, _| order.lock().unwrap().push(name)));
    }

    set.upsert("x", 1);
    assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn panicking_listener_stops_fan_out_after_mutation() {
    let mut set: ValueSet = ValueSet::new();
    let later = Arc::new(AtomicUsize::new(0));

    set.on_map_changed(|_, args| {
        if args.key() == Some("boom") {
            panic!("listener failed");
        }
    });
    set.on_map_changed(cloned!(later => move |_, _| {
        later.fetch_add(1, Ordering::SeqCst);
    }));

    let result = catch_unwind(AssertUnwindSafe(|| set.upsert("boom", 1)));
    assert!(result.is_err());

    // the mutation already happened; the second listener never ran
    assert!(set.contains_key("boom"));
    assert_eq!(later.load(Ordering::SeqCst), 0);

    set.upsert("fine", 1);
    assert_eq!(later.load(Ordering::SeqCst), 1);
}

#[test]
fn listener_receives_the_mutated_set() {
    let mut set: ValueSet = ValueSet::new();
    let snapshots = Arc::new(Mutex::new(Vec::new()));
    set.on_map_changed(cloned!(snapshots => move |source: &ValueSet, args| {
        let key = args.key().unwrap_or("<reset>").to_string();
        let present = args.key().is_some_and(|k| source.contains_key(k));
        snapshots.lock().unwrap().push((key, present, source.len()));
    }));

    set.add("a", 1).unwrap();
    set.upsert_null("a");
    set.remove("a");
    set.clear();

    assert_eq!(
        *snapshots.lock().unwrap(),
        vec![
            ("a".to_string(), true, 1),
            ("a".to_string(), true, 1),
            ("a".to_string(), false, 0),
            ("<reset>".to_string(), false, 0),
        ]
    );
}

#[test]
fn three_state_lookup_survives_upserts() {
    let mut set: ValueSet = ValueSet::new();
    assert_eq!(set.get("k"), None);

    set.upsert_null("k");
    assert_eq!(set.get("k"), Some(None));
    assert!(set.contains_entry("k", None));

    set.upsert("k", 0.5);
    assert_eq!(set.get("k"), Some(Some(&Value::Double(0.5))));
    assert!(!set.contains_entry("k", None));
}
