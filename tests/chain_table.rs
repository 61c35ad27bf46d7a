use chain_table::{djb2, ChainedTable, ConfigError, TableConfig};

#[test]
fn insert_update_remove_iterate() {
    let mut t = ChainedTable::new();
    t.insert("x", 1.0);
    t.insert("y", 2.0);
    t.insert("x", 3.0);
    assert!(t.contains("x"));
    assert_eq!(t.get("x"), Some(&3.0));
    assert_eq!(t.get("y"), Some(&2.0));
    assert_eq!(t.len(), 2);

    t.remove("y");
    assert!(!t.contains("y"));
    assert_eq!(t.len(), 1);

    let mut it = t.iter();
    assert!(it.has_next());
    assert_eq!(it.next(), Some(("x", &3.0)));
    assert!(!it.has_next());
    assert_eq!(it.next(), None);
}

#[test]
fn hash_regression_values() {
    assert_eq!(djb2(b"a"), 177_670);
    assert_eq!(djb2(b"hello"), 261_238_937);

    let t: ChainedTable<u8> = ChainedTable::new();
    assert_eq!(t.bucket_index("a"), 6);
    assert_eq!(t.bucket_index("hello"), 25);
}

#[test]
fn placement_tracks_capacity_after_growth() {
    let cfg = TableConfig::new()
        .with_initial_capacity(128)
        .with_load_factor_threshold(0.01);
    let mut t: ChainedTable<u8> = ChainedTable::with_config(cfg).unwrap();
    t.insert("a", 0);
    t.insert("b", 0);
    // 1/128 < 0.01 so "b" went in without growing; the next insert grows.
    assert_eq!(t.capacity(), 128);
    t.insert("hello", 0);
    assert_eq!(t.capacity(), 256);
    assert_eq!(t.bucket_index("hello"), (261_238_937 % 256) as usize);
    assert_eq!(t.bucket_index("a"), (177_670 % 256) as usize);
}

#[test]
fn update_keeps_single_entry() {
    let mut t = ChainedTable::new();
    for v in 0..10 {
        t.insert("same", v);
    }
    assert_eq!(t.len(), 1);
    assert_eq!(t.get("same"), Some(&9));
    assert_eq!(t.iter().count(), 1);
}

#[test]
fn growth_preserves_last_assigned_values() {
    let mut t = ChainedTable::new();
    let n = 5_000;
    for i in 0..n {
        t.insert(&format!("key{}", i), i);
    }
    for i in (0..n).filter(|i| i % 10 == 0) {
        t.insert(&format!("key{}", i), i + 1_000_000);
    }
    assert!(t.capacity() >= 1024);
    assert_eq!(t.len(), n);
    for i in 0..n {
        let expected = if i % 10 == 0 { i + 1_000_000 } else { i };
        assert_eq!(t[format!("key{}", i).as_str()], expected);
    }
    assert_eq!(t.iter().count(), n);
}

#[test]
fn removal_never_shrinks() {
    let cfg = TableConfig::new().with_initial_capacity(2);
    let mut t = ChainedTable::with_config(cfg).unwrap();
    for i in 0..100 {
        t.insert(&i.to_string(), i);
    }
    let cap = t.capacity();
    for i in 0..100 {
        assert_eq!(t.remove(&i.to_string()), Some(i));
    }
    assert!(t.is_empty());
    assert_eq!(t.capacity(), cap);
    assert_eq!(t.remove("0"), None);
}

#[test]
fn config_errors_display() {
    let err = ChainedTable::<()>::with_config(TableConfig::new().with_initial_capacity(0))
        .err()
        .unwrap();
    assert_eq!(err, ConfigError::ZeroCapacity);
    assert_eq!(err.to_string(), "initial capacity must be greater than zero");

    let err = TableConfig::new()
        .with_load_factor_threshold(0.0)
        .validate()
        .unwrap_err();
    assert!(err.to_string().contains("got 0"));
}
