use chain_table::{ChainedTable, CursorError};
use std::collections::BTreeSet;

#[test]
fn cursor_walks_every_entry_once() {
    let mut t = ChainedTable::new();
    for i in 0..1_000u32 {
        t.insert(&format!("w{}", i), i);
    }
    let mut c = t.cursor();
    let mut seen = BTreeSet::new();
    while c.has_next() {
        let (k, v) = c.next(&t).unwrap();
        assert_eq!(k, format!("w{}", v));
        assert!(seen.insert(*v));
    }
    assert_eq!(seen.len(), 1_000);
    assert_eq!(c.next(&t), Err(CursorError::Exhausted));
}

#[test]
fn cursor_detects_insert_between_steps() {
    let mut t = ChainedTable::new();
    t.insert("a", 1);
    t.insert("b", 2);
    let mut c = t.cursor();
    assert!(c.next_value(&t).is_ok());
    t.insert("c", 3);
    assert_eq!(c.next_value(&t), Err(CursorError::TableModified));
    assert_eq!(
        CursorError::TableModified.to_string(),
        "table was structurally modified after the cursor was created"
    );
}

#[test]
fn fresh_cursor_after_modification_works() {
    let mut t = ChainedTable::new();
    t.insert("a", 1);
    let stale = t.cursor();
    t.remove("a");
    t.insert("b", 2);
    assert!(!stale.is_valid_for(&t));

    let mut c = t.cursor();
    assert_eq!(c.next(&t), Ok(("b", &2)));
    assert!(!c.has_next());
}
