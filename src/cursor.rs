//! Detached has-next/next cursor.
//!
//! A `Cursor` does not borrow the table; it is handed the table on every
//! step. It records the table's identity and modification stamp when
//! created, and refuses to advance on any other table or once its own table
//! has been structurally changed (new key, removal, growth or clear).
//! Overwriting a value in place is not a structural change.

use crate::chain_table::{first_occupied, ChainedTable};
use crate::error::CursorError;
use slotmap::DefaultKey;

#[derive(Debug, Clone)]
pub struct Cursor {
    bucket: usize,
    next: Option<DefaultKey>,
    table_id: u64,
    stamp: u64,
}

impl Cursor {
    pub(crate) fn new<V, S>(table: &ChainedTable<V, S>) -> Self {
        let buckets = table.buckets();
        let (bucket, next) = match first_occupied(buckets, 0) {
            Some((b, k)) => (b, Some(k)),
            None => (buckets.len(), None),
        };
        Self {
            bucket,
            next,
            table_id: table.id(),
            stamp: table.stamp(),
        }
    }

    /// True while the cursor is positioned on an entry.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Whether `table` is the table this cursor was created from, unchanged
    /// since then. Clones of that table count as different tables.
    pub fn is_valid_for<V, S>(&self, table: &ChainedTable<V, S>) -> bool {
        self.table_id == table.id() && self.stamp == table.stamp()
    }

    /// Returns the current pair and advances.
    ///
    /// Fails with [`CursorError::TableModified`] if `table` is not the table
    /// the cursor was created from or has changed structurally since, and with
    /// [`CursorError::Exhausted`] once every entry has been returned. Neither
    /// failure moves the cursor.
    pub fn next<'t, V, S>(
        &mut self,
        table: &'t ChainedTable<V, S>,
    ) -> Result<(&'t str, &'t V), CursorError> {
        if !self.is_valid_for(table) {
            return Err(CursorError::TableModified);
        }
        let k = self.next.ok_or(CursorError::Exhausted)?;
        let e = table.entry(k).ok_or(CursorError::TableModified)?;

        self.next = match e.next {
            Some(n) => Some(n),
            None => {
                let buckets = table.buckets();
                match first_occupied(buckets, self.bucket + 1) {
                    Some((b, head)) => {
                        self.bucket = b;
                        Some(head)
                    }
                    None => {
                        self.bucket = buckets.len();
                        None
                    }
                }
            }
        };
        Ok((&*e.key, &e.value))
    }

    /// Like [`Cursor::next`] without the key.
    pub fn next_value<'t, V, S>(
        &mut self,
        table: &'t ChainedTable<V, S>,
    ) -> Result<&'t V, CursorError> {
        self.next(table).map(|(_, v)| v)
    }
}
