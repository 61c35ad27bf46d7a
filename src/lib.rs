//! chain-table: a single-threaded, string-keyed hash table with separate
//! chaining, a djb2 hash and load-factor driven doubling.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small associative container whose bucket placement and
//!   iteration order are fully determined by the key bytes and the
//!   insert/remove history, so layouts can be pinned in regression tests.
//! - Layers:
//!   - `hash`: djb2 (seed 5381, multiplier 33, 32-bit wrapping) exposed as
//!     a plain function and as a `BuildHasher`.
//!   - `ChainedTable<V, S>`: bucket array of chain heads over a `SlotMap`
//!     arena of entries; insert/update/remove/lookup and growth.
//!   - `Iter` and friends: borrowing traversal, bucket-ascending then
//!     chain order.
//!   - `Cursor`: detached has-next/next traversal that fails fast on
//!     structural modification.
//!
//! Constraints
//! - Single-threaded; no interior mutability, no locking.
//! - Keys are text and are copied into the table on first insert. Values
//!   are owned by the table and handed back by reference.
//! - New keys are prepended to their chain (O(1)); removal splices the
//!   chain using the previous link (O(chain length)).
//!
//! Growth
//! - At the start of every `insert`, before the key is looked up, the
//!   load factor `len / capacity` is compared with the configured
//!   threshold. If it is strictly greater, the bucket array doubles.
//! - Growth relinks arena entries into a new bucket array; no entry is
//!   reallocated and no key is rehashed (the hash is stored per entry).
//!   Growth never runs on remove or lookup.
//!
//! Absence
//! - `get` returns `Option<&V>`: a stored value is always distinguishable
//!   from a missing key. Removing or testing an absent key is a no-op.
//!
//! Iteration and mutation
//! - `Iter` borrows the table, so the compiler rejects mutation while it
//!   is alive.
//! - `Cursor` does not borrow; it records the table's id and modification
//!   stamp and returns `CursorError::TableModified` instead of walking stale
//!   links or another table's links.
//!
//! Notes and non-goals
//! - No synchronisation; callers that share a table across threads must
//!   wrap it themselves.
//! - No persistence or serialization.
//! - djb2 is not a secure hash; chosen keys can force long chains.

pub mod chain_table;
mod chain_table_proptest;
pub mod config;
pub mod cursor;
pub mod error;
pub mod hash;
pub mod iter;

// Public surface
pub use chain_table::ChainedTable;
pub use config::{TableConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR_THRESHOLD};
pub use cursor::Cursor;
pub use error::{ConfigError, CursorError};
pub use hash::{djb2, Djb2Hasher, Djb2State};
pub use iter::{Iter, IterMut, Keys, Values};
