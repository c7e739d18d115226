//! Rank history store for the momentum tracker.
//!
//! The history is the single source of truth that views read. It is loaded at
//! the start of an update cycle, changed by exactly one
//! [`RankHistory::record_snapshot`], and persisted atomically at the end.
//!
//! - [`store`]: the in-memory model, merge and retention
//! - [`file`]: the durable CSV format
//! - [`atomic`]: replace-on-write for every file the tracker produces
//! - [`lock`]: the update cycle's exclusive lock

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod atomic;
pub mod file;
pub mod lock;
pub mod store;

pub use atomic::{write_atomic, write_atomic_with};
pub use file::{load, save};
pub use lock::CycleLock;
pub use store::{DEFAULT_RETENTION, RankHistory, RecordSummary, WriteKind};
