//! Undo/redo history for a plain-text editing surface.
//!
//! Coalescing policy:
//! - Every activity the host forwards is classified into an [`EditMode`]
//!   (typing, deleting, moving, whitespace, escape, paste). Key presses are
//!   ignored; the edit is observed on key release.
//! - If nothing observable changed since the last record, nothing happens.
//! - If only the caret/selection/scroll moved, or the activity continues the
//!   previous mode (or is whitespace following typing), the current snapshot
//!   is re-captured in place ("reuse").
//! - Otherwise a new snapshot is committed after the cursor and any redo
//!   entries past it are discarded.
//!
//! Undo/redo move the cursor, restore the snapshot it lands on, and reset the
//! mode so the next activity always starts a fresh coalescing decision.
//!
//! Telemetry: commits, reuses, evictions and undo/redo moves emit trace
//! events under the `state.history` target.

pub mod history;
pub mod mode;
pub mod snapshot;

pub use history::{Availability, HistoryManager, HistoryObserver, RecordOutcome};
pub use mode::{EditMode, classify};
pub use snapshot::Snapshot;
