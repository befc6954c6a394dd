use std::fmt;
use std::num::NonZeroUsize;

use core_events::Activity;
use core_text::Surface;
use tracing::trace;

use crate::mode::{EditMode, classify};
use crate::snapshot::Snapshot;

/// What `record_activity` did with an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Not a recordable activity (key press).
    Ignored,
    /// Surface identical to the current snapshot; nothing recorded.
    Unchanged,
    /// Current snapshot re-captured in place (coalesced).
    Reused,
    /// New snapshot appended after the cursor; redo entries dropped.
    Committed,
}

/// Undo/redo availability reported to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Availability {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Notified whenever undo/redo availability may have changed.
pub trait HistoryObserver {
    fn availability_changed(&mut self, availability: Availability);
}

impl<F: FnMut(Availability)> HistoryObserver for F {
    fn availability_changed(&mut self, availability: Availability) {
        self(availability)
    }
}

/// Linear undo history of surface snapshots with a cursor.
///
/// The manager does not hold the surface; the host passes it into every
/// call. A manager must only ever be used with the surface it was created
/// for.
pub struct HistoryManager {
    buffer: Vec<Snapshot>,
    cursor: usize,
    mode: EditMode,
    max_entries: Option<NonZeroUsize>,
    evicted: u64,
    observers: Vec<Box<dyn HistoryObserver>>,
}

impl fmt::Debug for HistoryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryManager")
            .field("len", &self.buffer.len())
            .field("cursor", &self.cursor)
            .field("mode", &self.mode)
            .field("max_entries", &self.max_entries)
            .field("evicted", &self.evicted)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl HistoryManager {
    /// Create an unbounded history seeded with the surface's current state.
    pub fn new<S: Surface + ?Sized>(surface: &S) -> Self {
        Self::with_limit(surface, None)
    }

    /// Create a history keeping at most `max_entries` snapshots (oldest evicted first).
    pub fn with_limit<S: Surface + ?Sized>(surface: &S, max_entries: Option<NonZeroUsize>) -> Self {
        let initial = Snapshot::capture(surface);
        trace!(target: "state.history", max_entries = max_entries.map(NonZeroUsize::get), "history_init");
        Self {
            buffer: vec![initial],
            cursor: 0,
            mode: EditMode::Idle,
            max_entries,
            evicted: 0,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl HistoryObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Number of snapshots held (always at least one).
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn max_entries(&self) -> Option<NonZeroUsize> {
        self.max_entries
    }

    /// Snapshots dropped from the front because of the length limit.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Snapshot representing the state as last recorded.
    pub fn current(&self) -> &Snapshot {
        &self.buffer[self.cursor]
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.buffer
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.buffer.len()
    }

    pub fn availability(&self) -> Availability {
        Availability {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Record an activity the host observed on `surface`.
    pub fn record_activity<S: Surface + ?Sized>(
        &mut self,
        surface: &S,
        activity: &Activity,
    ) -> RecordOutcome {
        let Some(new_mode) = classify(activity) else {
            return RecordOutcome::Ignored;
        };
        let current = &self.buffer[self.cursor];
        if current.is_unchanged(surface) {
            return RecordOutcome::Unchanged;
        }
        let coalesce = current.text_matches(surface)
            || (new_mode != EditMode::Idle && new_mode == self.mode)
            || (new_mode == EditMode::Whitespace && self.mode == EditMode::Typing);
        if coalesce {
            self.buffer[self.cursor].recapture(surface);
            trace!(target: "state.history", activity = activity.kind_name(), prev_mode = ?self.mode, mode = ?new_mode, cursor = self.cursor, "snapshot_reuse");
            self.mode = new_mode;
            RecordOutcome::Reused
        } else {
            self.mode = new_mode;
            self.commit(surface);
            trace!(target: "state.history", activity = activity.kind_name(), mode = ?new_mode, len = self.buffer.len(), cursor = self.cursor, "snapshot_commit");
            self.notify();
            RecordOutcome::Committed
        }
    }

    /// Step back one snapshot and restore it. Returns false when there is nothing to undo.
    pub fn undo<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        self.buffer[self.cursor].restore(surface);
        self.mode = EditMode::Idle;
        trace!(target: "state.history", cursor = self.cursor, len = self.buffer.len(), "undo");
        self.notify();
        true
    }

    /// Step forward one snapshot and restore it. Returns false when there is nothing to redo.
    pub fn redo<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        self.buffer[self.cursor].restore(surface);
        self.mode = EditMode::Idle;
        trace!(target: "state.history", cursor = self.cursor, len = self.buffer.len(), "redo");
        self.notify();
        true
    }

    /// Drop all history and start over from the surface's current state.
    pub fn reset<S: Surface + ?Sized>(&mut self, surface: &S) {
        self.buffer.clear();
        self.buffer.push(Snapshot::capture(surface));
        self.cursor = 0;
        self.mode = EditMode::Idle;
        trace!(target: "state.history", "history_reset");
        self.notify();
    }

    fn commit<S: Surface + ?Sized>(&mut self, surface: &S) {
        let dropped = self.buffer.len() - (self.cursor + 1);
        if dropped > 0 {
            self.buffer.truncate(self.cursor + 1);
            trace!(target: "state.history", dropped, "redo_discarded");
        }
        self.buffer.push(Snapshot::capture(surface));
        self.cursor = self.buffer.len() - 1;

        if let Some(max) = self.max_entries
            && self.buffer.len() > max.get()
        {
            let excess = self.buffer.len() - max.get();
            self.buffer.drain(..excess);
            self.cursor -= excess;
            self.evicted += excess as u64;
            trace!(target: "state.history", excess, max = max.get(), "history_trimmed");
        }
    }

    fn notify(&mut self) {
        let availability = self.availability();
        for observer in &mut self.observers {
            observer.availability_changed(availability);
        }
    }
}
