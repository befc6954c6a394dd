//! Dispatcher replaying script steps against a text area and its history.
//!
//! * `edit` - surface mutations paired with the recorded activity
//! * `undo` - undo / redo dispatch
//!
//! Every step yields a [`StepReport`] describing the history afterwards; an
//! `expect` mismatch stops the run with [`ScriptError::ExpectationFailed`].

use std::cell::Cell;
use std::fmt;
use std::num::NonZeroUsize;
use std::rc::Rc;

use core_events::Activity;
use core_state::{Availability, HistoryManager, RecordOutcome};
use core_text::{Surface, TextArea};
use tracing::debug;

use crate::{ScriptError, ScriptLine, Step};

mod edit;
mod undo;

/// Count of record outcomes produced by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub committed: usize,
    pub reused: usize,
    pub unchanged: usize,
    pub ignored: usize,
}

impl Tally {
    pub fn add(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Committed => self.committed += 1,
            RecordOutcome::Reused => self.reused += 1,
            RecordOutcome::Unchanged => self.unchanged += 1,
            RecordOutcome::Ignored => self.ignored += 1,
        }
    }

    pub fn merge(&mut self, other: Tally) {
        self.committed += other.committed;
        self.reused += other.reused;
        self.unchanged += other.unchanged;
        self.ignored += other.ignored;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Recorded(Tally),
    Undo { applied: bool },
    Redo { applied: bool },
    Scrolled,
    Checked,
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Recorded(t) => {
                write!(f, "commit={} reuse={}", t.committed, t.reused)?;
                if t.unchanged > 0 {
                    write!(f, " same={}", t.unchanged)?;
                }
                Ok(())
            }
            StepOutcome::Undo { applied } | StepOutcome::Redo { applied } => {
                f.write_str(if *applied { "applied" } else { "noop" })
            }
            StepOutcome::Scrolled => f.write_str("scrolled"),
            StepOutcome::Checked => f.write_str("ok"),
        }
    }
}

/// State after one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub line: usize,
    pub step: &'static str,
    pub outcome: StepOutcome,
    pub text: String,
    pub selection: (usize, usize),
    pub scroll: usize,
    pub cursor: usize,
    pub len: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3} {:<6} {:<18} {:?} sel={}..{} scroll={} hist={}/{}{}{}",
            self.line,
            self.step,
            self.outcome.to_string(),
            self.text,
            self.selection.0,
            self.selection.1,
            self.scroll,
            self.cursor + 1,
            self.len,
            if self.can_undo { " U" } else { "" },
            if self.can_redo { " R" } else { "" },
        )
    }
}

/// A text area with its history, driven by script steps.
pub struct Session {
    area: TextArea,
    history: HistoryManager,
    notifications: Rc<Cell<usize>>,
}

impl Session {
    pub fn new(initial: &str, max_entries: Option<NonZeroUsize>) -> Self {
        let area = TextArea::new(initial);
        let mut history = HistoryManager::with_limit(&area, max_entries);
        let notifications = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&notifications);
        history.subscribe(move |a: Availability| {
            counter.set(counter.get() + 1);
            debug!(target: "actions.session", can_undo = a.can_undo, can_redo = a.can_redo, "availability_changed");
        });
        Self {
            area,
            history,
            notifications,
        }
    }

    pub fn area(&self) -> &TextArea {
        &self.area
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Number of availability notifications the history emitted so far.
    pub fn availability_notifications(&self) -> usize {
        self.notifications.get()
    }

    /// Run every line, stopping at the first failed expectation.
    pub fn run(&mut self, script: &[ScriptLine]) -> Result<Vec<StepReport>, ScriptError> {
        script.iter().map(|line| self.dispatch(line)).collect()
    }

    pub fn dispatch(&mut self, line: &ScriptLine) -> Result<StepReport, ScriptError> {
        let area = &mut self.area;
        let history = &mut self.history;
        let outcome = match &line.step {
            Step::Type(text) => StepOutcome::Recorded(edit::type_text(area, history, text)),
            Step::Key(code) => StepOutcome::Recorded(edit::stroke(area, history, *code)),
            Step::Click(at) => {
                area.set_caret(*at);
                Self::record(area, history, Activity::Click)
            }
            Step::Select(start, end) => {
                area.select(*start, *end);
                Self::record(area, history, Activity::Click)
            }
            Step::Scroll(offset) => {
                area.set_scroll_offset(*offset);
                StepOutcome::Scrolled
            }
            Step::Paste(text) => {
                StepOutcome::Recorded(edit::insert_block(area, history, text, Activity::Paste))
            }
            Step::Drop(text) => {
                StepOutcome::Recorded(edit::insert_block(area, history, text, Activity::Drop))
            }
            Step::Undo => undo::handle_undo(history, area),
            Step::Redo => undo::handle_redo(history, area),
            Step::Expect(expected) => {
                if !area.text_eq(expected) {
                    return Err(ScriptError::ExpectationFailed {
                        line: line.line,
                        expected: expected.clone(),
                        actual: area.text(),
                    });
                }
                StepOutcome::Checked
            }
        };
        debug!(target: "actions.session", line = line.line, step = line.step.name(), outcome = %outcome, len = self.history.len(), cursor = self.history.cursor(), "step");
        Ok(self.report(line, outcome))
    }

    fn record(area: &TextArea, history: &mut HistoryManager, activity: Activity) -> StepOutcome {
        let mut tally = Tally::default();
        tally.add(history.record_activity(area, &activity));
        StepOutcome::Recorded(tally)
    }

    fn report(&self, line: &ScriptLine, outcome: StepOutcome) -> StepReport {
        StepReport {
            line: line.line,
            step: line.step.name(),
            outcome,
            text: self.area.text(),
            selection: self.area.selection(),
            scroll: self.area.scroll_offset(),
            cursor: self.history.cursor(),
            len: self.history.len(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }
}
