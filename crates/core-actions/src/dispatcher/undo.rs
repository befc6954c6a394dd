//! Undo / redo dispatch.

use core_state::HistoryManager;
use core_text::TextArea;

use super::StepOutcome;

pub(crate) fn handle_undo(history: &mut HistoryManager, area: &mut TextArea) -> StepOutcome {
    let before = history.cursor();
    let applied = history.undo(area);
    tracing::trace!(target: "actions.session", op = "undo", applied, before, after = history.cursor(), "undo");
    StepOutcome::Undo { applied }
}

pub(crate) fn handle_redo(history: &mut HistoryManager, area: &mut TextArea) -> StepOutcome {
    let before = history.cursor();
    let applied = history.redo(area);
    tracing::trace!(target: "actions.session", op = "redo", applied, before, after = history.cursor(), "redo");
    StepOutcome::Redo { applied }
}
