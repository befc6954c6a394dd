//! Activity classification used for coalescing decisions.

use core_events::{Activity, KeyCode};

/// Classification of the most recent input activity.
///
/// Only used to decide whether consecutive activity may share an undo step;
/// it says nothing about what the history buffer contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditMode {
    /// No classified activity (initial state, after undo/redo, modifier keys).
    #[default]
    Idle,
    Typing,
    Deleting,
    Moving,
    Whitespace,
    Escape,
    Paste,
}

/// Classify an activity. Returns `None` for key presses: those are not
/// recorded because the surface only reflects the edit after release.
pub fn classify(activity: &Activity) -> Option<EditMode> {
    match activity {
        Activity::KeyDown(_) => None,
        Activity::KeyUp(key) => Some(classify_key(key.code)),
        Activity::Click => Some(EditMode::Moving),
        Activity::Drop | Activity::Paste => Some(EditMode::Paste),
    }
}

fn classify_key(code: KeyCode) -> EditMode {
    match code {
        c if c.is_navigation() => EditMode::Moving,
        KeyCode::Backspace | KeyCode::Delete => EditMode::Deleting,
        KeyCode::Enter => EditMode::Whitespace,
        c if c.is_space() => EditMode::Whitespace,
        KeyCode::Esc => EditMode::Escape,
        KeyCode::Modifier(_) | KeyCode::F(_) | KeyCode::Insert => EditMode::Idle,
        _ => EditMode::Typing,
    }
}
