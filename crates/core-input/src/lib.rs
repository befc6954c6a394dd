//! Terminal input adapter: crossterm events to history activities.
//!
//! Key presses and auto-repeats become `Activity::KeyDown`; releases become
//! `Activity::KeyUp`. Terminals that do not report releases (no keyboard
//! enhancement flags) never produce `KeyUp`; such hosts should call
//! [`release_for`] after applying the edit so the history observes it.

mod key_token;

use core_events::Activity;
use crossterm::event::{Event as CEvent, KeyEventKind, MouseButton, MouseEventKind};

/// Map a terminal event into an activity. Returns `None` for events the
/// history does not care about (resize, focus, mouse motion, unknown keys).
pub fn map_event(event: &CEvent) -> Option<Activity> {
    let activity = match event {
        CEvent::Key(key) => {
            let mapped = key_token::map_key_event(key)?;
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => Activity::KeyDown(mapped),
                KeyEventKind::Release => Activity::KeyUp(mapped),
            }
        }
        CEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Up(MouseButton::Left) => {
                Activity::Click
            }
            _ => return None,
        },
        CEvent::Paste(text) => {
            tracing::trace!(target: "input.paste", size_bytes = text.len(), "paste_event");
            Activity::Paste
        }
        CEvent::FocusGained | CEvent::FocusLost | CEvent::Resize(..) => return None,
    };
    Some(activity)
}

/// Synthesize the release for a press, for terminals that only report presses.
pub fn release_for(activity: &Activity) -> Option<Activity> {
    match activity {
        Activity::KeyDown(key) => Some(Activity::KeyUp(*key)),
        _ => None,
    }
}
