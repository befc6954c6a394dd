//! Surface mutations for scripted input, each paired with the activity the
//! history manager records for it.

use core_events::{Activity, KeyCode};
use core_state::HistoryManager;
use core_text::{PAGE_LINES, TextArea};

use super::Tally;

/// Apply the edit or motion a key performs on the text area.
pub(crate) fn apply_key(area: &mut TextArea, code: KeyCode) {
    match code {
        KeyCode::Char(c) => area.insert_str(c.encode_utf8(&mut [0u8; 4])),
        KeyCode::Enter => area.insert_str("\n"),
        KeyCode::Tab => area.insert_str("\t"),
        KeyCode::Backspace => {
            area.delete_backward();
        }
        KeyCode::Delete => {
            area.delete_forward();
        }
        KeyCode::Left => area.move_left(),
        KeyCode::Right => area.move_right(),
        KeyCode::Home => area.move_home(),
        KeyCode::End => area.move_end(),
        KeyCode::Up => area.move_lines(-1),
        KeyCode::Down => area.move_lines(1),
        KeyCode::PageUp => area.move_lines(-(PAGE_LINES as isize)),
        KeyCode::PageDown => area.move_lines(PAGE_LINES as isize),
        KeyCode::Esc
        | KeyCode::Insert
        | KeyCode::F(_)
        | KeyCode::Modifier(_)
        | KeyCode::Other(_) => {}
    }
}

/// Full key stroke: press (recorded before the edit), edit, release.
pub(crate) fn stroke(area: &mut TextArea, history: &mut HistoryManager, code: KeyCode) -> Tally {
    let mut tally = Tally::default();
    tally.add(history.record_activity(area, &Activity::key_down(code)));
    apply_key(area, code);
    tally.add(history.record_activity(area, &Activity::key_up(code)));
    tally
}

pub(crate) fn type_text(area: &mut TextArea, history: &mut HistoryManager, text: &str) -> Tally {
    let mut tally = Tally::default();
    for c in text.chars() {
        let code = match c {
            '\n' => KeyCode::Enter,
            '\t' => KeyCode::Tab,
            c => KeyCode::Char(c),
        };
        tally.merge(stroke(area, history, code));
    }
    tally
}

/// Insert a block of text as a single paste or drop activity.
pub(crate) fn insert_block(
    area: &mut TextArea,
    history: &mut HistoryManager,
    text: &str,
    activity: Activity,
) -> Tally {
    area.insert_str(text);
    let mut tally = Tally::default();
    tally.add(history.record_activity(area, &activity));
    tally
}
