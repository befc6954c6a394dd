//! Property tests for history cursor/buffer invariants under arbitrary activity.

use core_events::{Activity, KeyCode};
use core_state::HistoryManager;
use core_text::{Surface, TextArea};
use proptest::prelude::*;
use std::num::NonZeroUsize;

#[derive(Debug, Clone)]
enum Step {
    Type(char),
    Backspace,
    Left,
    Click(usize),
    Paste(String),
    Undo,
    Redo,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => prop::char::range('a', 'e').prop_map(Step::Type),
        1 => Just(Step::Type(' ')),
        2 => Just(Step::Backspace),
        1 => Just(Step::Left),
        1 => (0usize..30).prop_map(Step::Click),
        1 => "[x-z]{1,3}".prop_map(Step::Paste),
        2 => Just(Step::Undo),
        1 => Just(Step::Redo),
    ]
}

fn apply(ta: &mut TextArea, h: &mut HistoryManager, step: &Step) {
    match step {
        Step::Type(c) => {
            ta.insert_str(&c.to_string());
            h.record_activity(ta, &Activity::key_up(KeyCode::Char(*c)));
        }
        Step::Backspace => {
            ta.delete_backward();
            h.record_activity(ta, &Activity::key_up(KeyCode::Backspace));
        }
        Step::Left => {
            ta.move_left();
            h.record_activity(ta, &Activity::key_up(KeyCode::Left));
        }
        Step::Click(at) => {
            ta.set_caret(*at);
            h.record_activity(ta, &Activity::Click);
        }
        Step::Paste(s) => {
            ta.insert_str(s);
            h.record_activity(ta, &Activity::Paste);
        }
        Step::Undo => {
            h.undo(ta);
        }
        Step::Redo => {
            h.redo(ta);
        }
    }
}

proptest! {
    #[test]
    fn cursor_always_in_bounds(steps in prop::collection::vec(step(), 0..60), limit in 0usize..6) {
        let mut ta = TextArea::new("");
        let mut h = HistoryManager::with_limit(&ta, NonZeroUsize::new(limit));
        for s in &steps {
            apply(&mut ta, &mut h, s);
            prop_assert!(h.len() >= 1);
            prop_assert!(h.cursor() < h.len());
            prop_assert_eq!(h.can_undo(), h.cursor() > 0);
            prop_assert_eq!(h.can_redo(), h.cursor() + 1 < h.len());
            if let Some(max) = h.max_entries() {
                prop_assert!(h.len() <= max.get());
            }
        }
    }

    #[test]
    fn surface_matches_current_after_undo_redo(steps in prop::collection::vec(step(), 0..60)) {
        let mut ta = TextArea::new("");
        let mut h = HistoryManager::new(&ta);
        for s in &steps {
            apply(&mut ta, &mut h, s);
            if matches!(s, Step::Undo | Step::Redo) {
                prop_assert!(h.current().is_unchanged(&ta));
            }
        }
    }

    #[test]
    fn full_undo_then_full_redo_returns_to_last_state(steps in prop::collection::vec(step(), 1..40)) {
        let mut ta = TextArea::new("");
        let mut h = HistoryManager::new(&ta);
        for s in &steps {
            apply(&mut ta, &mut h, s);
        }
        // Bring the surface in line with the tip so redo can reach it.
        while h.redo(&mut ta) {}
        let tip = h.current().clone();
        while h.undo(&mut ta) {}
        prop_assert_eq!(ta.text(), "");
        while h.redo(&mut ta) {}
        prop_assert_eq!(h.current(), &tip);
        prop_assert!(tip.is_unchanged(&ta));
    }
}
