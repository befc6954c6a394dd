use core_events::{KeyCode, KeyEvent, KeyModifiers, ModifierKey};
use crossterm::event::{
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyModifiers as CKeyModifiers,
    ModifierKeyCode as CModifierKeyCode,
};

/// Map a crossterm key event into a normalized key event.
///
/// Returns `None` for key codes with no editing meaning (media keys, print screen).
pub(crate) fn map_key_event(event: &CKeyEvent) -> Option<KeyEvent> {
    let code = map_key_code(&event.code)?;
    Some(KeyEvent::new(code, map_mods(event.modifiers)))
}

/// Convert a crossterm key code into a normalized key code.
pub(crate) fn map_key_code(code: &CKeyCode) -> Option<KeyCode> {
    let code = match code {
        CKeyCode::Char(c) => KeyCode::Char(*c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Tab | CKeyCode::BackTab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        CKeyCode::Insert => KeyCode::Insert,
        CKeyCode::F(n) => KeyCode::F(*n),
        CKeyCode::CapsLock => KeyCode::Modifier(ModifierKey::CapsLock),
        CKeyCode::Modifier(m) => KeyCode::Modifier(map_modifier_key(*m)),
        CKeyCode::Null
        | CKeyCode::ScrollLock
        | CKeyCode::NumLock
        | CKeyCode::PrintScreen
        | CKeyCode::Pause
        | CKeyCode::Menu
        | CKeyCode::KeypadBegin
        | CKeyCode::Media(_) => return None,
    };
    Some(code)
}

fn map_modifier_key(m: CModifierKeyCode) -> ModifierKey {
    match m {
        CModifierKeyCode::LeftShift
        | CModifierKeyCode::RightShift
        | CModifierKeyCode::IsoLevel3Shift
        | CModifierKeyCode::IsoLevel5Shift => ModifierKey::Shift,
        CModifierKeyCode::LeftControl | CModifierKeyCode::RightControl => ModifierKey::Control,
        CModifierKeyCode::LeftAlt | CModifierKeyCode::RightAlt => ModifierKey::Alt,
        CModifierKeyCode::LeftSuper
        | CModifierKeyCode::RightSuper
        | CModifierKeyCode::LeftHyper
        | CModifierKeyCode::RightHyper
        | CModifierKeyCode::LeftMeta
        | CModifierKeyCode::RightMeta => ModifierKey::Meta,
    }
}

/// Convert crossterm modifier flags into `KeyModifiers` bits.
pub(crate) fn map_mods(mods: CKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if mods.contains(CKeyModifiers::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if mods.contains(CKeyModifiers::ALT) {
        out |= KeyModifiers::ALT;
    }
    if mods.contains(CKeyModifiers::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    if mods.contains(CKeyModifiers::SUPER) || mods.contains(CKeyModifiers::META) {
        out |= KeyModifiers::META;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind as CKeyEventKind, KeyEventState as CKeyEventState};

    fn key_event(code: CKeyCode, modifiers: CKeyModifiers) -> CKeyEvent {
        CKeyEvent {
            code,
            modifiers,
            kind: CKeyEventKind::Press,
            state: CKeyEventState::empty(),
        }
    }

    #[test]
    fn maps_basic_char() {
        let ev = key_event(CKeyCode::Char('a'), CKeyModifiers::NONE);
        let mapped = map_key_event(&ev).expect("char should map");
        assert_eq!(mapped.code, KeyCode::Char('a'));
        assert!(mapped.mods.is_empty());
    }

    #[test]
    fn maps_named_keys() {
        assert_eq!(map_key_code(&CKeyCode::Enter), Some(KeyCode::Enter));
        assert_eq!(map_key_code(&CKeyCode::BackTab), Some(KeyCode::Tab));
        assert_eq!(map_key_code(&CKeyCode::Delete), Some(KeyCode::Delete));
        assert_eq!(map_key_code(&CKeyCode::F(5)), Some(KeyCode::F(5)));
    }

    #[test]
    fn maps_modifier_keys() {
        assert_eq!(
            map_key_code(&CKeyCode::Modifier(CModifierKeyCode::RightShift)),
            Some(KeyCode::Modifier(ModifierKey::Shift))
        );
        assert_eq!(
            map_key_code(&CKeyCode::CapsLock),
            Some(KeyCode::Modifier(ModifierKey::CapsLock))
        );
    }

    #[test]
    fn maps_modifier_flags() {
        let ev = key_event(
            CKeyCode::Char('d'),
            CKeyModifiers::CONTROL | CKeyModifiers::SHIFT,
        );
        let mapped = map_key_event(&ev).expect("ctrl-shift-d should map");
        assert!(mapped.mods.contains(KeyModifiers::CTRL));
        assert!(mapped.mods.contains(KeyModifiers::SHIFT));
        assert!(!mapped.mods.contains(KeyModifiers::ALT));
    }

    #[test]
    fn unsupported_keys_return_none() {
        let ev = key_event(CKeyCode::PrintScreen, CKeyModifiers::NONE);
        assert!(map_key_event(&ev).is_none());
    }
}
