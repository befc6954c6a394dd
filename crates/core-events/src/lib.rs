//! Core input vocabulary for Rewind.
//!
//! Hosts translate whatever their widget toolkit reports (terminal key events,
//! DOM-style numeric key codes, mouse clicks, clipboard paste) into the small
//! set of [`Activity`] values the history manager understands. Nothing here
//! knows about snapshots or undo; it only names what the user did.

use std::fmt;

/// A single user activity forwarded from the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    /// Key went down. Hosts forward it, but the edit it causes is only visible
    /// to the history manager once the matching `KeyUp` arrives.
    KeyDown(KeyEvent),
    /// Key released; the surface already reflects the edit.
    KeyUp(KeyEvent),
    /// Pointer click inside the surface (caret or selection moved).
    Click,
    /// Content dropped onto the surface (drag and drop).
    Drop,
    /// Clipboard paste.
    Paste,
}

impl Activity {
    /// Convenience constructor for a key release without modifiers.
    pub fn key_up(code: KeyCode) -> Self {
        Activity::KeyUp(KeyEvent::plain(code))
    }

    /// Convenience constructor for a key press without modifiers.
    pub fn key_down(code: KeyCode) -> Self {
        Activity::KeyDown(KeyEvent::plain(code))
    }

    /// Short stable name used in structured log fields.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Activity::KeyDown(_) => "key_down",
            Activity::KeyUp(_) => "key_up",
            Activity::Click => "click",
            Activity::Drop => "drop",
            Activity::Paste => "paste",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }
}

/// Keys that never produce text on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    Shift,
    Control,
    Alt,
    Meta,
    CapsLock,
}

/// Normalized logical key identity.
///
/// Space is represented as `Char(' ')`; callers that care about whitespace
/// should use [`KeyCode::is_space`] rather than matching the literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
    Modifier(ModifierKey),
    /// A numeric key code with no dedicated variant.
    Other(u32),
}

impl KeyCode {
    pub fn is_space(&self) -> bool {
        matches!(self, KeyCode::Char(' '))
    }

    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            KeyCode::Up
                | KeyCode::Down
                | KeyCode::Left
                | KeyCode::Right
                | KeyCode::Home
                | KeyCode::End
                | KeyCode::PageUp
                | KeyCode::PageDown
        )
    }

    /// Decode a legacy numeric (DOM `keyCode`) value.
    ///
    /// Letters decode to their lowercase character since the numeric code does
    /// not carry shift state. Apple's private-use arrow codes (63232..=63235)
    /// map onto the regular arrows.
    pub fn from_dom_code(code: u32) -> KeyCode {
        match code {
            8 => KeyCode::Backspace,
            9 => KeyCode::Tab,
            13 => KeyCode::Enter,
            16 => KeyCode::Modifier(ModifierKey::Shift),
            17 => KeyCode::Modifier(ModifierKey::Control),
            18 => KeyCode::Modifier(ModifierKey::Alt),
            20 => KeyCode::Modifier(ModifierKey::CapsLock),
            27 => KeyCode::Esc,
            32 => KeyCode::Char(' '),
            33 => KeyCode::PageUp,
            34 => KeyCode::PageDown,
            35 => KeyCode::End,
            36 => KeyCode::Home,
            37 | 63234 => KeyCode::Left,
            38 | 63232 => KeyCode::Up,
            39 | 63235 => KeyCode::Right,
            40 | 63233 => KeyCode::Down,
            45 => KeyCode::Insert,
            46 | 127 => KeyCode::Delete,
            91 | 92 | 93 | 224 => KeyCode::Modifier(ModifierKey::Meta),
            48..=57 => KeyCode::Char(char::from(b'0' + (code - 48) as u8)),
            65..=90 => KeyCode::Char(char::from(b'a' + (code - 65) as u8)),
            112..=135 => KeyCode::F((code - 111) as u8),
            other => KeyCode::Other(other),
        }
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
        const META = 0b0000_1000;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}
