//! Session script parsing.
//!
//! Grammar, one command per line:
//! * `# ...` and blank lines are skipped.
//! * `type <text>`, `paste <text>`, `drop <text>`, `expect <text>`: the text
//!   is everything after the first space, verbatim, with `\n`, `\t` and `\\`
//!   escapes decoded. `expect` with no argument asserts an empty surface.
//! * `key <Name>`: Backspace, Delete, Enter, Space, Tab, Esc, Left, Right, Up,
//!   Down, Home, End, PageUp, PageDown, Shift, Ctrl, Alt, Meta, or a single
//!   character. Names are case-insensitive.
//! * `click <offset>`, `select <start> <end>`, `scroll <offset>`.
//! * `undo`, `redo`.
//!
//! Parsing is pure; errors carry the 1-based line number.

use core_events::{KeyCode, ModifierKey};

use crate::{ScriptError, ScriptLine, Step};

pub struct ScriptParser;

impl ScriptParser {
    pub fn parse(src: &str) -> Result<Vec<ScriptLine>, ScriptError> {
        let mut out = Vec::new();
        for (idx, raw) in src.lines().enumerate() {
            let line = idx + 1;
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let trimmed = raw.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let (command, rest) = match trimmed.split_once(' ') {
                Some((c, r)) => (c, Some(r)),
                None => (trimmed.trim_end(), None),
            };
            let step = Self::parse_command(line, command, rest)?;
            out.push(ScriptLine { line, step });
        }
        Ok(out)
    }

    fn parse_command(line: usize, command: &str, rest: Option<&str>) -> Result<Step, ScriptError> {
        let text = |name: &'static str| {
            rest.filter(|r| !r.is_empty())
                .map(unescape)
                .ok_or(ScriptError::MissingArgument {
                    line,
                    command: name,
                    expected: "text",
                })
        };
        let step = match command {
            "type" => Step::Type(text("type")?),
            "paste" => Step::Paste(text("paste")?),
            "drop" => Step::Drop(text("drop")?),
            "expect" => Step::Expect(rest.map(unescape).unwrap_or_default()),
            "key" => {
                let name = rest
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .ok_or(ScriptError::MissingArgument {
                        line,
                        command: "key",
                        expected: "a key name",
                    })?;
                let code = parse_key_name(name).ok_or_else(|| ScriptError::UnknownKey {
                    line,
                    name: name.to_string(),
                })?;
                Step::Key(code)
            }
            "click" => Step::Click(Self::offsets::<1>(line, "click", rest)?[0]),
            "scroll" => Step::Scroll(Self::offsets::<1>(line, "scroll", rest)?[0]),
            "select" => {
                let [start, end] = Self::offsets::<2>(line, "select", rest)?;
                Step::Select(start, end)
            }
            "undo" => Step::Undo,
            "redo" => Step::Redo,
            other => {
                return Err(ScriptError::UnknownCommand {
                    line,
                    command: other.to_string(),
                });
            }
        };
        Ok(step)
    }

    fn offsets<const N: usize>(
        line: usize,
        command: &'static str,
        rest: Option<&str>,
    ) -> Result<[usize; N], ScriptError> {
        let missing = ScriptError::MissingArgument {
            line,
            command,
            expected: if N == 1 { "an offset" } else { "two offsets" },
        };
        let mut words = rest.unwrap_or_default().split_whitespace();
        let mut out = [0usize; N];
        for slot in out.iter_mut() {
            let word = words.next().ok_or_else(|| missing.clone())?;
            *slot = word.parse().map_err(|_| ScriptError::InvalidNumber {
                line,
                value: word.to_string(),
            })?;
        }
        Ok(out)
    }
}

/// Resolve a key name (case-insensitive) or a single character.
pub fn parse_key_name(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    let code = match name.to_ascii_lowercase().as_str() {
        "backspace" | "bs" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "enter" | "return" => KeyCode::Enter,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "esc" | "escape" => KeyCode::Esc,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "insert" => KeyCode::Insert,
        "shift" => KeyCode::Modifier(ModifierKey::Shift),
        "ctrl" | "control" => KeyCode::Modifier(ModifierKey::Control),
        "alt" => KeyCode::Modifier(ModifierKey::Alt),
        "meta" | "super" => KeyCode::Modifier(ModifierKey::Meta),
        _ => return None,
    };
    Some(code)
}

/// Decode `\n`, `\t` and `\\`; any other backslash sequence is kept as is.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
