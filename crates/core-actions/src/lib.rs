//! Scripted editing sessions.
//!
//! A session script is a line-oriented description of what a user does to a
//! text area: typing, named keys, clicks, selections, paste/drop, undo and
//! redo, plus `expect` assertions on the resulting text. The parser turns it
//! into [`ScriptLine`]s and the dispatcher replays them against a
//! `TextArea` + `HistoryManager` pair, reporting what the history did at each
//! step.

pub mod dispatcher;
pub mod script_parser;

pub use dispatcher::{Session, StepOutcome, StepReport, Tally};
pub use script_parser::ScriptParser;

use core_events::KeyCode;
use thiserror::Error;

/// One user action in a session script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Type each character: key down, insert, key up.
    Type(String),
    /// Press and release a single key, applying its edit or motion.
    Key(KeyCode),
    /// Collapse the caret at a character offset.
    Click(usize),
    /// Select a character range.
    Select(usize, usize),
    /// Scroll without recording activity.
    Scroll(usize),
    Paste(String),
    Drop(String),
    Undo,
    Redo,
    /// Assert the surface text.
    Expect(String),
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Type(_) => "type",
            Step::Key(_) => "key",
            Step::Click(_) => "click",
            Step::Select(..) => "select",
            Step::Scroll(_) => "scroll",
            Step::Paste(_) => "paste",
            Step::Drop(_) => "drop",
            Step::Undo => "undo",
            Step::Redo => "redo",
            Step::Expect(_) => "expect",
        }
    }
}

/// A parsed step with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub step: Step,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: `{command}` expects {expected}")]
    MissingArgument {
        line: usize,
        command: &'static str,
        expected: &'static str,
    },
    #[error("line {line}: invalid offset `{value}`")]
    InvalidNumber { line: usize, value: String },
    #[error("line {line}: unknown key `{name}`")]
    UnknownKey { line: usize, name: String },
    #[error("line {line}: expected text {expected:?}, found {actual:?}")]
    ExpectationFailed {
        line: usize,
        expected: String,
        actual: String,
    },
}

impl ScriptError {
    pub fn line(&self) -> usize {
        match self {
            ScriptError::UnknownCommand { line, .. }
            | ScriptError::MissingArgument { line, .. }
            | ScriptError::InvalidNumber { line, .. }
            | ScriptError::UnknownKey { line, .. }
            | ScriptError::ExpectationFailed { line, .. } => *line,
        }
    }
}
