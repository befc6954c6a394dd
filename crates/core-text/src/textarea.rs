use ropey::{Rope, RopeSlice};
use tracing::trace;

use crate::{Surface, grapheme};

/// Lines moved by a single PageUp / PageDown.
pub const PAGE_LINES: usize = 20;

/// In-memory plain text area: rope contents, a selection and a scroll offset.
///
/// The selection is stored as a normalized `[start, end)` character range; a
/// collapsed selection (`start == end`) is the caret.
#[derive(Debug, Clone)]
pub struct TextArea {
    rope: Rope,
    sel_start: usize,
    sel_end: usize,
    scroll: usize,
    revision: u64,
    layout_generation: u64,
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextArea {
    /// Create a text area holding `text` with the caret at offset 0.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            sel_start: 0,
            sel_end: 0,
            scroll: 0,
            revision: 0,
            layout_generation: 0,
        }
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Caret position (end of the selection).
    pub fn caret(&self) -> usize {
        self.sel_end
    }

    pub fn has_selection(&self) -> bool {
        self.sel_start != self.sel_end
    }

    /// Number of times a layout change was signalled (snapshot restores).
    pub fn layout_generation(&self) -> u64 {
        self.layout_generation
    }

    /// Select `[start, end)`, clamping both ends to the text and ordering them.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.rope.len_chars();
        let (a, b) = (start.min(len), end.min(len));
        self.sel_start = a.min(b);
        self.sel_end = a.max(b);
    }

    /// Collapse the selection to a caret at `offset` (clamped).
    pub fn set_caret(&mut self, offset: usize) {
        self.select(offset, offset);
    }

    /// Replace the selection with `s`, leaving the caret after the inserted text.
    pub fn insert_str(&mut self, s: &str) {
        self.remove_selection();
        self.rope.insert(self.sel_start, s);
        let caret = self.sel_start + s.chars().count();
        self.sel_start = caret;
        self.sel_end = caret;
        self.bump_revision();
    }

    /// Backspace: remove the selection, or the grapheme cluster before the caret.
    /// Returns whether anything was removed.
    pub fn delete_backward(&mut self) -> bool {
        if self.remove_selection() {
            self.bump_revision();
            return true;
        }
        let caret = self.sel_start;
        if caret == 0 {
            return false;
        }
        let span = self.prev_cluster_chars(caret);
        self.rope.remove(caret - span..caret);
        self.sel_start = caret - span;
        self.sel_end = self.sel_start;
        self.bump_revision();
        true
    }

    /// Forward delete: remove the selection, or the grapheme cluster after the caret.
    pub fn delete_forward(&mut self) -> bool {
        if self.remove_selection() {
            self.bump_revision();
            return true;
        }
        let caret = self.sel_start;
        if caret >= self.rope.len_chars() {
            return false;
        }
        let span = self.next_cluster_chars(caret);
        self.rope.remove(caret..caret + span);
        self.bump_revision();
        true
    }

    pub fn move_left(&mut self) {
        if self.has_selection() {
            self.set_caret(self.sel_start);
            return;
        }
        let caret = self.sel_start;
        let span = self.prev_cluster_chars(caret);
        self.set_caret(caret - span);
    }

    pub fn move_right(&mut self) {
        if self.has_selection() {
            self.set_caret(self.sel_end);
            return;
        }
        let caret = self.sel_end;
        let span = self.next_cluster_chars(caret);
        self.set_caret(caret + span);
    }

    /// Move the caret to the start of its line.
    pub fn move_home(&mut self) {
        let line = self.rope.char_to_line(self.sel_end);
        self.set_caret(self.rope.line_to_char(line));
    }

    /// Move the caret to the end of its line (before any line break).
    pub fn move_end(&mut self) {
        let line = self.rope.char_to_line(self.sel_end);
        let start = self.rope.line_to_char(line);
        self.set_caret(start + content_len(self.rope.line(line)));
    }

    /// Move the caret `delta` lines up (negative) or down, keeping the column when possible.
    pub fn move_lines(&mut self, delta: isize) {
        let caret = self.sel_end;
        let line = self.rope.char_to_line(caret);
        let column = caret - self.rope.line_to_char(line);
        let last = self.rope.len_lines().saturating_sub(1);
        let target = line.saturating_add_signed(delta).min(last);
        let start = self.rope.line_to_char(target);
        let width = content_len(self.rope.line(target));
        self.set_caret(start + column.min(width));
    }

    fn remove_selection(&mut self) -> bool {
        if !self.has_selection() {
            return false;
        }
        self.rope.remove(self.sel_start..self.sel_end);
        self.sel_end = self.sel_start;
        true
    }

    fn prev_cluster_chars(&self, caret: usize) -> usize {
        if caret == 0 {
            return 0;
        }
        // Window from the start of the line holding the previous char, so a
        // preceding line break is considered together with a possible '\r'.
        let line = self.rope.char_to_line(caret - 1);
        let from = self.rope.line_to_char(line);
        let window = self.rope.slice(from..caret).to_string();
        grapheme::last_cluster_chars(&window).max(1)
    }

    fn next_cluster_chars(&self, caret: usize) -> usize {
        let len = self.rope.len_chars();
        if caret >= len {
            return 0;
        }
        let line = self.rope.char_to_line(caret);
        let to = if line + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line + 1)
        } else {
            len
        };
        let window = self.rope.slice(caret..to).to_string();
        grapheme::first_cluster_chars(&window).max(1)
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Characters in a line excluding its trailing line break.
fn content_len(line: RopeSlice<'_>) -> usize {
    let mut n = line.len_chars();
    if n > 0 && line.char(n - 1) == '\n' {
        n -= 1;
    }
    if n > 0 && line.char(n - 1) == '\r' {
        n -= 1;
    }
    n
}

impl Surface for TextArea {
    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        let len = self.rope.len_chars();
        self.sel_start = self.sel_start.min(len);
        self.sel_end = self.sel_end.min(len);
        self.bump_revision();
    }

    fn selection(&self) -> (usize, usize) {
        (self.sel_start, self.sel_end)
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        self.select(start, end);
    }

    fn scroll_offset(&self) -> usize {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll = offset;
    }

    fn notify_layout_changed(&mut self) {
        self.layout_generation += 1;
        trace!(target: "text.surface", generation = self.layout_generation, lines = self.rope.len_lines(), "layout_changed");
    }

    fn text_eq(&self, other: &str) -> bool {
        self.rope == other
    }

    fn revision(&self) -> Option<u64> {
        Some(self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_selection() {
        let mut ta = TextArea::new("hello world");
        ta.select(6, 11);
        ta.insert_str("there");
        assert_eq!(ta.text(), "hello there");
        assert_eq!(ta.selection(), (11, 11));
    }

    #[test]
    fn backspace_removes_whole_cluster() {
        let mut ta = TextArea::new("ae\u{0301}");
        ta.set_caret(3);
        assert!(ta.delete_backward());
        assert_eq!(ta.text(), "a");
        assert_eq!(ta.caret(), 1);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut ta = TextArea::new("abc");
        let rev = ta.revision();
        assert!(!ta.delete_backward());
        assert_eq!(ta.text(), "abc");
        assert_eq!(ta.revision(), rev);
    }

    #[test]
    fn backspace_joins_crlf_lines() {
        let mut ta = TextArea::new("ab\r\ncd");
        ta.set_caret(4);
        assert!(ta.delete_backward());
        assert_eq!(ta.text(), "abcd");
        assert_eq!(ta.caret(), 2);
    }

    #[test]
    fn forward_delete_removes_next_cluster() {
        let mut ta = TextArea::new("xyz");
        ta.set_caret(1);
        assert!(ta.delete_forward());
        assert_eq!(ta.text(), "xz");
        assert_eq!(ta.caret(), 1);
        ta.set_caret(2);
        assert!(!ta.delete_forward());
    }

    #[test]
    fn delete_with_selection_removes_range() {
        let mut ta = TextArea::new("abcdef");
        ta.select(4, 1);
        assert_eq!(ta.selection(), (1, 4));
        assert!(ta.delete_forward());
        assert_eq!(ta.text(), "aef");
        assert_eq!(ta.selection(), (1, 1));
    }

    #[test]
    fn horizontal_motion_collapses_selection() {
        let mut ta = TextArea::new("abcdef");
        ta.select(2, 4);
        ta.move_left();
        assert_eq!(ta.selection(), (2, 2));
        ta.select(2, 4);
        ta.move_right();
        assert_eq!(ta.selection(), (4, 4));
        ta.move_right();
        assert_eq!(ta.caret(), 5);
    }

    #[test]
    fn home_end_respect_line_breaks() {
        let mut ta = TextArea::new("one\ntwo\r\nthree");
        ta.set_caret(5);
        ta.move_home();
        assert_eq!(ta.caret(), 4);
        ta.move_end();
        assert_eq!(ta.caret(), 7);
    }

    #[test]
    fn vertical_motion_keeps_column_and_clamps() {
        let mut ta = TextArea::new("abcd\nx\nlonger");
        ta.set_caret(3);
        ta.move_lines(1);
        assert_eq!(ta.caret(), 6, "column clamps to short line");
        ta.move_lines(PAGE_LINES as isize);
        assert_eq!(ta.caret(), 8, "clamped to last line, column 1");
        ta.move_lines(-(PAGE_LINES as isize));
        assert_eq!(ta.caret(), 1);
    }

    #[test]
    fn surface_set_text_clamps_selection_and_bumps_revision() {
        let mut ta = TextArea::new("abcdef");
        ta.select(2, 6);
        let before = ta.revision();
        ta.set_text("ab");
        assert_eq!(ta.selection(), (2, 2));
        assert_ne!(ta.revision(), before);
        assert!(ta.text_eq("ab"));
        assert!(!ta.text_eq("abc"));
    }

    #[test]
    fn layout_notifications_are_counted() {
        let mut ta = TextArea::new("");
        ta.notify_layout_changed();
        ta.notify_layout_changed();
        assert_eq!(ta.layout_generation(), 2);
    }
}
