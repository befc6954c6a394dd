/// The observable state of a text editing widget.
///
/// Implementors expose text, selection and scroll so that history snapshots
/// can be captured and restored. Selection offsets are character indices;
/// `selection()` must return `start <= end`.
pub trait Surface {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);

    fn selection(&self) -> (usize, usize);
    fn set_selection(&mut self, start: usize, end: usize);

    fn scroll_offset(&self) -> usize;
    fn set_scroll_offset(&mut self, offset: usize);

    /// Called after a snapshot has been written back so dependent UI can re-flow.
    fn notify_layout_changed(&mut self) {}

    /// Compare the current text against `other` without requiring an owned copy.
    fn text_eq(&self, other: &str) -> bool {
        self.text() == other
    }

    /// Monotonic content revision, bumped on every text mutation.
    ///
    /// Equal revisions imply equal text, which lets callers skip a full
    /// comparison. Surfaces that cannot track this return `None`.
    fn revision(&self) -> Option<u64> {
        None
    }
}
