use core_text::Surface;

/// Point-in-time record of a surface: text, selection and scroll offset.
///
/// Fields are read-only outside this crate. The owning history manager may
/// re-capture a snapshot in place when coalescing; nothing else mutates it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    text: String,
    selection_start: usize,
    selection_end: usize,
    scroll_offset: usize,
    /// Surface content revision at capture time, when the surface tracks one.
    revision: Option<u64>,
}

impl Snapshot {
    /// Read the current state of `surface`. The surface is not modified.
    pub fn capture<S: Surface + ?Sized>(surface: &S) -> Self {
        let (a, b) = surface.selection();
        Self {
            text: surface.text(),
            selection_start: a.min(b),
            selection_end: a.max(b),
            scroll_offset: surface.scroll_offset(),
            revision: surface.revision(),
        }
    }

    /// Write this state back: text first so the selection is valid against
    /// it, then scroll offset, then selection. Signals a layout change last.
    pub fn restore<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_text(&self.text);
        surface.set_scroll_offset(self.scroll_offset);
        surface.set_selection(self.selection_start, self.selection_end);
        surface.notify_layout_changed();
    }

    /// True when text, both selection bounds and scroll offset all still match.
    pub fn is_unchanged<S: Surface + ?Sized>(&self, surface: &S) -> bool {
        let (a, b) = surface.selection();
        a.min(b) == self.selection_start
            && a.max(b) == self.selection_end
            && surface.scroll_offset() == self.scroll_offset
            && self.text_matches(surface)
    }

    /// True when the surface text equals the captured text.
    ///
    /// A matching content revision short-circuits the comparison; anything
    /// else falls back to comparing values, so text edited back to an earlier
    /// value still matches.
    pub fn text_matches<S: Surface + ?Sized>(&self, surface: &S) -> bool {
        if let (Some(ours), Some(theirs)) = (self.revision, surface.revision())
            && ours == theirs
        {
            return true;
        }
        surface.text_eq(&self.text)
    }

    /// Overwrite this snapshot with the surface's current state.
    pub(crate) fn recapture<S: Surface + ?Sized>(&mut self, surface: &S) {
        *self = Self::capture(surface);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized `(start, end)` selection, `start <= end`.
    pub fn selection(&self) -> (usize, usize) {
        (self.selection_start, self.selection_end)
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.selection_start == other.selection_start
            && self.selection_end == other.selection_end
            && self.scroll_offset == other.scroll_offset
    }
}

impl Eq for Snapshot {}
