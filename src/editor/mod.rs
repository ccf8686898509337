// ── Editor component abstraction ──────────────────────────────────────────────
//
// `TextView` is the only interface the document host uses to reach the
// editing widget.  Storage, selection, clipboard and undo all belong to the
// widget; the host reads plain text and spans out and writes them back in.
// On Windows the implementation is the hosted Scintilla control.

#[cfg(windows)]
pub mod scintilla;

use crate::search::Match;

/// The editing widget, as seen by the document host.
///
/// Positions are UTF-8 byte offsets on `char` boundaries.
pub trait TextView {
    /// The full document text.
    fn text(&self) -> String;

    /// Replace the whole document, resetting the widget's undo history.
    /// Used for New / Open, not for edits.
    fn set_text(&mut self, text: &str);

    /// Replace `span` with `with` as one undoable edit.
    fn replace_range(&mut self, span: Match, with: &str);

    /// Replace the whole document as one undoable edit.
    fn replace_all_text(&mut self, text: &str);

    /// The current selection as an ordered span (empty when only a caret).
    fn selection(&self) -> Match;

    /// Set the selection and scroll the caret into view.
    fn set_selection(&mut self, anchor: usize, caret: usize);

    /// 1-based caret `(line, column)` for the status bar.
    fn caret_line_col(&self) -> (usize, usize);

    /// Number of lines in the document (always at least 1).
    fn line_count(&self) -> usize;
}
