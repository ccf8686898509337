// ── Application lifecycle & top-level state ────────────────────────────────────
//
// A single `App` is created on startup and owned by `WindowState` for the
// lifetime of the main window.  All mutations happen on the UI thread and there
// is no global mutable state.  Every operation that touches the document
// goes through a `&mut dyn TextView`, so the host is testable without a
// window.

use std::path::{Path, PathBuf};

use crate::{
    debug_log,
    editor::TextView,
    error::Result,
    search::{self, Match, MatchCursor},
    settings::{FindSettings, Settings},
    theme::Theme,
    ui::status,
};

// ── Encoding ──────────────────────────────────────────────────────────────────

/// The character encoding of the document on disk.
///
/// The in-memory representation is always UTF-8 (Scintilla's native mode).
/// This field records what encoding should be used when writing back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8, with or without BOM.
    Utf8,
    /// UTF-16 Little-Endian with BOM.
    Utf16Le,
    /// UTF-16 Big-Endian with BOM.
    Utf16Be,
    /// Single-byte text that is not valid UTF-8, read as Latin-1.
    Ansi,
}

impl Encoding {
    /// Short display string shown in the status bar.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16 LE",
            Self::Utf16Be => "UTF-16 BE",
            Self::Ansi => "ANSI",
        }
    }
}

// ── EOL mode ──────────────────────────────────────────────────────────────────

/// The end-of-line convention used by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EolMode {
    /// Windows-style `\r\n`.
    Crlf,
    /// Unix-style `\n`.
    Lf,
    /// Old Mac-style `\r`.
    Cr,
}

impl EolMode {
    /// Short display string shown in the status bar.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => "CRLF",
            Self::Lf => "LF",
            Self::Cr => "CR",
        }
    }
}

// ── DocumentState ─────────────────────────────────────────────────────────────

/// Metadata for the one open document.  The text itself lives in the widget.
#[derive(Debug)]
pub struct DocumentState {
    /// Path to the file on disk, or `None` for an untitled buffer.
    pub path: Option<PathBuf>,
    /// The encoding used to read (and that will be used to write) the file.
    pub encoding: Encoding,
    /// The EOL convention detected in the file.
    pub eol: EolMode,
    /// `true` when the buffer contains changes not yet saved to disk.
    pub dirty: bool,
}

impl DocumentState {
    /// A fresh, untitled document with sensible defaults.
    fn new_untitled() -> Self {
        Self {
            path: None,
            encoding: Encoding::Utf8,
            eol: EolMode::Crlf,
            dirty: false,
        }
    }

    /// The bare filename component, or `"Untitled"` if no path is set.
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_owned())
    }
}

// ── Status message ────────────────────────────────────────────────────────────

/// A transient status-bar message, pinned to the caret position at which it
/// was raised.  It stays up until the caret moves.
#[derive(Debug)]
struct StatusMessage {
    text: String,
    caret: (usize, usize),
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Top-level application state, passed by `&mut` to every handler.
pub struct App {
    /// State of the currently open document.
    pub doc: DocumentState,
    pub theme: Theme,
    pub word_wrap: bool,
    /// What the Find / Replace dialog last asked for.
    pub find: FindSettings,
    cursor: MatchCursor,
    message: Option<StatusMessage>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl App {
    /// Create a fresh `App` with an untitled, empty document.
    pub fn new(settings: &Settings) -> Self {
        Self {
            doc: DocumentState::new_untitled(),
            theme: Theme::from_dark(settings.dark_mode),
            word_wrap: settings.word_wrap,
            find: settings.last_find.clone(),
            cursor: MatchCursor::new(),
            message: None,
        }
    }

    /// Snapshot of the user preferences for `settings::save`.
    pub fn settings(&self) -> Settings {
        Settings {
            dark_mode: self.theme.is_dark(),
            word_wrap: self.word_wrap,
            last_find: self.find.clone(),
            ..Settings::default()
        }
    }

    /// Compute the title string for the main window.
    ///
    /// | State | Title |
    /// |---|---|
    /// | No path, clean | `"Slate"` |
    /// | Path set, clean | `"filename — Slate"` |
    /// | Path set, dirty | `"*filename — Slate"` |
    /// | No path, dirty | `"*Untitled — Slate"` |
    pub fn window_title(&self) -> String {
        if self.doc.path.is_none() && !self.doc.dirty {
            return "Slate".to_owned();
        }
        let dirty = if self.doc.dirty { "*" } else { "" };
        format!("{dirty}{} \u{2014} Slate", self.doc.display_name())
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.doc.dirty
    }

    /// Record the widget's save-point state.  Also drops cached matches: a
    /// save-point change means the user edited the text.
    pub fn set_dirty(&mut self, dirty: bool) {
        self.doc.dirty = dirty;
        self.cursor.invalidate();
    }

    /// Forget cached search matches.  Call after any edit the host did not
    /// make itself.
    pub fn invalidate_matches(&mut self) {
        self.cursor.invalidate();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn toggle_word_wrap(&mut self) -> bool {
        self.word_wrap = !self.word_wrap;
        self.word_wrap
    }

    // ── Status bar ────────────────────────────────────────────────────────────

    /// The status-bar text for the current caret position.
    ///
    /// A pending message is shown while the caret stays where it was when the
    /// message was raised; once the caret moves the message is dropped.
    pub fn status_line(&mut self, caret: (usize, usize)) -> String {
        if self.message.as_ref().is_some_and(|m| m.caret != caret) {
            self.message = None;
        }
        let message = self.message.as_ref().map(|m| m.text.as_str());
        status::line(caret, self.doc.encoding, self.doc.eol, message)
    }

    fn set_message(&mut self, view: &dyn TextView, text: String) {
        debug_log!("status: {text}");
        self.message = Some(StatusMessage {
            text,
            caret: view.caret_line_col(),
        });
    }

    // ── File lifecycle ────────────────────────────────────────────────────────

    /// Reset to an empty, untitled document.
    pub fn new_document(&mut self, view: &mut dyn TextView) {
        self.doc = DocumentState::new_untitled();
        view.set_text("");
        self.cursor.invalidate();
        self.message = None;
    }

    /// Read `path` from disk and load it into `view`.
    pub fn open(&mut self, view: &mut dyn TextView, path: PathBuf) -> Result<()> {
        let bytes = std::fs::read(&path)?;
        let text = self.open_file(path, &bytes);
        view.set_text(&text);
        self.cursor.invalidate();
        self.message = None;
        Ok(())
    }

    /// Write the widget's text to `path` using the document's encoding.
    ///
    /// On success adopts `path` (for Save As) and clears `doc.dirty`.  The
    /// caller is responsible for calling `ScintillaView::set_save_point()` to
    /// synchronise Scintilla's own dirty model.
    pub fn save(&mut self, view: &dyn TextView, path: PathBuf) -> Result<()> {
        let bytes = self.encode_for_disk(&view.text());
        std::fs::write(&path, &bytes)?;
        self.doc.path = Some(path);
        self.doc.dirty = false;
        let saved = format!("Saved: {}", self.doc.display_name());
        self.set_message(view, saved);
        Ok(())
    }

    /// Re-encode UTF-8 text to the document's on-disk encoding.
    fn encode_for_disk(&self, text: &str) -> Vec<u8> {
        match self.doc.encoding {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Utf16Le => {
                let mut out = vec![0xFF_u8, 0xFE]; // LE BOM
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
                out
            }
            Encoding::Utf16Be => {
                let mut out = vec![0xFE_u8, 0xFF]; // BE BOM
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
                out
            }
            // Latin-1 back to single bytes; anything typed outside it since
            // the file was opened cannot be represented.
            Encoding::Ansi => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
        }
    }

    /// Update document state after reading a file and return its text.
    ///
    /// Encoding detection order:
    /// 1. UTF-16 LE BOM (`FF FE`)
    /// 2. UTF-16 BE BOM (`FE FF`)
    /// 3. UTF-8 BOM (`EF BB BF`)
    /// 4. Heuristic: if the bytes are valid UTF-8, treat as UTF-8
    /// 5. Fallback: ANSI, each byte read as the Latin-1 char of that value
    pub fn open_file(&mut self, path: PathBuf, bytes: &[u8]) -> String {
        let (encoding, text) = Self::detect_and_decode(bytes);
        self.doc.encoding = encoding;
        self.doc.eol = Self::detect_eol(&text);
        self.doc.path = Some(path);
        self.doc.dirty = false;
        debug_log!(
            "opened {} ({}, {}, {} bytes)",
            self.doc.display_name(),
            encoding.as_str(),
            self.doc.eol.as_str(),
            bytes.len()
        );
        text
    }

    /// Detect the encoding of `bytes` and return the encoding + text.
    fn detect_and_decode(bytes: &[u8]) -> (Encoding, String) {
        if let Some(payload) = bytes.strip_prefix(&[0xFF, 0xFE]) {
            let units: Vec<u16> = payload
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes([c[0], c[1]]))
                .collect();
            return (Encoding::Utf16Le, String::from_utf16_lossy(&units));
        }

        if let Some(payload) = bytes.strip_prefix(&[0xFE, 0xFF]) {
            let units: Vec<u16> = payload
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();
            return (Encoding::Utf16Be, String::from_utf16_lossy(&units));
        }

        let body = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
        match std::str::from_utf8(body) {
            Ok(s) => (Encoding::Utf8, s.to_owned()),
            Err(_) => (Encoding::Ansi, bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Detect the dominant EOL style.
    ///
    /// Counts `\r\n`, `\r`, and `\n` and returns whichever appears most.
    /// Falls back to `EolMode::Crlf` when no line endings are present.
    fn detect_eol(text: &str) -> EolMode {
        let bytes = text.as_bytes();
        let (mut crlf, mut lf, mut cr) = (0usize, 0usize, 0usize);
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    crlf += 1;
                    i += 2;
                }
                b'\r' => {
                    cr += 1;
                    i += 1;
                }
                b'\n' => {
                    lf += 1;
                    i += 1;
                }
                _ => i += 1,
            }
        }
        if crlf >= lf && crlf >= cr {
            EolMode::Crlf
        } else if lf >= cr {
            EolMode::Lf
        } else {
            EolMode::Cr
        }
    }

    // ── Find / replace ────────────────────────────────────────────────────────

    /// Select the next (or previous) match, wrapping around the document.
    ///
    /// Forward searches start at the end of the selection and backward ones at
    /// its start, so repeating the command walks through the matches.
    pub fn find_next(&mut self, view: &mut dyn TextView, forward: bool) -> Option<Match> {
        if self.find.query.is_empty() {
            return None;
        }
        let text = view.text();
        self.cursor.update(&text, &self.find.query);
        let sel = view.selection();
        if forward {
            self.cursor.seek_forward(sel.end);
        } else {
            self.cursor.seek_backward(sel.start);
        }

        let hit = self.cursor.current();
        match (hit, self.cursor.position()) {
            (Some(m), Some((i, n))) => {
                view.set_selection(m.start, m.end);
                self.set_message(view, format!("Match {i} of {n}"));
            }
            _ => self.not_found(view),
        }
        hit
    }

    /// Replace the match at or after the selection start, wrapping once to
    /// the top of the document.
    ///
    /// The target is picked from the same match list Find Next walks, so
    /// both commands agree on "the next match" even where hits could
    /// overlap.  The caret lands right after the inserted text and the next
    /// match after it is selected, so a replacement that itself matches is
    /// never picked up again by the following Replace.
    pub fn replace_next(&mut self, view: &mut dyn TextView) -> Result<Option<Match>> {
        if self.find.query.is_empty() {
            return Ok(None);
        }
        let FindSettings { query, replacement } = self.find.clone();
        let text = view.text();
        let from = view.selection().start;

        self.cursor.update(&text, &query);
        let Some(target) = self.cursor.seek_forward(from) else {
            self.not_found(view);
            return Ok(None);
        };
        let outcome = search::replace_one(&text, &query, &replacement, target.start)?;
        let Some(span) = outcome.replaced else {
            self.not_found(view);
            return Ok(None);
        };

        view.replace_range(span, &replacement);
        view.set_selection(outcome.resume, outcome.resume);
        self.doc.dirty = true;

        self.cursor.invalidate();
        self.cursor.update(&outcome.text, &query);
        let resume = outcome.resume;
        if let Some(next) = self.cursor.seek_forward(resume).filter(|m| m.start >= resume) {
            view.set_selection(next.start, next.end);
        }
        self.set_message(view, format!("Replaced 1 occurrence of '{}'", query.pattern));
        Ok(Some(span))
    }

    /// Replace every match in the document as one undoable edit.
    ///
    /// Returns the number of replacements.
    pub fn replace_all(&mut self, view: &mut dyn TextView) -> usize {
        if self.find.query.is_empty() {
            return 0;
        }
        let text = view.text();
        let (new_text, count) =
            search::replace_all(&text, &self.find.query, &self.find.replacement);
        if count == 0 {
            self.not_found(view);
            return 0;
        }

        view.replace_all_text(&new_text);
        self.doc.dirty = true;
        self.cursor.invalidate();
        let noun = if count == 1 { "occurrence" } else { "occurrences" };
        let pattern = self.find.query.pattern.clone();
        self.set_message(view, format!("Replaced {count} {noun} of '{pattern}'"));
        count
    }

    fn not_found(&mut self, view: &dyn TextView) {
        let text = format!("Cannot find '{}'", self.find.query.pattern);
        self.set_message(view, text);
    }
}

/// Bare file name of `path` for dialogs, or `""` when it has none.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Query;

    /// Stand-in for the Scintilla control.
    #[derive(Default)]
    struct MemoryView {
        text: String,
        anchor: usize,
        caret: usize,
        undoable_edits: usize,
    }

    impl MemoryView {
        fn with_text(text: &str) -> Self {
            Self {
                text: text.to_owned(),
                ..Self::default()
            }
        }

        fn selected(&self) -> &str {
            let s = self.selection();
            &self.text[s.range()]
        }
    }

    impl TextView for MemoryView {
        fn text(&self) -> String {
            self.text.clone()
        }

        fn set_text(&mut self, text: &str) {
            self.text = text.to_owned();
            self.anchor = 0;
            self.caret = 0;
            self.undoable_edits = 0;
        }

        fn replace_range(&mut self, span: Match, with: &str) {
            self.text.replace_range(span.range(), with);
            self.undoable_edits += 1;
        }

        fn replace_all_text(&mut self, text: &str) {
            self.text = text.to_owned();
            self.undoable_edits += 1;
        }

        fn selection(&self) -> Match {
            Match::new(self.anchor.min(self.caret), self.anchor.max(self.caret))
        }

        fn set_selection(&mut self, anchor: usize, caret: usize) {
            self.anchor = anchor;
            self.caret = caret;
        }

        fn caret_line_col(&self) -> (usize, usize) {
            let before = &self.text[..self.caret];
            let line = before.matches('\n').count() + 1;
            let col = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
            (line, col)
        }

        fn line_count(&self) -> usize {
            self.text.matches('\n').count() + 1
        }
    }

    fn app_with(pattern: &str, case_sensitive: bool, replacement: &str) -> App {
        let mut app = App::default();
        app.find = FindSettings {
            query: Query::new(pattern, case_sensitive),
            replacement: replacement.to_owned(),
        };
        app
    }

    // ── Title ─────────────────────────────────────────────────────────────────

    #[test]
    fn title_clean_untitled() {
        assert_eq!(App::default().window_title(), "Slate");
    }

    #[test]
    fn title_clean_with_path() {
        let mut app = App::default();
        app.doc.path = Some(PathBuf::from("notes").join("todo.txt"));
        assert_eq!(app.window_title(), "todo.txt \u{2014} Slate");
    }

    #[test]
    fn title_dirty_with_path() {
        let mut app = App::default();
        app.doc.path = Some(PathBuf::from("notes").join("todo.txt"));
        app.doc.dirty = true;
        assert_eq!(app.window_title(), "*todo.txt \u{2014} Slate");
    }

    #[test]
    fn title_dirty_untitled() {
        let mut app = App::default();
        app.set_dirty(true);
        assert_eq!(app.window_title(), "*Untitled \u{2014} Slate");
        assert!(app.has_unsaved_changes());
    }

    // ── Encoding / EOL ────────────────────────────────────────────────────────

    #[test]
    fn detect_encoding_utf16le() {
        let (enc, text) = App::detect_and_decode(b"\xFF\xFEh\x00i\x00");
        assert_eq!(enc, Encoding::Utf16Le);
        assert_eq!(text, "hi");
    }

    #[test]
    fn detect_encoding_utf16be() {
        let (enc, text) = App::detect_and_decode(b"\xFE\xFF\x00h\x00i");
        assert_eq!(enc, Encoding::Utf16Be);
        assert_eq!(text, "hi");
    }

    #[test]
    fn detect_encoding_utf8_bom() {
        let (enc, text) = App::detect_and_decode(b"\xEF\xBB\xBFhello");
        assert_eq!(enc, Encoding::Utf8);
        assert_eq!(text, "hello");
    }

    #[test]
    fn detect_encoding_ansi_fallback_is_latin1() {
        let (enc, text) = App::detect_and_decode(b"caf\xE9");
        assert_eq!(enc, Encoding::Ansi);
        assert_eq!(text, "café");
    }

    #[test]
    fn detect_eol_variants() {
        assert_eq!(App::detect_eol("a\r\nb\r\nc\n"), EolMode::Crlf);
        assert_eq!(App::detect_eol("a\nb\nc\n"), EolMode::Lf);
        assert_eq!(App::detect_eol("a\rb\rc"), EolMode::Cr);
        assert_eq!(App::detect_eol("no newlines here"), EolMode::Crlf);
    }

    // ── File lifecycle ────────────────────────────────────────────────────────

    #[test]
    fn save_then_open_round_trips_utf16() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("wide.txt");

        let mut app = App::default();
        app.doc.encoding = Encoding::Utf16Le;
        app.set_dirty(true);
        let view = MemoryView::with_text("héllo\r\n");
        app.save(&view, path.clone()).expect("save");
        assert!(!app.doc.dirty);
        assert_eq!(app.doc.path.as_deref(), Some(path.as_path()));

        let mut reopened = App::default();
        let mut view2 = MemoryView::default();
        reopened.open(&mut view2, path).expect("open");
        assert_eq!(view2.text, "héllo\r\n");
        assert_eq!(reopened.doc.encoding, Encoding::Utf16Le);
        assert_eq!(reopened.doc.eol, EolMode::Crlf);
    }

    #[test]
    fn save_ansi_writes_single_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("latin.txt");
        let mut app = App::default();
        app.doc.encoding = Encoding::Ansi;
        app.save(&MemoryView::with_text("café €"), path.clone()).expect("save");
        assert_eq!(std::fs::read(path).expect("read"), b"caf\xE9 ?");
    }

    #[test]
    fn save_reports_file_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = App::default();
        let view = MemoryView::with_text("x");
        app.save(&view, dir.path().join("out.txt")).expect("save");
        assert!(app.status_line((1, 1)).starts_with("Saved: out.txt"));
    }

    #[test]
    fn open_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = App::default();
        let mut view = MemoryView::default();
        assert!(app.open(&mut view, dir.path().join("absent.txt")).is_err());
        assert!(app.doc.path.is_none());
    }

    #[test]
    fn new_document_resets_state() {
        let mut app = App::default();
        app.doc.path = Some(PathBuf::from("a.txt"));
        app.set_dirty(true);
        let mut view = MemoryView::with_text("old");
        app.new_document(&mut view);
        assert!(view.text.is_empty());
        assert_eq!(app.window_title(), "Slate");
    }

    // ── Status ────────────────────────────────────────────────────────────────

    #[test]
    fn message_clears_when_caret_moves() {
        let mut app = app_with("zzz", true, "");
        let mut view = MemoryView::with_text("abc");
        app.find_next(&mut view, true);
        assert!(app.status_line((1, 1)).starts_with("Cannot find 'zzz'"));
        assert!(app.status_line((1, 2)).starts_with("Ln 1, Col 2"));
        // Once dropped it does not come back.
        assert!(app.status_line((1, 1)).starts_with("Ln 1, Col 1"));
    }

    // ── Find / replace through the host ───────────────────────────────────────

    #[test]
    fn find_next_walks_and_wraps() {
        let mut app = app_with("foo", true, "");
        let mut view = MemoryView::with_text("foo bar foo");
        assert_eq!(app.find_next(&mut view, true), Some(Match::new(0, 3)));
        assert_eq!(app.find_next(&mut view, true), Some(Match::new(8, 11)));
        assert!(app.status_line(view.caret_line_col()).starts_with("Match 2 of 2"));
        assert_eq!(app.find_next(&mut view, true), Some(Match::new(0, 3)));
        assert_eq!(view.selected(), "foo");
    }

    #[test]
    fn find_previous_walks_backward() {
        let mut app = app_with("foo", true, "");
        let mut view = MemoryView::with_text("foo bar foo");
        view.set_selection(11, 11);
        assert_eq!(app.find_next(&mut view, false), Some(Match::new(8, 11)));
        assert_eq!(app.find_next(&mut view, false), Some(Match::new(0, 3)));
        assert_eq!(app.find_next(&mut view, false), Some(Match::new(8, 11)));
    }

    #[test]
    fn find_sees_edits_made_outside_the_host() {
        let mut app = app_with("x", true, "");
        let mut view = MemoryView::with_text("x");
        app.find_next(&mut view, true);
        view.text = "yx x".to_owned();
        view.set_selection(0, 0);
        assert_eq!(app.find_next(&mut view, true), Some(Match::new(1, 2)));
    }

    #[test]
    fn empty_pattern_does_nothing() {
        let mut app = app_with("", true, "x");
        let mut view = MemoryView::with_text("abc");
        assert_eq!(app.find_next(&mut view, true), None);
        assert_eq!(app.replace_next(&mut view).expect("replace"), None);
        assert_eq!(app.replace_all(&mut view), 0);
        assert_eq!(view.text, "abc");
    }

    #[test]
    fn replace_next_replaces_selected_match() {
        let mut app = app_with("foo", true, "baz");
        let mut view = MemoryView::with_text("foo bar foo");
        app.find_next(&mut view, true);
        let span = app.replace_next(&mut view).expect("replace");
        assert_eq!(span, Some(Match::new(0, 3)));
        assert_eq!(view.text, "baz bar foo");
        // The following match is selected, ready for the next Replace.
        assert_eq!(view.selection(), Match::new(8, 11));
        assert!(app.doc.dirty);
        assert_eq!(view.undoable_edits, 1);
    }

    #[test]
    fn replace_next_does_not_rematch_its_own_output() {
        let mut app = app_with("a", true, "aa");
        let mut view = MemoryView::with_text("a b a");
        app.replace_next(&mut view).expect("replace");
        assert_eq!(view.text, "aa b a");
        // Caret skipped past "aa"; the next selected match is the last "a".
        assert_eq!(view.selection(), Match::new(5, 6));
        app.replace_next(&mut view).expect("replace");
        assert_eq!(view.text, "aa b aa");
    }

    #[test]
    fn replace_next_wraps_to_top() {
        let mut app = app_with("foo", true, "x");
        let mut view = MemoryView::with_text("foo bar");
        view.set_selection(5, 5);
        assert_eq!(app.replace_next(&mut view).expect("replace"), Some(Match::new(0, 3)));
        assert_eq!(view.text, "x bar");
    }

    #[test]
    fn find_next_and_replace_agree_on_overlapping_text() {
        let mut app = app_with("AA", true, "B");
        let mut view = MemoryView::with_text("AAAA");

        view.set_selection(1, 1);
        assert_eq!(app.find_next(&mut view, true), Some(Match::new(2, 4)));

        view.set_selection(1, 1);
        assert_eq!(app.replace_next(&mut view).expect("replace"), Some(Match::new(2, 4)));
        assert_eq!(view.text, "AAB");
    }

    #[test]
    fn replace_next_reports_not_found() {
        let mut app = app_with("zzz", true, "x");
        let mut view = MemoryView::with_text("abc");
        assert_eq!(app.replace_next(&mut view).expect("replace"), None);
        assert!(!app.doc.dirty);
        assert_eq!(view.undoable_edits, 0);
    }

    #[test]
    fn replace_all_is_one_edit_with_count() {
        let mut app = app_with("FOO", false, "baz");
        let mut view = MemoryView::with_text("foo bar Foo");
        assert_eq!(app.replace_all(&mut view), 2);
        assert_eq!(view.text, "baz bar baz");
        assert_eq!(view.undoable_edits, 1);
        assert!(app.status_line(view.caret_line_col()).starts_with("Replaced 2 occurrences of 'FOO'"));
    }

    #[test]
    fn replace_all_without_matches_leaves_text() {
        let mut app = app_with("zzz", true, "x");
        let mut view = MemoryView::with_text("abc");
        assert_eq!(app.replace_all(&mut view), 0);
        assert_eq!(view.undoable_edits, 0);
        assert!(!app.doc.dirty);
    }

    // ── Settings ──────────────────────────────────────────────────────────────

    #[test]
    fn settings_snapshot_reflects_toggles() {
        let mut app = App::default();
        app.toggle_theme();
        app.toggle_word_wrap();
        app.find.query = Query::new("q", true);
        let s = app.settings();
        assert!(s.dark_mode);
        assert!(!s.word_wrap);
        assert_eq!(s.last_find.query.pattern, "q");
        assert_eq!(App::new(&s).theme, Theme::Dark);
    }

    #[test]
    fn file_name_of_path() {
        assert_eq!(file_name_of(&PathBuf::from("dir").join("a.txt")), "a.txt");
        assert_eq!(file_name_of(Path::new("")), "");
    }
}
