// ── Scintilla child-window hosting ────────────────────────────────────────────
//
// This is one of exactly two modules where `unsafe` is permitted.
// Every `unsafe` block MUST carry a `// SAFETY:` comment.
//
// ── DLL ownership model ───────────────────────────────────────────────────────
//
// `SciDll` owns the single `LoadLibraryW` call for `SciLexer.dll`.  It is
// stored in `WindowState` after the `ScintillaView`, so Rust drops the view
// (a stale HWND, already destroyed with its parent) before `FreeLibrary`.

#![allow(unsafe_code)]

pub mod messages;

use messages::{
    SC_CP_UTF8, SC_EOL_CR, SC_EOL_CRLF, SC_EOL_LF, SC_MARGIN_NUMBER, SC_WRAP_NONE, SC_WRAP_WORD,
    SCI_BEGINUNDOACTION, SCI_EMPTYUNDOBUFFER, SCI_ENDUNDOACTION, SCI_GETCOLUMN,
    SCI_GETCURRENTPOS, SCI_GETLENGTH, SCI_GETLINECOUNT, SCI_GETMODIFY, SCI_GETSELECTIONEND,
    SCI_GETSELECTIONSTART, SCI_GETTEXT, SCI_LINEFROMPOSITION, SCI_REDO, SCI_REPLACETARGET,
    SCI_SCROLLCARET, SCI_SELECTALL, SCI_SETCARETFORE, SCI_SETCODEPAGE, SCI_SETEOLMODE,
    SCI_SETMARGINTYPEN, SCI_SETMARGINWIDTHN, SCI_SETSAVEPOINT, SCI_SETSEL, SCI_SETSELBACK,
    SCI_SETTARGETEND, SCI_SETTARGETSTART, SCI_SETTEXT, SCI_SETWRAPMODE, SCI_STYLECLEARALL,
    SCI_STYLESETBACK, SCI_STYLESETFONT, SCI_STYLESETFORE, SCI_STYLESETSIZE, SCI_TEXTWIDTH,
    STYLE_DEFAULT, STYLE_LINENUMBER, WM_COPY, WM_CUT, WM_PASTE, WM_UNDO,
};

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{FreeLibrary, BOOL, HINSTANCE, HMODULE, HWND, LPARAM, WPARAM},
        System::LibraryLoader::LoadLibraryW,
        UI::{
            Input::KeyboardAndMouse::SetFocus,
            WindowsAndMessaging::{
                CreateWindowExW, MoveWindow, SendMessageW, HMENU, WINDOW_EX_STYLE,
                WINDOW_STYLE, WS_CHILD, WS_CLIPSIBLINGS, WS_VISIBLE,
            },
        },
    },
};

use crate::{
    app::EolMode,
    editor::TextView,
    error::{Result, SlateError},
    search::Match,
    theme::Palette,
    ui::gutter,
};

// ── DLL identity ──────────────────────────────────────────────────────────────

const DLL_NAME: &str = "SciLexer.dll";
const CLASS_NAME: &str = "Scintilla";

/// Editor font.  Null-terminated for `SCI_STYLESETFONT`.
const FONT_NAME: &[u8] = b"Consolas\0";
const FONT_SIZE: usize = 11;

// ── SciDll ────────────────────────────────────────────────────────────────────

/// RAII handle to the loaded `SciLexer.dll`.
///
/// Loading the DLL causes it to register the `"Scintilla"` window class.
/// `FreeLibrary` is called on `Drop`, after the view's window is gone.
pub(crate) struct SciDll(HMODULE);

impl SciDll {
    /// Load `SciLexer.dll` from the application directory.
    pub(crate) fn load() -> Result<Self> {
        let path: Vec<u16> = DLL_NAME.encode_utf16().chain(std::iter::once(0)).collect();
        // SAFETY: path is a valid null-terminated UTF-16 string.
        // LoadLibraryW searches the application directory first on Win10/11.
        let dll = unsafe { LoadLibraryW(PCWSTR(path.as_ptr())) }.map_err(SlateError::from)?;
        Ok(Self(dll))
    }
}

impl Drop for SciDll {
    fn drop(&mut self) {
        // SAFETY: self.0 was returned by a successful LoadLibraryW and has not
        // been freed since.  The Scintilla HWND was destroyed together with
        // the main window before WindowState is dropped.
        unsafe {
            let _ = FreeLibrary(self.0);
        }
    }
}

// ── ScintillaView ─────────────────────────────────────────────────────────────

/// The hosted Scintilla editor child window.
///
/// Does **not** own the `SciLexer.dll` module handle.  The child `HWND` is
/// destroyed automatically by Windows when the parent is destroyed.
pub(crate) struct ScintillaView {
    hwnd: HWND,
}

impl ScintillaView {
    /// Create a visible Scintilla child window inside `hwnd_parent`.
    ///
    /// `_dll` proves that `SciLexer.dll` is loaded and the `"Scintilla"` class
    /// is registered.  The window starts with zero size; the parent's
    /// `WM_SIZE` handler lays it out.
    pub(crate) fn create(hwnd_parent: HWND, hinstance: HINSTANCE, _dll: &SciDll) -> Result<Self> {
        let class_wide: Vec<u16> = CLASS_NAME.encode_utf16().chain(std::iter::once(0)).collect();

        // SAFETY: class_wide is null-terminated UTF-16 for the class registered
        // by SciLexer.dll (_dll proves the DLL is loaded).  hwnd_parent and
        // hinstance are valid Win32 handles from WM_CREATE.
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                PCWSTR(class_wide.as_ptr()),
                PCWSTR::null(),
                WS_CHILD | WS_VISIBLE | WS_CLIPSIBLINGS,
                0, 0, 0, 0,
                hwnd_parent,
                HMENU::default(),
                hinstance,
                None,
            )
        }
        .map_err(|e| SlateError::Win32 {
            function: "CreateWindowExW (Scintilla)",
            code: e.code().0 as u32,
        })?;

        let view = Self { hwnd };
        view.send(SCI_SETCODEPAGE, SC_CP_UTF8, 0);
        view.send(SCI_SETMARGINTYPEN, 0, SC_MARGIN_NUMBER);
        Ok(view)
    }

    /// The Scintilla child window handle.  Valid until the parent is destroyed.
    pub(crate) fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Send one Scintilla message and return the raw result.
    fn send(&self, msg: u32, wparam: usize, lparam: isize) -> isize {
        // SAFETY: hwnd is a live Scintilla window.  Every caller passes either
        // plain integers or a pointer to a buffer that outlives this call, as
        // documented for the message being sent.
        unsafe { SendMessageW(self.hwnd, msg, WPARAM(wparam), LPARAM(lparam)).0 }
    }

    // ── Layout / focus ────────────────────────────────────────────────────────

    pub(crate) fn move_to(&self, x: i32, y: i32, width: i32, height: i32) {
        // SAFETY: hwnd valid; MoveWindow on our own child with repaint=TRUE.
        unsafe {
            let _ = MoveWindow(self.hwnd, x, y, width, height, BOOL::from(true));
        }
    }

    pub(crate) fn focus(&self) {
        // SAFETY: hwnd valid; focus change on the UI thread that owns it.
        unsafe {
            let _ = SetFocus(self.hwnd);
        }
    }

    // ── Document operations ───────────────────────────────────────────────────

    /// Read the full document text as UTF-8 bytes (without null terminator).
    fn get_text(&self) -> Vec<u8> {
        let len = self.doc_len();
        let mut buf = vec![0u8; len + 1];
        // buf is len+1 bytes; SCI_GETTEXT writes at most that many.
        self.send(SCI_GETTEXT, len + 1, buf.as_mut_ptr() as isize);
        buf.truncate(len);
        buf
    }

    /// Total byte length of the document (excluding null terminator).
    fn doc_len(&self) -> usize {
        self.send(SCI_GETLENGTH, 0, 0) as usize
    }

    /// Mark the current state as the save point.
    pub(crate) fn set_save_point(&self) {
        self.send(SCI_SETSAVEPOINT, 0, 0);
    }

    /// `true` while the document differs from the last save point.
    pub(crate) fn is_modified(&self) -> bool {
        self.send(SCI_GETMODIFY, 0, 0) != 0
    }

    /// Set the EOL mode for new lines.
    pub(crate) fn set_eol_mode(&self, eol: EolMode) {
        let mode = match eol {
            EolMode::Crlf => SC_EOL_CRLF,
            EolMode::Lf => SC_EOL_LF,
            EolMode::Cr => SC_EOL_CR,
        };
        self.send(SCI_SETEOLMODE, mode, 0);
    }

    // ── Edit operations ───────────────────────────────────────────────────────

    pub(crate) fn undo(&self) {
        self.send(WM_UNDO, 0, 0);
    }

    pub(crate) fn redo(&self) {
        self.send(SCI_REDO, 0, 0);
    }

    pub(crate) fn cut(&self) {
        self.send(WM_CUT, 0, 0);
    }

    pub(crate) fn copy_to_clipboard(&self) {
        self.send(WM_COPY, 0, 0);
    }

    pub(crate) fn paste(&self) {
        self.send(WM_PASTE, 0, 0);
    }

    pub(crate) fn select_all(&self) {
        self.send(SCI_SELECTALL, 0, 0);
    }

    pub(crate) fn set_word_wrap(&self, enabled: bool) {
        let mode = if enabled { SC_WRAP_WORD } else { SC_WRAP_NONE };
        self.send(SCI_SETWRAPMODE, mode, 0);
    }

    // ── Targets ───────────────────────────────────────────────────────────────

    fn set_target(&self, start: usize, end: usize) {
        self.send(SCI_SETTARGETSTART, start, 0);
        self.send(SCI_SETTARGETEND, end, 0);
    }

    /// Replace the current target range with `text` (UTF-8).
    fn replace_target(&self, text: &str) {
        // WPARAM carries the length, so no terminator is needed.
        self.send(SCI_REPLACETARGET, text.len(), text.as_ptr() as isize);
    }

    // ── Theme & gutter ────────────────────────────────────────────────────────

    /// Apply a colour palette to the whole control.
    pub(crate) fn apply_palette(&self, p: &Palette) {
        self.send(SCI_STYLESETFONT, STYLE_DEFAULT, FONT_NAME.as_ptr() as isize);
        self.send(SCI_STYLESETSIZE, STYLE_DEFAULT, FONT_SIZE as isize);
        self.send(SCI_STYLESETFORE, STYLE_DEFAULT, p.fg as isize);
        self.send(SCI_STYLESETBACK, STYLE_DEFAULT, p.bg as isize);
        // Clone STYLE_DEFAULT into all slots; must come BEFORE the overrides.
        self.send(SCI_STYLECLEARALL, 0, 0);
        self.send(SCI_STYLESETFORE, STYLE_LINENUMBER, p.line_num_fg as isize);
        self.send(SCI_STYLESETBACK, STYLE_LINENUMBER, p.line_num_bg as isize);
        self.send(SCI_SETCARETFORE, p.caret as usize, 0);
        self.send(SCI_SETSELBACK, 1, p.selection_bg as isize);
    }

    /// Resize the line-number margin to fit the current line count.
    pub(crate) fn update_gutter(&self) {
        let digit_px = self.send(SCI_TEXTWIDTH, STYLE_LINENUMBER, b"9\0".as_ptr() as isize);
        let width = gutter::width(self.line_count(), digit_px as i32);
        self.send(SCI_SETMARGINWIDTHN, 0, width as isize);
    }
}

// ── TextView ──────────────────────────────────────────────────────────────────

impl TextView for ScintillaView {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.get_text()).into_owned()
    }

    fn set_text(&mut self, text: &str) {
        let mut buf: Vec<u8> = Vec::with_capacity(text.len() + 1);
        buf.extend_from_slice(text.as_bytes());
        buf.push(0);
        // buf is null-terminated UTF-8 that outlives the call.
        self.send(SCI_SETTEXT, 0, buf.as_ptr() as isize);
        self.send(SCI_EMPTYUNDOBUFFER, 0, 0);
    }

    fn replace_range(&mut self, span: Match, with: &str) {
        self.send(SCI_BEGINUNDOACTION, 0, 0);
        self.set_target(span.start, span.end);
        self.replace_target(with);
        self.send(SCI_ENDUNDOACTION, 0, 0);
    }

    fn replace_all_text(&mut self, text: &str) {
        self.send(SCI_BEGINUNDOACTION, 0, 0);
        self.set_target(0, self.doc_len());
        self.replace_target(text);
        self.send(SCI_ENDUNDOACTION, 0, 0);
    }

    fn selection(&self) -> Match {
        let start = self.send(SCI_GETSELECTIONSTART, 0, 0) as usize;
        let end = self.send(SCI_GETSELECTIONEND, 0, 0) as usize;
        Match::new(start, end)
    }

    fn set_selection(&mut self, anchor: usize, caret: usize) {
        self.send(SCI_SETSEL, anchor, caret as isize);
        self.send(SCI_SCROLLCARET, 0, 0);
    }

    fn caret_line_col(&self) -> (usize, usize) {
        let pos = self.send(SCI_GETCURRENTPOS, 0, 0) as usize;
        let line = self.send(SCI_LINEFROMPOSITION, pos, 0) as usize;
        let col = self.send(SCI_GETCOLUMN, pos, 0) as usize;
        (line + 1, col + 1)
    }

    fn line_count(&self) -> usize {
        (self.send(SCI_GETLINECOUNT, 0, 0) as usize).max(1)
    }
}
