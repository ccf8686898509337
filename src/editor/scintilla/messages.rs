// ── Scintilla message constants ───────────────────────────────────────────────
//
// Source of truth: Scintilla.h (https://www.scintilla.org/ScintillaDoc.html)
// Only the subset Slate sends is listed here.
// All SCI_* values are sent via SendMessageW(hwnd_sci, SCI_*, wparam, lparam).

// ── Code page ─────────────────────────────────────────────────────────────────

/// Set the code page.  Pass `SC_CP_UTF8` as WPARAM.
pub(super) const SCI_SETCODEPAGE: u32 = 2037;
/// UTF-8 code page value for `SCI_SETCODEPAGE`.
pub(super) const SC_CP_UTF8: usize = 65001;

// ── Document content ──────────────────────────────────────────────────────────

/// Replace all document text.  WPARAM=0; LPARAM=null-terminated UTF-8 string.
pub(super) const SCI_SETTEXT: u32 = 2181;
/// Return byte count of the document (excluding null terminator).
pub(super) const SCI_GETLENGTH: u32 = 2006;
/// Copy document bytes.  WPARAM=buffer len (incl. null); LPARAM=buffer ptr.
pub(super) const SCI_GETTEXT: u32 = 2182;
/// Mark the current state as the save point.
pub(super) const SCI_SETSAVEPOINT: u32 = 2014;
/// Non-zero while the document differs from the save point.
pub(super) const SCI_GETMODIFY: u32 = 2159;
/// Forget all undo history (after loading a file).
pub(super) const SCI_EMPTYUNDOBUFFER: u32 = 2175;

// ── Word wrap ─────────────────────────────────────────────────────────────────

/// Set word-wrap mode.
pub(super) const SCI_SETWRAPMODE: u32 = 2268;
/// Disable word wrap.
pub(super) const SC_WRAP_NONE: usize = 0;
/// Wrap at word boundaries.
pub(super) const SC_WRAP_WORD: usize = 1;

// ── Caret / position ──────────────────────────────────────────────────────────

/// Return the byte position of the caret.
pub(super) const SCI_GETCURRENTPOS: u32 = 2008;
/// Convert a byte position to a 0-based line number.
pub(super) const SCI_LINEFROMPOSITION: u32 = 2166;
/// Return the visible column of a position (tab-aware).
pub(super) const SCI_GETCOLUMN: u32 = 2129;
/// Total number of lines.
pub(super) const SCI_GETLINECOUNT: u32 = 2154;

// ── EOL mode ─────────────────────────────────────────────────────────────────

/// Set the EOL mode.  WPARAM = SC_EOL_*.
pub(super) const SCI_SETEOLMODE: u32 = 2031;

/// EOL mode: Windows `\r\n`.
pub(super) const SC_EOL_CRLF: usize = 0;
/// EOL mode: Unix `\n`.
pub(super) const SC_EOL_LF: usize = 1;
/// EOL mode: old Mac `\r`.
pub(super) const SC_EOL_CR: usize = 2;

// ── Selection ─────────────────────────────────────────────────────────────────

/// Start of the selection (the lower position).
pub(super) const SCI_GETSELECTIONSTART: u32 = 2143;
/// End of the selection (the higher position).
pub(super) const SCI_GETSELECTIONEND: u32 = 2145;
/// Set anchor (WPARAM) and caret (LPARAM); scrolls the caret into view.
pub(super) const SCI_SETSEL: u32 = 2160;
/// Scroll so the caret is visible.
pub(super) const SCI_SCROLLCARET: u32 = 2169;

// ── Targets (programmatic replace) ───────────────────────────────────────────

pub(super) const SCI_SETTARGETSTART: u32 = 2190;
pub(super) const SCI_SETTARGETEND: u32 = 2192;
/// Replace the target.  WPARAM=byte length; LPARAM=UTF-8 text.
pub(super) const SCI_REPLACETARGET: u32 = 2194;

// ── Undo grouping ─────────────────────────────────────────────────────────────

pub(super) const SCI_BEGINUNDOACTION: u32 = 2078;
pub(super) const SCI_ENDUNDOACTION: u32 = 2079;

// ── Edit operations ───────────────────────────────────────────────────────────

/// Redo the last undone action (no standard Win32 equivalent).
pub(super) const SCI_REDO: u32 = 2011;
/// Select all document text.
pub(super) const SCI_SELECTALL: u32 = 2013;

// Standard Win32 clipboard messages; Scintilla processes these natively.
/// Cut selection to clipboard.
pub(super) const WM_CUT:   u32 = 0x0300;
/// Copy selection to clipboard.
pub(super) const WM_COPY:  u32 = 0x0301;
/// Paste from clipboard.
pub(super) const WM_PASTE: u32 = 0x0302;
/// Undo last action (Win32 standard; Scintilla also processes this).
pub(super) const WM_UNDO:  u32 = 0x0304;

// ── Styles & colours ──────────────────────────────────────────────────────────

/// Copy `STYLE_DEFAULT` into every style slot.
pub(super) const SCI_STYLECLEARALL: u32 = 2050;
pub(super) const SCI_STYLESETFORE: u32 = 2051;
pub(super) const SCI_STYLESETBACK: u32 = 2052;
pub(super) const SCI_STYLESETSIZE: u32 = 2055;
/// WPARAM=style; LPARAM=null-terminated font name.
pub(super) const SCI_STYLESETFONT: u32 = 2056;
/// WPARAM=useSetting (1); LPARAM=COLORREF.
pub(super) const SCI_SETSELBACK: u32 = 2068;
pub(super) const SCI_SETCARETFORE: u32 = 2069;

/// The style every other style inherits from.
pub(super) const STYLE_DEFAULT: usize = 32;
/// The style of the line-number margin.
pub(super) const STYLE_LINENUMBER: usize = 33;

// ── Margins ───────────────────────────────────────────────────────────────────

pub(super) const SCI_SETMARGINTYPEN: u32 = 2240;
pub(super) const SCI_SETMARGINWIDTHN: u32 = 2242;
/// Margin draws line numbers.
pub(super) const SC_MARGIN_NUMBER: isize = 1;
/// Pixel width of LPARAM text in the WPARAM style.
pub(super) const SCI_TEXTWIDTH: u32 = 2276;

// ── Notifications (pub(crate) for WM_NOTIFY dispatch in window.rs) ───────────

/// Text was inserted or deleted (or styling changed).
pub(crate) const SCN_MODIFIED: u32 = 2008;
/// Caret moved or selection changed.
pub(crate) const SCN_UPDATEUI: u32 = 2007;
/// Document first edited after a save point.
pub(crate) const SCN_SAVEPOINTLEFT: u32 = 2003;
/// Document returned to a save point (e.g. undo).
pub(crate) const SCN_SAVEPOINTREACHED: u32 = 2002;
