// ── Common dialogs ─────────────────────────────────────────────────────────────
//
// Thin wrappers around the Win32 common-dialog APIs and message boxes.
// Open/Save return `Some(path)` on confirmation and `None` on cancel.
//
// The Find / Replace dialog is modeless: `FindDialog` owns the FINDREPLACEW
// block and both text buffers for as long as the dialog window exists, and
// the dialog reports back to its owner through the registered
// `commdlg_FindReplace` message.
//
// This is inside `platform::win32` so `unsafe` is permitted per crate policy.

#![allow(unsafe_code)]

use std::{path::PathBuf, sync::OnceLock};

use windows::{
    core::{w, PCWSTR, PWSTR},
    Win32::{
        Foundation::{HWND, LPARAM},
        UI::{
            Controls::Dialogs::{
                FindTextW, GetOpenFileNameW, GetSaveFileNameW, ReplaceTextW, FINDREPLACEW,
                FINDREPLACE_FLAGS, FR_DIALOGTERM, FR_DOWN, FR_FINDNEXT, FR_MATCHCASE,
                FR_REPLACE, FR_REPLACEALL, FR_WHOLEWORD, OFN_FILEMUSTEXIST, OFN_HIDEREADONLY,
                OFN_OVERWRITEPROMPT, OFN_PATHMUSTEXIST, OPENFILENAMEW,
            },
            WindowsAndMessaging::{
                MessageBoxW, RegisterWindowMessageW, SetForegroundWindow, IDNO, IDYES,
                MB_ICONERROR, MB_ICONWARNING, MB_OK, MB_YESNOCANCEL,
            },
        },
    },
};

use crate::{
    error::{Result, SlateError},
    search::Query,
    settings::FindSettings,
};

// ── Buffer sizes ──────────────────────────────────────────────────────────────

/// Maximum path length in `WCHAR`s, including the null terminator.
/// `MAX_PATH` (260) is too short for modern Windows paths; use 32 768 which
/// is the documented maximum for `\\?\` extended paths.
const PATH_BUF_LEN: usize = 32_768;

/// Find / Replace field capacity in `WCHAR`s, including the terminator.
const FIND_BUF_LEN: usize = 512;

/// "Display\0pattern\0" pairs ending with a double null.
const FILE_FILTER: &str = "Text Files (*.txt)\0*.txt\0All Files (*.*)\0*.*\0\0";

// ── Open dialog ───────────────────────────────────────────────────────────────

/// Show the standard "Open File" dialog.
///
/// Returns the chosen path, or `None` if the user cancelled.
pub(crate) fn show_open_dialog(hwnd_owner: HWND) -> Option<PathBuf> {
    let mut buf = vec![0u16; PATH_BUF_LEN];
    let filter: Vec<u16> = FILE_FILTER.encode_utf16().collect();

    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: hwnd_owner,
        lpstrFilter: PCWSTR(filter.as_ptr()),
        lpstrFile: PWSTR(buf.as_mut_ptr()),
        nMaxFile: PATH_BUF_LEN as u32,
        Flags: OFN_FILEMUSTEXIST | OFN_PATHMUSTEXIST | OFN_HIDEREADONLY,
        ..Default::default()
    };

    // SAFETY: `ofn` is fully initialised; `buf` and `filter` outlive this
    // call.  GetOpenFileNameW reads and writes only within the buffers we
    // provided.  Called on the UI thread (required for modal dialogs).
    let ok = unsafe { GetOpenFileNameW(&mut ofn) };

    ok.as_bool().then(|| path_from_buf(&buf))
}

// ── Save dialog ───────────────────────────────────────────────────────────────

/// Show the standard "Save As" dialog.
///
/// `default_name` pre-populates the filename field.  A name typed without an
/// extension gets `.txt`.
pub(crate) fn show_save_dialog(hwnd_owner: HWND, default_name: &str) -> Option<PathBuf> {
    let mut buf: Vec<u16> = default_name
        .encode_utf16()
        .chain(std::iter::repeat(0).take(PATH_BUF_LEN))
        .take(PATH_BUF_LEN)
        .collect();
    // Keep the last WCHAR a terminator even for an over-long default name.
    buf[PATH_BUF_LEN - 1] = 0;
    let filter: Vec<u16> = FILE_FILTER.encode_utf16().collect();

    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: hwnd_owner,
        lpstrFilter: PCWSTR(filter.as_ptr()),
        lpstrFile: PWSTR(buf.as_mut_ptr()),
        nMaxFile: PATH_BUF_LEN as u32,
        lpstrDefExt: w!("txt"),
        Flags: OFN_OVERWRITEPROMPT | OFN_PATHMUSTEXIST,
        ..Default::default()
    };

    // SAFETY: same invariants as show_open_dialog above.
    let ok = unsafe { GetSaveFileNameW(&mut ofn) };

    ok.as_bool().then(|| path_from_buf(&buf))
}

// ── Message boxes ─────────────────────────────────────────────────────────────

/// Answer to the unsaved-changes prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DiscardChoice {
    Save,
    Discard,
    Cancel,
}

/// Ask whether to save pending changes before they would be lost.
pub(crate) fn confirm_discard(hwnd_owner: HWND) -> DiscardChoice {
    // SAFETY: both strings are static null-terminated literals; hwnd_owner is
    // the live main window.
    let answer = unsafe {
        MessageBoxW(
            hwnd_owner,
            w!("You have unsaved changes. Save before proceeding?"),
            w!("Unsaved Changes"),
            MB_YESNOCANCEL | MB_ICONWARNING,
        )
    };
    match answer {
        IDYES => DiscardChoice::Save,
        IDNO => DiscardChoice::Discard,
        _ => DiscardChoice::Cancel,
    }
}

/// Modal error box.  `hwnd_owner` may be null for an ownerless dialog.
pub(crate) fn show_error(hwnd_owner: HWND, title: &str, message: &str) {
    let msg_wide = to_wide(message);
    let title_wide = to_wide(title);
    // SAFETY: msg_wide and title_wide are null-terminated UTF-16 strings that
    // stay allocated for the duration of the call.
    unsafe {
        let _ = MessageBoxW(
            hwnd_owner,
            PCWSTR(msg_wide.as_ptr()),
            PCWSTR(title_wide.as_ptr()),
            MB_OK | MB_ICONERROR,
        );
    }
}

/// Modal information box.
pub(crate) fn show_info(hwnd_owner: HWND, title: &str, message: &str) {
    let msg_wide = to_wide(message);
    let title_wide = to_wide(title);
    // SAFETY: as in show_error.
    unsafe {
        let _ = MessageBoxW(
            hwnd_owner,
            PCWSTR(msg_wide.as_ptr()),
            PCWSTR(title_wide.as_ptr()),
            MB_OK,
        );
    }
}

// ── Find / Replace ────────────────────────────────────────────────────────────

/// The message id the Find / Replace dialog posts to its owner.
pub(crate) fn find_message_id() -> u32 {
    static ID: OnceLock<u32> = OnceLock::new();
    // SAFETY: the argument is a static null-terminated literal
    // (FINDMSGSTRINGW).  Registration is idempotent per string.
    *ID.get_or_init(|| unsafe { RegisterWindowMessageW(w!("commdlg_FindReplace")) })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FindKind {
    Find,
    Replace,
}

/// What a Find / Replace notification asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FindRequest {
    FindNext { forward: bool },
    Replace,
    ReplaceAll,
    /// The dialog is closing; drop the `FindDialog`.
    Closed,
}

/// A live modeless Find or Replace dialog.
pub(crate) struct FindDialog {
    hwnd: HWND,
    kind: FindKind,
    // Boxed so the addresses handed to the dialog never move.
    fr: Box<FINDREPLACEW>,
    find_buf: Box<[u16]>,
    replace_buf: Box<[u16]>,
}

impl FindDialog {
    /// Create and show the dialog, pre-filled from `last`.
    pub(crate) fn open(hwnd_owner: HWND, kind: FindKind, last: &FindSettings) -> Result<Self> {
        let mut find_buf = field_buf(&last.query.pattern);
        let mut replace_buf = field_buf(&last.replacement);

        let mut flags = FR_DOWN;
        if last.query.case_sensitive {
            flags |= FR_MATCHCASE;
        }
        if last.query.whole_word {
            flags |= FR_WHOLEWORD;
        }

        // Lengths are given in WCHARs; the dialog never writes past them.
        let mut fr = Box::new(FINDREPLACEW {
            lStructSize: std::mem::size_of::<FINDREPLACEW>() as u32,
            hwndOwner: hwnd_owner,
            Flags: flags,
            lpstrFindWhat: PWSTR(find_buf.as_mut_ptr()),
            lpstrReplaceWith: PWSTR(replace_buf.as_mut_ptr()),
            wFindWhatLen: FIND_BUF_LEN as u16,
            wReplaceWithLen: FIND_BUF_LEN as u16,
            ..Default::default()
        });

        // SAFETY: `fr` and both buffers are heap allocations owned by the
        // returned FindDialog, which the window keeps alive until the dialog
        // reports FR_DIALOGTERM.  hwnd_owner is the live main window.
        let hwnd = unsafe {
            match kind {
                FindKind::Find => FindTextW(&mut *fr),
                FindKind::Replace => ReplaceTextW(&mut *fr),
            }
        };
        if hwnd.0.is_null() {
            return Err(SlateError::Win32 {
                function: match kind {
                    FindKind::Find => "FindTextW",
                    FindKind::Replace => "ReplaceTextW",
                },
                code: 0,
            });
        }

        Ok(Self { hwnd, kind, fr, find_buf, replace_buf })
    }

    /// The dialog window, for `IsDialogMessageW` in the message loop.
    pub(crate) fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub(crate) fn kind(&self) -> FindKind {
        self.kind
    }

    pub(crate) fn bring_to_front(&self) {
        // SAFETY: hwnd is the live dialog window.
        unsafe {
            let _ = SetForegroundWindow(self.hwnd);
        }
    }

    /// Decode a `find_message_id()` notification.
    ///
    /// Returns `None` when `lparam` is not this dialog's FINDREPLACEW, which
    /// happens for a stale notification from a dialog already replaced.
    pub(crate) fn read(&self, lparam: LPARAM) -> Option<(FindRequest, FindSettings)> {
        let ptr = lparam.0 as *const FINDREPLACEW;
        if !std::ptr::eq(ptr, &*self.fr) {
            return None;
        }
        // SAFETY: ptr equals our own live boxed FINDREPLACEW, which the dialog
        // has finished writing before sending the notification.
        let flags = unsafe { (*ptr).Flags };
        let request = request_from_flags(flags)?;

        let query = Query::new(string_from_buf(&self.find_buf), has(flags, FR_MATCHCASE))
            .whole_word(has(flags, FR_WHOLEWORD));
        let settings = FindSettings {
            query,
            replacement: string_from_buf(&self.replace_buf),
        };
        Some((request, settings))
    }
}

fn request_from_flags(flags: FINDREPLACE_FLAGS) -> Option<FindRequest> {
    if has(flags, FR_DIALOGTERM) {
        Some(FindRequest::Closed)
    } else if has(flags, FR_FINDNEXT) {
        Some(FindRequest::FindNext { forward: has(flags, FR_DOWN) })
    } else if has(flags, FR_REPLACEALL) {
        Some(FindRequest::ReplaceAll)
    } else if has(flags, FR_REPLACE) {
        Some(FindRequest::Replace)
    } else {
        None
    }
}

fn has(flags: FINDREPLACE_FLAGS, bit: FINDREPLACE_FLAGS) -> bool {
    flags.0 & bit.0 != 0
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// A fixed-size, null-terminated dialog field holding `initial` (truncated).
fn field_buf(initial: &str) -> Box<[u16]> {
    let mut buf = vec![0u16; FIND_BUF_LEN];
    for (slot, unit) in buf.iter_mut().zip(initial.encode_utf16().take(FIND_BUF_LEN - 1)) {
        *slot = unit;
    }
    buf.into_boxed_slice()
}

fn string_from_buf(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

/// Convert a null-terminated UTF-16 buffer to a `PathBuf`.
fn path_from_buf(buf: &[u16]) -> PathBuf {
    PathBuf::from(string_from_buf(buf))
}
