// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32`   – Win32 / WinAPI FFI
//   • `editor::scintilla` – Scintilla child-window hosting
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! Slate: a single-window text editor built on a hosted Scintilla control.
//!
//! The editing engine (storage, selection, clipboard, undo) is Scintilla's.
//! This crate supplies the literal find / replace engine in [`search`], the
//! document host in [`app`] that drives it, and the Win32 shell around them.

pub mod app;
pub mod commands;
pub mod editor;
pub mod error;
pub mod search;
pub mod settings;
pub mod theme;
pub mod ui;

#[cfg(windows)]
pub mod platform;

/// Diagnostic line on stderr, debug builds only.
///
/// Release builds run without a console, so the output is compiled away
/// there; the arguments are still type-checked.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            eprintln!("[slate] {}", format_args!($($arg)*));
        }
    };
}
