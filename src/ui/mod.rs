// ── Pure UI state ─────────────────────────────────────────────────────────────
//
// Text and geometry computed for the Win32 controls.  No Win32 calls here;
// `platform::win32::window` pushes the results into the status bar and the
// Scintilla margin.

pub mod gutter;
pub mod status;
