// ── Platform layer ────────────────────────────────────────────────────────────
//
// Everything that talks to the OS window manager.  No `unsafe` lives here;
// all Win32 FFI is confined to the `win32` sub-module.

pub mod win32;
