// Release builds run as a GUI application (no console window).
// Debug builds keep the console so that `debug_log!` output is visible.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]
#![deny(unsafe_code)]

#[cfg(windows)]
fn main() {
    if let Err(e) = slate::platform::win32::window::run() {
        // Startup failed before or during the message loop.
        // A modal error dialog is the only visible output path in a GUI app.
        slate::platform::win32::window::show_error_dialog(&e.to_string());
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
fn main() {
    eprintln!("slate: the editor window is only available on Windows");
    std::process::exit(1);
}
