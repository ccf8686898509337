// ── Main window ───────────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Register the main window class and build the menu bar and accelerator
//     table from `commands`.
//   • WM_CREATE: load SciLexer.dll, create the Scintilla child and the status
//     bar, and hang `WindowState` off GWLP_USERDATA.
//   • Run the message loop, routing keys to the modeless Find / Replace
//     dialog and the accelerator table first.
//   • Dispatch commands and Find / Replace requests to `App`.
//
// `WindowState` lives in a `RefCell`.  Handlers that run a nested message
// loop (modal dialogs, Scintilla notifications sent during our own edits)
// re-enter `wnd_proc`; a re-entrant message finds the state borrowed and
// gets default processing.  Anything it would have updated is refreshed
// when the outer handler finishes.

#![allow(unsafe_code)]

use std::{cell::RefCell, ffi::c_void};

use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM},
        Graphics::Gdi::{GetStockObject, HBRUSH, WHITE_BRUSH},
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            Controls::{InitCommonControlsEx, ICC_BAR_CLASSES, INITCOMMONCONTROLSEX, NMHDR},
            WindowsAndMessaging::{
                AppendMenuW, CheckMenuItem, CreateAcceleratorTableW, CreateMenu,
                CreatePopupMenu, CreateWindowExW, DefWindowProcW, DestroyAcceleratorTable,
                DestroyWindow, DispatchMessageW, GetMenu, GetMessageW, GetWindowLongPtrW,
                GetWindowRect, IsDialogMessageW, LoadCursorW, LoadIconW, PostMessageW,
                PostQuitMessage, RegisterClassExW, SendMessageW, SetWindowLongPtrW,
                SetWindowTextW, ShowWindow, TranslateAcceleratorW, TranslateMessage,
                UpdateWindow, ACCEL, ACCEL_VIRT_FLAGS, CREATESTRUCTW, CS_HREDRAW, CS_VREDRAW,
                CW_USEDEFAULT, FCONTROL, FSHIFT, FVIRTKEY, GWLP_USERDATA, HACCEL, HMENU,
                IDC_ARROW, IDI_APPLICATION, MF_BYCOMMAND, MF_CHECKED, MF_POPUP, MF_SEPARATOR,
                MF_STRING, MF_UNCHECKED, MSG, SW_SHOW, WINDOW_EX_STYLE, WINDOW_STYLE,
                WM_CLOSE, WM_COMMAND, WM_CREATE, WM_DESTROY, WM_NCDESTROY, WM_NOTIFY,
                WM_SETFOCUS, WM_SIZE, WNDCLASSEXW, WS_CHILD, WS_OVERLAPPEDWINDOW, WS_VISIBLE,
            },
        },
    },
};

use super::dialogs::{self, DiscardChoice, FindDialog, FindKind, FindRequest};
use crate::{
    app::{file_name_of, App},
    commands::{Command, MenuItem, ALL, MENU_BAR},
    debug_log,
    editor::{
        scintilla::{
            messages::{SCN_MODIFIED, SCN_SAVEPOINTLEFT, SCN_SAVEPOINTREACHED, SCN_UPDATEUI},
            SciDll, ScintillaView,
        },
        TextView,
    },
    error::{Result, SlateError},
    settings::{self, Settings},
};

// ── Window identity ───────────────────────────────────────────────────────────

/// Atom name used to register (and later find) the main window class.
const CLASS_NAME: PCWSTR = w!("SlateMainWindow");

const APP_TITLE: PCWSTR = w!("Slate");

/// Default window size in device pixels.
const DEFAULT_WIDTH: i32 = 960;
const DEFAULT_HEIGHT: i32 = 640;

/// `SB_SETTEXTW`: WPARAM = part index, LPARAM = null-terminated text.
const SB_SETTEXTW: u32 = 0x040B;
/// Status bar style: draw a sizing grip in the corner.
const SBARS_SIZEGRIP: u32 = 0x0100;

// ── Per-window state ──────────────────────────────────────────────────────────

/// Everything the window procedure needs, owned through GWLP_USERDATA.
struct WindowState {
    app: App,
    view: ScintillaView,
    status: HWND,
    find: Option<FindDialog>,
    // Declared after `view`: the DLL is freed only once the view is dropped.
    _sci_dll: SciDll,
}

/// Creation data passed through `lpCreateParams`.  WM_CREATE records why it
/// failed so `run` can report the real cause.
struct Startup {
    settings: Settings,
    failure: Option<SlateError>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Register the main window class, create the window, and drive the message
/// loop until the user closes the application.
pub fn run() -> Result<()> {
    #[cfg(debug_assertions)]
    let t0 = std::time::Instant::now();

    // SAFETY: GetModuleHandleW(None) returns the .exe's own HMODULE, which is
    // valid for the process lifetime.
    let hmodule = unsafe { GetModuleHandleW(None) }.map_err(SlateError::from)?;
    let hinstance = HINSTANCE(hmodule.0);

    init_common_controls()?;
    register_class(hinstance)?;

    let mut startup = Startup {
        settings: settings::load(),
        failure: None,
    };
    let hwnd = create_window(hinstance, &mut startup)?;
    let accel = build_accelerators()?;

    // SAFETY: hwnd was just returned by CreateWindowExW and is valid.
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = UpdateWindow(hwnd);
    }

    #[cfg(debug_assertions)]
    debug_log!("window visible in {:.1} ms", t0.elapsed().as_secs_f64() * 1000.0);

    let result = message_loop(hwnd, accel);

    // SAFETY: accel came from CreateAcceleratorTableW and is no longer used.
    unsafe {
        let _ = DestroyAcceleratorTable(accel);
    }
    result
}

/// Show a modal error dialog with no owner window.
///
/// Used by `main()` when `run()` returns an error.
pub fn show_error_dialog(message: &str) {
    dialogs::show_error(HWND::default(), "Slate \u{2014} Fatal Error", message);
}

// ── Registration & creation ───────────────────────────────────────────────────

fn init_common_controls() -> Result<()> {
    let icc = INITCOMMONCONTROLSEX {
        dwSize: std::mem::size_of::<INITCOMMONCONTROLSEX>() as u32,
        dwICC: ICC_BAR_CLASSES,
    };
    // SAFETY: icc is fully initialised and outlives the call.
    let ok = unsafe { InitCommonControlsEx(&icc) };
    if !ok.as_bool() {
        return Err(last_error("InitCommonControlsEx"));
    }
    Ok(())
}

fn register_class(hinstance: HINSTANCE) -> Result<()> {
    // SAFETY: IDI_APPLICATION and IDC_ARROW are built-in system resources.
    let icon = unsafe { LoadIconW(None, IDI_APPLICATION) }.map_err(SlateError::from)?;
    let cursor = unsafe { LoadCursorW(None, IDC_ARROW) }.map_err(SlateError::from)?;

    // SAFETY: GetStockObject with WHITE_BRUSH always returns a valid HGDIOBJ.
    let bg_brush = unsafe { HBRUSH(GetStockObject(WHITE_BRUSH).0) };

    let wndclass = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wnd_proc),
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: hinstance,
        hIcon: icon,
        hCursor: cursor,
        hbrBackground: bg_brush,
        lpszMenuName: PCWSTR::null(),
        lpszClassName: CLASS_NAME,
        hIconSm: icon,
    };

    // SAFETY: wndclass is fully initialised with valid handles.
    let atom = unsafe { RegisterClassExW(&wndclass) };
    if atom == 0 {
        return Err(last_error("RegisterClassExW"));
    }
    Ok(())
}

fn create_window(hinstance: HINSTANCE, startup: &mut Startup) -> Result<HWND> {
    let menu = build_menu()?;
    let params: *mut Startup = startup;

    // SAFETY: CLASS_NAME is registered; `params` points at `startup`, which
    // outlives this call (WM_CREATE runs inside CreateWindowExW).
    let created = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            CLASS_NAME,
            APP_TITLE,
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            HWND::default(),
            menu,
            hinstance,
            Some(params as *const c_void),
        )
    };
    created.map_err(|e| {
        startup.failure.take().unwrap_or_else(|| SlateError::from(e))
    })
}

/// Build the menu bar from `MENU_BAR`.
fn build_menu() -> Result<HMENU> {
    // SAFETY: menu handles come from CreateMenu / CreatePopupMenu and every
    // string passed to AppendMenuW is null-terminated and outlives the call.
    unsafe {
        let bar = CreateMenu().map_err(SlateError::from)?;
        for menu in MENU_BAR {
            let popup = CreatePopupMenu().map_err(SlateError::from)?;
            for item in menu.items {
                match item {
                    MenuItem::Command(cmd) => {
                        let text = to_wide(&cmd.menu_text());
                        AppendMenuW(popup, MF_STRING, usize::from(cmd.id()), PCWSTR(text.as_ptr()))
                            .map_err(SlateError::from)?;
                    }
                    MenuItem::Separator => {
                        AppendMenuW(popup, MF_SEPARATOR, 0, PCWSTR::null())
                            .map_err(SlateError::from)?;
                    }
                }
            }
            let title = to_wide(menu.title);
            // For MF_POPUP the item id is the child HMENU.
            AppendMenuW(bar, MF_POPUP, popup.0 as usize, PCWSTR(title.as_ptr()))
                .map_err(SlateError::from)?;
        }
        Ok(bar)
    }
}

/// Build the accelerator table from `Command::accelerator`.
fn build_accelerators() -> Result<HACCEL> {
    let table: Vec<ACCEL> = ALL
        .iter()
        .filter_map(|&cmd| cmd.accelerator().map(|a| (cmd, a)))
        .map(|(cmd, a)| {
            let mut flags: ACCEL_VIRT_FLAGS = FVIRTKEY;
            if a.ctrl {
                flags |= FCONTROL;
            }
            if a.shift {
                flags |= FSHIFT;
            }
            ACCEL {
                fVirt: flags,
                key: a.key.virtual_key(),
                cmd: cmd.id(),
            }
        })
        .collect();
    // SAFETY: table is a valid slice of ACCEL entries for the call's duration.
    unsafe { CreateAcceleratorTableW(&table) }.map_err(SlateError::from)
}

// ── Message loop ──────────────────────────────────────────────────────────────

fn message_loop(hwnd: HWND, accel: HACCEL) -> Result<()> {
    let mut msg = MSG::default();

    loop {
        // SAFETY: &mut msg is a valid MSG pointer; null HWND retrieves
        // messages for all windows on this thread.
        let ret = unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) };
        match ret.0 {
            -1 => return Err(last_error("GetMessageW")),
            0 => break,
            _ => {}
        }

        // SAFETY: msg was populated by a successful GetMessageW call; the
        // dialog and accelerator handles are live.
        unsafe {
            if let Some(dialog) = find_dialog_hwnd(hwnd) {
                if IsDialogMessageW(dialog, &msg).as_bool() {
                    continue;
                }
            }
            if TranslateAcceleratorW(hwnd, accel, &msg) != 0 {
                continue;
            }
            let _ = TranslateMessage(&msg);
            let _ = DispatchMessageW(&msg);
        }
    }

    Ok(())
}

fn find_dialog_hwnd(hwnd: HWND) -> Option<HWND> {
    let cell = state_cell(hwnd)?;
    let state = cell.try_borrow().ok()?;
    state.find.as_ref().map(FindDialog::hwnd)
}

// ── State access ──────────────────────────────────────────────────────────────

fn state_cell<'a>(hwnd: HWND) -> Option<&'a RefCell<WindowState>> {
    // SAFETY: GWLP_USERDATA holds either 0 or the pointer stored in WM_CREATE
    // by Box::into_raw.  It is reset to 0 in WM_NCDESTROY before the box is
    // freed, and only this UI thread touches it.
    unsafe {
        let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const RefCell<WindowState>;
        ptr.as_ref()
    }
}

// ── Window procedure ──────────────────────────────────────────────────────────

// SAFETY: wnd_proc is registered as lpfnWndProc in WNDCLASSEXW.
// Windows guarantees that hwnd, msg, wparam, and lparam are valid for the
// lifetime of this call.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_CREATE => {
            let cs = lparam.0 as *const CREATESTRUCTW;
            let startup = (*cs).lpCreateParams as *mut Startup;
            match create_state(hwnd, (*cs).hInstance, &(*startup).settings) {
                Ok(state) => {
                    let ptr = Box::into_raw(Box::new(RefCell::new(state)));
                    SetWindowLongPtrW(hwnd, GWLP_USERDATA, ptr as isize);
                    LRESULT(0)
                }
                Err(e) => {
                    debug_log!("window creation failed: {e}");
                    (*startup).failure = Some(e);
                    // -1 makes CreateWindowExW fail.
                    LRESULT(-1)
                }
            }
        }

        WM_NCDESTROY => {
            let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut RefCell<WindowState>;
            if !ptr.is_null() {
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                // SAFETY: ptr came from Box::into_raw in WM_CREATE and is
                // freed exactly once, here.
                drop(Box::from_raw(ptr));
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        _ => {
            let Some(cell) = state_cell(hwnd) else {
                return DefWindowProcW(hwnd, msg, wparam, lparam);
            };
            let Ok(mut state) = cell.try_borrow_mut() else {
                return DefWindowProcW(hwnd, msg, wparam, lparam);
            };
            handle_message(&mut state, hwnd, msg, wparam, lparam)
                .unwrap_or_else(|| DefWindowProcW(hwnd, msg, wparam, lparam))
        }
    }
}

/// Handle one message with the state borrowed.  `None` means "not handled".
fn handle_message(
    state: &mut WindowState,
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> Option<LRESULT> {
    if msg == dialogs::find_message_id() {
        on_find_request(state, hwnd, lparam);
        return Some(LRESULT(0));
    }

    match msg {
        WM_SIZE => {
            let width = (lparam.0 & 0xFFFF) as i32;
            let height = ((lparam.0 >> 16) & 0xFFFF) as i32;
            layout(state, width, height);
            Some(LRESULT(0))
        }

        WM_SETFOCUS => {
            state.view.focus();
            Some(LRESULT(0))
        }

        WM_NOTIFY => {
            // SAFETY: for WM_NOTIFY, lparam points to an NMHDR (Scintilla's
            // SCNotification starts with one) valid for this message.
            let header = unsafe { &*(lparam.0 as *const NMHDR) };
            if header.hwndFrom != state.view.hwnd() {
                return None;
            }
            match header.code {
                SCN_SAVEPOINTLEFT => {
                    state.app.set_dirty(true);
                    refresh_title(state, hwnd);
                }
                SCN_SAVEPOINTREACHED => {
                    state.app.set_dirty(false);
                    refresh_title(state, hwnd);
                }
                SCN_MODIFIED => state.app.invalidate_matches(),
                SCN_UPDATEUI => refresh_status(state),
                _ => {}
            }
            Some(LRESULT(0))
        }

        WM_COMMAND => {
            // Low word of WPARAM is the command identifier.
            let cmd = Command::from_id((wparam.0 & 0xFFFF) as u16)?;
            on_command(state, hwnd, cmd);
            sync_dirty(state);
            refresh(state, hwnd);
            Some(LRESULT(0))
        }

        WM_CLOSE => {
            if confirm_discard(state, hwnd) {
                // SAFETY: hwnd is our live main window.
                unsafe {
                    let _ = DestroyWindow(hwnd);
                }
            }
            Some(LRESULT(0))
        }

        WM_DESTROY => {
            persist_settings(state);
            // SAFETY: posting WM_QUIT from WM_DESTROY is always valid.
            unsafe { PostQuitMessage(0) };
            Some(LRESULT(0))
        }

        _ => None,
    }
}

// ── WM_CREATE ─────────────────────────────────────────────────────────────────

fn create_state(hwnd: HWND, hinstance: HINSTANCE, settings: &Settings) -> Result<WindowState> {
    let sci_dll = SciDll::load()?;
    let view = ScintillaView::create(hwnd, hinstance, &sci_dll)?;

    // SAFETY: the status bar class is registered by InitCommonControlsEx;
    // hwnd and hinstance are valid for WM_CREATE.
    let status = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            w!("msctls_statusbar32"),
            PCWSTR::null(),
            WS_CHILD | WS_VISIBLE | WINDOW_STYLE(SBARS_SIZEGRIP),
            0, 0, 0, 0,
            hwnd,
            HMENU::default(),
            hinstance,
            None,
        )
    }
    .map_err(|e| SlateError::Win32 {
        function: "CreateWindowExW (status bar)",
        code: e.code().0 as u32,
    })?;

    let mut state = WindowState {
        app: App::new(settings),
        view,
        status,
        find: None,
        _sci_dll: sci_dll,
    };

    state.view.apply_palette(state.app.theme.palette());
    state.view.set_word_wrap(state.app.word_wrap);
    state.view.set_eol_mode(state.app.doc.eol);
    refresh(&mut state, hwnd);
    Ok(state)
}

// ── Layout & refresh ──────────────────────────────────────────────────────────

fn layout(state: &WindowState, width: i32, height: i32) {
    // The status bar positions itself when forwarded WM_SIZE.
    // SAFETY: status is our live child window.
    let status_height = unsafe {
        SendMessageW(state.status, WM_SIZE, WPARAM(0), LPARAM(0));
        let mut rc = RECT::default();
        match GetWindowRect(state.status, &mut rc) {
            Ok(()) => rc.bottom - rc.top,
            Err(_) => 0,
        }
    };
    state.view.move_to(0, 0, width, (height - status_height).max(0));
}

fn refresh(state: &mut WindowState, hwnd: HWND) {
    refresh_title(state, hwnd);
    refresh_status(state);
    check_menu(hwnd, Command::WordWrap, state.app.word_wrap);
    check_menu(hwnd, Command::ToggleTheme, state.app.theme.is_dark());
}

fn refresh_title(state: &WindowState, hwnd: HWND) {
    let title = to_wide(&state.app.window_title());
    // SAFETY: title is null-terminated UTF-16 that outlives the call.
    unsafe {
        let _ = SetWindowTextW(hwnd, PCWSTR(title.as_ptr()));
    }
}

fn refresh_status(state: &mut WindowState) {
    let line = state.app.status_line(state.view.caret_line_col());
    let text = to_wide(&line);
    // SAFETY: status is our live status bar; text outlives the call.
    unsafe {
        SendMessageW(state.status, SB_SETTEXTW, WPARAM(0), LPARAM(text.as_ptr() as isize));
    }
    state.view.update_gutter();
}

fn check_menu(hwnd: HWND, cmd: Command, checked: bool) {
    let mark = if checked { MF_CHECKED } else { MF_UNCHECKED };
    // SAFETY: hwnd owns its menu bar; CheckMenuItem on an unknown id is a
    // no-op.
    unsafe {
        let menu = GetMenu(hwnd);
        CheckMenuItem(menu, u32::from(cmd.id()), (MF_BYCOMMAND | mark).0);
    }
}

/// Pick up save-point changes whose notifications arrived while the state
/// was borrowed (undo back to the save point, our own replacements).
fn sync_dirty(state: &mut WindowState) {
    let modified = state.view.is_modified();
    if modified != state.app.has_unsaved_changes() {
        state.app.set_dirty(modified);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn on_command(state: &mut WindowState, hwnd: HWND, cmd: Command) {
    debug_log!("command {cmd:?}");
    match cmd {
        Command::New => {
            if confirm_discard(state, hwnd) {
                state.app.new_document(&mut state.view);
                state.view.set_eol_mode(state.app.doc.eol);
                state.view.set_save_point();
            }
        }
        Command::Open => {
            if !confirm_discard(state, hwnd) {
                return;
            }
            let Some(path) = dialogs::show_open_dialog(hwnd) else {
                return;
            };
            let name = file_name_of(&path);
            match state.app.open(&mut state.view, path) {
                Ok(()) => {
                    state.view.set_eol_mode(state.app.doc.eol);
                    state.view.set_save_point();
                }
                Err(e) => dialogs::show_error(
                    hwnd,
                    "Open Error",
                    &format!("Could not open '{name}':\n{e}"),
                ),
            }
        }
        Command::Save => {
            save_document(state, hwnd, false);
        }
        Command::SaveAs => {
            save_document(state, hwnd, true);
        }
        Command::Exit => {
            // Through WM_CLOSE so the unsaved-changes prompt runs.
            // SAFETY: hwnd is our live main window.
            unsafe {
                let _ = PostMessageW(hwnd, WM_CLOSE, WPARAM(0), LPARAM(0));
            }
        }
        Command::Undo => state.view.undo(),
        Command::Redo => state.view.redo(),
        Command::Cut => state.view.cut(),
        Command::Copy => state.view.copy_to_clipboard(),
        Command::Paste => state.view.paste(),
        Command::SelectAll => state.view.select_all(),
        Command::Find => open_find_dialog(state, hwnd, FindKind::Find),
        Command::Replace => open_find_dialog(state, hwnd, FindKind::Replace),
        Command::FindNext | Command::FindPrevious => {
            if state.app.find.query.is_empty() {
                open_find_dialog(state, hwnd, FindKind::Find);
            } else {
                state.app.find_next(&mut state.view, cmd == Command::FindNext);
            }
        }
        Command::ToggleTheme => {
            let theme = state.app.toggle_theme();
            state.view.apply_palette(theme.palette());
            persist_settings(state);
        }
        Command::WordWrap => {
            let wrap = state.app.toggle_word_wrap();
            state.view.set_word_wrap(wrap);
            persist_settings(state);
        }
        Command::About => about_dialog(hwnd),
    }
}

/// Write the current preferences.  A failed write is only logged.
fn persist_settings(state: &WindowState) {
    if let Err(e) = settings::save(&state.app.settings()) {
        debug_log!("could not save settings: {e}");
    }
}

/// Resolve the unsaved-changes prompt.  `true` means the caller may go on.
fn confirm_discard(state: &mut WindowState, hwnd: HWND) -> bool {
    if !state.app.has_unsaved_changes() {
        return true;
    }
    match dialogs::confirm_discard(hwnd) {
        DiscardChoice::Save => save_document(state, hwnd, false),
        DiscardChoice::Discard => true,
        DiscardChoice::Cancel => false,
    }
}

/// Save to the current path, asking for one when there is none or when
/// `save_as` is set.  `true` when the document was written.
fn save_document(state: &mut WindowState, hwnd: HWND, save_as: bool) -> bool {
    let path = match (&state.app.doc.path, save_as) {
        (Some(path), false) => path.clone(),
        (current, _) => {
            let default = current.as_deref().map(file_name_of).unwrap_or_default();
            match dialogs::show_save_dialog(hwnd, &default) {
                Some(path) => path,
                None => return false,
            }
        }
    };

    let name = file_name_of(&path);
    match state.app.save(&state.view, path) {
        Ok(()) => {
            state.view.set_save_point();
            true
        }
        Err(e) => {
            dialogs::show_error(hwnd, "Save Error", &format!("Could not save '{name}':\n{e}"));
            false
        }
    }
}

// ── Find / Replace ────────────────────────────────────────────────────────────

fn open_find_dialog(state: &mut WindowState, hwnd: HWND, kind: FindKind) {
    if let Some(dialog) = &state.find {
        if dialog.kind() == kind {
            dialog.bring_to_front();
            return;
        }
        // Switching kinds: detach first so the FR_DIALOGTERM sent during
        // DestroyWindow no longer matches a live dialog.
        if let Some(old) = state.find.take() {
            // SAFETY: old.hwnd() is the live dialog window; `old` (and the
            // buffers it lent the dialog) is dropped only after it is gone.
            unsafe {
                let _ = DestroyWindow(old.hwnd());
            }
        }
    }

    match FindDialog::open(hwnd, kind, &state.app.find) {
        Ok(dialog) => state.find = Some(dialog),
        Err(e) => dialogs::show_error(hwnd, "Slate", &e.to_string()),
    }
}

fn on_find_request(state: &mut WindowState, hwnd: HWND, lparam: LPARAM) {
    let Some((request, find)) = state.find.as_ref().and_then(|d| d.read(lparam)) else {
        return;
    };
    state.app.find = find;

    match request {
        FindRequest::FindNext { forward } => {
            state.app.find_next(&mut state.view, forward);
        }
        FindRequest::Replace => {
            if let Err(e) = state.app.replace_next(&mut state.view) {
                dialogs::show_error(hwnd, "Replace", &e.to_string());
            }
        }
        FindRequest::ReplaceAll => {
            state.app.replace_all(&mut state.view);
        }
        FindRequest::Closed => {
            state.find = None;
        }
    }
    sync_dirty(state);
    refresh(state, hwnd);
}

// ── Helper dialogs ────────────────────────────────────────────────────────────

/// Display the "About Slate" information dialog.
fn about_dialog(hwnd: HWND) {
    let body = concat!(
        "Slate ",
        env!("CARGO_PKG_VERSION"),
        "\n\n",
        "A small single-window text editor for Windows 10/11.\n\n",
        "Licensed under MIT OR Apache-2.0.",
    );
    dialogs::show_info(hwnd, "About Slate", body);
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Capture the current Win32 last-error code and wrap it in a `SlateError`.
///
/// Call immediately after the failing Win32 function: `GetLastError` reads
/// thread-local state that any subsequent API call can overwrite.
fn last_error(function: &'static str) -> SlateError {
    // SAFETY: GetLastError reads thread-local state and never fails.
    let code = unsafe { GetLastError() };
    SlateError::Win32 {
        function,
        code: code.0,
    }
}
