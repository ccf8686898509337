// ── Menu commands & keyboard shortcuts ────────────────────────────────────────
//
// One table drives both the menu bar and the accelerator table, so a shortcut
// and its menu item always dispatch the same `Command`.  Pure Rust; the Win32
// menus and `ACCEL` entries are built from this in `platform::win32::window`.

use std::fmt;

/// Every user-invocable action.  Each maps to exactly one host call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    New,
    Open,
    Save,
    SaveAs,
    Exit,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    Find,
    FindNext,
    FindPrevious,
    Replace,
    ToggleTheme,
    WordWrap,
    About,
}

pub const ALL: [Command; 18] = [
    Command::New,
    Command::Open,
    Command::Save,
    Command::SaveAs,
    Command::Exit,
    Command::Undo,
    Command::Redo,
    Command::Cut,
    Command::Copy,
    Command::Paste,
    Command::SelectAll,
    Command::Find,
    Command::FindNext,
    Command::FindPrevious,
    Command::Replace,
    Command::ToggleTheme,
    Command::WordWrap,
    Command::About,
];

impl Command {
    /// `WM_COMMAND` identifier (low word of WPARAM).
    pub fn id(self) -> u16 {
        match self {
            Self::New => 1001,
            Self::Open => 1002,
            Self::Save => 1003,
            Self::SaveAs => 1004,
            Self::Exit => 1099,
            Self::Undo => 2001,
            Self::Redo => 2002,
            Self::Cut => 2003,
            Self::Copy => 2004,
            Self::Paste => 2005,
            Self::SelectAll => 2006,
            Self::Find => 2101,
            Self::FindNext => 2102,
            Self::FindPrevious => 2103,
            Self::Replace => 2104,
            Self::ToggleTheme => 3001,
            Self::WordWrap => 3002,
            Self::About => 9001,
        }
    }

    pub fn from_id(id: u16) -> Option<Self> {
        ALL.into_iter().find(|c| c.id() == id)
    }

    /// Menu label, with `&` marking the mnemonic.
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "&New",
            Self::Open => "&Open…",
            Self::Save => "&Save",
            Self::SaveAs => "Save &As…",
            Self::Exit => "E&xit",
            Self::Undo => "&Undo",
            Self::Redo => "&Redo",
            Self::Cut => "Cu&t",
            Self::Copy => "&Copy",
            Self::Paste => "&Paste",
            Self::SelectAll => "Select &All",
            Self::Find => "&Find…",
            Self::FindNext => "Find &Next",
            Self::FindPrevious => "Find Pre&vious",
            Self::Replace => "R&eplace…",
            Self::ToggleTheme => "Toggle &Dark/Light Theme",
            Self::WordWrap => "&Word Wrap",
            Self::About => "&About Slate…",
        }
    }

    pub fn accelerator(self) -> Option<Accelerator> {
        let accel = match self {
            Self::New => Accelerator::ctrl(Key::Char(b'N')),
            Self::Open => Accelerator::ctrl(Key::Char(b'O')),
            Self::Save => Accelerator::ctrl(Key::Char(b'S')),
            Self::SaveAs => Accelerator::ctrl(Key::Char(b'S')).shift(),
            Self::Undo => Accelerator::ctrl(Key::Char(b'Z')),
            Self::Redo => Accelerator::ctrl(Key::Char(b'Y')),
            Self::Cut => Accelerator::ctrl(Key::Char(b'X')),
            Self::Copy => Accelerator::ctrl(Key::Char(b'C')),
            Self::Paste => Accelerator::ctrl(Key::Char(b'V')),
            Self::SelectAll => Accelerator::ctrl(Key::Char(b'A')),
            Self::Find => Accelerator::ctrl(Key::Char(b'F')),
            Self::FindNext => Accelerator::plain(Key::F(3)),
            Self::FindPrevious => Accelerator::plain(Key::F(3)).shift(),
            Self::Replace => Accelerator::ctrl(Key::Char(b'H')),
            Self::Exit | Self::ToggleTheme | Self::WordWrap | Self::About => return None,
        };
        Some(accel)
    }

    /// Label plus a tab and the shortcut text, as Win32 menus expect.
    pub fn menu_text(self) -> String {
        match self.accelerator() {
            Some(a) => format!("{}\t{a}", self.label()),
            None => self.label().to_owned(),
        }
    }
}

// ── Accelerators ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// An uppercase ASCII letter; its code is also its virtual-key code.
    Char(u8),
    /// Function key `F1`–`F12`.
    F(u8),
}

impl Key {
    pub fn virtual_key(self) -> u16 {
        match self {
            Self::Char(c) => u16::from(c),
            Self::F(n) => 0x70 + u16::from(n) - 1, // VK_F1 = 0x70
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Accelerator {
    pub ctrl: bool,
    pub shift: bool,
    pub key: Key,
}

impl Accelerator {
    fn plain(key: Key) -> Self {
        Self { ctrl: false, shift: false, key }
    }

    fn ctrl(key: Key) -> Self {
        Self { ctrl: true, shift: false, key }
    }

    fn shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        match self.key {
            Key::Char(c) => write!(f, "{}", char::from(c)),
            Key::F(n) => write!(f, "F{n}"),
        }
    }
}

// ── Menu layout ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Command(Command),
    Separator,
}

#[derive(Debug)]
pub struct Menu {
    pub title: &'static str,
    pub items: &'static [MenuItem],
}

use self::MenuItem::{Command as Cmd, Separator};

pub const MENU_BAR: &[Menu] = &[
    Menu {
        title: "&File",
        items: &[
            Cmd(Command::New),
            Cmd(Command::Open),
            Cmd(Command::Save),
            Cmd(Command::SaveAs),
            Separator,
            Cmd(Command::Exit),
        ],
    },
    Menu {
        title: "&Edit",
        items: &[
            Cmd(Command::Undo),
            Cmd(Command::Redo),
            Separator,
            Cmd(Command::Cut),
            Cmd(Command::Copy),
            Cmd(Command::Paste),
            Cmd(Command::SelectAll),
            Separator,
            Cmd(Command::Find),
            Cmd(Command::FindNext),
            Cmd(Command::FindPrevious),
            Cmd(Command::Replace),
        ],
    },
    Menu {
        title: "&View",
        items: &[Cmd(Command::ToggleTheme), Cmd(Command::WordWrap)],
    },
    Menu {
        title: "&Help",
        items: &[Cmd(Command::About)],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_and_resolve() {
        let ids: HashSet<u16> = ALL.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), ALL.len());
        for c in ALL {
            assert_eq!(Command::from_id(c.id()), Some(c));
        }
        assert_eq!(Command::from_id(0), None);
    }

    #[test]
    fn accelerators_are_unique() {
        let accels: Vec<Accelerator> = ALL.iter().filter_map(|c| c.accelerator()).collect();
        let unique: HashSet<Accelerator> = accels.iter().copied().collect();
        assert_eq!(unique.len(), accels.len());
    }

    #[test]
    fn every_command_is_on_the_menu_once() {
        let on_menu: Vec<Command> = MENU_BAR
            .iter()
            .flat_map(|m| m.items.iter())
            .filter_map(|item| match item {
                MenuItem::Command(c) => Some(*c),
                MenuItem::Separator => None,
            })
            .collect();
        assert_eq!(on_menu.len(), ALL.len());
        for c in ALL {
            assert!(on_menu.contains(&c), "{c:?} missing from the menu bar");
        }
    }

    #[test]
    fn menu_text_carries_shortcut() {
        assert_eq!(Command::SaveAs.menu_text(), "Save &As…\tCtrl+Shift+S");
        assert_eq!(Command::FindPrevious.menu_text(), "Find Pre&vious\tShift+F3");
        assert_eq!(Command::About.menu_text(), "&About Slate…");
    }

    #[test]
    fn virtual_keys() {
        assert_eq!(Key::Char(b'F').virtual_key(), 0x46);
        assert_eq!(Key::F(3).virtual_key(), 0x72);
    }
}
