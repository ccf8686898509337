// ── Settings persistence ──────────────────────────────────────────────────────
//
// Reads and writes `%APPDATA%\Slate\settings.json` (on other hosts
// `$XDG_CONFIG_HOME/slate/settings.json`, falling back to `~/.config`).
// No `unsafe`: pure safe Rust + serde_json.

use std::{fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{debug_log, error::Result, search::Query};

// ── On-disk types ─────────────────────────────────────────────────────────────

/// Root of the JSON settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub version: u32,
    #[serde(default)] // backward-compat: old files without this field parse as false
    pub dark_mode: bool,
    #[serde(default = "default_word_wrap")]
    pub word_wrap: bool,
    /// Last Find / Replace dialog contents, restored on the next open.
    #[serde(default)]
    pub last_find: FindSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindSettings {
    pub query: Query,
    pub replacement: String,
}

fn default_word_wrap() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            dark_mode: false,
            word_wrap: default_word_wrap(),
            last_find: FindSettings::default(),
        }
    }
}

// ── Format version ────────────────────────────────────────────────────────────

pub const SETTINGS_VERSION: u32 = 1;

// ── Path ──────────────────────────────────────────────────────────────────────

/// Return the path to the settings file.
///
/// Returns `None` if none of the base-directory variables is set.
pub fn settings_path() -> Option<PathBuf> {
    let mut p = if cfg!(windows) {
        let mut p = PathBuf::from(std::env::var_os("APPDATA")?);
        p.push("Slate");
        p
    } else if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        let mut p = PathBuf::from(xdg);
        p.push("slate");
        p
    } else {
        let mut p = PathBuf::from(std::env::var_os("HOME")?);
        p.push(".config");
        p.push("slate");
        p
    };
    p.push("settings.json");
    Some(p)
}

// ── Save ──────────────────────────────────────────────────────────────────────

/// Write `settings` to `path`, creating the parent directory if needed.
pub fn save_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, settings)?;
    Ok(())
}

/// Write `settings` to the per-user settings file.
///
/// Does nothing when no settings directory can be determined.
pub fn save(settings: &Settings) -> Result<()> {
    match settings_path() {
        Some(path) => save_to(&path, settings),
        None => Ok(()),
    }
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Read and parse the settings file at `path`.
///
/// A file written by a different format version yields the defaults.
pub fn load_from(path: &Path) -> Result<Settings> {
    let data = fs::read(path)?;
    let settings: Settings = serde_json::from_slice(&data)?;
    if settings.version != SETTINGS_VERSION {
        return Ok(Settings::default());
    }
    Ok(settings)
}

/// Load the per-user settings.
///
/// Never fails: a missing, unreadable or malformed file yields the defaults
/// and the editor starts with a light theme.
pub fn load() -> Settings {
    let Some(path) = settings_path() else {
        return Settings::default();
    };
    load_from(&path).unwrap_or_else(|e| {
        debug_log!("settings not loaded from {}: {e}", path.display());
        Settings::default()
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_through_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            dark_mode: true,
            word_wrap: false,
            last_find: FindSettings {
                query: Query::new("needle", true).whole_word(true),
                replacement: "pin".to_owned(),
            },
            ..Settings::default()
        };
        save_to(&path, &settings).expect("save");
        assert_eq!(load_from(&path).expect("load"), settings);
    }

    /// Files written before `word_wrap` and `last_find` existed must still load.
    #[test]
    fn missing_fields_take_defaults() {
        let json = r#"{"version":1,"dark_mode":true}"#;
        let s: Settings = serde_json::from_str(json).expect("deserialize old format");
        assert!(s.dark_mode);
        assert!(s.word_wrap, "missing word_wrap should default to true");
        assert_eq!(s.last_find, FindSettings::default());
    }

    #[test]
    fn wrong_version_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"version":99,"dark_mode":true}"#).expect("write");
        assert_eq!(load_from(&path).expect("load"), Settings::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").expect("write");
        assert!(matches!(load_from(&path), Err(crate::error::SlateError::Settings(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        assert!(matches!(load_from(&path), Err(crate::error::SlateError::Io(_))));
    }
}
