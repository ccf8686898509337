// ── Status bar text ───────────────────────────────────────────────────────────

use crate::app::{Encoding, EolMode};

/// Gap between status fields.  The Win32 status bar is a single part, so
/// fields are separated by whitespace.
const SEP: &str = "    ";

/// Caret position in the `Ln 1, Col 1` form (both 1-based).
pub fn position(line: usize, col: usize) -> String {
    format!("Ln {line}, Col {col}")
}

/// Full status line.
///
/// A transient `message` (saved, replaced, not found, …) replaces the caret
/// position; the encoding and EOL fields are always shown.
pub fn line(
    caret: (usize, usize),
    encoding: Encoding,
    eol: EolMode,
    message: Option<&str>,
) -> String {
    let lead = match message {
        Some(m) => m.to_owned(),
        None => position(caret.0, caret.1),
    };
    format!("{lead}{SEP}{}{SEP}{}", encoding.as_str(), eol.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_one_based_text() {
        assert_eq!(position(1, 1), "Ln 1, Col 1");
        assert_eq!(position(12, 40), "Ln 12, Col 40");
    }

    #[test]
    fn line_shows_position_by_default() {
        let s = line((3, 7), Encoding::Utf8, EolMode::Lf, None);
        assert_eq!(s, "Ln 3, Col 7    UTF-8    LF");
    }

    #[test]
    fn message_replaces_position() {
        let s = line((3, 7), Encoding::Utf16Le, EolMode::Crlf, Some("Saved: a.txt"));
        assert_eq!(s, "Saved: a.txt    UTF-16 LE    CRLF");
    }
}
