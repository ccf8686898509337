// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in Slate return `error::Result<T>`.  "Not found" is
// never an error: searches report it as an empty result.  Errors that reach
// the window layer surface as user-facing dialogs.

/// Every error that Slate can produce.
#[derive(Debug)]
pub enum SlateError {
    /// A caller broke an API precondition (e.g. an offset that is not a char
    /// boundary).  Never produced by normal UI flow.
    InvalidArgument {
        /// Which argument was rejected, for display purposes.
        what: &'static str,
    },

    /// A Win32 API call returned a failure code.
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// A standard I/O error (file open, read, write, …).
    Io(std::io::Error),

    /// The settings file could not be encoded or decoded.
    Settings(serde_json::Error),
}

impl std::fmt::Display for SlateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { what } => write!(f, "invalid argument: {what}"),
            Self::Win32 { function, code } => {
                write!(f, "{function} failed (error {code:#010x})")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Settings(e) => write!(f, "settings error: {e}"),
        }
    }
}

impl std::error::Error for SlateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Settings(e) => Some(e),
            Self::InvalidArgument { .. } | Self::Win32 { .. } => None,
        }
    }
}

impl From<std::io::Error> for SlateError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SlateError {
    fn from(e: serde_json::Error) -> Self {
        Self::Settings(e)
    }
}

// Convert a windows-crate error (HRESULT) directly into a SlateError so that
// `?` can be used on `windows::core::Result<T>` throughout the platform module.
#[cfg(windows)]
impl From<windows::core::Error> for SlateError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SlateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_argument() {
        let e = SlateError::InvalidArgument { what: "from offset" };
        assert_eq!(e.to_string(), "invalid argument: from offset");
    }

    #[test]
    fn display_win32_code_is_hex() {
        let e = SlateError::Win32 { function: "CreateWindowExW", code: 5 };
        assert_eq!(e.to_string(), "CreateWindowExW failed (error 0x00000005)");
    }

    #[test]
    fn io_error_is_source() {
        use std::error::Error;
        let e = SlateError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("I/O error"));
    }
}
