// ── Dual light/dark colour theme ───────────────────────────────────────────────
//
// Plain-text editor, so a palette is only a handful of colours: document
// background and text, caret, selection, and the line-number gutter.
// `ScintillaView::apply_palette` pushes a palette into the control.
//
// Colour conventions:
//   • Palette entries are written as `rgb!(r, g, b)`.
//   • The `rgb!` macro converts to Scintilla's BGR COLORREF, which is what
//     every palette field stores.

// ── Colour macro ──────────────────────────────────────────────────────────────

/// Convert (r, g, b) → Scintilla's BGR COLORREF.
macro_rules! rgb {
    ($r:expr, $g:expr, $b:expr) => {
        (($b as u32) << 16) | (($g as u32) << 8) | ($r as u32)
    };
}

// ── Colour palette ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: u32,
    pub fg: u32,
    pub caret: u32,
    pub selection_bg: u32,
    pub line_num_bg: u32,
    pub line_num_fg: u32,
}

/// White page, black text, light-grey gutter.
pub const LIGHT: Palette = Palette {
    bg: rgb!(0xFF, 0xFF, 0xFF),
    fg: rgb!(0x00, 0x00, 0x00),
    caret: rgb!(0x00, 0x00, 0x00),
    selection_bg: rgb!(0xAD, 0xD6, 0xFF),
    line_num_bg: rgb!(0xD3, 0xD3, 0xD3),
    line_num_fg: rgb!(0x00, 0x00, 0x00),
};

/// Charcoal page with a slightly lighter gutter.
pub const DARK: Palette = Palette {
    bg: rgb!(0x2E, 0x2E, 0x2E),
    fg: rgb!(0xDC, 0xDC, 0xDC),
    caret: rgb!(0xDC, 0xDC, 0xDC),
    selection_bg: rgb!(0x26, 0x4F, 0x78),
    line_num_bg: rgb!(0x33, 0x33, 0x33),
    line_num_fg: rgb!(0xDC, 0xDC, 0xDC),
};

// ── Theme ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &LIGHT,
            Self::Dark => &DARK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_bgr_colorref() {
        assert_eq!(rgb!(0x12, 0x34, 0x56), 0x0056_3412);
    }

    #[test]
    fn dark_palette_values() {
        assert_eq!(DARK.bg, 0x002E_2E2E);
        assert_eq!(DARK.fg, 0x00DC_DCDC);
        assert_eq!(DARK.line_num_bg, 0x0033_3333);
    }

    #[test]
    fn caret_follows_text_colour() {
        assert_eq!(LIGHT.caret, LIGHT.fg);
        assert_eq!(DARK.caret, DARK.fg);
    }

    #[test]
    fn toggle_round_trips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert!(Theme::from_dark(true).is_dark());
        assert_eq!(Theme::default().palette(), &LIGHT);
    }
}
