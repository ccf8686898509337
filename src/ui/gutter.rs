// ── Line-number gutter ────────────────────────────────────────────────────────
//
// Scintilla draws the numbers itself (margin 0, `SC_MARGIN_NUMBER`); all we
// own is the margin width, which must grow with the digit count.

/// The gutter never shrinks below this many digits, so it does not jump
/// while typing the first hundred lines.
pub const MIN_DIGITS: usize = 3;

/// Number of digit cells needed to label `line_count` lines.
pub fn digits(line_count: usize) -> usize {
    let mut n = line_count.max(1);
    let mut d = 0;
    while n > 0 {
        d += 1;
        n /= 10;
    }
    d.max(MIN_DIGITS)
}

/// Margin width in pixels: one digit cell of padding on top of the digits.
///
/// `digit_px` is the rendered width of `"9"` in the line-number style.
pub fn width(line_count: usize, digit_px: i32) -> i32 {
    (digits(line_count) as i32 + 1) * digit_px
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_digits_for_small_documents() {
        assert_eq!(digits(0), MIN_DIGITS);
        assert_eq!(digits(1), MIN_DIGITS);
        assert_eq!(digits(999), 3);
    }

    #[test]
    fn grows_with_line_count() {
        assert_eq!(digits(1_000), 4);
        assert_eq!(digits(123_456), 6);
    }

    #[test]
    fn width_adds_one_cell_of_padding() {
        assert_eq!(width(10, 8), 32);
        assert_eq!(width(10_000, 8), 48);
    }
}
