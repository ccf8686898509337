// ── Case folding with offset mapping ──────────────────────────────────────────
//
// Folds text one `char` at a time with `char::to_lowercase` and remembers
// where each folded group came from, so a hit in the folded text maps back to
// a span of the original, case-preserved text.  Pattern and text MUST be
// folded by the same function: `str::to_lowercase` treats a final sigma
// differently and would desynchronise the two.

use std::borrow::Cow;

/// Fold a pattern for case-insensitive comparison.
pub(super) fn fold_str(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Document text prepared for case-insensitive scanning.
pub(super) struct Folded<'t> {
    /// The folded text.  Borrowed when folding changed nothing.
    pub(super) text: Cow<'t, str>,
    /// `(folded_offset, original_offset)` at the start of every original
    /// char, plus an end sentinel.  `None` when every char folds to the same
    /// byte length, i.e. offsets are identical in both texts.
    map: Option<Vec<(usize, usize)>>,
}

impl<'t> Folded<'t> {
    pub(super) fn new(original: &'t str) -> Self {
        let mut changed = false;
        let mut same_len = true;
        for c in original.chars() {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(f), None) if f == c => {}
                (Some(f), None) => {
                    changed = true;
                    same_len &= f.len_utf8() == c.len_utf8();
                }
                _ => {
                    changed = true;
                    same_len = false;
                }
            }
        }

        if !changed {
            return Self { text: Cow::Borrowed(original), map: None };
        }
        if same_len {
            return Self { text: Cow::Owned(fold_str(original)), map: None };
        }

        let mut text = String::with_capacity(original.len());
        let mut map = Vec::with_capacity(original.len() + 1);
        for (offset, c) in original.char_indices() {
            map.push((text.len(), offset));
            text.extend(c.to_lowercase());
        }
        map.push((text.len(), original.len()));
        Self { text: Cow::Owned(text), map: Some(map) }
    }

    /// Folded offset of `pos`, a char boundary of the original text.
    pub(super) fn to_folded(&self, pos: usize) -> usize {
        match &self.map {
            None => pos,
            Some(map) => {
                let i = map.partition_point(|&(_, orig)| orig < pos);
                map.get(i).map_or(self.text.len(), |&(folded, _)| folded)
            }
        }
    }

    /// Original offset of folded offset `pos`, or `None` when `pos` falls
    /// inside the folded expansion of a single original char.
    pub(super) fn to_original(&self, pos: usize) -> Option<usize> {
        match &self.map {
            None => Some(pos),
            Some(map) => map
                .binary_search_by_key(&pos, |&(folded, _)| folded)
                .ok()
                .map(|i| map[i].1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_text_is_borrowed() {
        let f = Folded::new("already lower 123");
        assert!(matches!(f.text, Cow::Borrowed(_)));
        assert_eq!(f.to_folded(5), 5);
        assert_eq!(f.to_original(5), Some(5));
    }

    #[test]
    fn ascii_upper_folds_without_map() {
        let f = Folded::new("Hello WORLD");
        assert_eq!(f.text, "hello world");
        assert!(f.map.is_none());
    }

    #[test]
    fn expanding_char_builds_map() {
        // U+0130 (2 bytes) lowercases to "i" + U+0307 (3 bytes).
        let f = Folded::new("a\u{130}b");
        assert_eq!(f.text, "ai\u{307}b");
        assert_eq!(f.to_folded(0), 0);
        assert_eq!(f.to_folded(1), 1);
        assert_eq!(f.to_folded(3), 4); // 'b'
        assert_eq!(f.to_original(4), Some(3));
        // Inside the expansion: "i" ends at folded 2, not an original boundary.
        assert_eq!(f.to_original(2), None);
        assert_eq!(f.to_original(f.text.len()), Some(4));
    }

    #[test]
    fn fold_str_is_per_char() {
        // A trailing capital sigma folds to plain sigma, not final sigma.
        assert_eq!(fold_str("ΟΔΟΣ"), "οδοσ");
    }
}
