// ── Find / replace engine ─────────────────────────────────────────────────────
//
// Pure functions over `&str`.  No widget, no I/O, no shared state: the caller
// (the document host in `app`) reads the text out of the editor, calls in
// here, and applies the returned spans back to the widget.
//
// Offsets are UTF-8 byte offsets into the original text and always fall on
// `char` boundaries, which is the position unit Scintilla uses natively.

mod cursor;
mod fold;

use std::borrow::Cow;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlateError};

pub use cursor::MatchCursor;

// ── Query ─────────────────────────────────────────────────────────────────────

/// What to search for.
///
/// The pattern is a literal string; there are no regular-expression
/// semantics.  An empty pattern is valid and matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    pub pattern: String,
    pub case_sensitive: bool,
    /// Only accept hits not touching a word character on either side.
    pub whole_word: bool,
}

impl Query {
    pub fn new(pattern: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            pattern: pattern.into(),
            case_sensitive,
            whole_word: false,
        }
    }

    pub fn whole_word(mut self, enabled: bool) -> Self {
        self.whole_word = enabled;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }
}

// ── Match ─────────────────────────────────────────────────────────────────────

/// A located occurrence: the half-open byte span `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    pub start: usize,
    pub end: usize,
}

impl Match {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Match> for (usize, usize) {
    fn from(m: Match) -> Self {
        (m.start, m.end)
    }
}

// ── Matcher ───────────────────────────────────────────────────────────────────

/// A query prepared against one text: the haystack is folded once up front
/// for case-insensitive scans and reused for every step.
struct Matcher<'t, 'q> {
    text: &'t str,
    folded: Option<fold::Folded<'t>>,
    needle: Cow<'q, str>,
    whole_word: bool,
}

impl<'t, 'q> Matcher<'t, 'q> {
    /// `None` for an empty pattern: nothing can match.
    fn new(text: &'t str, query: &'q Query) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        let (folded, needle) = if query.case_sensitive {
            (None, Cow::Borrowed(query.pattern.as_str()))
        } else {
            (
                Some(fold::Folded::new(text)),
                Cow::Owned(fold::fold_str(&query.pattern)),
            )
        };
        Some(Self {
            text,
            folded,
            needle,
            whole_word: query.whole_word,
        })
    }

    fn haystack(&self) -> &str {
        self.folded.as_ref().map_or(self.text, |f| &*f.text)
    }

    /// First acceptable match whose start is at or after `from`.
    ///
    /// `from` must be a char boundary of the original text.  Every rejected
    /// candidate advances the scan by one char, so the loop always ends.
    fn next_from(&self, from: usize) -> Option<Match> {
        let hay = self.haystack();
        let mut pos = self.folded.as_ref().map_or(from, |f| f.to_folded(from));
        while pos < hay.len() {
            let start = pos + hay[pos..].find(&*self.needle)?;
            let end = start + self.needle.len();
            if let Some(m) = self.accept(start, end) {
                return Some(m);
            }
            pos = start + hay[start..].chars().next().map_or(1, char::len_utf8);
        }
        None
    }

    /// Map a haystack hit back to the original text and apply the
    /// whole-word filter.
    fn accept(&self, start: usize, end: usize) -> Option<Match> {
        let m = match &self.folded {
            None => Match::new(start, end),
            Some(f) => Match::new(f.to_original(start)?, f.to_original(end)?),
        };
        if self.whole_word && !is_whole_word(self.text, m) {
            return None;
        }
        Some(m)
    }
}

fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_whole_word(text: &str, m: Match) -> bool {
    let before = text[..m.start].chars().next_back();
    let after = text[m.end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

// ── Iteration ─────────────────────────────────────────────────────────────────

/// Lazy left-to-right, non-overlapping iterator over the matches of a query.
pub struct Matches<'t, 'q> {
    matcher: Option<Matcher<'t, 'q>>,
    pos: usize,
}

impl Iterator for Matches<'_, '_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        let m = self.matcher.as_ref()?.next_from(self.pos)?;
        // Resume at the end of the match, never at start + 1.
        self.pos = m.end;
        Some(m)
    }
}

/// Iterate the matches of `query` in `text` without collecting them.
pub fn matches<'t, 'q>(text: &'t str, query: &'q Query) -> Matches<'t, 'q> {
    Matches {
        matcher: Matcher::new(text, query),
        pos: 0,
    }
}

// ── Operations ────────────────────────────────────────────────────────────────

/// Every match of `query` in `text`, strictly increasing and non-overlapping.
///
/// Returns an empty vector for an empty pattern.
pub fn find(text: &str, query: &Query) -> Vec<Match> {
    matches(text, query).collect()
}

/// Result of [`replace_one`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOne<'t> {
    /// The new text, or the input itself when nothing matched.
    pub text: Cow<'t, str>,
    /// The replaced span, in coordinates of the *input* text.
    pub replaced: Option<Match>,
    /// Where the next scan should start: immediately after the inserted
    /// replacement, so a replacement that itself matches is not re-found.
    /// Equals the `from` argument when nothing matched.
    pub resume: usize,
}

/// Replace the first match starting at or after `from`.
///
/// Fails with `InvalidArgument` when `from` is past the end of `text` or not
/// on a char boundary.  "No match" is an `Ok` result with `replaced: None`.
pub fn replace_one<'t>(
    text: &'t str,
    query: &Query,
    replacement: &str,
    from: usize,
) -> Result<ReplaceOne<'t>> {
    if !text.is_char_boundary(from) {
        return Err(SlateError::InvalidArgument { what: "replace offset" });
    }

    let hit = Matcher::new(text, query).and_then(|m| m.next_from(from));
    let Some(m) = hit else {
        return Ok(ReplaceOne {
            text: Cow::Borrowed(text),
            replaced: None,
            resume: from,
        });
    };

    let mut out = String::with_capacity(text.len() - (m.end - m.start) + replacement.len());
    out.push_str(&text[..m.start]);
    out.push_str(replacement);
    out.push_str(&text[m.end..]);
    Ok(ReplaceOne {
        text: Cow::Owned(out),
        replaced: Some(m),
        resume: m.start + replacement.len(),
    })
}

/// Replace every match in one pass over the original text.
///
/// Matches are located before anything is substituted, so replacement text
/// is never re-scanned and the count equals `find(text, query).len()`.
/// With no matches the input is handed back as `Cow::Borrowed`.
pub fn replace_all<'t>(text: &'t str, query: &Query, replacement: &str) -> (Cow<'t, str>, usize) {
    let mut out = String::new();
    let mut last_end = 0;
    let mut count = 0;

    for m in matches(text, query) {
        if count == 0 {
            out.reserve(text.len());
        }
        out.push_str(&text[last_end..m.start]);
        out.push_str(replacement);
        last_end = m.end;
        count += 1;
    }

    if count == 0 {
        return (Cow::Borrowed(text), 0);
    }
    out.push_str(&text[last_end..]);
    (Cow::Owned(out), count)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str, query: &Query) -> Vec<(usize, usize)> {
        find(text, query).into_iter().map(Into::into).collect()
    }

    fn exact(p: &str) -> Query {
        Query::new(p, true)
    }

    fn loose(p: &str) -> Query {
        Query::new(p, false)
    }

    #[test]
    fn find_case_sensitive_basic() {
        assert_eq!(spans("foo bar foo", &exact("foo")), vec![(0, 3), (8, 11)]);
    }

    #[test]
    fn find_does_not_overlap() {
        assert_eq!(spans("AAAA", &exact("AA")), vec![(0, 2), (2, 4)]);
        assert_eq!(spans("aaa", &exact("aa")), vec![(0, 2)]);
    }

    #[test]
    fn find_case_insensitive() {
        assert_eq!(spans("Foo FOO foo", &loose("foo")), vec![(0, 3), (4, 7), (8, 11)]);
        assert_eq!(spans("Foo FOO foo", &loose("FOO")), vec![(0, 3), (4, 7), (8, 11)]);
    }

    #[test]
    fn case_sensitive_skips_other_cases() {
        assert_eq!(spans("Foo FOO foo", &exact("foo")), vec![(8, 11)]);
    }

    #[test]
    fn empty_pattern_matches_nothing() {
        assert!(find("anything at all", &exact("")).is_empty());
        assert!(find("", &loose("")).is_empty());
    }

    #[test]
    fn pattern_longer_than_text() {
        assert!(find("ab", &exact("abc")).is_empty());
    }

    #[test]
    fn spans_index_original_text() {
        let text = "Grüße GRÜSSE grüße";
        let query = loose("grüße");
        for m in find(text, &query) {
            assert_eq!(text[m.range()].to_lowercase(), "grüße");
        }
        assert_eq!(find(text, &query).len(), 2);
    }

    #[test]
    fn case_insensitive_with_expanding_fold() {
        // U+0130 folds to two chars; the span must still cover it exactly.
        let text = "x\u{130}STANBUL y";
        let m = find(text, &loose("\u{130}stanbul"));
        assert_eq!(m, vec![Match::new(1, 10)]);
        assert_eq!(&text[m[0].range()], "\u{130}STANBUL");
    }

    #[test]
    fn fold_hit_inside_expansion_is_rejected() {
        // "i" alone is a prefix of the folded U+0130, not a match of it.
        let text = "\u{130}";
        assert!(find(text, &loose("i")).is_empty());
    }

    #[test]
    fn matches_are_increasing_and_disjoint() {
        let text = "abababab aba Ab aB";
        for q in [exact("aba"), loose("ab"), loose("b a")] {
            let found = find(text, &q);
            for pair in found.windows(2) {
                assert!(pair[0].start < pair[1].start);
                assert!(pair[0].end <= pair[1].start);
            }
        }
    }

    #[test]
    fn whole_word_filters_partial_hits() {
        let q = exact("cat").whole_word(true);
        assert_eq!(spans("cat concat cat_ cat.", &q), vec![(0, 3), (16, 19)]);
    }

    #[test]
    fn whole_word_rescans_after_rejection() {
        // The first candidate "aa" at 0 is glued to a word char; the scan must
        // resume one char later, not after the rejected candidate.
        let q = exact("aa").whole_word(true);
        assert_eq!(spans("aaa aa", &q), vec![(4, 6)]);
    }

    #[test]
    fn replace_all_basic() {
        let (out, n) = replace_all("foo bar foo", &exact("foo"), "baz");
        assert_eq!(out, "baz bar baz");
        assert_eq!(n, 2);
    }

    #[test]
    fn replace_all_does_not_rescan_replacement() {
        let (out, n) = replace_all("aaa", &exact("a"), "aa");
        assert_eq!(out, "aaaaaa");
        assert_eq!(n, 3);
    }

    #[test]
    fn replace_all_without_matches_borrows_input() {
        let text = "nothing here";
        let (out, n) = replace_all(text, &exact("zzz"), "y");
        assert_eq!(n, 0);
        assert!(matches!(out, Cow::Borrowed(s) if std::ptr::eq(s, text)));
    }

    #[test]
    fn replace_all_count_matches_find() {
        let text = "one One ONE two";
        let q = loose("one");
        let (_, n) = replace_all(text, &q, "one one");
        assert_eq!(n, find(text, &q).len());
    }

    #[test]
    fn replace_all_removes_every_occurrence() {
        let q = loose("the");
        let (out, _) = replace_all("The cat and the hat. THE END", &q, "a");
        assert!(find(&out, &q).is_empty());
    }

    #[test]
    fn replace_all_case_insensitive_keeps_neighbours() {
        let (out, n) = replace_all("xFOOy foo", &loose("foo"), "-");
        assert_eq!(out, "x-y -");
        assert_eq!(n, 2);
    }

    #[test]
    fn replace_one_from_offset() {
        let r = replace_one("foo bar foo", &exact("foo"), "baz", 1).expect("valid offset");
        assert_eq!(r.text, "foo bar baz");
        assert_eq!(r.replaced, Some(Match::new(8, 11)));
        assert_eq!(r.resume, 11);
    }

    #[test]
    fn replace_one_resume_skips_self_matching_replacement() {
        let r = replace_one("a b", &exact("a"), "aa", 0).expect("valid offset");
        assert_eq!(r.text, "aa b");
        assert_eq!(r.resume, 2);
        // Continuing from `resume` finds nothing further.
        let again = replace_one(&r.text, &exact("a"), "aa", r.resume).expect("valid offset");
        assert_eq!(again.replaced, None);
    }

    #[test]
    fn replace_one_case_insensitive_reports_original_span() {
        // U+0130 (2 bytes) folds to "i\u{307}" (3 bytes): folded and original
        // offsets differ from here on.
        let r = replace_one("a\u{130}b \u{130}", &loose("i\u{307}"), "Z", 0).expect("valid offset");
        assert_eq!(r.replaced, Some(Match::new(1, 3)));
        assert_eq!(r.text, "aZb \u{130}");
        assert_eq!(r.resume, 2);

        let next = replace_one(&r.text, &loose("i\u{307}"), "Z", r.resume).expect("valid offset");
        assert_eq!(next.replaced, Some(Match::new(4, 6)));
        assert_eq!(next.text, "aZb Z");
    }

    #[test]
    fn replace_one_whole_word_skips_embedded_hits() {
        let q = exact("cat").whole_word(true);
        let r = replace_one("concat cat_s cat.", &q, "dog", 0).expect("valid offset");
        assert_eq!(r.replaced, Some(Match::new(13, 16)));
        assert_eq!(r.text, "concat cat_s dog.");
        assert_eq!(r.resume, 16);
    }

    #[test]
    fn replace_one_not_found_returns_input() {
        let text = "abc";
        let r = replace_one(text, &exact("x"), "y", 0).expect("valid offset");
        assert_eq!(r.replaced, None);
        assert_eq!(r.resume, 0);
        assert!(matches!(r.text, Cow::Borrowed(_)));
    }

    #[test]
    fn replace_one_at_end_of_text_is_not_found() {
        let r = replace_one("abc", &exact("c"), "d", 3).expect("end is a valid offset");
        assert_eq!(r.replaced, None);
    }

    #[test]
    fn replace_one_rejects_bad_offset() {
        assert!(matches!(
            replace_one("abc", &exact("a"), "b", 4),
            Err(SlateError::InvalidArgument { .. })
        ));
        // Offset 1 is inside the two-byte 'é'.
        assert!(matches!(
            replace_one("é", &exact("e"), "b", 1),
            Err(SlateError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn matches_iterator_is_lazy() {
        let q = exact("x");
        let mut it = matches("x x x", &q);
        assert_eq!(it.next(), Some(Match::new(0, 1)));
        assert_eq!(it.next(), Some(Match::new(2, 3)));
    }

    #[test]
    fn query_deserialises_with_defaults() {
        let q: Query = serde_json::from_str(r#"{"pattern":"abc"}"#).expect("deserialize");
        assert_eq!(q, Query::new("abc", false));
    }
}
