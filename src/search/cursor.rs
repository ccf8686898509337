// ── Match cursor ──────────────────────────────────────────────────────────────
//
// Caches the match list for the last query so that Find Next / Find Previous
// can step through it.  The cache is dropped whenever the query or the text
// changes; the host also calls `invalidate` after every edit it observes.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::{find, Match, Query};

/// Navigation state over the ordered matches of one query.
///
/// After a reset no match is current; the first step lands on the first
/// match (forward) or the last (backward).
#[derive(Debug, Default)]
pub struct MatchCursor {
    query: Option<Query>,
    fingerprint: u64,
    matches: Vec<Match>,
    current: Option<usize>,
}

impl MatchCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the cached matches.  The next `update` always rescans.
    pub fn invalidate(&mut self) {
        self.query = None;
        self.matches.clear();
        self.current = None;
    }

    /// Bring the cache in line with `text` and `query`.
    ///
    /// Returns `true` when the matches were recomputed (which also resets the
    /// current index).
    pub fn update(&mut self, text: &str, query: &Query) -> bool {
        let fingerprint = fingerprint(text);
        if self.query.as_ref() == Some(query) && self.fingerprint == fingerprint {
            return false;
        }
        self.matches = find(text, query);
        self.query = Some(query.clone());
        self.fingerprint = fingerprint;
        self.current = None;
        true
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn current(&self) -> Option<Match> {
        self.current.and_then(|i| self.matches.get(i).copied())
    }

    /// `(1-based index, total)` of the current match, for "Match i of n".
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current.map(|i| (i + 1, self.matches.len()))
    }

    /// Step to the next match, wrapping from the last to the first.
    pub fn step_forward(&mut self) -> Option<Match> {
        if self.matches.is_empty() {
            return None;
        }
        let next = self.current.map_or(0, |i| (i + 1) % self.matches.len());
        self.select(next)
    }

    /// Step to the previous match, wrapping from the first to the last.
    pub fn step_backward(&mut self) -> Option<Match> {
        let last = self.matches.len().checked_sub(1)?;
        let prev = match self.current {
            None | Some(0) => last,
            Some(i) => i - 1,
        };
        self.select(prev)
    }

    /// Select the first match starting at or after `offset`, wrapping to the
    /// first match in the document.
    pub fn seek_forward(&mut self, offset: usize) -> Option<Match> {
        if self.matches.is_empty() {
            return None;
        }
        let i = self.matches.partition_point(|m| m.start < offset);
        self.select(if i == self.matches.len() { 0 } else { i })
    }

    /// Select the last match ending at or before `offset`, wrapping to the
    /// last match in the document.
    pub fn seek_backward(&mut self, offset: usize) -> Option<Match> {
        let last = self.matches.len().checked_sub(1)?;
        // Ends are strictly increasing because matches never overlap.
        let i = self.matches.partition_point(|m| m.end <= offset);
        self.select(if i == 0 { last } else { i - 1 })
    }

    fn select(&mut self, i: usize) -> Option<Match> {
        self.current = Some(i);
        self.matches.get(i).copied()
    }
}

fn fingerprint(text: &str) -> u64 {
    let mut h = DefaultHasher::new();
    text.hash(&mut h);
    h.finish()
}
