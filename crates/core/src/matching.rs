//! Levenshtein title matching against a storefront catalog

use crate::normalize::match_key;
use crate::steam::AppListEntry;
use std::borrow::Cow;

/// Number of results a [`TopMatcher`] keeps by default
pub const DEFAULT_TOP_N: usize = 3;

/// Anything with a game title that can be matched against
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for str {
    fn title(&self) -> &str {
        self
    }
}

impl Titled for String {
    fn title(&self) -> &str {
        self
    }
}

impl<T: Titled + ?Sized> Titled for &T {
    fn title(&self) -> &str {
        (**self).title()
    }
}

/// One candidate with its edit distance to the query
#[derive(Debug)]
pub struct Ranked<'a, T: ?Sized> {
    pub candidate: &'a T,
    pub distance: usize,
}

impl<T: ?Sized> Clone for Ranked<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Ranked<'_, T> {}

/// Levenshtein edit distance between two strings, counted in chars.
/// Insertions, deletions and substitutions all cost 1.
pub fn distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();

    // Only the previous row of the DP table is needed
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

fn comparison_key(title: &str, normalize: bool) -> Cow<'_, str> {
    if normalize {
        Cow::Owned(match_key(title))
    } else {
        Cow::Borrowed(title)
    }
}

/// Rank every candidate by edit distance to `query`, closest first.
/// Candidates at the same distance keep their corpus order.
///
/// With `normalize` set, both sides go through [`match_key`] first so that
/// case, trademark symbols and accents do not count as edits.
pub fn rank_matches<'a, T: Titled>(
    query: &str,
    candidates: &'a [T],
    normalize: bool,
) -> Vec<Ranked<'a, T>> {
    let query = comparison_key(query, normalize);

    let mut ranked: Vec<Ranked<'a, T>> = candidates
        .iter()
        .map(|candidate| Ranked {
            candidate,
            distance: distance(&query, &comparison_key(candidate.title(), normalize)),
        })
        .collect();

    // sort_by_key is stable
    ranked.sort_by_key(|r| r.distance);
    ranked
}

/// Closest candidate to `query`, or None for an empty corpus
pub fn best_match<'a, T: Titled>(
    query: &str,
    candidates: &'a [T],
    normalize: bool,
) -> Option<Ranked<'a, T>> {
    let key = comparison_key(query, normalize);

    // min_by_key returns the first of several equal minimums
    let best = candidates
        .iter()
        .map(|candidate| Ranked {
            candidate,
            distance: distance(&key, &comparison_key(candidate.title(), normalize)),
        })
        .min_by_key(|r| r.distance);

    if let Some(found) = &best {
        tracing::debug!(
            "Best match for {:?}: {:?} (distance {})",
            query,
            found.candidate.title(),
            found.distance
        );
    }
    best
}

/// Exact catalog lookup by name
pub fn find_app_id(name: &str, app_list: &[AppListEntry]) -> Option<u64> {
    app_list.iter().find(|entry| entry.name == name).map(|entry| entry.appid)
}

/// Catalog lookup that falls back to the closest normalized title when no
/// entry has exactly this name
pub fn resolve_app_id(name: &str, app_list: &[AppListEntry]) -> Option<u64> {
    if let Some(appid) = find_app_id(name, app_list) {
        return Some(appid);
    }
    best_match(name, app_list, true).map(|r| r.candidate.appid)
}

/// Keeps the closest strings to a fixed base string as candidates stream in.
///
/// Every pushed string joins the pool for good; [`TopMatcher::push`] answers
/// with the best `n` seen so far. Equal distances are ordered by the
/// candidate string itself. Use one matcher per worker thread.
#[derive(Debug, Clone)]
pub struct TopMatcher {
    base: String,
    n: usize,
    /// Sorted by (distance, candidate)
    seen: Vec<(usize, String)>,
}

impl TopMatcher {
    pub fn new(base: impl Into<String>, n: usize) -> Self {
        Self {
            base: base.into(),
            n,
            seen: Vec::new(),
        }
    }

    /// Add a candidate and return the current top `n`
    pub fn push(&mut self, candidate: impl Into<String>) -> Vec<&str> {
        let candidate = candidate.into();
        let dist = distance(&self.base, &candidate);

        let pos = self
            .seen
            .partition_point(|(d, s)| (*d, s.as_str()) <= (dist, candidate.as_str()));
        self.seen.insert(pos, (dist, candidate));

        self.top()
    }

    /// Current top `n` without adding anything
    pub fn top(&self) -> Vec<&str> {
        self.seen
            .iter()
            .take(self.n)
            .map(|(_, s)| s.as_str())
            .collect()
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
