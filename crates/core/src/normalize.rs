//! Title normalization - symbol stripping, diacritic folding and slugs

use serde_json::Value;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Trademark-style symbols removed outright (™ ® © ℠ ℗)
const DECORATIONS: &[char] = &['\u{2122}', '\u{00AE}', '\u{00A9}', '\u{2120}', '\u{2117}'];

/// Remove trademark symbols, fold accented letters to their base form and
/// collapse whitespace.
///
/// - "Game Name™" → "Game Name"
/// - "® ö Test ®" → "o Test"
/// - en/em dashes become "-" and curly apostrophes become "'"
///
/// Non-ASCII letters without a decomposition (CJK ideographs, ...) are kept.
/// Applying it twice gives the same result as applying it once.
pub fn strip_decorations(title: &str) -> String {
    // Symbols go first: NFKD would otherwise expand ™ into "TM"
    let undecorated: String = title
        .chars()
        .filter_map(|c| match c {
            c if DECORATIONS.contains(&c) => None,
            '\u{2013}' | '\u{2014}' => Some('-'),
            '\u{2018}' | '\u{2019}' => Some('\''),
            c => Some(c),
        })
        .collect();

    let folded: String = undecorated
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii() || c.is_alphanumeric() || c.is_whitespace())
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`strip_decorations`] over a loosely typed value. Anything that is not a
/// string comes back unchanged.
pub fn strip_decorations_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(strip_decorations(s)),
        other => other.clone(),
    }
}

/// Title form used when comparing names: decorations stripped, lowercased
pub fn match_key(title: &str) -> String {
    strip_decorations(title).to_lowercase()
}

/// Build a URL slug: lowercase ASCII letters and digits separated by single
/// hyphens.
///
/// Every run of other characters (spaces, punctuation, `&`) becomes one
/// hyphen, and hyphens never lead or trail:
/// "Hood: Outlaws & Legends" → "hood-outlaws-legends"
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in strip_decorations(title).to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Clean a game name for a search box:
/// - Remove apostrophe+s (e.g., "Devil's Kiss" → "Devil Kiss")
/// - Replace ASCII symbols with spaces (keep non-ASCII letters)
/// - Normalize multiple spaces to single space
pub fn clean_for_search(title: &str) -> String {
    // Curly apostrophes are already straight after strip_decorations
    let without_apostrophe_s = strip_decorations(title).replace("'s", "");

    let cleaned: String = without_apostrophe_s
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_alphanumeric() {
                ' '
            } else {
                c
            }
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join items into an English list: "a", "a and b", "a, b and c"
pub fn list_to_sentence<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [head @ .., last] => {
            let head: Vec<&str> = head.iter().map(|s| s.as_ref()).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}
