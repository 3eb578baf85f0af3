//! Classroom display order
//!
//! Two records compare by the first integer in their display names when
//! both names contain one, otherwise by locale-aware comparison of the full
//! names. The relation is not transitive across mixed inputs, so sorting
//! uses a stable merge sort that tolerates inconsistent comparators, fed
//! from a canonical collation order so the result depends only on which
//! names are present.

use std::cmp::Ordering;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FIRST_INTEGER: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// First run of ASCII digits in `name`
pub fn first_integer(name: &str) -> Option<&str> {
    FIRST_INTEGER.find(name).map(|m| m.as_str())
}

/// Numeric comparison of two digit strings of any length
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

// ═══════════════════════════════════════════════════════════════════════════
// Collation
// ═══════════════════════════════════════════════════════════════════════════

/// Small locale-aware string comparator
///
/// Levels: script-ordered case-folded letters (ё folds into е), then exact
/// lower case, then lower before upper case, then code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collator {
    cyrillic_first: bool,
}

impl Collator {
    pub fn for_locale(locale: &str) -> Self {
        let language = locale.split(['-', '_']).next().unwrap_or_default();
        Self {
            cyrillic_first: matches!(language, "ru" | "uk" | "be" | "bg" | "sr" | "kk"),
        }
    }

    fn script_rank(&self, c: char) -> u8 {
        if c.is_whitespace() || c.is_ascii_punctuation() {
            0
        } else if c.is_ascii_digit() {
            1
        } else if ('\u{0400}'..='\u{04FF}').contains(&c) {
            if self.cyrillic_first {
                2
            } else {
                3
            }
        } else if c.is_ascii_alphabetic() {
            if self.cyrillic_first {
                3
            } else {
                2
            }
        } else {
            4
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = |s: &str| {
            s.chars()
                .flat_map(char::to_lowercase)
                .map(|c| if c == 'ё' { 'е' } else { c })
                .map(|c| (self.script_rank(c), c))
                .collect::<Vec<_>>()
        };
        let secondary = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
        let tertiary = |s: &str| s.chars().map(char::is_uppercase).collect::<Vec<_>>();

        primary(a)
            .cmp(&primary(b))
            .then_with(|| secondary(a).cmp(&secondary(b)))
            .then_with(|| tertiary(a).cmp(&tertiary(b)))
            .then_with(|| a.cmp(b))
    }
}

/// Display-name comparator: numeric when both names carry an integer
pub fn compare_names(a: &str, b: &str, collator: &Collator) -> Ordering {
    match (first_integer(a), first_integer(b)) {
        (Some(x), Some(y)) => compare_digits(x, y),
        _ => collator.compare(a, b),
    }
}

/// Sort into display order
///
/// Items are first put into a total order (collation of `name`, then
/// `tiebreak`) and then merge-sorted with [`compare_names`]. The output is a
/// function of the item set alone, so sorting a sorted list is a no-op.
pub fn sort_for_display<T, N, K>(mut items: Vec<T>, name: N, tiebreak: K, collator: &Collator) -> Vec<T>
where
    N: Fn(&T) -> &str,
    K: Fn(&T) -> &str,
{
    items.sort_by(|a, b| {
        collator
            .compare(name(a), name(b))
            .then_with(|| tiebreak(a).cmp(tiebreak(b)))
    });
    stable_sort_by(items, &|a: &T, b: &T| compare_names(name(a), name(b), collator))
}

/// Stable top-down merge sort
///
/// Never panics on comparators that are not total orders; equal elements
/// keep their input order.
pub fn stable_sort_by<T, F>(items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = stable_sort_by(left, compare);
    let right = stable_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            _ => break,
        };
        if take_right {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    merged
}
