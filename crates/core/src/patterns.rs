//! Literal match patterns and the substring helpers both classifiers share.
//!
//! The two digit patterns differ on purpose: industries only flag runs of five
//! or more digits, cities flag any digit.

use once_cell::sync::Lazy;
use regex::Regex;

pub static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}").expect("email pattern")
});

pub static LONG_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{5,}").expect("long number pattern"));

pub static ANY_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("number pattern"));

pub static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("digits pattern"));

pub static ONLY_SPECIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^A-Za-z0-9\s]+$").expect("special char pattern"));

pub fn contains_any<S: AsRef<str>>(haystack: &str, needles: &[S]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_ref()))
}

/// First needle, in table order, that occurs in `haystack`.
pub fn first_contained<'a, S: AsRef<str>>(haystack: &str, needles: &'a [S]) -> Option<&'a str> {
    needles
        .iter()
        .map(AsRef::as_ref)
        .find(|n| haystack.contains(*n))
}

/// Every needle that occurs in `haystack`, in table order, without duplicates.
pub fn all_contained<'a, S: AsRef<str>>(haystack: &str, needles: &'a [S]) -> Vec<&'a str> {
    let mut hits: Vec<&str> = Vec::new();
    for n in needles.iter().map(AsRef::as_ref) {
        if haystack.contains(n) && !hits.contains(&n) {
            hits.push(n);
        }
    }
    hits
}

/// True for one character repeated at least three times ("aaa", "----").
/// The regex crate has no backreferences, so this walks the chars directly.
pub fn is_repeated_char(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let mut count = 1;
    for c in chars {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}
