//! Review text normalisation.
//!
//! Reduces free-form review text to the token string the vectorizer was
//! fitted on: markup stripped, lowercase ASCII letters only, single spaces.
//!
//! # Examples
//!
//! - `"<b>GREAT movie!!!</b>"` → `"great movie"`
//! - `"It's 10/10   <br />loved it"` → `"its loved it"`
//! - `"!!! ???"` → `""`

use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;

/// Non-greedy HTML tag. `.` does not cross line breaks, so a tag split over
/// several lines is left for the letter filter to shred.
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("HTML tag pattern is valid"));

/// Whitespace as the training-time preprocessing sees it: Unicode
/// `White_Space` plus the ASCII information separators U+001C..=U+001F.
pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// True when `text` is empty or consists only of [`is_whitespace`] characters.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(is_whitespace)
}

/// Text that has been through [`normalize`].
///
/// Contains only `a..=z` and single spaces, with no leading or trailing
/// whitespace. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CleanedText(String);

impl CleanedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for CleanedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CleanedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CleanedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalise raw review text into a [`CleanedText`].
///
/// # Algorithm
///
/// 1. Remove every `<...>` tag (shortest match)
/// 2. Lowercase (Unicode rules, so `"İ"` contributes an `i`)
/// 3. Drop every character that is not `a..=z` or [`is_whitespace`]; digits
///    and punctuation go too
/// 4. Collapse whitespace runs to one space and trim both ends
///
/// Total: any input, including `""`, produces a value. Re-applying it to its
/// own output is a no-op.
pub fn normalize(text: &str) -> CleanedText {
    let without_tags = HTML_TAG.replace_all(text, "");
    let lowered = without_tags.to_lowercase();

    let letters: String = lowered
        .chars()
        .filter(|&c| c.is_ascii_lowercase() || is_whitespace(c))
        .collect();

    let words: Vec<&str> = letters
        .split(is_whitespace)
        .filter(|w| !w.is_empty())
        .collect();
    CleanedText(words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "\t\n\r",
        "<b>GREAT movie!!!</b>",
        "This movie was absolutely fantastic!",
        "It's 10/10   <br /><br />loved it",
        "<a href=\"x\">link</a> and <i>italic",
        "Ünïcödé ÇAFÉ naïve",
        "İstanbul KELVIN \u{212A}",
        "tabs\tand\u{00A0}nbsp\u{2003}em-space",
        "unit\u{1f}record\u{1c}file\u{1d}group",
        "<<nested>> tags >< reversed",
        "multi\nline <span\nclass='x'> tag",
        "12345 !@#$% ^&*()",
        "MiXeD   CaSe    WoRdS",
    ];

    fn is_clean(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_lowercase() || c == ' ')
            && !s.starts_with(' ')
            && !s.ends_with(' ')
            && !s.contains("  ")
    }

    #[test]
    fn strips_tags_case_and_punctuation() {
        assert_eq!(normalize("<b>GREAT movie!!!</b>").as_str(), "great movie");
    }

    #[test]
    fn empty_string() {
        assert_eq!(normalize("").as_str(), "");
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert_eq!(normalize(" \t\n ").as_str(), "");
    }

    #[test]
    fn punctuation_and_markup_only_becomes_empty() {
        assert_eq!(normalize("<p>!!! 123 ???</p>").as_str(), "");
    }

    #[test]
    fn digits_removed_without_leaving_gaps() {
        assert_eq!(normalize("It's 10/10   <br /><br />loved it").as_str(), "its loved it");
    }

    #[test]
    fn tags_are_matched_non_greedily() {
        // Greedy matching would swallow "link and ".
        assert_eq!(
            normalize("<a href=\"x\">link</a> and <i>italic").as_str(),
            "link and italic"
        );
    }

    #[test]
    fn tag_spanning_lines_is_not_a_tag() {
        assert_eq!(
            normalize("multi\nline <span\nclass='x'> tag").as_str(),
            "multi line span classx tag"
        );
    }

    #[test]
    fn accented_letters_dropped() {
        assert_eq!(normalize("CAFÉ naïve").as_str(), "caf nave");
    }

    #[test]
    fn unicode_whitespace_collapsed() {
        assert_eq!(
            normalize("tabs\tand\u{00A0}nbsp\u{2003}em").as_str(),
            "tabs and nbsp em"
        );
    }

    #[test]
    fn information_separators_split_words() {
        assert_eq!(normalize("good\u{1f}movie").as_str(), "good movie");
        assert_eq!(normalize("\u{1c}GREAT\u{1d}\u{1e}film\u{1f}").as_str(), "great film");
    }

    #[test]
    fn blank_matches_normalizer_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n\u{00A0}\u{3000}"));
        assert!(is_blank("\u{1f}\u{1c}"));
        assert!(!is_blank(" x "));
        assert!(!is_blank("\u{200B}"), "zero-width space is not whitespace");
    }

    #[test]
    fn output_is_always_clean() {
        for sample in SAMPLES {
            let out = normalize(sample);
            assert!(is_clean(&out), "{sample:?} normalised to {out:?}");
        }
    }

    #[test]
    fn idempotent() {
        for sample in SAMPLES {
            let once = normalize(sample);
            let twice = normalize(&once);
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn derefs_to_str() {
        let cleaned = normalize("Hello World");
        assert_eq!(cleaned.len(), 11);
        assert_eq!(cleaned.to_string(), "hello world");
        assert_eq!(cleaned.into_string(), "hello world");
    }
}
