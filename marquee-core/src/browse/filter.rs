use std::fmt;

use marquee_model::Movie;

const ARTICLES: [&str; 3] = ["the ", "a ", "an "];

/// Active letter filter: either "all" or exactly one uppercase ASCII letter.
///
/// Construction always succeeds. Anything that is not a single letter after
/// trimming and uppercasing normalizes to [`FilterToken::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FilterToken(Option<char>);

impl FilterToken {
    pub const ALL: FilterToken = FilterToken(None);

    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_uppercase();
        let mut chars = normalized.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_uppercase() => {
                FilterToken(Some(letter))
            }
            _ => FilterToken::ALL,
        }
    }

    pub fn letter(self) -> Option<char> {
        self.0
    }

    pub fn is_all(self) -> bool {
        self.0.is_none()
    }

    /// The 26 letter filters in order, for rendering filter controls.
    pub fn alphabet() -> impl Iterator<Item = FilterToken> {
        ('A'..='Z').map(|c| FilterToken(Some(c)))
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(letter) => write!(f, "{letter}"),
            None => Ok(()),
        }
    }
}

/// Letter a title is filed under.
///
/// One leading English article ("the", "a", "an") is ignored unless nothing
/// would remain. The key is the first ASCII letter of what is left,
/// uppercased; leading digits and punctuation are skipped. Titles without any
/// ASCII letter have no key.
pub fn derive_filter_key(title: &str) -> Option<char> {
    let trimmed = title.trim();
    let stripped = strip_leading_article(trimmed);
    let text = if stripped.is_empty() { trimmed } else { stripped };

    text.chars()
        .find(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
}

fn strip_leading_article(text: &str) -> &str {
    for article in ARTICLES {
        let matches = text
            .get(..article.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(article));
        if matches {
            return text[article.len()..].trim();
        }
    }
    text
}

/// Items filed under `token`, in snapshot order. [`FilterToken::ALL`] keeps
/// every item.
pub fn apply_filter(items: &[Movie], token: FilterToken) -> Vec<&Movie> {
    match token.letter() {
        None => items.iter().collect(),
        Some(letter) => items
            .iter()
            .filter(|m| derive_filter_key(&m.title) == Some(letter))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_article_is_ignored() {
        assert_eq!(derive_filter_key("The Matrix"), Some('M'));
        assert_eq!(derive_filter_key("A Few Good Men"), Some('F'));
        assert_eq!(derive_filter_key("An American Tail"), Some('A'));
        assert_eq!(derive_filter_key("the godfather"), Some('G'));
    }

    #[test]
    fn article_prefix_must_be_a_whole_word() {
        assert_eq!(derive_filter_key("Theodore Rex"), Some('T'));
        assert_eq!(derive_filter_key("Annie Hall"), Some('A'));
        assert_eq!(derive_filter_key("Amadeus"), Some('A'));
    }

    #[test]
    fn bare_article_falls_back_to_title() {
        assert_eq!(derive_filter_key("The"), Some('T'));
        assert_eq!(derive_filter_key("  A  "), Some('A'));
    }

    #[test]
    fn non_letters_are_skipped() {
        assert_eq!(derive_filter_key("1917"), None);
        assert_eq!(derive_filter_key("Se7en"), Some('S'));
        assert_eq!(derive_filter_key("(500) Days of Summer"), Some('D'));
        assert_eq!(derive_filter_key("The 355"), None);
        assert_eq!(derive_filter_key(""), None);
        assert_eq!(derive_filter_key("Æon Flux"), Some('O'));
    }

    #[test]
    fn token_normalization() {
        assert_eq!(FilterToken::parse("m").letter(), Some('M'));
        assert_eq!(FilterToken::parse(" q ").letter(), Some('Q'));
        assert!(FilterToken::parse("").is_all());
        assert!(FilterToken::parse("ZZ").is_all());
        assert!(FilterToken::parse("7").is_all());
        assert!(FilterToken::parse("é").is_all());
        assert_eq!(FilterToken::parse("k").to_string(), "K");
        assert_eq!(FilterToken::ALL.to_string(), "");
    }

    #[test]
    fn alphabet_has_26_letters() {
        let letters: String = FilterToken::alphabet()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(letters, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    }

    fn snapshot() -> Vec<Movie> {
        vec![
            Movie::new(1, "The Matrix"),
            Movie::new(2, "Memento"),
            Movie::new(3, "Alien"),
            Movie::new(4, "1917"),
            Movie::new(5, ""),
            Movie::new(6, "Mad Max: Fury Road"),
        ]
    }

    #[test]
    fn empty_or_invalid_filter_keeps_everything() {
        let items = snapshot();
        assert_eq!(apply_filter(&items, FilterToken::parse("")).len(), 6);
        assert_eq!(apply_filter(&items, FilterToken::parse("ZZ")).len(), 6);
    }

    #[test]
    fn letter_filter_matches_keys_in_order() {
        let items = snapshot();
        let ids: Vec<u64> = apply_filter(&items, FilterToken::parse("M"))
            .iter()
            .map(|m| m.id.as_u64())
            .collect();
        assert_eq!(ids, vec![1, 2, 6]);
    }

    #[test]
    fn titles_without_letters_never_match() {
        let items = snapshot();
        for token in FilterToken::alphabet() {
            assert!(
                apply_filter(&items, token)
                    .iter()
                    .all(|m| m.id.as_u64() != 4 && m.id.as_u64() != 5)
            );
        }
    }
}
