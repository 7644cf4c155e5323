//! Tokenizer over cleaned text

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9_]+(?:'[A-Za-z0-9_]+)?|\S").expect("valid regex")
});

/// Token category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Letters/digits/underscores, optionally with one internal apostrophe
    Word,
    /// Any other single non-space character
    Symbol,
}

/// A token borrowed from cleaned text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
    /// Byte offset in the source text
    pub start: usize,
}

impl Token<'_> {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Lazy token iterator. Cloning it restarts from the clone point.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }

        let m = TOKEN.find_at(self.text, self.pos)?;
        self.pos = m.end();

        // The word branch always wins when the match starts on a word char
        let starts_word = m
            .as_str()
            .starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_');
        let kind = if starts_word {
            TokenKind::Word
        } else {
            TokenKind::Symbol
        };

        Some(Token {
            text: m.as_str(),
            kind,
            start: m.start(),
        })
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

/// Split cleaned text into words and standalone symbols
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { text, pos: 0 }
}
