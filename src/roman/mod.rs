//! Roman keystroke tokenization.
//!
//! Turns a raw Roman buffer into an ordered, lossless token stream via a
//! byte-trie over the spelling inventory and a priority-ordered scanner.

mod tokenizer;
mod trie;

pub use tokenizer::{consonant_parts, tokenize, tokenize_with, ANUSVARA_MARKER};
pub use trie::{LetterClass, RomanTrie};

/// Vowel spellings; the two-letter forms sort before the one-letter forms so
/// "aa" never splits into two "a"s.
pub const VOWELS: [&str; 10] = ["aa", "ee", "uu", "ei", "ou", "a", "e", "i", "o", "u"];

/// Consonant spellings. Uppercase initials are the retroflex series.
pub const CONSONANTS: [&str; 34] = [
    "k", "kh", "g", "gh", "nga", "c", "ch", "j", "jh", "yn", "T", "Th", "D", "Dh", "N", "t", "th",
    "d", "dh", "n", "p", "ph", "b", "bh", "m", "y", "r", "l", "v", "sh", "Sh", "s", "h", "L",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum TokenKind {
    Vowel,
    Consonant,
    ConsonantCluster,
    Boundary,
    Symbol,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RomanToken {
    pub text: String,
    pub kind: TokenKind,
}

impl RomanToken {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Word-forming tokens: letters, clusters, unsupported runs and the
    /// anusvara marker. Everything else separates words.
    pub fn is_word_part(&self) -> bool {
        match self.kind {
            TokenKind::Vowel
            | TokenKind::Consonant
            | TokenKind::ConsonantCluster
            | TokenKind::Unsupported => true,
            TokenKind::Symbol => self.text.len() == 1 && self.text.starts_with(ANUSVARA_MARKER),
            TokenKind::Boundary => false,
        }
    }
}
