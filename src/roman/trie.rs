use std::collections::HashMap;
use std::sync::OnceLock;

use super::{CONSONANTS, VOWELS};

/// Longest spelling in the inventory is "nga".
const MAX_SPELLING_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterClass {
    Vowel,
    Consonant,
}

struct Node {
    children: HashMap<u8, Node>,
    class: Option<LetterClass>,
}

impl Node {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            class: None,
        }
    }
}

pub struct RomanTrie {
    root: Node,
}

impl RomanTrie {
    /// Get or initialize the global singleton.
    pub fn global() -> &'static RomanTrie {
        static INSTANCE: OnceLock<RomanTrie> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let mut trie = RomanTrie { root: Node::new() };
            for spelling in VOWELS {
                trie.insert(spelling, LetterClass::Vowel);
            }
            for spelling in CONSONANTS {
                trie.insert(spelling, LetterClass::Consonant);
            }
            trie
        })
    }

    /// Longest spelling matching a prefix of `input`, as `(byte_len, class)`.
    ///
    /// Exact casing is tried first; an ASCII-lowercased pass catches the
    /// rest, so `KA` reads as `ka` while `Th` keeps its retroflex meaning.
    /// Ties keep the exact-case match. Matched prefixes are always ASCII, so
    /// the returned length is a valid char boundary in `input`.
    pub fn longest_match(&self, input: &str) -> Option<(usize, LetterClass)> {
        let bytes = input.as_bytes();
        let exact = self.walk(bytes);

        let n = bytes.len().min(MAX_SPELLING_LEN);
        let mut lowered = [0u8; MAX_SPELLING_LEN];
        lowered[..n].copy_from_slice(&bytes[..n]);
        for b in &mut lowered[..n] {
            *b = b.to_ascii_lowercase();
        }
        let folded = self.walk(&lowered[..n]);

        match (exact, folded) {
            (Some((el, ec)), Some((fl, _))) if el >= fl => Some((el, ec)),
            (_, Some(f)) => Some(f),
            (e, None) => e,
        }
    }

    fn walk(&self, bytes: &[u8]) -> Option<(usize, LetterClass)> {
        let mut node = &self.root;
        let mut best = None;
        for (i, b) in bytes.iter().enumerate() {
            match node.children.get(b) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(class) = node.class {
                best = Some((i + 1, class));
            }
        }
        best
    }

    fn insert(&mut self, spelling: &str, class: LetterClass) {
        let mut node = &mut self.root;
        for &b in spelling.as_bytes() {
            node = node.children.entry(b).or_insert_with(Node::new);
        }
        node.class = Some(class);
    }
}
