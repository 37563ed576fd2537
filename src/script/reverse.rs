//! Reverse mapping: script graphemes back to Roman tokens.
//!
//! Powers the Pure-Brahmi mode preview: each Brahmi grapheme maps back to the
//! Roman spelling that produced it, consonants joined by a virama fold into
//! one cluster token, and a bare consonant regains its inherent vowel. The
//! resulting token stream feeds the ordinary composer, so the preview goes
//! through the same rendering path as typed Roman.

use std::collections::HashMap;

use crate::roman::{RomanToken, TokenKind, ANUSVARA_MARKER};

use super::ScriptTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReverseKind {
    Vowel,
    Consonant,
    VowelMark,
    Anusvara,
    Visarga,
    Virama,
    Numeral,
}

#[derive(Debug, Clone)]
pub struct ReverseEntry {
    pub roman: String,
    pub kind: ReverseKind,
}

#[derive(Debug)]
pub struct ReverseMap {
    entries: HashMap<String, ReverseEntry>,
}

impl ReverseMap {
    pub(crate) fn build(table: &ScriptTable) -> Self {
        let mut entries = HashMap::new();
        insert_section(&mut entries, &table.vowels, ReverseKind::Vowel);
        insert_section(&mut entries, &table.consonants, ReverseKind::Consonant);
        insert_section(&mut entries, &table.vowel_marks, ReverseKind::VowelMark);
        insert_section(&mut entries, &table.numerals, ReverseKind::Numeral);
        for (name, kind, roman) in [
            ("anusvara", ReverseKind::Anusvara, ANUSVARA_MARKER.to_string()),
            ("visarga", ReverseKind::Visarga, String::new()),
            ("virama", ReverseKind::Virama, String::new()),
        ] {
            if let Some(glyph) = table.special(name) {
                if !glyph.is_empty() {
                    entries
                        .entry(glyph.to_string())
                        .or_insert(ReverseEntry { roman, kind });
                }
            }
        }
        Self { entries }
    }

    pub fn get(&self, grapheme: &str) -> Option<&ReverseEntry> {
        self.entries.get(grapheme)
    }

    pub fn get_char(&self, c: char) -> Option<&ReverseEntry> {
        let mut buf = [0u8; 4];
        self.entries.get(c.encode_utf8(&mut buf) as &str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Insert one forward section. Spellings are ordered shortest-first, with
/// ties broken by the Roman inventory order, and the first insert wins — so a
/// grapheme reached by several spellings gets a deterministic canonical one
/// (Tamil க, fed by k/kh/g/gh, reverses to "k").
fn insert_section(
    entries: &mut HashMap<String, ReverseEntry>,
    section: &std::collections::BTreeMap<String, String>,
    kind: ReverseKind,
) {
    let mut keys: Vec<&String> = section.keys().collect();
    keys.sort_by_key(|k| (k.len(), inventory_rank(k), k.to_ascii_lowercase()));
    for key in keys {
        let glyph = &section[key];
        if glyph.is_empty() {
            continue;
        }
        entries.entry(glyph.clone()).or_insert_with(|| ReverseEntry {
            roman: key.clone(),
            kind,
        });
    }
}

/// Position of a spelling in the canonical Roman inventory; spellings from
/// outside it (custom tables) sort last.
fn inventory_rank(spelling: &str) -> usize {
    crate::roman::VOWELS
        .iter()
        .chain(crate::roman::CONSONANTS.iter())
        .position(|s| *s == spelling)
        .unwrap_or(usize::MAX)
}

/// Walk a script string into composer-ready Roman tokens.
///
/// Consonants joined by a virama become one cluster token; a consonant with
/// no vowel sign gains an explicit inherent-vowel token; the anusvara maps
/// back to its `^` marker. Unmapped characters pass through as
/// boundary/symbol tokens.
pub fn to_roman_tokens(text: &str, table: &ScriptTable) -> Vec<RomanToken> {
    let rev = table.reverse();
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut cluster: Vec<String> = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let Some(entry) = rev.get_char(c) else {
            flush_cluster(&mut tokens, &mut cluster);
            let kind = if c.is_whitespace() {
                TokenKind::Boundary
            } else {
                TokenKind::Symbol
            };
            tokens.push(RomanToken::new(c.to_string(), kind));
            i += 1;
            continue;
        };
        match entry.kind {
            ReverseKind::Consonant => {
                cluster.push(entry.roman.clone());
                let next = chars.get(i + 1).and_then(|&nc| rev.get_char(nc));
                match next {
                    Some(n) if n.kind == ReverseKind::Virama => {
                        // Dead consonant: the next consonant joins the cluster.
                        i += 2;
                    }
                    Some(n) if n.kind == ReverseKind::VowelMark => {
                        let vowel = n.roman.clone();
                        flush_cluster(&mut tokens, &mut cluster);
                        tokens.push(RomanToken::new(vowel, TokenKind::Vowel));
                        i += 2;
                    }
                    _ => {
                        flush_cluster(&mut tokens, &mut cluster);
                        tokens.push(RomanToken::new("a", TokenKind::Vowel));
                        i += 1;
                    }
                }
            }
            ReverseKind::Vowel | ReverseKind::VowelMark => {
                flush_cluster(&mut tokens, &mut cluster);
                tokens.push(RomanToken::new(entry.roman.clone(), TokenKind::Vowel));
                i += 1;
            }
            ReverseKind::Anusvara => {
                flush_cluster(&mut tokens, &mut cluster);
                tokens.push(RomanToken::new(entry.roman.clone(), TokenKind::Symbol));
                i += 1;
            }
            ReverseKind::Visarga => {
                // No dedicated Roman marker; the glyph echoes through.
                flush_cluster(&mut tokens, &mut cluster);
                tokens.push(RomanToken::new(c.to_string(), TokenKind::Symbol));
                i += 1;
            }
            ReverseKind::Virama => {
                // Stray virama with no preceding consonant.
                flush_cluster(&mut tokens, &mut cluster);
                i += 1;
            }
            ReverseKind::Numeral => {
                flush_cluster(&mut tokens, &mut cluster);
                tokens.push(RomanToken::new(entry.roman.clone(), TokenKind::Symbol));
                i += 1;
            }
        }
    }
    flush_cluster(&mut tokens, &mut cluster);
    tokens
}

/// Concatenated Roman spelling of a script string.
pub fn to_roman_string(text: &str, table: &ScriptTable) -> String {
    to_roman_tokens(text, table)
        .iter()
        .map(|t| t.text.as_str())
        .collect()
}

fn flush_cluster(tokens: &mut Vec<RomanToken>, cluster: &mut Vec<String>) {
    match cluster.len() {
        0 => {}
        1 => tokens.push(RomanToken::new(cluster[0].clone(), TokenKind::Consonant)),
        _ => tokens.push(RomanToken::new(cluster.concat(), TokenKind::ConsonantCluster)),
    }
    cluster.clear();
}
