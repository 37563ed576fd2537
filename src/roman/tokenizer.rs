use tracing::debug;

use crate::unsupported::UnsupportedTable;

use super::trie::{LetterClass, RomanTrie};
use super::{RomanToken, TokenKind};

/// Dedicated Roman marker for the anusvara nasalization mark.
pub const ANUSVARA_MARKER: char = '^';

/// Tokenize against the built-in unsupported-sequence table.
pub fn tokenize(input: &str) -> Vec<RomanToken> {
    tokenize_with(input, UnsupportedTable::global())
}

/// Turn a Roman buffer into an ordered, lossless token stream.
///
/// At each token start, in strict priority order: the anusvara marker,
/// unsupported-sequence keys (longest first), vowel spellings (longest
/// first), a greedy consonant run (3-, 2-, then 1-character spellings per
/// step), then whitespace/digit/punctuation passthrough, and finally the
/// single character as a symbol. Every step consumes at least one character
/// and emits its exact input slice, so concatenating the token texts always
/// reconstructs the input.
///
/// Tokenization is eager: a trailing consonant is a complete token
/// immediately and composes under the word-final policy, so there is no
/// pending state to flush — the live preview just re-converts the whole
/// buffer on the next keystroke.
pub fn tokenize_with(input: &str, unsupported: &UnsupportedTable) -> Vec<RomanToken> {
    let trie = RomanTrie::global();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < input.len() {
        let rest = &input[i..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        if c == ANUSVARA_MARKER {
            tokens.push(RomanToken::new(c.to_string(), TokenKind::Symbol));
            i += c.len_utf8();
            continue;
        }

        if let Some((len, _)) = unsupported.longest_match(rest) {
            tokens.push(RomanToken::new(&rest[..len], TokenKind::Unsupported));
            i += len;
            continue;
        }

        if c.is_ascii_alphabetic() {
            if let Some((len, class)) = trie.longest_match(rest) {
                match class {
                    LetterClass::Vowel => {
                        tokens.push(RomanToken::new(&rest[..len], TokenKind::Vowel));
                        i += len;
                    }
                    LetterClass::Consonant => {
                        let (run_len, parts) = scan_consonant_run(rest, trie, unsupported);
                        let kind = if parts > 1 {
                            TokenKind::ConsonantCluster
                        } else {
                            TokenKind::Consonant
                        };
                        tokens.push(RomanToken::new(&rest[..run_len], kind));
                        i += run_len;
                    }
                }
                continue;
            }
        }

        // Whitespace separates words; digits, punctuation and anything else
        // pass through as symbols.
        let kind = if c.is_whitespace() {
            TokenKind::Boundary
        } else {
            TokenKind::Symbol
        };
        tokens.push(RomanToken::new(c.to_string(), kind));
        i += c.len_utf8();
    }
    debug!(input_len = input.len(), token_count = tokens.len());
    tokens
}

/// Greedy consonant run starting at `rest`. Stops at a vowel, an unsupported
/// key, or anything outside the consonant inventory. Returns the byte length
/// consumed and the number of consonant spellings in the run.
fn scan_consonant_run(
    rest: &str,
    trie: &RomanTrie,
    unsupported: &UnsupportedTable,
) -> (usize, usize) {
    let mut len = 0;
    let mut parts = 0;
    loop {
        let tail = &rest[len..];
        if tail.is_empty() {
            break;
        }
        if parts > 0 && unsupported.longest_match(tail).is_some() {
            break;
        }
        match trie.longest_match(tail) {
            Some((n, LetterClass::Consonant)) => {
                len += n;
                parts += 1;
            }
            _ => break,
        }
    }
    (len, parts)
}

/// Split a cluster token's text back into its consonant spellings, using the
/// same greedy scan that built it.
pub fn consonant_parts(text: &str) -> Vec<&str> {
    let trie = RomanTrie::global();
    let mut parts = Vec::new();
    let mut i = 0;
    while i < text.len() {
        match trie.longest_match(&text[i..]) {
            Some((n, LetterClass::Consonant)) => {
                parts.push(&text[i..i + n]);
                i += n;
            }
            _ => {
                parts.push(&text[i..]);
                break;
            }
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn texts(tokens: &[RomanToken]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    fn kinds(tokens: &[RomanToken]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn aa_is_one_vowel_token() {
        let tokens = tokenize("aa");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0], RomanToken::new("aa", TokenKind::Vowel));
    }

    #[test]
    fn ka_is_consonant_then_vowel() {
        let tokens = tokenize("ka");
        assert_eq!(
            tokens,
            vec![
                RomanToken::new("k", TokenKind::Consonant),
                RomanToken::new("a", TokenKind::Vowel),
            ]
        );
    }

    #[test]
    fn kra_forms_a_cluster() {
        let tokens = tokenize("kra");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::ConsonantCluster, TokenKind::Vowel]
        );
        assert_eq!(tokens[0].text, "kr");
    }

    #[test]
    fn nga_prefers_three_letter_spelling() {
        let tokens = tokenize("nga");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0], RomanToken::new("nga", TokenKind::Consonant));
    }

    #[test]
    fn trailing_consonant_is_complete() {
        // Eager tokenization: "k" needs no flush step to resolve.
        let tokens = tokenize("k");
        assert_eq!(tokens, vec![RomanToken::new("k", TokenKind::Consonant)]);
        let tokens = tokenize("kh");
        assert_eq!(tokens, vec![RomanToken::new("kh", TokenKind::Consonant)]);
    }

    #[test]
    fn anusvara_marker_is_symbol() {
        let tokens = tokenize("ka^");
        assert_eq!(tokens[2], RomanToken::new("^", TokenKind::Symbol));
        assert!(tokens[2].is_word_part());
    }

    #[test]
    fn unsupported_sequence_is_intercepted() {
        let tokens = tokenize("sha");
        assert_eq!(tokens, vec![RomanToken::new("sha", TokenKind::Unsupported)]);
        // Longest key first: "ksha" is one unit, not "k" + "sha".
        let tokens = tokenize("ksha");
        assert_eq!(tokens, vec![RomanToken::new("ksha", TokenKind::Unsupported)]);
    }

    #[test]
    fn unsupported_key_interrupts_a_consonant_run() {
        let tokens = tokenize("nsha");
        assert_eq!(
            tokens,
            vec![
                RomanToken::new("n", TokenKind::Consonant),
                RomanToken::new("sha", TokenKind::Unsupported),
            ]
        );
    }

    #[test]
    fn sho_is_ordinary_composition() {
        // Only the exact "sha" sequence is intercepted.
        let tokens = tokenize("sho");
        assert_eq!(
            tokens,
            vec![
                RomanToken::new("sh", TokenKind::Consonant),
                RomanToken::new("o", TokenKind::Vowel),
            ]
        );
    }

    #[test]
    fn casing_is_preserved_in_token_text() {
        let tokens = tokenize("KAmal");
        assert_eq!(texts(&tokens), "KAmal");
        assert_eq!(tokens[0], RomanToken::new("K", TokenKind::Consonant));
        assert_eq!(tokens[1], RomanToken::new("A", TokenKind::Vowel));
    }

    #[test]
    fn unsupported_match_is_case_insensitive() {
        let tokens = tokenize("Sha");
        assert_eq!(tokens, vec![RomanToken::new("Sha", TokenKind::Unsupported)]);
    }

    #[test]
    fn boundaries_digits_and_punctuation() {
        let tokens = tokenize("ka 4!");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Consonant,
                TokenKind::Vowel,
                TokenKind::Boundary,
                TokenKind::Symbol,
                TokenKind::Symbol,
            ]
        );
    }

    #[test]
    fn letters_outside_the_inventory_fall_through() {
        let tokens = tokenize("fox");
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Symbol, TokenKind::Vowel, TokenKind::Symbol]
        );
        assert_eq!(texts(&tokens), "fox");
    }

    #[test]
    fn non_ascii_input_passes_through() {
        let tokens = tokenize("ka𑀓é");
        assert_eq!(texts(&tokens), "ka𑀓é");
    }

    #[test]
    fn consonant_parts_splits_clusters() {
        assert_eq!(consonant_parts("kr"), vec!["k", "r"]);
        assert_eq!(consonant_parts("khy"), vec!["kh", "y"]);
        assert_eq!(consonant_parts("nght"), vec!["n", "gh", "t"]);
    }

    #[test]
    fn lossless_over_mixed_input() {
        for input in [
            "namaste",
            "Thaalii",
            "ka, kha; ga!",
            "sha ksha aum",
            "123 ^ ..",
            "  mixed   CASE  ",
            "k\nkh\tg",
        ] {
            assert_eq!(texts(&tokenize(input)), input, "lossy for {input:?}");
        }
    }

    proptest! {
        #[test]
        fn lossless_for_any_printable_ascii(input in "[ -~]{0,60}") {
            let tokens = tokenize(&input);
            prop_assert_eq!(texts(&tokens), input);
        }

        #[test]
        fn progress_for_any_unicode(input in "\\PC{0,30}") {
            // Total: terminates and stays lossless on arbitrary input.
            let tokens = tokenize(&input);
            prop_assert_eq!(texts(&tokens), input);
        }
    }
}
