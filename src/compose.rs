//! Syllable composition: rendering a Roman token stream in one script.
//!
//! The same token stream composes against the Brahmi table and the reference
//! table, so the two preview lines stay segment-aligned by construction.
//! Every failed lookup echoes the Roman text — the fallback decision lives
//! here, not at the call sites.

use tracing::{debug, debug_span};

use crate::roman::{consonant_parts, tokenize, RomanToken, TokenKind, ANUSVARA_MARKER};
use crate::script::ScriptTable;
use crate::unsupported::UnsupportedTable;

/// Render a token stream in one script.
pub fn compose(tokens: &[RomanToken], table: &ScriptTable) -> String {
    let span = debug_span!("compose", script = table.id());
    let _guard = span.enter();
    let mut out = String::new();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        match token.kind {
            TokenKind::Consonant | TokenKind::ConsonantCluster => {
                let next = tokens.get(i + 1);
                let vowel = next
                    .filter(|t| t.kind == TokenKind::Vowel)
                    .map(|t| t.text.as_str());
                let mid_word = matches!(next.map(|t| t.kind), Some(TokenKind::Unsupported));
                compose_syllable(&mut out, token, vowel, mid_word, table);
                i += if vowel.is_some() { 2 } else { 1 };
            }
            TokenKind::Vowel => {
                out.push_str(table.vowel(&token.text).unwrap_or(&token.text));
                i += 1;
            }
            TokenKind::Boundary => {
                out.push_str(&token.text);
                i += 1;
            }
            TokenKind::Symbol => {
                compose_symbol(&mut out, &token.text, table);
                i += 1;
            }
            TokenKind::Unsupported => {
                match UnsupportedTable::global().lookup(&token.text) {
                    // Validation guarantees the approximation cannot contain
                    // another table key, so this recursion is one level deep.
                    Some(mapping) => {
                        let substitute = tokenize(&mapping.approximation);
                        out.push_str(&compose(&substitute, table));
                    }
                    None => out.push_str(&token.text),
                }
                i += 1;
            }
        }
    }
    debug!(tokens = tokens.len(), out_len = out.len());
    out
}

/// One consonant (or cluster) plus an optional trailing vowel.
///
/// Every cluster part except the last takes a virama half-form. The last
/// part takes the vowel's diacritic when one follows; with no vowel it takes
/// a half-form mid-word, and keeps its inherent vowel at a word or input
/// boundary.
fn compose_syllable(
    out: &mut String,
    token: &RomanToken,
    vowel: Option<&str>,
    mid_word: bool,
    table: &ScriptTable,
) {
    let parts: Vec<&str> = match token.kind {
        TokenKind::Consonant => vec![token.text.as_str()],
        _ => consonant_parts(&token.text),
    };
    if parts.is_empty() {
        return;
    }
    let last = parts.len() - 1;
    for (idx, part) in parts.iter().enumerate() {
        out.push_str(table.consonant(part).unwrap_or(part));
        if idx < last {
            if let Some(virama) = table.virama() {
                out.push_str(virama);
            }
        }
    }
    if let Some(vowel) = vowel {
        match table.vowel_mark(vowel) {
            Some(mark) => out.push_str(mark),
            None => out.push_str(vowel),
        }
    } else if mid_word {
        if let Some(virama) = table.virama() {
            out.push_str(virama);
        }
    }
}

fn compose_symbol(out: &mut String, text: &str, table: &ScriptTable) {
    if text.len() == 1 && text.starts_with(ANUSVARA_MARKER) {
        out.push_str(table.special("anusvara").unwrap_or(text));
    } else if text.len() == 1 && text.as_bytes()[0].is_ascii_digit() {
        out.push_str(table.numeral(text).unwrap_or(text));
    } else {
        out.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script;

    fn render(input: &str, script: &str) -> String {
        compose(&tokenize(input), script::table(script))
    }

    #[test]
    fn inherent_vowel_has_no_diacritic() {
        assert_eq!(render("ka", "devanagari"), "क");
        assert_eq!(render("ka", "brahmi"), "𑀓");
    }

    #[test]
    fn long_vowel_takes_a_diacritic() {
        assert_eq!(render("kaa", "devanagari"), "का");
        assert_eq!(render("kee", "devanagari"), "की");
        assert_eq!(render("kaa", "brahmi"), "𑀓𑀸");
    }

    #[test]
    fn standalone_vowels_use_independent_forms() {
        assert_eq!(render("aa", "devanagari"), "आ");
        assert_eq!(render("a i u", "devanagari"), "अ इ उ");
    }

    #[test]
    fn cluster_renders_half_forms() {
        assert_eq!(render("kra", "devanagari"), "क्र");
        assert_eq!(render("sthaan", "devanagari"), "स्थान");
        assert_eq!(render("kra", "brahmi"), "𑀓𑁆𑀭");
    }

    #[test]
    fn word_final_consonant_keeps_inherent_vowel() {
        assert_eq!(render("k", "devanagari"), "क");
        assert_eq!(render("namastek.", "devanagari"), "नमस्तेक.");
    }

    #[test]
    fn anusvara_marker_renders_the_mark() {
        assert_eq!(render("ka^", "devanagari"), "कं");
        assert_eq!(render("ka^", "brahmi"), "𑀓𑀁");
    }

    #[test]
    fn digits_map_to_script_numerals() {
        assert_eq!(render("42", "devanagari"), "४२");
        assert_eq!(render("42", "brahmi"), "𑁪𑁨");
        assert_eq!(render("42", "tamil"), "௪௨");
    }

    #[test]
    fn retroflex_and_dental_series_differ() {
        assert_eq!(render("Ta", "devanagari"), "ट");
        assert_eq!(render("ta", "devanagari"), "त");
        assert_eq!(render("Thaalee", "devanagari"), "ठाली");
    }

    #[test]
    fn unsupported_composes_as_its_approximation() {
        assert_eq!(render("sha", "devanagari"), render("sa", "devanagari"));
        assert_eq!(render("ksha", "brahmi"), render("ksa", "brahmi"));
        assert_eq!(render("aum", "devanagari"), render("om", "devanagari"));
    }

    #[test]
    fn consonant_before_unsupported_takes_half_form() {
        assert_eq!(render("nsha", "devanagari"), "न्स");
    }

    #[test]
    fn empty_table_echoes_roman() {
        assert_eq!(render("namaste", "klingon"), "namaste");
        assert_eq!(render("ka 42!", "klingon"), "ka 42!");
    }

    #[test]
    fn punctuation_passes_through() {
        assert_eq!(render("ka, kaa!", "devanagari"), "क, का!");
    }

    #[test]
    fn whole_words() {
        assert_eq!(render("namaste", "devanagari"), "नमस्ते");
        assert_eq!(render("namaste", "brahmi"), "𑀦𑀫𑀲𑁆𑀢𑁂");
        assert_eq!(render("bhaarat", "devanagari"), "भारत");
    }

    #[test]
    fn other_scripts_share_the_composer() {
        assert_eq!(render("ka", "tamil"), "க");
        assert_eq!(render("kaa", "bengali"), "কা");
        assert_eq!(render("namaste", "telugu"), "నమస్తే");
    }
}
