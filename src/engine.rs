//! Conversion engine facade: three keyboard modes over one pipeline.
//!
//! The core is the pure function [`convert_with_script`] — mode and reference
//! script are explicit parameters. [`ConversionEngine`] is the thin stateful
//! wrapper the keyboard UI drives through `set_reference_script`/`convert`.
//! Neither ever returns an error: unknown scripts and unmapped fragments
//! degrade to Roman echo, because a live preview must keep accepting
//! keystrokes.


use serde::Serialize;
use tracing::{debug, debug_span};

use crate::compose::compose;
use crate::overrides::WordOverrides;
use crate::roman::{tokenize, RomanToken, TokenKind};
use crate::script::{self, reverse, ScriptTable};
use crate::unsupported::UnsupportedTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// Passthrough: keystrokes commit as typed.
    English,
    /// Roman entry, Brahmi commit, reference-script preview.
    Brahmi,
    /// Brahmi entry committed as-is, reference-script preview.
    PureBrahmi,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub brahmi_text: String,
    pub reference_text: String,
    /// What the keyboard commits on a word-boundary event.
    pub output_text: String,
    pub reference_script: String,
    pub warnings: Vec<String>,
}

impl ConversionResult {
    fn empty(script_id: &str) -> Self {
        Self {
            brahmi_text: String::new(),
            reference_text: String::new(),
            output_text: String::new(),
            reference_script: script_id.to_string(),
            warnings: Vec::new(),
        }
    }

    fn identity(input: &str, script_id: &str) -> Self {
        Self {
            brahmi_text: input.to_string(),
            reference_text: input.to_string(),
            output_text: input.to_string(),
            reference_script: script_id.to_string(),
            warnings: Vec::new(),
        }
    }
}

/// Convert with an explicit reference script and no word overrides.
pub fn convert_with_script(
    input: &str,
    mode: ConversionMode,
    script_id: &str,
) -> ConversionResult {
    convert_with(input, mode, script_id, &WordOverrides::empty())
}

pub fn convert_with(
    input: &str,
    mode: ConversionMode,
    script_id: &str,
    overrides: &WordOverrides,
) -> ConversionResult {
    let span = debug_span!("convert", ?mode, script = script_id);
    let _guard = span.enter();
    match mode {
        ConversionMode::English => ConversionResult::identity(input, script::ENGLISH),
        ConversionMode::Brahmi => convert_brahmi(input, script_id, overrides),
        ConversionMode::PureBrahmi => convert_pure_brahmi(input, script_id, overrides),
    }
}

fn convert_brahmi(input: &str, script_id: &str, overrides: &WordOverrides) -> ConversionResult {
    if input.is_empty() {
        return ConversionResult::empty(script_id);
    }
    let brahmi = script::brahmi_table();
    let reference = script::table(script_id);

    // Tokenize once; both scripts compose from this stream in lockstep.
    let tokens = tokenize(input);
    let mut brahmi_text = String::new();
    let mut reference_text = String::new();
    let mut warnings = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].is_word_part() {
            let mut j = i + 1;
            while j < tokens.len() && tokens[j].is_word_part() {
                j += 1;
            }
            render_word(
                &tokens[i..j],
                brahmi,
                reference,
                script_id,
                overrides,
                &mut brahmi_text,
                &mut reference_text,
                &mut warnings,
            );
            i = j;
        } else {
            let separator = std::slice::from_ref(&tokens[i]);
            brahmi_text.push_str(&compose(separator, brahmi));
            reference_text.push_str(&compose(separator, reference));
            i += 1;
        }
    }

    debug!(tokens = tokens.len(), warnings = warnings.len());
    ConversionResult {
        output_text: brahmi_text.clone(),
        brahmi_text,
        reference_text,
        reference_script: script_id.to_string(),
        warnings,
    }
}

#[allow(clippy::too_many_arguments)]
fn render_word(
    word: &[RomanToken],
    brahmi: &ScriptTable,
    reference: &ScriptTable,
    script_id: &str,
    overrides: &WordOverrides,
    brahmi_out: &mut String,
    reference_out: &mut String,
    warnings: &mut Vec<String>,
) {
    let text: String = word.iter().map(|t| t.text.as_str()).collect();
    let brahmi_override = overrides.brahmi_word(&text);
    let script_override = overrides.script_word(script_id, &text);

    match brahmi_override {
        Some(rendered) => brahmi_out.push_str(rendered),
        None => brahmi_out.push_str(&compose(word, brahmi)),
    }
    match script_override {
        Some(rendered) => reference_out.push_str(rendered),
        None => reference_out.push_str(&compose(word, reference)),
    }

    // Warnings belong to the systematic path; a word overridden on both
    // sides never went through substitution.
    if brahmi_override.is_none() || script_override.is_none() {
        let table = UnsupportedTable::global();
        for token in word {
            if token.kind == TokenKind::Unsupported {
                if let Some(mapping) = table.lookup(&token.text) {
                    warnings.push(mapping.warning.clone());
                }
            }
        }
    }
}

fn convert_pure_brahmi(
    input: &str,
    script_id: &str,
    overrides: &WordOverrides,
) -> ConversionResult {
    if input.is_empty() {
        return ConversionResult::empty(script_id);
    }
    let brahmi = script::brahmi_table();
    let reference = script::table(script_id);

    let mut reference_text = String::new();
    let mut word = String::new();
    for c in input.chars() {
        if c.is_whitespace() {
            render_brahmi_word(&word, brahmi, reference, overrides, &mut reference_text);
            word.clear();
            reference_text.push(c);
        } else {
            word.push(c);
        }
    }
    render_brahmi_word(&word, brahmi, reference, overrides, &mut reference_text);

    // Brahmi glyphs are both keystroke and commit form here.
    ConversionResult {
        brahmi_text: input.to_string(),
        reference_text,
        output_text: input.to_string(),
        reference_script: script_id.to_string(),
        warnings: Vec::new(),
    }
}

fn render_brahmi_word(
    word: &str,
    brahmi: &ScriptTable,
    reference: &ScriptTable,
    overrides: &WordOverrides,
    reference_out: &mut String,
) {
    if word.is_empty() {
        return;
    }
    let tokens = match overrides.roman_word(word) {
        Some(roman) => tokenize(roman),
        None => reverse::to_roman_tokens(word, brahmi),
    };
    reference_out.push_str(&compose(&tokens, reference));
}

/// Stateful facade owned by one keyboard session.
///
/// Holds the current reference script (set by the preferences collaborator)
/// and the optional word-override layer. All conversion goes through the
/// pure [`convert_with`] core.
pub struct ConversionEngine {
    reference_script: String,
    overrides: WordOverrides,
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionEngine {
    pub fn new() -> Self {
        Self {
            reference_script: "devanagari".to_string(),
            overrides: WordOverrides::empty(),
        }
    }

    pub fn with_overrides(overrides: WordOverrides) -> Self {
        Self {
            overrides,
            ..Self::new()
        }
    }

    pub fn set_reference_script(&mut self, script_id: impl Into<String>) {
        self.reference_script = script_id.into();
    }

    pub fn reference_script(&self) -> &str {
        &self.reference_script
    }

    pub fn set_overrides(&mut self, overrides: WordOverrides) {
        self.overrides = overrides;
    }

    pub fn convert(&self, input: &str, mode: ConversionMode) -> ConversionResult {
        convert_with(input, mode, &self.reference_script, &self.overrides)
    }
}
