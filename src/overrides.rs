//! Word-level override mappings.
//!
//! An optional layer consulted per word before systematic composition:
//! whole-word Roman → Brahmi, whole-word Roman → reference script, and
//! Brahmi → Roman for the Pure-Brahmi preview. Empty by default.

use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct WordOverrides {
    roman_to_brahmi: HashMap<String, String>,
    brahmi_to_roman: HashMap<String, String>,
    /// Reference-script id → Roman word → rendered text.
    roman_to_script: HashMap<String, HashMap<String, String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error("JSON parse error: {0}")]
    Parse(String),
}

impl WordOverrides {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, OverrideError> {
        let parsed: WordOverrides =
            serde_json::from_str(json).map_err(|e| OverrideError::Parse(e.to_string()))?;
        // Roman words match case-insensitively.
        Ok(Self {
            roman_to_brahmi: lower_keys(parsed.roman_to_brahmi),
            brahmi_to_roman: parsed.brahmi_to_roman,
            roman_to_script: parsed
                .roman_to_script
                .into_iter()
                .map(|(script, words)| (script, lower_keys(words)))
                .collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.roman_to_brahmi.is_empty()
            && self.brahmi_to_roman.is_empty()
            && self.roman_to_script.is_empty()
    }

    pub fn brahmi_word(&self, word: &str) -> Option<&str> {
        self.roman_to_brahmi
            .get(&word.to_lowercase())
            .map(String::as_str)
    }

    pub fn script_word(&self, script: &str, word: &str) -> Option<&str> {
        self.roman_to_script
            .get(script)?
            .get(&word.to_lowercase())
            .map(String::as_str)
    }

    pub fn roman_word(&self, brahmi_word: &str) -> Option<&str> {
        self.brahmi_to_roman.get(brahmi_word).map(String::as_str)
    }

    pub fn insert_brahmi_word(&mut self, roman: &str, brahmi: &str) {
        self.roman_to_brahmi
            .insert(roman.to_lowercase(), brahmi.to_string());
    }

    pub fn insert_script_word(&mut self, script: &str, roman: &str, text: &str) {
        self.roman_to_script
            .entry(script.to_string())
            .or_default()
            .insert(roman.to_lowercase(), text.to_string());
    }

    pub fn insert_roman_word(&mut self, brahmi: &str, roman: &str) {
        self.brahmi_to_roman
            .insert(brahmi.to_string(), roman.to_string());
    }
}

fn lower_keys(map: HashMap<String, String>) -> HashMap<String, String> {
    map.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect()
}
