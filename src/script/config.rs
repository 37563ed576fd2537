use std::collections::BTreeMap;

use serde::Deserialize;

use super::ScriptTable;

#[derive(Deserialize)]
struct ScriptResource {
    script: String,
    mappings: Sections,
}

#[derive(Deserialize, Default)]
struct Sections {
    #[serde(default)]
    vowels: BTreeMap<String, String>,
    #[serde(default)]
    consonants: BTreeMap<String, String>,
    #[serde(default)]
    vowel_marks: BTreeMap<String, String>,
    #[serde(default)]
    special_marks: BTreeMap<String, String>,
    #[serde(default)]
    numerals: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptConfigError {
    #[error("JSON parse error: {0}")]
    Parse(String),
    #[error("non-ASCII roman key: {0}")]
    NonAsciiKey(String),
    #[error("script {0} defines consonants but no virama")]
    MissingVirama(String),
    #[error("vowel {0} has no vowel_marks entry")]
    MissingVowelMark(String),
}

/// Parse a script resource into a table.
///
/// Keys are Roman spellings (plus the `anusvara`/`visarga`/`virama` names in
/// `special_marks`) and must be ASCII. A table with consonants must define a
/// virama so every consonant has a half-form, and every vowel needs a
/// diacritic entry — the inherent "a" maps to the empty string.
pub fn parse_script_json(json: &str) -> Result<ScriptTable, ScriptConfigError> {
    let resource: ScriptResource =
        serde_json::from_str(json).map_err(|e| ScriptConfigError::Parse(e.to_string()))?;
    let s = resource.mappings;

    for key in s
        .vowels
        .keys()
        .chain(s.consonants.keys())
        .chain(s.vowel_marks.keys())
        .chain(s.special_marks.keys())
        .chain(s.numerals.keys())
    {
        if !key.is_ascii() {
            return Err(ScriptConfigError::NonAsciiKey(key.clone()));
        }
    }

    if !s.consonants.is_empty() {
        match s.special_marks.get("virama") {
            Some(v) if !v.is_empty() => {}
            _ => return Err(ScriptConfigError::MissingVirama(resource.script)),
        }
    }
    for vowel in s.vowels.keys() {
        if !s.vowel_marks.contains_key(vowel) {
            return Err(ScriptConfigError::MissingVowelMark(vowel.clone()));
        }
    }

    Ok(ScriptTable::new(
        resource.script,
        s.vowels,
        s.consonants,
        s.vowel_marks,
        s.special_marks,
        s.numerals,
    ))
}
