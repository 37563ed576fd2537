//! Per-script lookup tables and the script registry.
//!
//! Tables are parsed from embedded JSON resources on first use and cached for
//! the process lifetime. A malformed resource or an unknown script id degrades
//! to the shared empty table — conversions then echo Roman text instead of
//! failing, which is what a live keyboard preview needs.

mod config;
pub mod reverse;

pub use config::{parse_script_json, ScriptConfigError};

use std::collections::BTreeMap;
use std::sync::OnceLock;

use tracing::{debug, warn};

use reverse::ReverseMap;

/// Script id reported for English passthrough mode.
pub const ENGLISH: &str = "english";
/// Table id of the primary output script.
pub const BRAHMI: &str = "brahmi";

#[derive(Debug)]
pub struct ScriptTable {
    id: String,
    pub(crate) vowels: BTreeMap<String, String>,
    pub(crate) consonants: BTreeMap<String, String>,
    pub(crate) vowel_marks: BTreeMap<String, String>,
    pub(crate) special_marks: BTreeMap<String, String>,
    pub(crate) numerals: BTreeMap<String, String>,
    reverse: OnceLock<ReverseMap>,
}

impl ScriptTable {
    pub(crate) fn new(
        id: String,
        vowels: BTreeMap<String, String>,
        consonants: BTreeMap<String, String>,
        vowel_marks: BTreeMap<String, String>,
        special_marks: BTreeMap<String, String>,
        numerals: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id,
            vowels,
            consonants,
            vowel_marks,
            special_marks,
            numerals,
            reverse: OnceLock::new(),
        }
    }

    pub fn empty(id: &str) -> Self {
        Self::new(
            id.to_string(),
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
            BTreeMap::new(),
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_empty(&self) -> bool {
        self.vowels.is_empty() && self.consonants.is_empty() && self.numerals.is_empty()
    }

    pub fn vowel(&self, spelling: &str) -> Option<&str> {
        lookup_ci(&self.vowels, spelling)
    }

    pub fn consonant(&self, spelling: &str) -> Option<&str> {
        lookup_ci(&self.consonants, spelling)
    }

    /// Diacritic for a vowel following a consonant. The inherent "a" maps to
    /// an (explicit) empty string in loaded tables; `None` means the table
    /// simply has no entry.
    pub fn vowel_mark(&self, spelling: &str) -> Option<&str> {
        lookup_ci(&self.vowel_marks, spelling)
    }

    pub fn special(&self, name: &str) -> Option<&str> {
        self.special_marks.get(name).map(String::as_str)
    }

    pub fn virama(&self) -> Option<&str> {
        self.special("virama")
    }

    pub fn numeral(&self, digit: &str) -> Option<&str> {
        self.numerals.get(digit).map(String::as_str)
    }

    /// Inverse map, built once on first use. Collisions keep the shortest
    /// spelling, with ties broken by the Roman inventory order.
    pub fn reverse(&self) -> &ReverseMap {
        self.reverse.get_or_init(|| ReverseMap::build(self))
    }
}

/// Exact-case match first, then an ASCII-lowercased retry. Keeps the
/// uppercase retroflex spellings (`T Th D Dh N Sh L`) distinct while letting
/// `KA` read as `ka`.
fn lookup_ci<'a>(map: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    if let Some(v) = map.get(key) {
        return Some(v.as_str());
    }
    if key.bytes().any(|b| b.is_ascii_uppercase()) {
        return map.get(&key.to_ascii_lowercase()).map(String::as_str);
    }
    None
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub struct ScriptInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    /// Several languages share one written script; this names the table.
    pub table_id: &'static str,
}

pub static SCRIPTS: [ScriptInfo; 24] = [
    ScriptInfo { id: "assamese", display_name: "Assamese", table_id: "bengali" },
    ScriptInfo { id: "awadhi", display_name: "Awadhi", table_id: "devanagari" },
    ScriptInfo { id: "bengali", display_name: "Bengali", table_id: "bengali" },
    ScriptInfo { id: "bhojpuri", display_name: "Bhojpuri", table_id: "devanagari" },
    ScriptInfo { id: "chhattisgarhi", display_name: "Chhattisgarhi", table_id: "devanagari" },
    ScriptInfo { id: "devanagari", display_name: "Devanagari", table_id: "devanagari" },
    ScriptInfo { id: "dogri", display_name: "Dogri", table_id: "devanagari" },
    ScriptInfo { id: "gujarati", display_name: "Gujarati", table_id: "gujarati" },
    ScriptInfo { id: "harayanvi", display_name: "Harayanvi", table_id: "devanagari" },
    ScriptInfo { id: "kannada", display_name: "Kannada", table_id: "kannada" },
    ScriptInfo { id: "kashmiri", display_name: "Kashmiri", table_id: "devanagari" },
    ScriptInfo { id: "konkani", display_name: "Konkani", table_id: "devanagari" },
    ScriptInfo { id: "maithili", display_name: "Maithili", table_id: "devanagari" },
    ScriptInfo { id: "malayalam", display_name: "Malayalam", table_id: "malayalam" },
    ScriptInfo { id: "manipuri", display_name: "Manipuri", table_id: "bengali" },
    ScriptInfo { id: "marathi", display_name: "Marathi", table_id: "devanagari" },
    ScriptInfo { id: "nepali", display_name: "Nepali", table_id: "devanagari" },
    ScriptInfo { id: "odia", display_name: "Odia", table_id: "odia" },
    ScriptInfo { id: "punjabi", display_name: "Punjabi", table_id: "gurmukhi" },
    ScriptInfo { id: "rajasthani", display_name: "Rajasthani", table_id: "devanagari" },
    ScriptInfo { id: "sanskrit", display_name: "Sanskrit", table_id: "devanagari" },
    ScriptInfo { id: "sindhi", display_name: "Sindhi", table_id: "devanagari" },
    ScriptInfo { id: "tamil", display_name: "Tamil", table_id: "tamil" },
    ScriptInfo { id: "telugu", display_name: "Telugu", table_id: "telugu" },
];

struct Resource {
    id: &'static str,
    json: &'static str,
    cell: OnceLock<ScriptTable>,
}

macro_rules! resource {
    ($id:literal) => {
        Resource {
            id: $id,
            json: include_str!(concat!("../../resources/", $id, ".json")),
            cell: OnceLock::new(),
        }
    };
}

static RESOURCES: [Resource; 10] = [
    resource!("brahmi"),
    resource!("devanagari"),
    resource!("bengali"),
    resource!("gujarati"),
    resource!("gurmukhi"),
    resource!("odia"),
    resource!("tamil"),
    resource!("telugu"),
    resource!("kannada"),
    resource!("malayalam"),
];

static EMPTY: OnceLock<ScriptTable> = OnceLock::new();

pub fn resolve(id: &str) -> Option<&'static ScriptInfo> {
    SCRIPTS.iter().find(|info| info.id.eq_ignore_ascii_case(id))
}

pub fn display_name(id: &str) -> Option<&'static str> {
    resolve(id).map(|info| info.display_name)
}

/// Table for a script id (language ids resolve through their alias). An
/// unknown id or a malformed resource yields the empty table, never an error.
pub fn table(id: &str) -> &'static ScriptTable {
    let table_id = resolve(id).map(|info| info.table_id).or_else(|| {
        RESOURCES
            .iter()
            .find(|r| r.id.eq_ignore_ascii_case(id))
            .map(|r| r.id)
    });
    let resource = table_id.and_then(|tid| RESOURCES.iter().find(|r| r.id == tid));
    match resource {
        Some(res) => res.cell.get_or_init(|| match parse_script_json(res.json) {
            Ok(t) => {
                debug!(script = res.id, "script table loaded");
                t
            }
            Err(e) => {
                warn!(script = res.id, error = %e, "malformed script resource, using empty table");
                ScriptTable::empty(res.id)
            }
        }),
        None => {
            debug!(script = id, "unknown script id, using empty table");
            EMPTY.get_or_init(|| ScriptTable::empty(""))
        }
    }
}

pub fn brahmi_table() -> &'static ScriptTable {
    table(BRAHMI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_embedded_resources_parse() {
        for res in &RESOURCES {
            let t = table(res.id);
            assert!(!t.is_empty(), "resource {} failed to load", res.id);
        }
    }

    #[test]
    fn alias_shares_table() {
        let marathi = table("marathi") as *const ScriptTable;
        let devanagari = table("devanagari") as *const ScriptTable;
        assert_eq!(marathi, devanagari);

        let assamese = table("assamese") as *const ScriptTable;
        let bengali = table("bengali") as *const ScriptTable;
        assert_eq!(assamese, bengali);
    }

    #[test]
    fn unknown_script_is_empty() {
        let t = table("klingon");
        assert!(t.is_empty());
        assert_eq!(t.consonant("k"), None);
    }

    #[test]
    fn case_insensitive_lookup_preserves_retroflex() {
        let t = table("devanagari");
        assert_eq!(t.consonant("t"), Some("त"));
        assert_eq!(t.consonant("T"), Some("ट"));
        assert_eq!(t.consonant("Th"), Some("ठ"));
        // No exact uppercase key: falls back to the lowercase spelling.
        assert_eq!(t.consonant("K"), Some("क"));
        assert_eq!(t.vowel("A"), Some("अ"));
    }

    #[test]
    fn every_table_covers_the_roman_inventory() {
        for res in &RESOURCES {
            let t = table(res.id);
            for v in crate::roman::VOWELS {
                assert!(t.vowel(v).is_some(), "{}: missing vowel {v}", res.id);
                assert!(t.vowel_mark(v).is_some(), "{}: missing mark {v}", res.id);
            }
            for c in crate::roman::CONSONANTS {
                assert!(t.consonant(c).is_some(), "{}: missing consonant {c}", res.id);
            }
            assert!(t.virama().is_some(), "{}: missing virama", res.id);
            assert!(t.special("anusvara").is_some(), "{}: missing anusvara", res.id);
            for d in 0..10u32 {
                let d = d.to_string();
                assert!(t.numeral(&d).is_some(), "{}: missing numeral {d}", res.id);
            }
        }
    }

    #[test]
    fn inherent_a_mark_is_empty() {
        assert_eq!(table("devanagari").vowel_mark("a"), Some(""));
        assert_eq!(table("brahmi").vowel_mark("a"), Some(""));
    }

    #[test]
    fn all_language_ids_resolve_to_a_loaded_table() {
        for info in &SCRIPTS {
            assert!(!table(info.id).is_empty(), "no table for {}", info.id);
        }
    }
}
