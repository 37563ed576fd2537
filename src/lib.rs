//! Roman-to-Brahmi conversion engine with a parallel reference-script preview.
//!
//! Turns Latin keystrokes into the historic Brahmi script and a chosen modern
//! Indic script at the same time, from a single token stream, for the
//! two-line live preview of a soft keyboard. Conversion never fails: unknown
//! scripts and unmapped fragments echo the Roman text instead.

pub mod compose;
pub mod engine;
pub mod overrides;
pub mod roman;
pub mod script;
pub mod trace_init;
pub mod unsupported;

pub use engine::{convert_with_script, ConversionEngine, ConversionMode, ConversionResult};
