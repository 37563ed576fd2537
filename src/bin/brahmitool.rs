use std::fs;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use unicode_width::UnicodeWidthStr;

use brahmi_engine::compose::compose;
use brahmi_engine::overrides::WordOverrides;
use brahmi_engine::roman::tokenize;
use brahmi_engine::script::{self, parse_script_json, reverse};
use brahmi_engine::{convert_with_script, ConversionEngine, ConversionMode};

#[derive(Parser)]
#[command(name = "brahmitool", about = "Brahmi conversion diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    English,
    Brahmi,
    Pure,
}

impl From<ModeArg> for ConversionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::English => ConversionMode::English,
            ModeArg::Brahmi => ConversionMode::Brahmi,
            ModeArg::Pure => ConversionMode::PureBrahmi,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Convert a buffer and show the two-line preview
    Convert {
        /// Input text (Roman, or Brahmi in pure mode)
        input: String,
        /// Reference script id
        #[arg(short, long, default_value = "devanagari")]
        script: String,
        /// Keyboard mode
        #[arg(short, long, value_enum, default_value = "brahmi")]
        mode: ModeArg,
        /// Word-override JSON file (optional)
        #[arg(long)]
        overrides: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Dump the token stream with per-token renderings
    Tokens {
        /// Roman input text
        input: String,
        /// Reference script id
        #[arg(short, long, default_value = "devanagari")]
        script: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Reverse-map a Brahmi string to Roman spellings
    Reverse {
        /// Brahmi input text
        input: String,
    },

    /// List the supported reference scripts
    Scripts,

    /// Validate a script resource file
    CheckTable {
        /// Path to a script-mapping JSON file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            input,
            script,
            mode,
            overrides,
            json,
        } => {
            let result = match overrides {
                Some(path) => {
                    let content = fs::read_to_string(&path).unwrap_or_else(|e| {
                        eprintln!("Failed to read overrides file {}: {}", path, e);
                        process::exit(1);
                    });
                    let overrides = WordOverrides::from_json(&content).unwrap_or_else(|e| {
                        eprintln!("Failed to parse overrides file {}: {}", path, e);
                        process::exit(1);
                    });
                    let mut engine = ConversionEngine::with_overrides(overrides);
                    engine.set_reference_script(script.as_str());
                    engine.convert(&input, mode.into())
                }
                None => convert_with_script(&input, mode.into(), &script),
            };

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).expect("JSON serialization failed")
                );
            } else {
                let label = script::display_name(&result.reference_script)
                    .unwrap_or(result.reference_script.as_str());
                println!("Brahmi:  {}", result.brahmi_text);
                println!("{label}: {}", result.reference_text);
                println!("Commit:  {}", result.output_text);
                for warning in &result.warnings {
                    println!("warning: {warning}");
                }
            }
        }

        Command::Tokens {
            input,
            script,
            json,
        } => {
            let tokens = tokenize(&input);
            let brahmi = script::brahmi_table();
            let reference = script::table(&script);

            if json {
                let rows: Vec<serde_json::Value> = tokens
                    .iter()
                    .map(|t| {
                        let one = std::slice::from_ref(t);
                        serde_json::json!({
                            "text": t.text,
                            "kind": t.kind,
                            "brahmi": compose(one, brahmi),
                            "reference": compose(one, reference),
                        })
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&rows).expect("JSON serialization failed")
                );
            } else {
                println!(
                    "{} {} {} {}",
                    pad("TEXT", 8),
                    pad("KIND", 18),
                    pad("BRAHMI", 10),
                    "REFERENCE"
                );
                for token in &tokens {
                    let one = std::slice::from_ref(token);
                    println!(
                        "{} {} {} {}",
                        pad(&token.text, 8),
                        pad(&format!("{:?}", token.kind), 18),
                        pad(&compose(one, brahmi), 10),
                        compose(one, reference),
                    );
                }
            }
        }

        Command::Reverse { input } => {
            let brahmi = script::brahmi_table();
            println!("{}", reverse::to_roman_string(&input, brahmi));
        }

        Command::Scripts => {
            println!("{} {} TABLE", pad("ID", 15), pad("NAME", 15));
            for info in &script::SCRIPTS {
                println!(
                    "{} {} {}",
                    pad(info.id, 15),
                    pad(info.display_name, 15),
                    info.table_id
                );
            }
        }

        Command::CheckTable { file } => {
            let content = fs::read_to_string(&file).unwrap_or_else(|e| {
                eprintln!("Failed to read {}: {}", file, e);
                process::exit(1);
            });
            match parse_script_json(&content) {
                Ok(table) => {
                    println!("ok: script {}", table.id());
                }
                Err(e) => {
                    eprintln!("invalid script resource: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}

/// Pad to a display width; wide Indic glyphs count per their terminal cells.
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    let mut out = s.to_string();
    for _ in w..width {
        out.push(' ');
    }
    out
}
