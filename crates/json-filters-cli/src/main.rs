//! `jf` CLI — apply json-filters paths to JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Print the value at a path (stdin → stdout)
//! echo '{"a":{"c":["x",2]}}' | jf get '.a.c[0]'
//!
//! # Read from a file and require an integer
//! jf get '.a.b' --as int -i data.json
//!
//! # Exit status tells whether the path applies
//! jf check '.d[9]' -i data.json
//!
//! # Show the steps a path is made of
//! jf explain '.e.f[1].g:number'
//! ```
//!
//! Set `RUST_LOG` or pass `-v`/`-vv` to see step-by-step evaluation logs.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use json_filters::Path;
use serde_json::Value;
use std::io::{self, Read, Write};
use std::path::{Path as FsPath, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "jf", version, about = "Apply reusable paths to JSON documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value a path selects
    Get {
        /// Path expression, e.g. '.a.c[0]' or '.meta["total count"]'
        path: String,
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Type the selected value must have
        #[arg(long = "as", value_enum, default_value_t = Extract::Value)]
        extract: Extract,
        /// Print maps and sequences on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Print whether a path applies; exits 1 when it does not
    Check {
        /// Path expression
        path: String,
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// List the steps of a path with their positions
    Explain {
        /// Path expression
        path: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Extract {
    Value,
    String,
    Int,
    Float,
    Bool,
    Map,
    Seq,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Get {
            path,
            input,
            output,
            extract,
            compact,
        } => {
            let path = parse_path(&path)?;
            let doc = read_document(input.as_deref())?;
            let rendered = extract_value(&path, &doc, extract, compact)
                .with_context(|| format!("Failed to apply path {}", path))?;
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Check { path, input } => {
            let path = parse_path(&path)?;
            let doc = read_document(input.as_deref())?;
            let valid = path.bind(&doc).is_valid();
            println!("{}", valid);
            if !valid {
                process::exit(1);
            }
        }
        Commands::Explain { path } => {
            let path = parse_path(&path)?;
            if path.is_empty() {
                println!("(empty path: selects the root)");
            }
            for (position, step) in path.steps().iter().enumerate() {
                println!("{:>3}  {:<8} {}", position, step.description(), step);
            }
        }
    }

    Ok(())
}

/// Install `env_logger`. `RUST_LOG` wins over `-v` when both are set.
fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn parse_path(text: &str) -> Result<Path> {
    let path: Path = text
        .parse()
        .with_context(|| format!("Invalid path: '{}'", text))?;
    log::debug!("parsed path {} ({} steps)", path, path.len());
    Ok(path)
}

/// Run the getter matching `extract` and render its result for printing.
///
/// Strings print raw (no quotes) when requested with `--as string`; every
/// other JSON value prints as JSON.
fn extract_value(path: &Path, doc: &Value, extract: Extract, compact: bool) -> Result<String> {
    let bound = path.bind(doc);
    let rendered = match extract {
        Extract::Value => render_json(bound.get()?, compact)?,
        Extract::String => bound.get_string()?.to_string(),
        Extract::Int => bound.get_int()?.to_string(),
        Extract::Float => bound.get_float()?.to_string(),
        Extract::Bool => bound.get_bool()?.to_string(),
        Extract::Map => render_json(&Value::Object(bound.get_map()?.clone()), compact)?,
        Extract::Seq => render_json(&Value::Array(bound.get_sequence()?.to_vec()), compact)?,
    };
    Ok(rendered)
}

fn render_json(value: &Value, compact: bool) -> Result<String> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(text)
}

fn read_document(source: Option<&FsPath>) -> Result<Value> {
    let text = match source {
        Some(file) => std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read file: {}", file.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    log::debug!("read {} bytes of input", text.len());
    serde_json::from_str(&text).context("Failed to parse input as JSON")
}

/// Files receive the rendering as-is; stdout gets a trailing newline.
fn write_output(destination: Option<&FsPath>, rendered: &str) -> Result<()> {
    match destination {
        Some(file) => std::fs::write(file, rendered)
            .with_context(|| format!("Failed to write file: {}", file.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", rendered).context("Failed to write to stdout")
        }
    }
}
