use std::io::{self, BufRead};
use std::process;

use clap::{Parser, ValueEnum};
use typenorm_core::{parse_alternatives, parse_one, TypeError};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Normalize documentation type annotations to their canonical form.
#[derive(Parser)]
#[command(
    name = "typenorm",
    version,
    about = "Normalize documentation type annotations"
)]
struct Cli {
    /// Annotations to normalize; several are joined as alternatives
    #[arg(required_unless_present = "stdin")]
    annotations: Vec<String>,

    /// Treat a single annotation as a one-element alternative list
    #[arg(long)]
    alternatives: bool,

    /// Read one annotation per line from stdin instead of the arguments
    #[arg(long, conflicts_with = "annotations")]
    stdin: bool,

    /// Output format (text or json)
    #[arg(long, default_value = "text", value_enum)]
    output: OutputFormat,
}

fn main() {
    let cli = Cli::parse();

    if cli.stdin {
        process::exit(run_stdin(cli.output));
    }

    let result = if cli.annotations.len() == 1 && !cli.alternatives {
        parse_one(&cli.annotations[0])
    } else {
        parse_alternatives(cli.annotations.iter().map(String::as_str))
    };

    let input = cli.annotations.join(", ");
    let ok = report(cli.output, &input, result);
    process::exit(if ok { 0 } else { 1 });
}

/// Normalize stdin line by line. A failing line is reported and skipped,
/// matching how the extraction pipeline treats a bad annotation; the exit
/// code says whether every line normalized.
fn run_stdin(output: OutputFormat) -> i32 {
    let stdin = io::stdin();
    let mut all_ok = true;
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("error: {}", err);
                return 1;
            }
        };
        let annotation = line.trim();
        if annotation.is_empty() {
            continue;
        }
        if !report(output, annotation, parse_one(annotation)) {
            all_ok = false;
        }
    }
    if all_ok {
        0
    } else {
        1
    }
}

/// Print one result record. Returns false for a failure.
fn report(output: OutputFormat, input: &str, result: Result<String, TypeError>) -> bool {
    match (output, result) {
        (OutputFormat::Text, Ok(canonical)) => {
            println!("{}", canonical);
            true
        }
        (OutputFormat::Text, Err(err)) => {
            eprintln!("error: {}", err);
            false
        }
        (OutputFormat::Json, Ok(canonical)) => {
            println!(
                "{}",
                serde_json::json!({ "input": input, "canonical": canonical })
            );
            true
        }
        (OutputFormat::Json, Err(err)) => {
            println!(
                "{}",
                serde_json::json!({ "input": input, "error": err.to_string() })
            );
            false
        }
    }
}
