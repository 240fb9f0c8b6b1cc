//! Compares a `pisim` transcript with a reference expansion of pi.
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use pisim::core::transcript::{compare_transcript, load_reference};

/// Check transcript lines against known digits of pi.
#[derive(Parser, Debug)]
#[command(name = "digit_check", version, about = "Compare a pisim transcript with reference digits of pi")]
struct Cli {
    /// File whose last line holds pi as `3.14159...`
    #[arg(long, default_value = "pi.txt")]
    reference: PathBuf,

    /// Standard output captured from `pisim`
    #[arg(long, default_value = "transcript.txt")]
    transcript: PathBuf,
}

fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let digits = load_reference(&cli.reference)?;
    let file = File::open(&cli.transcript)
        .map_err(|e| format!("failed to open {}: {}", cli.transcript.display(), e))?;
    let report = compare_transcript(&digits, BufReader::new(file))?;

    for mismatch in &report.mismatches {
        println!("Difference at line {}", mismatch.line);
        println!("    Transcript digits = {}", mismatch.transcript);
        println!("    Real digits = {}", mismatch.reference);
    }
    if report.passed() {
        println!("Test passed.");
    } else {
        println!("Test failed.");
    }
    Ok(report.passed())
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}
