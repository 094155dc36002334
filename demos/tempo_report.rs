//! Example: Turn a tempo annotation into a MIREX style report
//!
//! Usage:
//!   cargo run --example tempo_report -- [--mirex] [--max-len N] <tempo_file> [output_file]
//!
//! Without an output file the report is printed to stdout.

use std::env;
use std::io;

use stratum_annotations::{load_tempo, write_tempo, TempoOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let mut mirex = false;
    let mut max_len: Option<usize> = None;
    let mut paths: Vec<String> = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mirex" => mirex = true,
            "--max-len" => {
                let value = args.next().ok_or("--max-len needs a value")?;
                max_len = Some(value.parse()?);
            }
            _ => paths.push(arg),
        }
    }

    let input = paths.first().ok_or("usage: tempo_report [--mirex] [--max-len N] <tempo_file> [output_file]")?;
    let options = TempoOptions {
        sort: true,
        max_len,
        ..TempoOptions::default()
    };
    let tempi = load_tempo(input.as_str(), &options)?;
    log::info!("Loaded {} tempi from {}", tempi.len(), input);

    let report = match paths.get(1) {
        Some(output) => write_tempo(&tempi, output.as_str(), mirex)?,
        None => {
            let mut stdout = io::stdout();
            write_tempo(&tempi, &mut stdout, mirex)?
        }
    };
    log::info!(
        "Reported {:.2} and {:.2} BPM (strength {:.2})",
        report.tempo_1,
        report.tempo_2,
        report.strength
    );

    Ok(())
}
