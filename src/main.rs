//! y86asm – Y86 assembler producing an address/hex object listing (CLI)

use std::{fs, fs::File, io, io::BufWriter, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use y86asm::{Options, assemble, listing};

#[derive(Parser, Debug)]
#[command(author, version, about = "Y86 Assembler")]
struct Cli {
    /// Input assembly source
    input: PathBuf,

    /// Output listing file
    #[arg(short, long, default_value = "output.yo")]
    output: PathBuf,

    /// Fail on lines that are neither a directive nor an instruction
    #[arg(long)]
    strict: bool,

    /// Fail when two records occupy the same bytes
    #[arg(long)]
    check_overlap: bool,

    /// One of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
    #[arg(short, long, default_value_t = Level::INFO)]
    log_level: Level,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let src = fs::read_to_string(&cli.input)
        .with_context(|| format!("cannot read {}", cli.input.display()))?;
    tracing::info!("assembling {}", cli.input.display());

    let opts = Options { strict: cli.strict, check_overlap: cli.check_overlap };
    // nothing is written unless both passes succeed
    let lines = assemble(src.lines(), &opts)?;

    let file = File::create(&cli.output)
        .with_context(|| format!("cannot create {}", cli.output.display()))?;
    listing::write_listing(BufWriter::new(file), &lines)?;
    tracing::info!("wrote {} records to {}", lines.len(), cli.output.display());
    Ok(())
}
