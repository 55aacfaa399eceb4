use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use seasonlang::RunOptions;
use tracing_subscriber::EnvFilter;

/// seasonlang runs programs written in a small imperative teaching language
/// with integers, booleans, seasons and pairs.
#[derive(Parser, Debug)]
#[command(version = seasonlang::VERSION, about, long_about = None)]
struct Args {
    /// Read the program from this file instead of standard input.
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Write program output to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Skip the static type check; type errors then surface at run time.
    #[arg(long = "ntc", visible_alias = "no-type-check")]
    no_type_check: bool,

    /// Print the parsed program as JSON instead of running it.
    #[arg(long)]
    dump_ast: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Interpreter errors already carry their stage prefix
            match err.downcast_ref::<seasonlang::Error>() {
                Some(e) => eprintln!("{e}"),
                None => eprintln!("I/O error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> anyhow::Result<()> {
    let input = open_input(args.input.as_deref())?;
    let mut output = open_output(args.output.as_deref())?;

    if args.dump_ast {
        let program = seasonlang::parse_program(input)?;
        serde_json::to_writer_pretty(&mut output, &program).context("cannot write AST")?;
        writeln!(output)?;
    } else {
        let options = RunOptions {
            type_check: !args.no_type_check,
        };
        seasonlang::run(input, &mut output, &options)?;
    }

    output.flush().context("cannot flush output")?;
    Ok(())
}

/// Standard input unless a path is given
fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open input file {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Standard output unless a path is given
fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
