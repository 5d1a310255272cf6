mod appcast;
mod args;
mod pretty;

use anyhow::Context;
use args::Args;
use clap::Parser;
use std::fs;
use std::process::ExitCode;

const STDOUT_PATH: &str = "-";

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    // Validate before building so nothing is written for an unusable release.
    let release = args.release()?;
    let appcast = appcast::build(&release, chrono::Utc::now())?;

    if args.output == STDOUT_PATH {
        println!("{}", appcast);
    } else {
        fs::write(&args.output, appcast)
            .with_context(|| format!("Cannot write appcast file '{}'.", args.output))?;
        println!("Appcast written to: {}", args.output);
    }
    Ok(())
}
