use clap::Parser;
use hashline_tools::cli::{Cli, Command};
use hashline_tools::commands;
use hashline_tools::error::EngineError;
use std::io::Read;

fn run() -> Result<String, EngineError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Read { path, offset, limit } => commands::read::run(&path, offset, limit),
        Command::Edit {
            path,
            edits,
            edits_stdin,
        } => {
            let batch_json = match (edits, edits_stdin) {
                (Some(json), false) => json,
                (None, true) => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .map_err(EngineError::from)?;
                    buf
                }
                (Some(_), true) => {
                    return Err(EngineError::InvalidEditShape(
                        "pass either --edits or --edits-stdin, not both".to_string(),
                    ));
                }
                (None, false) => {
                    return Err(EngineError::InvalidEditShape(
                        "one of --edits or --edits-stdin is required".to_string(),
                    ));
                }
            };
            commands::edit::run(&path, &batch_json)
        }
    }
}

fn main() {
    match run() {
        Ok(output) => {
            print!("{output}");
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}
