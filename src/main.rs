//! runtime-config: check that the environment provides the keys a process needs.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use runtime_config::config::report::{sorted, write_lines};
use runtime_config::config::{ConfigStore, Manifest};
use runtime_config::logging::init_tracing;

#[derive(Parser)]
#[command(name = "runtime-config")]
#[command(version, about = "Check required configuration keys against the environment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Manifest listing keys and ignored keys (TOML)
    ///
    /// Defaults to ~/.config/runtime-config/keys.toml when that file exists.
    #[arg(short, long, global = true)]
    manifest: Option<PathBuf>,

    /// Expected key (repeatable)
    #[arg(short, long = "key", global = true)]
    keys: Vec<String>,

    /// Key exempt from completeness checks (repeatable)
    #[arg(short, long = "ignore", global = true)]
    ignore: Vec<String>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Exit non-zero if any non-ignored key is unset
    Check,
    /// Print every key with its value or "(not set)"
    Status,
    /// Print keys that are unset and not ignored
    Missing,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut manifest = match cli.manifest {
        Some(path) => Manifest::load_from(&path)?,
        None => {
            let path = Manifest::default_path();
            if path.exists() {
                Manifest::load_from(&path)?
            } else {
                Manifest::default()
            }
        }
    };
    manifest.extend(cli.keys, cli.ignore);
    manifest.validate()?;

    let store = ConfigStore::from_manifest(&manifest);
    store.load_from_environment();

    let stdout = io::stdout();
    match cli.command {
        Commands::Status => {
            let statuses = sorted(store.all_keys_status());
            if cli.json {
                print_json(&statuses)?;
            } else {
                write_lines(stdout.lock(), &statuses)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Missing => {
            let mut missing = store.missing_keys();
            missing.sort();
            if cli.json {
                print_json(&missing)?;
            } else {
                let mut out = stdout.lock();
                for key in &missing {
                    writeln!(out, "{}: (not set)", key)?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check => match store.require_complete() {
            Ok(()) => {
                if cli.json {
                    print_json(&serde_json::json!({ "complete": true, "missing": [] }))?;
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(runtime_config::ConfigError::Incomplete { missing }) => {
                if cli.json {
                    print_json(&serde_json::json!({ "complete": false, "missing": missing }))?;
                } else {
                    let mut err = io::stderr().lock();
                    for key in &missing {
                        writeln!(err, "{}: (not set)", key)?;
                    }
                }
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e.into()),
        },
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
