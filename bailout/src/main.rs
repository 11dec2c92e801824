//! Static-generation bailout checker.
//!
//! Reads a route segment config (`route.toml`) and reports how a render of
//! that route reacts when it uses a dynamic feature.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bailout::check::{CheckRequest, run_check};
use bailout::core::types::{BailoutOptions, DynamicMode};
use bailout::exit_codes;
use bailout::io::config::{DEFAULT_CONFIG_PATH, RouteConfig, load_config, write_config};
use bailout::logging;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bailout",
    version,
    about = "Explain static-generation bailouts for a route"
)]
struct Cli {
    /// Route config path.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Debug logging to stderr (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default route config if missing.
    Init {
        /// Overwrite an existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Evaluate one use of a dynamic feature and print a JSON report.
    Check {
        /// Feature being used, e.g. `headers` or `searchParams.page`.
        #[arg(long)]
        reason: String,
        /// Documentation link to attach to raised messages.
        #[arg(long)]
        link: Option<String>,
        /// Mode to name in diagnostics.
        #[arg(long)]
        dynamic: Option<DynamicMode>,
        /// Evaluate at request time instead of during static generation.
        #[arg(long)]
        request_time: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Check {
            reason,
            link,
            dynamic,
            request_time,
        } => {
            if reason.trim().is_empty() {
                bail!("--reason must not be empty");
            }
            let opts = BailoutOptions {
                dynamic: dynamic.map(|mode| mode.as_str().to_string()),
                link,
            };
            cmd_check(
                &cli.config,
                &CheckRequest {
                    reason,
                    opts,
                    static_generation: !request_time,
                },
            )
        }
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<i32> {
    if !force && path.exists() {
        return Ok(exit_codes::OK);
    }
    write_config(path, &RouteConfig::default())?;
    Ok(exit_codes::OK)
}

fn cmd_check(path: &Path, request: &CheckRequest) -> Result<i32> {
    let cfg = load_config(path)?;
    let report = run_check(&cfg, request);
    let payload = serde_json::to_string_pretty(&report).context("serialize check report")?;
    println!("{}", payload);
    Ok(report.exit_code())
}
