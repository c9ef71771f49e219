//! `tandem`: drive the reservoir engine from the command line.
//!
//! ```text
//! tandem [--config <path>] <op>...
//! ```
//!
//! Operations run in order against one engine; the final state is printed as
//! JSON on stdout.

mod command;

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use serde_json::json;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tandem_engine::{Engine, EngineSettings, TandemConfig};

use crate::command::Command;

const USAGE: &str = "\
usage: tandem [--config <path>] <op>...

operations:
  boost:<physical|intellectual|bridge>
  blow:<from>:<to>:<amount>        push transfer, 80% arrives
  suck:<from>:<to>:<amount>        pull transfer, 90% arrives
  balance                          one balancing step between the reservoirs
  decay                            drain both reservoirs by the decay rate
  record:<category>:<text>         append an entry and boost its realm
  transform:<target>:<kind>[=<v>]  target: physical|intellectual|bridge|all
                                   kind: identity|scale|offset|boost|decay|push|pull

environment:
  TANDEM_CONFIG   config file (default ~/.tandem/config.toml)
  RUST_LOG        log filter (default warn), logs go to stderr";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries the JSON result, so logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

#[derive(Debug, Default)]
struct Invocation {
    config: Option<PathBuf>,
    commands: Vec<Command>,
    help: bool,
}

fn parse_args<I>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = String>,
{
    let mut invocation = Invocation::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => invocation.help = true,
            "-c" | "--config" => {
                let Some(path) = args.next() else {
                    bail!("--config needs a path");
                };
                invocation.config = Some(PathBuf::from(path));
            }
            op => {
                let command = op
                    .parse::<Command>()
                    .with_context(|| format!("invalid operation {op:?}"))?;
                invocation.commands.push(command);
            }
        }
    }
    Ok(invocation)
}

fn load_settings(explicit: Option<&Path>) -> Result<EngineSettings> {
    let config = match explicit {
        Some(path) => Some(TandemConfig::load_from(path)?),
        None => TandemConfig::load()?,
    };
    match config {
        Some(config) => Ok(config.settings()?),
        None => Ok(EngineSettings::default()),
    }
}

fn run() -> Result<bool> {
    let invocation = parse_args(env::args().skip(1))?;
    if invocation.help || invocation.commands.is_empty() {
        println!("{USAGE}");
        return Ok(true);
    }

    let settings =
        load_settings(invocation.config.as_deref()).context("loading configuration")?;
    let engine = Engine::new(settings);

    let mut all_routed = true;
    for command in &invocation.commands {
        if let Some(result) = command.run(&engine)
            && !result.is_success()
        {
            all_routed = false;
            eprintln!("{command:?}: {}", result.message());
        }
    }

    let state = engine.state();
    let report = json!({
        "state": &*state,
        "harmony": state.harmony(),
        "total_energy": state.total_energy(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(all_routed)
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        // Some routing operations were refused; the state is still printed.
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
