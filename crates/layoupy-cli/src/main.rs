//! `layoupy` command-line tool
//!
//! - `inspect`: print a snapshot's outline with section visibility
//! - `replay`: apply an event script to a snapshot and write the result
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `info`).

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod outline;

fn cli() -> Command {
    Command::new("layoupy")
        .version(layoupy_composition::VERSION)
        .about("Inspect and replay layoupy form snapshots")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Session configuration (TOML)"),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the outline of a snapshot")
                .arg(
                    Arg::new("snapshot")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Snapshot file (JSON)"),
                )
                .arg(
                    Arg::new("answer")
                        .long("answer")
                        .action(ArgAction::Append)
                        .value_name("NAME=VALUE")
                        .help("Answer a radio by name before evaluating visibility"),
                ),
        )
        .subcommand(
            Command::new("replay")
                .about("Apply an event script to a snapshot")
                .arg(
                    Arg::new("snapshot")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Snapshot file (JSON)"),
                )
                .arg(
                    Arg::new("events")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Event script (JSON array)"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the resulting snapshot here instead of stdout"),
                ),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = cli().get_matches();
    let config = commands::load_config(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    match matches.subcommand() {
        Some(("inspect", args)) => {
            let snapshot = args
                .get_one::<PathBuf>("snapshot")
                .context("snapshot path is required")?;
            let answers: Vec<String> = args
                .get_many::<String>("answer")
                .unwrap_or_default()
                .cloned()
                .collect();
            print!("{}", commands::inspect(snapshot, &answers, config)?);
        }
        Some(("replay", args)) => {
            let snapshot = args
                .get_one::<PathBuf>("snapshot")
                .context("snapshot path is required")?;
            let events = args
                .get_one::<PathBuf>("events")
                .context("events path is required")?;
            let (report, json) = commands::replay(snapshot, events, config)?;
            eprint!("{report}");
            match args.get_one::<PathBuf>("out") {
                Some(out) => {
                    fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
                    tracing::info!("Wrote snapshot to {}", out.display());
                }
                None => println!("{json}"),
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn answers_are_repeatable() {
        let matches = cli()
            .try_get_matches_from([
                "layoupy", "inspect", "form.json", "--answer", "A=Yes", "--answer", "B=No",
            ])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let answers: Vec<_> = args.get_many::<String>("answer").unwrap().collect();
        assert_eq!(answers, ["A=Yes", "B=No"]);
    }

    #[test]
    fn global_config_after_subcommand() {
        let matches = cli()
            .try_get_matches_from(["layoupy", "replay", "a.json", "b.json", "--config", "c.toml"])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("config"),
            Some(&PathBuf::from("c.toml"))
        );
    }
}
