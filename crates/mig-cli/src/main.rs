//! `storage-migrate` binary

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use mig_cli::{load_config, migrate, MigrateOptions};
use mig_types::Address;
use mig_values::PathDomain;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("storage-migrate")
        .version(mig_cli::VERSION)
        .about("Rewrite legacy static types stored in account storage")
        .subcommand_required(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("migrate")
                .about("Migrate a JSON storage snapshot")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Snapshot to migrate"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Where to write the migrated snapshot"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML run configuration"),
                )
                .arg(
                    Arg::new("address")
                        .long("address")
                        .action(ArgAction::Append)
                        .value_parser(value_parser!(Address))
                        .help("Account to migrate (repeatable, default: all)"),
                )
                .arg(
                    Arg::new("domain")
                        .long("domain")
                        .action(ArgAction::Append)
                        .value_parser(value_parser!(PathDomain))
                        .help("Storage domain to migrate (repeatable, overrides config)"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Commit without persisting"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the summary as JSON"),
                ),
        )
        .subcommand(Command::new("config").about("Print the default configuration as TOML"))
}

fn init_tracing(default_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run_migrate(args: &ArgMatches, log_json: bool) -> Result<ExitCode> {
    let mut config = load_config(args.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if let Some(domains) = args.get_many::<PathDomain>("domain") {
        config = config.with_domains(domains.copied());
    }
    if args.get_flag("dry-run") {
        config = config.with_persist(false);
    }
    init_tracing(&config.log_level, log_json);

    let input = args
        .get_one::<PathBuf>("input")
        .context("missing input snapshot")?;
    let mut options = MigrateOptions::new(input).with_config(config);
    if let Some(output) = args.get_one::<PathBuf>("output") {
        options = options.with_output(output);
    }
    if let Some(addresses) = args.get_many::<Address>("address") {
        options = options.with_addresses(addresses.copied());
    }

    let outcome = migrate(&options)?;

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&outcome.to_json())?);
    } else {
        println!("Storage Migration Summary");
        println!("  Accounts: {}", outcome.summary.accounts);
        println!("  Values:   {}", outcome.summary.values);
        println!("  Migrated: {}", outcome.summary.migrated);
        println!("  Errors:   {}", outcome.summary.errors);
    }

    Ok(ExitCode::SUCCESS)
}

fn run() -> Result<ExitCode> {
    let matches = cli().get_matches();
    let log_json = matches.get_flag("log-json");

    match matches.subcommand() {
        Some(("migrate", args)) => run_migrate(args, log_json),
        Some(("config", _)) => {
            let text = toml::to_string_pretty(&mig_core::MigrationConfig::default())
                .context("serializing default config")?;
            print!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
