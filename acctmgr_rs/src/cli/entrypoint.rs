//! Binary entry point: option parsing, logging, config and session setup.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use super::dispatch::dispatch_command;
use super::interactive::run_interactive;
use super::parser::parse_command;
use crate::colors::Painter;
use crate::config::AcctmgrConfig;
use crate::confirm::{Confirm, Immediate, StdinConfirm};
use crate::report::ReportOptions;
use crate::session::Session;
use crate::store::JsonFileStore;
use crate::types::{ColorMode, OutputMode};

#[derive(Parser, Debug)]
#[command(name = "acctmgr")]
#[command(about = "Administer cluster records of a resource accounting store")]
#[command(version)]
pub struct Cli {
    /// JSON store document (default: .acctmgr/store.json)
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Config file (default: .acctmgr/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Actor recorded on store calls (default: $USER)
    #[arg(long, value_name = "NAME")]
    pub actor: Option<String>,

    /// Commit changes without asking for confirmation
    #[arg(short = 'i', long)]
    pub immediate: bool,

    /// Print listings as JSON
    #[arg(long, conflicts_with = "parsable")]
    pub json: bool,

    /// Print listings as '|'-terminated fields
    #[arg(short = 'p', long)]
    pub parsable: bool,

    /// Omit the header row of listings
    #[arg(short = 'n', long)]
    pub noheader: bool,

    /// Include limit columns in listings
    #[arg(short = 'l', long)]
    pub long: bool,

    /// Only log errors
    #[arg(short = 'Q', long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log store calls and mirror updates
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Color mode: auto, always, never
    #[arg(long, value_name = "WHEN", value_parser = ColorMode::parse)]
    pub color: Option<ColorMode>,

    /// `<verb> cluster [tokens...]`; omit for interactive mode
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub command: Vec<String>,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }

    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.parsable {
            OutputMode::Parsable
        } else {
            OutputMode::Human
        }
    }
}

fn init_logging(default_level: &str) {
    // stdout is reserved for command output
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .try_init();
}

type CliSession = Session<JsonFileStore, Box<dyn Confirm>, io::Stdout>;

fn open_session(cli: &Cli, config: &AcctmgrConfig, report: ReportOptions) -> Result<CliSession> {
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let store_path = cli.store.clone().unwrap_or_else(|| config.store_path(&cwd));
    let store = JsonFileStore::open(&store_path)
        .with_context(|| format!("failed to open store {}", store_path.display()))?;

    let confirm: Box<dyn Confirm> = if cli.immediate || config.immediate {
        Box::new(Immediate)
    } else {
        Box::new(StdinConfirm)
    };
    let actor = cli.actor.clone().unwrap_or_else(|| config.actor_name());
    debug!(%actor, store = %store_path.display(), "opening session");

    let session = Session::load(store, confirm, io::stdout(), actor)
        .context("failed to load clusters from store")?;
    Ok(session.with_report(report))
}

fn load_config(cli: &Cli) -> Result<AcctmgrConfig> {
    Ok(match &cli.config {
        Some(path) => AcctmgrConfig::load_from_path(path),
        None => AcctmgrConfig::load(
            &std::env::current_dir().context("failed to resolve working directory")?,
        ),
    })
}

/// Run the CLI. This is the shared main() body.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", Painter::plain().status_error(&format!("{e:#}")));
            return ExitCode::FAILURE;
        }
    };
    let painter = Painter::new(cli.color.or(config.color).unwrap_or_default());

    // Verb errors need no store
    let command = if cli.command.is_empty() {
        None
    } else {
        match parse_command(&cli.command) {
            Ok(cmd) => Some(cmd),
            Err(msg) => {
                eprintln!("{}", painter.status_error(&msg));
                return ExitCode::FAILURE;
            }
        }
    };

    let report = ReportOptions {
        painter,
        output: cli.output_mode(),
        header: !cli.noheader,
        long: cli.long,
    };
    let mut session = match open_session(&cli, &config, report) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", painter.status_error(&format!("{e:#}")));
            return ExitCode::FAILURE;
        }
    };

    let ok = match command {
        Some(cmd) => match dispatch_command(&mut session, &cmd) {
            Ok(_) => true,
            Err(e) => {
                eprintln!("{}", painter.status_error(&e.to_string()));
                false
            }
        },
        None => run_interactive(
            &mut session,
            |buf| io::stdin().read_line(buf),
            &mut io::stderr(),
            painter,
            io::stdin().is_terminal(),
        ),
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
