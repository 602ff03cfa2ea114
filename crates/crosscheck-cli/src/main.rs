use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{eyre, WrapErr};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crosscheck_core::{Config, Credential, QueryOrchestrator};

mod terminal;

use terminal::{OutputFormat, TerminalSink};

#[derive(Parser)]
#[command(name = "crosscheck")]
#[command(about = "Ask web search, three LLMs and fact-checkers the same question", long_about = None)]
struct Cli {
    /// Config file (defaults to ./crosscheck.toml, then ~/.config/crosscheck/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask every source one question
    Ask {
        /// The question
        #[arg(required = true)]
        query: Vec<String>,

        /// Print panels as HTML fragments
        #[arg(long)]
        html: bool,
    },
    /// Report which credentials are configured
    Check,
    /// Print a config file template
    Config,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Ask { query, html } => {
            let config = load_config(cli.config)?;
            let orchestrator = QueryOrchestrator::from_config(&config);

            let format = if html { OutputFormat::Html } else { OutputFormat::Text };
            let mut sink = TerminalSink::new(format);

            let input = query.join(" ");
            if !orchestrator.submit(&input, &mut sink).await {
                return Err(eyre!("query is empty"));
            }
        }
        Commands::Check => {
            let config = load_config(cli.config)?;
            let report = config.check_credentials();
            for credential in Credential::ALL {
                let state = if report.is_missing(credential) { "missing" } else { "ok" };
                println!(
                    "{:<20} {:<8} ({} / ${})",
                    credential.label(),
                    state,
                    credential.config_key(),
                    credential.env_var()
                );
            }
            if !report.is_complete() {
                println!(
                    "\n{} of {} credentials missing; those sources will report an error.",
                    report.missing.len(),
                    Credential::ALL.len()
                );
            }
        }
        Commands::Config => {
            print!("{}", Config::default_config_string());
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> color_eyre::Result<Config> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config file");
            Config::from_file(&path)
                .wrap_err_with(|| format!("failed to load {}", path.display()))
        }
        None => Config::load().wrap_err("failed to load configuration"),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "crosscheck_core=debug,crosscheck=debug,warn",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
