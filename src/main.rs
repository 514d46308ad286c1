mod cli;
mod config;
mod doctor;
mod error;
mod models;
mod search;
mod view;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use cli::{Cli, Command, ShowCommand};
use config::Config;
use search::EsClient;
use view::fmt::{ceprintln, use_color, Stream, BOLD, RED, RESET, YELLOW};

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = match std::env::var("E2E_RESULT_LOG") {
        Ok(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|e| {
            ceprintln!(
                "{YELLOW}warning:{RESET} ignoring E2E_RESULT_LOG={directive:?} ({e}), using {default}"
            );
            EnvFilter::new(default)
        }),
        Err(_) => EnvFilter::new(default),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(use_color(Stream::Stderr))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    if cli.no_color {
        view::fmt::disable_color();
    }
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        ceprintln!("{RED}{BOLD}error:{RESET} {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = Config::from_args(&cli.connection)?;

    match cli.command {
        Command::Doctor => doctor::run(&cfg).await,
        Command::Show(show) => {
            let client = EsClient::connect(&cfg).await?;
            match show.command {
                ShowCommand::Results(args) => view::results(&client, &cfg, &args).await,
                ShowCommand::Runs(args) => view::runs(&client, &cfg, &args).await,
                ShowCommand::Reports(args) => view::reports(&client, &cfg, &args).await,
                ShowCommand::Usage(args) => view::usage(&client, &cfg, &args).await,
            }
        }
    }
}
