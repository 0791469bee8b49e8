//! animedl: unofficial AnimeWorld downloader with VVVVID fallback.
//!
//! The outer loop runs one title per iteration and reacts to each error
//! according to its kind: fatal errors end the process, per-title errors
//! return to a fresh search, an interrupted prompt exits quietly.

use std::path::PathBuf;
use std::process::ExitCode;

use animedl_core::{
    AnimeDlError, CommandRunner, Console, ErrorKind, HttpTransfer, Session, TitleOutcome,
};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

mod config;
mod logging;
mod terminal;

use logging::LogSystem;
use terminal::Terminal;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const BANNER: &str =
    "### Anime Downloader NON ufficiale, visita animeworld.tv e vvvvid.it ###\n";

#[derive(Debug, Parser)]
#[command(name = "animedl", version)]
#[command(about = "Unofficial AnimeWorld downloader with VVVVID fallback")]
struct Cli {
    /// Enable debug log output on the console
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Path of the config file (default: ./config.yml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the download directory from the config file
    #[arg(long)]
    download_dir: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    logs_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let _log = LogSystem::init(cli.debug, &cli.logs_dir).context("initializing logging")?;

    // An interrupt while waiting on a prompt ends the process without further output
    ctrlc::set_handler(|| {
        println!();
        std::process::exit(130);
    })
    .context("installing Ctrl-C handler")?;

    let mut settings =
        config::load_or_create(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = cli.download_dir {
        settings.download_dir = dir;
    }
    info!(version = VERSION, site = %settings.site_url, "starting");

    let transfer = HttpTransfer::new(&settings.client)?;
    let runner = CommandRunner::new(settings.fallback.runner_command.clone());
    let session = Session::new(settings, transfer, runner)?;

    let mut console = Terminal;
    console.say(BANNER);

    loop {
        match session.run_once(&mut console).await {
            Ok(TitleOutcome::Downloaded(report)) => {
                info!(
                    attempted = report.outcomes.len(),
                    succeeded = report.succeeded_count(),
                    "title finished"
                );
            }
            Ok(TitleOutcome::DelegatedToFallback(id)) => {
                info!(id = %id, "title delegated to fallback downloader");
            }
            Err(err) => match err.kind() {
                ErrorKind::Interrupted => return Ok(ExitCode::SUCCESS),
                ErrorKind::SkipTitle | ErrorKind::SkipEpisode | ErrorKind::Reprompt => {
                    console.say(&err.to_string());
                }
                ErrorKind::Fatal => {
                    error!(error = %err, "fatal error");
                    console.say(&fatal_message(&err));
                    return Ok(ExitCode::FAILURE);
                }
            },
        }
    }
}

fn fatal_message(err: &AnimeDlError) -> String {
    match err {
        AnimeDlError::Transport(_) => {
            "### Errore di connessione, verifica la tua connessione ad internet. ###".to_string()
        }
        AnimeDlError::Protocol { .. } => {
            "### Si e' verificato un errore durante la richiesta al server. Riprova. ###"
                .to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use animedl_core::error::StatusCode;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["animedl"]);
        assert!(!cli.debug);
        assert_eq!(cli.config, None);
        assert_eq!(cli.logs_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "animedl",
            "--debug",
            "--config",
            "/etc/animedl.yml",
            "--download-dir",
            "/srv/anime",
        ]);
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/animedl.yml")));
        assert_eq!(cli.download_dir, Some(PathBuf::from("/srv/anime")));
    }

    #[test]
    fn test_fatal_messages() {
        let protocol = AnimeDlError::Protocol {
            status: StatusCode::BAD_GATEWAY,
            url: "https://www.animeworld.tv/".to_string(),
        };
        assert!(fatal_message(&protocol).contains("richiesta al server"));

        let parse = AnimeDlError::ParseError("bad".to_string());
        assert_eq!(fatal_message(&parse), parse.to_string());
    }
}
