// Command-line entry point.
// Maps subcommands onto service requests and prints each response as JSON.

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use mutuals::engine::Failure;
use mutuals::{Config, MutualsError, MutualsService, Request, Response};

#[derive(Parser, Debug)]
#[command(name = "mutuals", version, about = "Channels followed by both you and another Twitch user")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quick preview of mutual follows (first few hundred follows only)
    Preview {
        target: String,
        /// Ignore cached follow lists
        #[arg(short, long)]
        force: bool,
    },
    /// Mutual follows over the full page budget
    Full {
        target: String,
        #[arg(short, long)]
        force: bool,
    },
    /// Drop one user's cached follow list
    Invalidate { login: String },
    /// Drop every cached follow list
    Clear,
    /// Show the stored self login
    Whoami,
    /// Set the self login
    Login { login: String },
    /// Answer newline-delimited JSON requests from stdin
    Stdio,
}

impl Command {
    fn into_request(self) -> Option<Request> {
        let request = match self {
            Command::Preview { target, force } => Request::PreviewIntersection {
                target_login: target,
                force_refresh: force,
            },
            Command::Full { target, force } => Request::FullIntersection {
                target_login: target,
                force_refresh: force,
            },
            Command::Invalidate { login } => Request::InvalidateOne { login },
            Command::Clear => Request::InvalidateAll,
            Command::Whoami => Request::GetSelfLogin,
            Command::Login { login } => Request::SetSelfLogin { login },
            Command::Stdio => return None,
        };
        Some(request)
    }
}

#[tokio::main]
async fn main() -> Result<(), MutualsError> {
    let cli = Cli::parse();
    mutuals::logging::init(cli.verbose)?;

    let config = Config::from_env()?;
    debug!(?config, "Loaded configuration");
    let service = MutualsService::from_config(&config).await?;

    match cli.command.into_request() {
        Some(request) => {
            let response = service.handle(request).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
            if !response.is_success() {
                std::process::exit(1);
            }
        }
        None => serve_stdio(&service).await?,
    }

    Ok(())
}

/// Read one JSON request per line and write one JSON response per line.
async fn serve_stdio(service: &MutualsService) -> Result<(), MutualsError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => service.handle(request).await,
            Err(e) => Response::Failure(Failure::from(&MutualsError::InvalidRequest(e.to_string()))),
        };

        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        stdout.write_all(&out).await?;
        stdout.flush().await?;
    }

    Ok(())
}
