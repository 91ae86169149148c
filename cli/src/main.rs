mod confirm;
mod input;
mod render;
mod shell;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::AsyncWriteExt;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uploadhub_core::config::ClientConfig;
use uploadhub_core::files::HttpFileStore;
use uploadhub_core::status::StatusMessage;
use uploadhub_core::sync::{AutoConfirm, Confirm, ListingView, SyncController, ViewState};

use crate::confirm::TerminalConfirm;
use crate::input::LineSource;
use crate::render::Renderer;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(
    name = "uploadhub",
    version,
    about = "List, upload and delete files on a remote file store"
)]
struct Cli {
    /// JSON config file (default: <config dir>/uploadhub/config.json if present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Store address, e.g. http://127.0.0.1:8080 (overrides config and UPLOADHUB_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Listing/upload endpoint path (overrides config)
    #[arg(long, global = true)]
    uploads_path: Option<String>,

    /// Render the view as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the current listing
    List,
    /// Upload a local file
    Upload { path: PathBuf },
    /// Delete a file by name
    Delete {
        name: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Download a listed file
    Get {
        name: String,
        /// Destination path (default: the file name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Interactive shell reading commands from stdin
    Shell {
        /// Do not ask for confirmation before deleting
        #[arg(short, long)]
        yes: bool,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::load_or_default(cli.config.as_deref())?
        .expand()
        .with_env_overrides();
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(path) = &cli.uploads_path {
        config.uploads_path = path.clone();
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so rendered output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli).context("Invalid configuration")?;
    info!("uploadhub {} using store at {}", VERSION, config.base_url);

    let renderer = if cli.json {
        Renderer::Json
    } else {
        Renderer::Text
    };
    let lines = LineSource::stdin();
    let assume_yes = config.assume_yes
        || matches!(
            cli.command,
            Command::Delete { yes: true, .. } | Command::Shell { yes: true }
        );
    let confirm: Arc<dyn Confirm> = if assume_yes {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(TerminalConfirm::new(lines.clone()))
    };
    let store = Arc::new(HttpFileStore::new(&config)?);
    let controller = Arc::new(SyncController::new(store, confirm));

    if let Command::Shell { .. } = cli.command {
        let mut stdout = tokio::io::stdout();
        shell::run_shell(controller, lines, renderer, &mut stdout).await?;
        return Ok(ExitCode::SUCCESS);
    }

    // One-shot commands load the listing first, like opening the page.
    controller.refresh().await;

    match cli.command {
        Command::List | Command::Shell { .. } => {}
        Command::Upload { path } => {
            let path = path.to_string_lossy().to_string();
            if let Some(file) = shell::read_upload(&controller, &path).await {
                controller.upload(file).await;
            }
        }
        Command::Delete { name, .. } => controller.delete(&name).await,
        Command::Get { name, output } => {
            match output.or_else(|| shell::download_target(&name)) {
                Some(dest) => shell::save_download(&controller, &name, &dest).await,
                None => controller.report(StatusMessage::error(format!(
                    "Cannot save {name:?} as a local file"
                ))),
            }
        }
    }

    let state = controller.snapshot();
    let mut stdout = tokio::io::stdout();
    stdout.write_all(renderer.render(&state).as_bytes()).await?;
    stdout.flush().await?;

    Ok(exit_code(&state))
}

/// Whether a one-shot command ended badly: an error status or a listing
/// that could not be fetched.
fn failed(state: &ViewState) -> bool {
    state.status.is_error() || state.listing == ListingView::Unavailable
}

fn exit_code(state: &ViewState) -> ExitCode {
    if failed(state) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
