//! Interactive line shell.
//!
//! Reads one gesture per line, forwards it to the controller and renders the
//! resulting view. Prompts go to stderr so stdout carries only renders.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};
use uploadhub_core::files::UploadFile;
use uploadhub_core::status::StatusMessage;
use uploadhub_core::sync::SyncController;

use crate::input::LineSource;
use crate::render::Renderer;

const HELP: &str = "\
commands:
  ls | refresh      reload the listing
  put <path>        upload a local file
  rm <name>         delete a file (asks first)
  get <name>        download a listed file into the current directory
  help              show this help
  quit | exit       leave the shell
";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Refresh,
    Upload(Option<String>),
    Delete(Option<String>),
    Download(Option<String>),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Split a line into command and argument. The argument is the rest of the
/// line, so names and paths may contain spaces.
pub fn parse_gesture(line: &str) -> Gesture {
    let line = line.trim();
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, Some(rest.trim().to_string())),
        None => (line, None),
    };
    let arg = arg.filter(|a| !a.is_empty());

    match command {
        "" => Gesture::Empty,
        "ls" | "refresh" => Gesture::Refresh,
        "put" | "upload" => Gesture::Upload(arg),
        "rm" | "delete" => Gesture::Delete(arg),
        "get" | "download" => Gesture::Download(arg),
        "help" | "?" => Gesture::Help,
        "quit" | "exit" => Gesture::Quit,
        other => Gesture::Unknown(other.to_string()),
    }
}

/// Read a local file for upload, reporting a failure on the status line.
pub async fn read_upload(controller: &SyncController, path: &str) -> Option<UploadFile> {
    match UploadFile::from_path(path).await {
        Ok(file) => Some(file),
        Err(e) => {
            controller.report(StatusMessage::error(format!("Cannot read {path}: {e}")));
            None
        }
    }
}

/// Local file a download of `name` lands in when no destination is given:
/// its final path component in the current directory.
pub fn download_target(name: &str) -> Option<PathBuf> {
    Path::new(name).file_name().map(PathBuf::from)
}

/// Download `name` and write it to `dest`, reporting a write failure.
pub async fn save_download(controller: &SyncController, name: &str, dest: &Path) {
    let Some(bytes) = controller.download(name).await else {
        return;
    };
    if let Err(e) = tokio::fs::write(dest, &bytes).await {
        controller.report(StatusMessage::error(format!(
            "Cannot write {}: {e}",
            dest.display()
        )));
    }
}

/// Run the shell until `quit` or EOF.
///
/// The initial listing is fetched before the first prompt.
pub async fn run_shell<W: AsyncWrite + Unpin>(
    controller: Arc<SyncController>,
    lines: LineSource,
    renderer: Renderer,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut view = controller.subscribe();

    controller.refresh().await;
    let rendered = renderer.render(&view.borrow_and_update());
    write_out(out, &rendered).await?;

    info!("Shell started, waiting for input");

    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await else {
            info!("Stdin closed, leaving shell");
            break;
        };

        let gesture = parse_gesture(&line);
        debug!("Gesture: {gesture:?}");
        match gesture {
            Gesture::Empty => continue,
            Gesture::Quit => break,
            Gesture::Help => {
                write_out(out, HELP).await?;
                continue;
            }
            Gesture::Refresh => controller.refresh().await,
            Gesture::Upload(None) => {
                controller.report(StatusMessage::error("Select a file first"));
            }
            Gesture::Upload(Some(path)) => {
                if let Some(file) = read_upload(&controller, &path).await {
                    controller.upload(file).await;
                }
            }
            Gesture::Delete(None) | Gesture::Download(None) => {
                controller.report(StatusMessage::error("Name a file first"));
            }
            Gesture::Delete(Some(name)) => controller.delete(&name).await,
            Gesture::Download(Some(name)) => match download_target(&name) {
                Some(dest) => save_download(&controller, &name, &dest).await,
                None => controller.report(StatusMessage::error(format!(
                    "Cannot save {name:?} as a local file"
                ))),
            },
            Gesture::Unknown(command) => {
                write_out(out, &format!("unknown command: {command} (try 'help')\n")).await?;
                continue;
            }
        }

        let rendered = renderer.render(&view.borrow_and_update());
        write_out(out, &rendered).await?;
    }

    Ok(())
}

async fn write_out<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> anyhow::Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}
