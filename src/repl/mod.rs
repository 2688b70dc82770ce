mod command;
mod session;

pub use command::{Command, Selection, parse_selection};
pub use session::{Report, Session};

use anyhow::Context;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::core::ops::{MoveOutcome, Removed};
use crate::core::render::{write_listing, write_menu};
use crate::errors::Error;
use crate::fs::FileSystem;
use crate::style::{Color, Palette};

impl Command {
    fn prompts(self) -> &'static [&'static str] {
        match self {
            Command::ChangeDir => &["Enter directory: "],
            Command::CreateFile => &["Enter filename: "],
            Command::Delete => &["Enter path to delete: "],
            Command::Copy | Command::Move => &["Enter source path: ", "Enter destination path: "],
            Command::Search => &["Enter search root: ", "Enter pattern: "],
            Command::Chmod => &["Enter path: ", "Enter mode (e.g. 755): "],
            Command::DetailedList => &["Enter directory (empty for current): "],
            Command::List | Command::ShowCwd | Command::Exit => &[],
        }
    }

    fn failure_label(self) -> &'static str {
        match self {
            Command::List | Command::DetailedList => "Failed to open directory",
            Command::ChangeDir => "chdir failed",
            Command::CreateFile => "Failed to create file",
            Command::Delete => "Failed to remove",
            Command::Copy => "Copy failed",
            Command::Move => "Move failed",
            Command::Search => "Search error",
            Command::Chmod => "chmod failed",
            Command::ShowCwd | Command::Exit => "Failed",
        }
    }
}

/// One line of user input.
enum Input {
    Line(String),
    /// The line was not valid UTF-8.
    Garbled,
    End,
}

/// Read one line, dropping its terminator.
async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> anyhow::Result<Input> {
    let mut bytes = Vec::new();
    let read = reader
        .read_until(b'\n', &mut bytes)
        .await
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(Input::End);
    }
    while matches!(bytes.last(), Some(b'\n' | b'\r')) {
        bytes.pop();
    }
    Ok(match String::from_utf8(bytes) {
        Ok(line) => Input::Line(line),
        Err(err) => {
            debug!(error = %err, "discarding input that is not UTF-8");
            Input::Garbled
        }
    })
}

/// Drive the menu loop until `0` or end of input.
pub async fn run<F, R, W>(
    session: &mut Session<F>,
    reader: &mut R,
    writer: &mut W,
    palette: &Palette,
) -> anyhow::Result<()>
where
    F: FileSystem,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(writer, "{}", palette.heading("Simple File Explorer"))?;
    writeln!(
        writer,
        "{}",
        palette.paint(
            Color::Cyan,
            &format!("Working directory: {}", session.cwd().display())
        )
    )?;
    write_menu(writer, palette)?;

    loop {
        let prompt = format!("[{}]> ", session.cwd().display());
        write!(writer, "\n{}", palette.paint(Color::Green, &palette.bold(&prompt)))?;
        writer.flush().context("failed to flush stdout")?;

        let selection = match read_line(reader).await? {
            Input::Line(line) => parse_selection(&line),
            Input::Garbled => Selection::Invalid,
            Input::End => {
                writeln!(writer)?;
                break;
            }
        };

        let command = match selection {
            Selection::Command(Command::Exit) => break,
            Selection::Command(command) => command,
            Selection::Unknown(selector) => {
                debug!(selector, "unknown selector");
                write_menu(writer, palette)?;
                continue;
            }
            Selection::Invalid => {
                writeln!(writer, "{}", palette.failure("Invalid input"))?;
                continue;
            }
        };

        let mut args = Vec::new();
        let mut garbled = false;
        for label in command.prompts() {
            write!(writer, "{label}")?;
            writer.flush().context("failed to flush stdout")?;
            match read_line(reader).await? {
                Input::Line(line) => args.push(line),
                Input::Garbled => garbled = true,
                Input::End => args.push(String::new()),
            }
        }
        if garbled {
            warn!(?command, "argument is not valid UTF-8");
            writeln!(
                writer,
                "{}",
                palette.failure("Invalid input: not valid UTF-8")
            )?;
            continue;
        }

        debug!(?command, "dispatching");
        match session.perform(command, &args).await {
            Ok(report) => write_report(writer, palette, &report)?,
            Err(err) => {
                warn!(?command, kind = ?err.kind(), error = %err, "command failed");
                let message = format!("{}: {err}", command.failure_label());
                writeln!(writer, "{}", palette.failure(&message))?;
            }
        }
    }

    writeln!(writer, "{}", palette.paint(Color::Yellow, "Exiting. Bye!"))?;
    writer.flush().context("failed to flush stdout")?;
    Ok(())
}

fn write_report<W: Write>(
    writer: &mut W,
    palette: &Palette,
    report: &Report,
) -> std::io::Result<()> {
    match report {
        Report::Listing(listing) => write_listing(writer, listing, palette),
        Report::ChangedDir(cwd) => writeln!(
            writer,
            "{}",
            palette.success(&format!("Changed to: {}", cwd.display()))
        ),
        Report::Created(target) => {
            writeln!(writer, "{}", palette.success(&format!("Created: {target}")))
        }
        Report::Deleted { target, removed } => {
            let what = match removed {
                Removed::File => "file",
                Removed::Directory => "directory",
            };
            writeln!(
                writer,
                "{}",
                palette.success(&format!("Deleted {what}: {target}"))
            )
        }
        Report::Copied { dst } => {
            writeln!(writer, "{}", palette.success(&format!("Copied to: {dst}")))
        }
        Report::Moved { dst, outcome } => {
            if let MoveOutcome::Copied { rename_error } = outcome {
                let message =
                    format!("Rename failed: {rename_error}; copied and removed source instead");
                writeln!(writer, "{}", palette.paint(Color::Yellow, &message))?;
            }
            writeln!(writer, "{}", palette.success(&format!("Moved to: {dst}")))
        }
        Report::Searched {
            root,
            pattern,
            report,
        } => {
            let banner = format!("Searching for \"{pattern}\" under {} ...", root.display());
            writeln!(writer, "{}", palette.paint(Color::Cyan, &banner))?;
            for path in &report.matches {
                writeln!(
                    writer,
                    "{}",
                    palette.paint(Color::Green, &path.display().to_string())
                )?;
            }
            if let Some(err) = &report.error {
                write_search_error(writer, palette, err)?;
            }
            Ok(())
        }
        Report::PermissionsChanged { target, mode } => writeln!(
            writer,
            "{}",
            palette.success(&format!("Permissions changed for {target} ({mode:03o})"))
        ),
        Report::Cwd(cwd) => writeln!(
            writer,
            "{}",
            palette.paint(Color::Cyan, &format!("Current directory: {}", cwd.display()))
        ),
    }
}

fn write_search_error<W: Write>(
    writer: &mut W,
    palette: &Palette,
    err: &Error,
) -> std::io::Result<()> {
    warn!(kind = ?err.kind(), error = %err, "search aborted");
    writeln!(
        writer,
        "{}",
        palette.failure(&format!("{}: {err}", Command::Search.failure_label()))
    )
}
