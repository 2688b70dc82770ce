use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use rexplorer::cli::Cli;
use rexplorer::fs::RealFileSystem;
use rexplorer::logging::init_logging;
use rexplorer::repl::{self, Session};
use rexplorer::style::Palette;
use tokio::io::BufReader;
use tracing::error;

/// Where to try starting, in order: the requested directory, the process
/// directory, then `/`.
fn start_candidates(requested: Option<PathBuf>) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = requested.into_iter().collect();
    match std::env::current_dir() {
        Ok(cwd) => candidates.push(cwd),
        Err(err) => println!("rexplorer: cannot determine current directory: {err}"),
    }
    candidates.push(PathBuf::from("/"));
    candidates
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let color = !cli.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();
    let palette = Palette::new(color);
    let home = std::env::var_os("HOME").map(PathBuf::from);

    let candidates = start_candidates(cli.path);
    let (session, skipped) = Session::open_first(RealFileSystem, &candidates, home).await;
    for (start, err) in &skipped {
        println!("rexplorer: cannot start in {}: {err}", start.display());
    }
    let Some(mut session) = session else {
        eprintln!("rexplorer: no usable start directory");
        return ExitCode::SUCCESS;
    };

    let mut reader = BufReader::new(tokio::io::stdin());
    let mut writer = std::io::stdout().lock();

    if let Err(err) = repl::run(&mut session, &mut reader, &mut writer, &palette).await {
        error!("{err:#}");
    }

    ExitCode::SUCCESS
}
