use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::ops::{self, MoveOutcome, Removed};
use crate::core::{list, path, search};
use crate::errors::{Error, Result};
use crate::fs::FileSystem;
use crate::models::{Listing, SearchReport};

use super::command::Command;

/// Result of a successfully dispatched command, ready for display.
#[derive(Debug)]
pub enum Report {
    Listing(Listing),
    ChangedDir(PathBuf),
    Created(String),
    Deleted { target: String, removed: Removed },
    Copied { dst: String },
    Moved { dst: String, outcome: MoveOutcome },
    Searched {
        root: PathBuf,
        pattern: String,
        report: SearchReport,
    },
    PermissionsChanged { target: String, mode: u32 },
    Cwd(PathBuf),
}

/// Interactive state: the working directory every relative path resolves against.
pub struct Session<F> {
    fs: F,
    cwd: PathBuf,
    home: Option<PathBuf>,
}

fn required<'a>(value: &'a str, what: &'static str) -> Result<&'a str> {
    if value.is_empty() {
        Err(Error::MissingArgument(what))
    } else {
        Ok(value)
    }
}

async fn usable_dir<F: FileSystem>(fs: &F, start: &Path) -> Result<PathBuf> {
    let cwd = fs
        .canonicalize(start)
        .await
        .map_err(|err| Error::io(start, err))?;
    if !fs.is_dir(&cwd).await {
        return Err(Error::NotADirectory {
            path: start.to_path_buf(),
        });
    }
    Ok(cwd)
}

impl<F: FileSystem> Session<F> {
    /// Start a session in `start`, which must be an existing directory.
    pub async fn open(fs: F, start: &Path, home: Option<PathBuf>) -> Result<Self> {
        let cwd = usable_dir(&fs, start).await?;
        Ok(Self { fs, cwd, home })
    }

    /// Start in the first usable directory of `candidates`.
    ///
    /// Every candidate that was passed over comes back with its error, in
    /// order, whether or not a session could be opened.
    pub async fn open_first(
        fs: F,
        candidates: &[PathBuf],
        home: Option<PathBuf>,
    ) -> (Option<Self>, Vec<(PathBuf, Error)>) {
        let mut skipped = Vec::new();
        for start in candidates {
            match usable_dir(&fs, start).await {
                Ok(cwd) => return (Some(Self { fs, cwd, home }), skipped),
                Err(err) => {
                    debug!(start = %start.display(), error = %err, "start directory unusable");
                    skipped.push((start.clone(), err));
                }
            }
        }
        (None, skipped)
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn resolve(&self, input: &str) -> PathBuf {
        path::resolve(&self.cwd, input, self.home.as_deref())
    }

    /// Move the working directory. On failure it is left untouched.
    pub async fn change_dir(&mut self, target: &str) -> Result<&Path> {
        let target = required(target, "directory")?;
        let path = self.resolve(target);
        let canonical = self
            .fs
            .canonicalize(&path)
            .await
            .map_err(|err| Error::io(&path, err))?;
        if !self.fs.is_dir(&canonical).await {
            return Err(Error::NotADirectory { path });
        }
        self.cwd = canonical;
        Ok(&self.cwd)
    }

    /// Run `command` with already-collected arguments, in prompt order.
    pub async fn perform(&mut self, command: Command, args: &[String]) -> Result<Report> {
        let arg = |index: usize| args.get(index).map(String::as_str).unwrap_or("");
        debug!(?command, ?args, cwd = %self.cwd.display(), "performing");

        match command {
            Command::List => Ok(Report::Listing(list::list_dir(&self.fs, &self.cwd).await?)),
            Command::DetailedList => {
                let dir = match arg(0) {
                    "" => self.cwd.clone(),
                    dir => self.resolve(dir),
                };
                Ok(Report::Listing(list::list_dir(&self.fs, &dir).await?))
            }
            Command::ChangeDir => {
                let cwd = self.change_dir(arg(0)).await?.to_path_buf();
                Ok(Report::ChangedDir(cwd))
            }
            Command::CreateFile => {
                let target = required(arg(0), "filename")?;
                ops::create_file(&self.fs, &self.resolve(target)).await?;
                Ok(Report::Created(target.to_owned()))
            }
            Command::Delete => {
                let target = required(arg(0), "path to delete")?;
                let removed = ops::delete(&self.fs, &self.resolve(target)).await?;
                Ok(Report::Deleted {
                    target: target.to_owned(),
                    removed,
                })
            }
            Command::Copy => {
                let src = required(arg(0), "source path")?;
                let dst = required(arg(1), "destination path")?;
                ops::copy(&self.fs, &self.resolve(src), &self.resolve(dst)).await?;
                Ok(Report::Copied {
                    dst: dst.to_owned(),
                })
            }
            Command::Move => {
                let src = required(arg(0), "source path")?;
                let dst = required(arg(1), "destination path")?;
                let outcome =
                    ops::move_path(&self.fs, &self.resolve(src), &self.resolve(dst)).await?;
                Ok(Report::Moved {
                    dst: dst.to_owned(),
                    outcome,
                })
            }
            Command::Search => {
                let root = match arg(0) {
                    "" => self.cwd.clone(),
                    root => self.resolve(root),
                };
                let pattern = arg(1).to_owned();
                let report = search::search(&self.fs, &root, &pattern).await;
                Ok(Report::Searched {
                    root,
                    pattern,
                    report,
                })
            }
            Command::Chmod => {
                let target = required(arg(0), "path")?;
                let mode =
                    ops::change_permissions(&self.fs, &self.resolve(target), arg(1)).await?;
                Ok(Report::PermissionsChanged {
                    target: target.to_owned(),
                    mode,
                })
            }
            Command::ShowCwd | Command::Exit => Ok(Report::Cwd(self.cwd.clone())),
        }
    }
}
