use std::path::Path;

use tracing::{debug, info, warn};

use crate::errors::{Error, MoveStage, Result};
use crate::fs::FileSystem;
use crate::models::EntryKind;

/// What `delete` removed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Removed {
    File,
    Directory,
}

#[derive(Debug)]
pub enum MoveOutcome {
    Renamed,
    /// Rename was refused; the entry was copied and the source removed.
    Copied { rename_error: Error },
}

pub async fn create_file<F: FileSystem>(fs: &F, path: &Path) -> Result<()> {
    fs.create_file(path)
        .await
        .map_err(|err| Error::io(path, err))?;
    info!(path = %path.display(), "created file");
    Ok(())
}

/// Remove a file, link, or empty directory. Directories are never emptied.
pub async fn delete<F: FileSystem>(fs: &F, path: &Path) -> Result<Removed> {
    let metadata = fs
        .symlink_metadata(path)
        .await
        .map_err(|err| Error::io(path, err))?;

    let removed = if metadata.kind == EntryKind::Directory {
        fs.remove_dir(path)
            .await
            .map_err(|err| Error::io(path, err))?;
        Removed::Directory
    } else {
        fs.remove_file(path)
            .await
            .map_err(|err| Error::io(path, err))?;
        Removed::File
    };

    info!(path = %path.display(), ?removed, "deleted");
    Ok(removed)
}

/// Copy a file, or a directory tree, over whatever is at `dst`.
pub async fn copy<F: FileSystem>(fs: &F, src: &Path, dst: &Path) -> Result<()> {
    if fs.is_dir(src).await {
        copy_tree(fs, src, dst).await?;
    } else {
        copy_one(fs, src, dst).await?;
    }
    info!(src = %src.display(), dst = %dst.display(), "copied");
    Ok(())
}

/// Copy the regular file behind `src` to `dst`.
///
/// The source is checked first so that a failure of the copy itself is
/// reported against the destination.
async fn copy_one<F: FileSystem>(fs: &F, src: &Path, dst: &Path) -> Result<()> {
    let target = fs
        .canonicalize(src)
        .await
        .map_err(|err| Error::io(src, err))?;
    let metadata = fs
        .symlink_metadata(&target)
        .await
        .map_err(|err| Error::io(src, err))?;
    if metadata.kind != EntryKind::File {
        return Err(Error::Unsupported {
            path: src.to_path_buf(),
        });
    }

    fs.copy_file(src, dst)
        .await
        .map_err(|err| Error::io(dst, err))
}

async fn copy_tree<F: FileSystem>(fs: &F, src: &Path, dst: &Path) -> Result<()> {
    if !fs.is_dir(dst).await {
        fs.create_dir(dst)
            .await
            .map_err(|err| Error::io(dst, err))?;
    }

    let mut entries = fs.read_dir(src).await.map_err(|err| Error::io(src, err))?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    for entry in entries {
        let target = dst.join(&entry.name);
        if entry.kind == EntryKind::Other {
            // Opening a FIFO for reading would block until a writer shows up.
            warn!(path = %entry.path.display(), "skipping special file");
            continue;
        }
        if fs.is_dir(&entry.path).await {
            Box::pin(copy_tree(fs, &entry.path, &target)).await?;
        } else {
            copy_one(fs, &entry.path, &target).await?;
        }
    }

    Ok(())
}

async fn remove_tree<F: FileSystem>(fs: &F, path: &Path) -> Result<()> {
    let metadata = fs
        .symlink_metadata(path)
        .await
        .map_err(|err| Error::io(path, err))?;

    if metadata.kind != EntryKind::Directory {
        return fs.remove_file(path).await.map_err(|err| Error::io(path, err));
    }

    let entries = fs.read_dir(path).await.map_err(|err| Error::io(path, err))?;
    for entry in entries {
        Box::pin(remove_tree(fs, &entry.path)).await?;
    }
    fs.remove_dir(path).await.map_err(|err| Error::io(path, err))
}

/// Rename `src` to `dst`, falling back to copy-then-delete.
///
/// The fallback copies first and removes the source afterwards. If removal
/// fails the destination copy is left in place and the error says so.
pub async fn move_path<F: FileSystem>(fs: &F, src: &Path, dst: &Path) -> Result<MoveOutcome> {
    let rename_error = match fs.rename(src, dst).await {
        Ok(()) => {
            info!(src = %src.display(), dst = %dst.display(), "renamed");
            return Ok(MoveOutcome::Renamed);
        }
        Err(err) => Error::io(src, err),
    };
    // Nothing to fall back on when the source itself is gone.
    fs.symlink_metadata(src)
        .await
        .map_err(|err| Error::io(src, err))?;
    debug!(error = %rename_error, "rename refused, copying instead");

    let failed = |stage: MoveStage, source: Error| Error::MoveFailed {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        stage,
        source: Box::new(source),
    };

    copy(fs, src, dst)
        .await
        .map_err(|err| failed(MoveStage::Copy, err))?;
    remove_tree(fs, src)
        .await
        .map_err(|err| failed(MoveStage::RemoveSource, err))?;

    info!(src = %src.display(), dst = %dst.display(), "moved by copy");
    Ok(MoveOutcome::Copied { rename_error })
}

/// Parse an octal permission string such as `755` or `0755`.
///
/// Any number of leading zeros is accepted. Only the nine permission bits
/// are kept, so `4755` yields `0o755`.
pub fn parse_mode(input: &str) -> Result<u32> {
    let digits = input.trim();
    let octal = !digits.is_empty() && digits.bytes().all(|b| (b'0'..=b'7').contains(&b));
    if !octal {
        return Err(Error::InvalidMode(input.to_owned()));
    }

    u32::from_str_radix(digits, 8)
        .map(|mode| mode & 0o777)
        .map_err(|_| Error::InvalidMode(input.to_owned()))
}

/// Apply the nine permission bits in `mode_text` to `path`.
pub async fn change_permissions<F: FileSystem>(
    fs: &F,
    path: &Path,
    mode_text: &str,
) -> Result<u32> {
    let mode = parse_mode(mode_text)?;
    fs.set_mode(path, mode)
        .await
        .map_err(|err| Error::io(path, err))?;
    info!(path = %path.display(), mode = %format!("{mode:o}"), "changed permissions");
    Ok(mode)
}
