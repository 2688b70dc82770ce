mod real;

#[cfg(test)]
mod mock;

pub use real::RealFileSystem;

#[cfg(test)]
pub use mock::{MockFileSystem, Op};

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::{EntryMetadata, FsEntry};

#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Immediate children of `dir`, without `.` and `..`, in no particular order.
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<FsEntry>>;

    async fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMetadata>;

    /// True if `path` is a directory once links are followed.
    async fn is_dir(&self, path: &Path) -> bool;

    async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Open `path` for appending, creating it if missing.
    async fn create_file(&self, path: &Path) -> io::Result<()>;

    async fn create_dir(&self, path: &Path) -> io::Result<()>;

    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Removes an empty directory.
    async fn remove_dir(&self, path: &Path) -> io::Result<()>;

    async fn rename(&self, src: &Path, dst: &Path) -> io::Result<()>;

    /// Copies file contents, replacing `dst` if it exists.
    async fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<()>;

    /// Sets the permission bits of `path` to `mode`.
    async fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;

    fn user_name(&self, uid: u32) -> Option<String>;

    fn group_name(&self, gid: u32) -> Option<String>;
}
