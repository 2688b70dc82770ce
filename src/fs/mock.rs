use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use crate::models::{EntryKind, EntryMetadata, FsEntry};

use super::FileSystem;

const S_IFDIR: u32 = 0o040000;
const S_IFREG: u32 = 0o100000;
const S_IFLNK: u32 = 0o120000;
const S_IFIFO: u32 = 0o010000;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Op {
    ReadDir,
    Metadata,
    CreateFile,
    CreateDir,
    RemoveFile,
    RemoveDir,
    Rename,
    CopyFile,
    SetMode,
}

#[derive(Clone, Debug)]
enum Content {
    Dir,
    File(Vec<u8>),
    Link(PathBuf),
    Fifo,
}

#[derive(Clone, Debug)]
struct Node {
    content: Content,
    perm: u32,
    uid: u32,
    gid: u32,
}

/// In-memory tree with per-call fault injection.
#[derive(Clone, Default)]
pub struct MockFileSystem {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    nodes: BTreeMap<PathBuf, Node>,
    failures: HashMap<(Op, PathBuf), io::ErrorKind>,
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
    calls: Vec<(Op, PathBuf)>,
}

/// Lexically fold `.` and `..`; `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if out.parent().is_some() {
                    out.pop();
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn not_found() -> io::Error {
    io::Error::from(io::ErrorKind::NotFound)
}

impl Inner {
    fn insert(&mut self, path: PathBuf, content: Content, perm: u32) {
        self.nodes.insert(
            path,
            Node {
                content,
                perm,
                uid: 1000,
                gid: 1000,
            },
        );
    }

    fn enter(&mut self, op: Op, path: &Path) -> io::Result<()> {
        self.calls.push((op, path.to_path_buf()));
        match self.failures.get(&(op, path.to_path_buf())) {
            Some(kind) => Err(io::Error::from(*kind)),
            None => Ok(()),
        }
    }

    fn resolve(&self, path: &Path) -> Option<(PathBuf, &Node)> {
        let mut path = normalize(path);
        for _ in 0..8 {
            let node = self.nodes.get(&path)?;
            match &node.content {
                Content::Link(target) => path = target.clone(),
                _ => return Some((path, node)),
            }
        }
        None
    }

    fn parent_is_dir(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) => matches!(
                self.resolve(parent),
                Some((_, Node {
                    content: Content::Dir,
                    ..
                }))
            ),
            None => false,
        }
    }

    fn has_children(&self, dir: &Path) -> bool {
        self.nodes.keys().any(|p| p.parent() == Some(dir))
    }
}

impl MockFileSystem {
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.insert(path.into(), Content::Dir, 0o755);
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, contents: &str) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.insert(path.into(), Content::File(contents.as_bytes().to_vec()), 0o644);
    }

    pub fn add_symlink(&self, path: impl Into<PathBuf>, target: impl Into<PathBuf>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.insert(path.into(), Content::Link(target.into()), 0o777);
    }

    pub fn add_fifo(&self, path: impl Into<PathBuf>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.insert(path.into(), Content::Fifo, 0o644);
    }

    pub fn set_owner(&self, path: impl AsRef<Path>, uid: u32, gid: u32) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        if let Some(node) = inner.nodes.get_mut(path.as_ref()) {
            node.uid = uid;
            node.gid = gid;
        }
    }

    pub fn add_user(&self, uid: u32, name: &str) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.users.insert(uid, name.to_owned());
    }

    pub fn add_group(&self, gid: u32, name: &str) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.groups.insert(gid, name.to_owned());
    }

    pub fn fail(&self, op: Op, path: impl Into<PathBuf>, kind: io::ErrorKind) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.failures.insert((op, path.into()), kind);
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.nodes.contains_key(path.as_ref())
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.lock().expect("mock fs lock");
        match inner.nodes.get(path.as_ref()).map(|node| &node.content) {
            Some(Content::File(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    pub fn perm(&self, path: impl AsRef<Path>) -> Option<u32> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.nodes.get(path.as_ref()).map(|node| node.perm)
    }

    pub fn calls(&self) -> Vec<(Op, PathBuf)> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.calls.clone()
    }
}

#[async_trait]
impl FileSystem for MockFileSystem {
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<FsEntry>> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.enter(Op::ReadDir, dir)?;

        let resolved = match inner.resolve(dir) {
            Some((
                resolved,
                Node {
                    content: Content::Dir,
                    ..
                },
            )) => resolved,
            Some(_) => return Err(io::Error::from(io::ErrorKind::NotADirectory)),
            None => return Err(not_found()),
        };

        // Reverse order so callers cannot rely on the mock's sorting.
        Ok(inner
            .nodes
            .iter()
            .rev()
            .filter(|(path, _)| path.parent() == Some(resolved.as_path()))
            .map(|(path, node)| {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                (name, node)
            })
            .map(|(name, node)| FsEntry {
                path: dir.join(&name),
                name,
                kind: match node.content {
                    Content::Dir => EntryKind::Directory,
                    Content::File(_) => EntryKind::File,
                    Content::Link(_) => EntryKind::Symlink,
                    Content::Fifo => EntryKind::Other,
                },
            })
            .collect())
    }

    async fn symlink_metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.enter(Op::Metadata, path)?;
        let node = inner.nodes.get(&normalize(path)).ok_or_else(not_found)?;
        let (kind, type_bits, size) = match &node.content {
            Content::Dir => (EntryKind::Directory, S_IFDIR, 4096),
            Content::File(bytes) => (EntryKind::File, S_IFREG, bytes.len() as u64),
            Content::Link(target) => (
                EntryKind::Symlink,
                S_IFLNK,
                target.as_os_str().len() as u64,
            ),
            Content::Fifo => (EntryKind::Other, S_IFIFO, 0),
        };
        Ok(EntryMetadata {
            kind,
            size,
            mode: type_bits | node.perm,
            uid: node.uid,
            gid: node.gid,
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        })
    }

    async fn is_dir(&self, path: &Path) -> bool {
        let inner = self.inner.lock().expect("mock fs lock");
        matches!(
            inner.resolve(path),
            Some((_, Node {
                content: Content::Dir,
                ..
            }))
        )
    }

    async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner
            .resolve(path)
            .map(|(resolved, _)| resolved)
            .ok_or_else(not_found)
    }

    async fn create_file(&self, path: &Path) -> io::Result<()> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.enter(Op::CreateFile, path)?;
        match inner.nodes.get(path).map(|node| &node.content) {
            Some(Content::File(_)) => Ok(()),
            Some(_) => Err(io::Error::from(io::ErrorKind::IsADirectory)),
            None if inner.parent_is_dir(path) => {
                inner.insert(path.to_path_buf(), Content::File(Vec::new()), 0o644);
                Ok(())
            }
            None => Err(not_found()),
        }
    }

    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.enter(Op::CreateDir, path)?;
        if inner.nodes.contains_key(path) {
            return Err(io::Error::from(io::ErrorKind::AlreadyExists));
        }
        if !inner.parent_is_dir(path) {
            return Err(not_found());
        }
        inner.insert(path.to_path_buf(), Content::Dir, 0o755);
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.enter(Op::RemoveFile, path)?;
        match inner.nodes.get(path).map(|node| &node.content) {
            Some(Content::Dir) => Err(io::Error::from(io::ErrorKind::IsADirectory)),
            Some(_) => {
                inner.nodes.remove(path);
                Ok(())
            }
            None => Err(not_found()),
        }
    }

    async fn remove_dir(&self, path: &Path) -> io::Result<()> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.enter(Op::RemoveDir, path)?;
        match inner.nodes.get(path).map(|node| &node.content) {
            Some(Content::Dir) if inner.has_children(path) => {
                Err(io::Error::from(io::ErrorKind::DirectoryNotEmpty))
            }
            Some(Content::Dir) => {
                inner.nodes.remove(path);
                Ok(())
            }
            Some(_) => Err(io::Error::from(io::ErrorKind::NotADirectory)),
            None => Err(not_found()),
        }
    }

    async fn rename(&self, src: &Path, dst: &Path) -> io::Result<()> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.enter(Op::Rename, src)?;
        if !inner.nodes.contains_key(src) {
            return Err(not_found());
        }
        if !inner.parent_is_dir(dst) {
            return Err(not_found());
        }

        let moved: Vec<PathBuf> = inner
            .nodes
            .keys()
            .filter(|path| path.starts_with(src))
            .cloned()
            .collect();
        for old in moved {
            if let Some(node) = inner.nodes.remove(&old) {
                let suffix = old.strip_prefix(src).unwrap_or(Path::new(""));
                let new = if suffix.as_os_str().is_empty() {
                    dst.to_path_buf()
                } else {
                    dst.join(suffix)
                };
                inner.nodes.insert(new, node);
            }
        }
        Ok(())
    }

    async fn copy_file(&self, src: &Path, dst: &Path) -> io::Result<()> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.enter(Op::CopyFile, src)?;
        let (bytes, perm) = match inner.resolve(src) {
            Some((
                _,
                Node {
                    content: Content::File(bytes),
                    perm,
                    ..
                },
            )) => (bytes.clone(), *perm),
            Some(_) => return Err(io::Error::from(io::ErrorKind::InvalidInput)),
            None => return Err(not_found()),
        };
        if let Some(Content::Dir) = inner.nodes.get(dst).map(|node| &node.content) {
            return Err(io::Error::from(io::ErrorKind::IsADirectory));
        }
        if !inner.parent_is_dir(dst) {
            return Err(not_found());
        }
        inner.insert(dst.to_path_buf(), Content::File(bytes), perm);
        Ok(())
    }

    async fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.enter(Op::SetMode, path)?;
        match inner.nodes.get_mut(path) {
            Some(node) => {
                node.perm = mode & 0o7777;
                Ok(())
            }
            None => Err(not_found()),
        }
    }

    fn user_name(&self, uid: u32) -> Option<String> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.users.get(&uid).cloned()
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.groups.get(&gid).cloned()
    }
}
