use std::path::Path;

use tracing::debug;

use crate::errors::Error;
use crate::fs::FileSystem;
use crate::models::{EntryKind, SearchReport};

/// Find every entry below `root` whose name contains `pattern`.
///
/// Directories are visited depth-first in name order; links are reported
/// but never descended. The first unreadable directory stops the search,
/// and whatever matched before it is kept.
pub async fn search<F: FileSystem>(fs: &F, root: &Path, pattern: &str) -> SearchReport {
    let mut report = SearchReport::default();
    if let Err(err) = search_inner(fs, root, pattern, &mut report).await {
        debug!(error = %err, matched = report.matches.len(), "search aborted");
        report.error = Some(err);
    }
    report
}

async fn search_inner<F: FileSystem>(
    fs: &F,
    dir: &Path,
    pattern: &str,
    report: &mut SearchReport,
) -> Result<(), Error> {
    let mut entries = fs.read_dir(dir).await.map_err(|source| Error::Traversal {
        path: dir.to_path_buf(),
        source,
    })?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    for entry in entries {
        if entry.name.contains(pattern) {
            report.matches.push(entry.path.clone());
        }
        if entry.kind == EntryKind::Directory {
            Box::pin(search_inner(fs, &entry.path, pattern, report)).await?;
        }
    }

    Ok(())
}
