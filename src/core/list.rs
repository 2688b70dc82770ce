use std::path::Path;

use tracing::debug;

use crate::core::format::{display_id, format_modified, format_permissions};
use crate::errors::{Error, Result};
use crate::fs::FileSystem;
use crate::models::{Listing, ListingRow, RowDetail};

/// List the immediate children of `dir`, plus `.` and `..`, sorted by name.
///
/// `..` is read through the path itself so the filesystem resolves it,
/// which matters when `dir` ends in `..` or crosses a symlink.
///
/// Metadata is read without following links. An entry whose metadata cannot
/// be read becomes an error row; the rest of the listing is unaffected.
pub async fn list_dir<F: FileSystem>(fs: &F, dir: &Path) -> Result<Listing> {
    let entries = fs.read_dir(dir).await.map_err(|err| Error::io(dir, err))?;

    let mut targets: Vec<(String, _)> = Vec::with_capacity(entries.len() + 2);
    targets.push((".".to_owned(), dir.to_path_buf()));
    targets.push(("..".to_owned(), dir.join("..")));
    targets.extend(entries.into_iter().map(|entry| (entry.name, entry.path)));
    targets.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

    let mut rows = Vec::with_capacity(targets.len());
    for (name, path) in targets {
        let detail = match fs.symlink_metadata(&path).await {
            Ok(metadata) => Ok(RowDetail {
                kind: metadata.kind,
                size: metadata.size,
                permissions: format_permissions(metadata.mode),
                owner: display_id(fs.user_name(metadata.uid), metadata.uid),
                group: display_id(fs.group_name(metadata.gid), metadata.gid),
                modified: format_modified(metadata.modified),
            }),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "metadata unavailable");
                Err(err.to_string())
            }
        };
        rows.push(ListingRow { name, detail });
    }

    Ok(Listing {
        path: dir.to_path_buf(),
        rows,
    })
}
