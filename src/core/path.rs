use std::path::{Path, PathBuf};

/// Resolve user input against `cwd`, expanding a leading `~` from `home`.
///
/// `home` falls back to `/` when unset.
pub fn resolve(cwd: &Path, input: &str, home: Option<&Path>) -> PathBuf {
    let home = home.unwrap_or(Path::new("/"));

    let expanded = if input == "~" {
        home.to_path_buf()
    } else if let Some(rest) = input.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(input)
    };

    if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    }
}
