use std::path::PathBuf;

use super::EntryKind;

/// Display-ready columns for one listed entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RowDetail {
    pub kind: EntryKind,
    pub size: u64,
    pub permissions: String,
    pub owner: String,
    pub group: String,
    pub modified: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListingRow {
    pub name: String,
    pub detail: Result<RowDetail, String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Listing {
    pub path: PathBuf,
    pub rows: Vec<ListingRow>,
}
