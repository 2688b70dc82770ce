mod entry;
mod listing;
mod search;

pub use entry::{EntryKind, EntryMetadata, FsEntry};
pub use listing::{Listing, ListingRow, RowDetail};
pub use search::SearchReport;
