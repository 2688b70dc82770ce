pub mod format;
pub mod list;
pub mod ops;
pub mod path;
pub mod render;
pub mod search;
