use chrono::{DateTime, Local};
use std::time::SystemTime;

const S_IFMT: u32 = 0o170000;
const S_IFDIR: u32 = 0o040000;

const PERMISSION_BITS: [(u32, char); 9] = [
    (0o400, 'r'),
    (0o200, 'w'),
    (0o100, 'x'),
    (0o040, 'r'),
    (0o020, 'w'),
    (0o010, 'x'),
    (0o004, 'r'),
    (0o002, 'w'),
    (0o001, 'x'),
];

/// Render `st_mode` as `drwxr-xr-x`. Only directories get a type letter.
pub fn format_permissions(mode: u32) -> String {
    let mut out = String::with_capacity(10);
    out.push(if mode & S_IFMT == S_IFDIR { 'd' } else { '-' });
    for (bit, letter) in PERMISSION_BITS {
        out.push(if mode & bit != 0 { letter } else { '-' });
    }
    out
}

/// Registered name for an id, or the id itself in decimal.
pub fn display_id(name: Option<String>, id: u32) -> String {
    name.unwrap_or_else(|| id.to_string())
}

pub fn format_modified(modified: SystemTime) -> String {
    DateTime::<Local>::from(modified)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
