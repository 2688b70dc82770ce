use std::io::{self, Write};

use crate::models::{EntryKind, Listing};
use crate::style::{Color, Palette};

const MENU: [(&str, &str); 11] = [
    ("1 ", "List files in current directory"),
    ("2 ", "Change directory (cd)"),
    ("3 ", "Create file"),
    ("4 ", "Delete file/directory (rm)"),
    ("5 ", "Copy file/directory"),
    ("6 ", "Move/Rename file/directory"),
    ("7 ", "Search (recursive)"),
    ("8 ", "Change permissions (chmod)"),
    ("9 ", "Show current working directory"),
    ("10", "Detailed list (ls -la style)"),
    ("0 ", "Exit"),
];

pub fn write_menu<W: Write>(writer: &mut W, palette: &Palette) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", palette.heading("--- Commands (Menu) ---"))?;
    for (key, label) in MENU {
        writeln!(writer, "{} - {label}", palette.paint(Color::Green, key))?;
    }
    Ok(())
}

pub fn write_listing<W: Write>(
    writer: &mut W,
    listing: &Listing,
    palette: &Palette,
) -> io::Result<()> {
    writeln!(
        writer,
        "{}\n",
        palette.heading(&format!("Listing: {}", listing.path.display()))
    )?;

    let header = format!(
        "{:<30}{:<12}{:<12}{:<12}{:<12}{:<12}Modified",
        "Name", "Type", "Size", "Perms", "Owner", "Group"
    );
    writeln!(writer, "{}", palette.bold(&header))?;
    writeln!(writer, "{}", "-".repeat(100))?;

    for row in &listing.rows {
        let detail = match &row.detail {
            Ok(detail) => detail,
            Err(reason) => {
                let line = format!("{} (error reading: {reason})", row.name);
                writeln!(writer, "{}", palette.paint(Color::Red, &line))?;
                continue;
            }
        };

        let color = match detail.kind {
            EntryKind::Directory => Color::Blue,
            EntryKind::Symlink => Color::Cyan,
            EntryKind::File | EntryKind::Other => Color::White,
        };
        writeln!(
            writer,
            "{}{:<12}{:<12}{:<12}{:<12}{:<12}{}",
            palette.paint(color, &format!("{:<30}", row.name)),
            detail.kind.label(),
            detail.size,
            detail.permissions,
            detail.owner,
            detail.group,
            detail.modified,
        )?;
    }

    Ok(())
}
