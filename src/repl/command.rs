/// A menu selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Exit,
    List,
    ChangeDir,
    CreateFile,
    Delete,
    Copy,
    Move,
    Search,
    Chmod,
    ShowCwd,
    DetailedList,
}

/// Outcome of reading one selector line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Selection {
    Command(Command),
    Unknown(i64),
    Invalid,
}

impl Command {
    pub fn from_selector(selector: i64) -> Option<Self> {
        let command = match selector {
            0 => Command::Exit,
            1 => Command::List,
            2 => Command::ChangeDir,
            3 => Command::CreateFile,
            4 => Command::Delete,
            5 => Command::Copy,
            6 => Command::Move,
            7 => Command::Search,
            8 => Command::Chmod,
            9 => Command::ShowCwd,
            10 => Command::DetailedList,
            _ => return None,
        };
        Some(command)
    }
}

/// Parse the leading token of `line` as a menu selector.
pub fn parse_selection(line: &str) -> Selection {
    let token = line.split_whitespace().next().unwrap_or("");
    match token.parse::<i64>() {
        Ok(selector) => match Command::from_selector(selector) {
            Some(command) => Selection::Command(command),
            None => Selection::Unknown(selector),
        },
        Err(_) => Selection::Invalid,
    }
}
