const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
    White,
    BrightGreen,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Cyan => "\x1b[36m",
            Color::White => "\x1b[37m",
            Color::BrightGreen => "\x1b[92m",
        }
    }
}

/// ANSI styling that collapses to plain text when disabled.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn paint(&self, color: Color, text: &str) -> String {
        if self.enabled {
            format!("{}{text}{RESET}", color.code())
        } else {
            text.to_owned()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.enabled {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_owned()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.enabled {
            format!("{BOLD}{}{text}{RESET}", Color::Yellow.code())
        } else {
            text.to_owned()
        }
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(Color::BrightGreen, text)
    }

    pub fn failure(&self, text: &str) -> String {
        self.paint(Color::Red, text)
    }
}
