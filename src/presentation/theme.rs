use colored::Colorize;

pub struct Theme {
    pub title: fn(&str) -> String,
    pub header: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub idx: fn(&str) -> String,
    pub name: fn(&str) -> String,
    pub place: fn(&str) -> String,
    pub coords: fn(&str) -> String,
    pub unresolved: fn(&str) -> String,
    pub selected: fn(&str) -> String,
    pub label: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "field" | "" => Self::field(),
            "harvest" => Self::harvest(),
            "plain" => Self::plain(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::field() // Fallback to default
            }
        }
    }

    fn field() -> Self {
        Self {
            title: |s| s.bright_green().bold().underline().to_string(),
            header: |s| s.green().bold().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.bright_white().to_string(),
            name: |s| s.white().bold().to_string(),
            place: |s| s.cyan().to_string(),
            coords: |s| s.bright_white().dimmed().to_string(),
            unresolved: |s| s.yellow().italic().to_string(),
            selected: |s| s.bright_magenta().bold().to_string(),
            label: |s| s.green().italic().to_string(),
        }
    }

    fn harvest() -> Self {
        Self {
            title: |s| s.yellow().bold().underline().to_string(),
            header: |s| s.bright_yellow().bold().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.yellow().to_string(),
            name: |s| s.bright_white().to_string(),
            place: |s| s.bright_yellow().to_string(),
            coords: |s| s.white().dimmed().to_string(),
            unresolved: |s| s.red().italic().to_string(),
            selected: |s| s.bright_red().bold().to_string(),
            label: |s| s.yellow().italic().to_string(),
        }
    }

    fn plain() -> Self {
        Self {
            title: |s| s.to_string(),
            header: |s| s.to_string(),
            line: |s| s.to_string(),
            idx: |s| s.to_string(),
            name: |s| s.to_string(),
            place: |s| s.to_string(),
            coords: |s| s.to_string(),
            unresolved: |s| s.to_string(),
            selected: |s| s.to_string(),
            label: |s| s.to_string(),
        }
    }
}
