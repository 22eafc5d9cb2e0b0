use ratatui::style::{Color, Modifier, Style};

/// Green-phosphor mainframe palette shared by every screen.
#[derive(Debug, Clone)]
pub struct Theme {
    pub green: Color,
    pub bright_green: Color,
    pub dark_green: Color,
    pub amber: Color,
    pub red: Color,
    pub dim: Color,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            green: Color::Green,
            bright_green: Color::LightGreen,
            dark_green: Color::Rgb(0x00, 0x5f, 0x00),
            amber: Color::Yellow,
            red: Color::Red,
            dim: Color::DarkGray,
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.bright_green).add_modifier(Modifier::BOLD)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.green)
    }

    pub fn value_style(&self) -> Style {
        Style::default().fg(self.bright_green)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.green)
    }

    pub fn selected_style(&self) -> Style {
        Style::default().fg(self.bright_green).bg(self.dark_green)
    }

    pub fn editing_style(&self) -> Style {
        Style::default()
            .fg(self.bright_green)
            .bg(self.dark_green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_style(&self) -> Style {
        Style::default().fg(self.amber)
    }

    pub fn key_style(&self) -> Style {
        Style::default().fg(self.dim)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}
