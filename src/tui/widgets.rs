//! # UI Widgets Module
//!
//! The clickable label widget used by the menu, plus the title banner. A
//! button caches its rendered line and only rebuilds it when its text, hover
//! or enabled state changed since the last update (the dirty flag), the same
//! rebuild-on-dirty scheme the rest of the UI uses for cached drawables.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// The game title rendered on the menu, the terminal stand-in for a title
/// image.
pub const TITLE_BANNER: [&str; 3] = [
    "╔╦╗ ╦ ╔═╗   ╔╦╗ ╔═╗ ╔═╗   ╔╦╗ ╔═╗ ╔═╗",
    " ║  ║ ║      ║  ╠═╣ ║      ║  ║ ║ ╠═ ",
    " ╩  ╩ ╚═╝    ╩  ╩ ╩ ╚═╝    ╩  ╚═╝ ╚═╝",
];

/// A clickable text label.
pub struct Button {
    text: String,
    x: u16,
    y: u16,
    line: Line<'static>,
    hover: bool,
    enabled: bool,
    dirty: bool,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        let mut button = Self {
            text: text.into(),
            x: 0,
            y: 0,
            line: Line::default(),
            hover: false,
            enabled: true,
            dirty: true,
        };
        button.update(true);
        button
    }

    pub fn set_position(&mut self, x: u16, y: u16) {
        self.x = x;
        self.y = y;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.dirty = true;
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled != self.enabled {
            self.enabled = enabled;
            self.dirty = true;
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn hover(&self) -> bool {
        self.hover
    }

    #[cfg(test)]
    fn dirty(&self) -> bool {
        self.dirty
    }

    /// Label width in terminal cells.
    pub fn width(&self) -> u16 {
        self.text.chars().count() as u16
    }

    /// Whether the pointer overlaps this button. Disabled buttons never
    /// report an overlap, so they cannot hover or fire.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.enabled
            && y == self.y
            && x >= self.x
            && x < self.x + self.width()
    }

    /// Recomputes the hover flag from a new pointer position; a change marks
    /// the cached line stale.
    pub fn handle_pointer_move(&mut self, x: u16, y: u16) {
        let over = self.contains(x, y);
        if over != self.hover {
            self.hover = over;
            self.dirty = true;
        }
    }

    /// Rebuilds the cached line when dirty (or when forced), picking the
    /// color from the widget state: highlighted while hovered, dimmed while
    /// disabled, plain otherwise.
    pub fn update(&mut self, force: bool) {
        if !self.dirty && !force {
            return;
        }

        let style = if !self.enabled {
            Style::default().fg(Color::DarkGray)
        } else if self.hover {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        self.line = Line::from(Span::styled(self.text.clone(), style));
        self.dirty = false;
    }

    pub fn render(&self, frame: &mut Frame) {
        let rect = Rect::new(self.x, self.y, self.width(), 1).intersection(frame.size());
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        frame.render_widget(Paragraph::new(self.line.clone()), rect);
    }
}
