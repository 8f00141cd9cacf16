//! # Menu State
//!
//! The landing screen: the title banner and one button per game mode. A
//! button press stores the selected mode in the shared context and pushes the
//! board state; the menu itself stays suspended on the stack underneath until
//! the player comes back.

use crate::app::{Context, GameMode, InputEvent};
use crate::state::{State, StateKind, Transition};
use crate::tui::widgets::{Button, TITLE_BANNER};
use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// One selectable menu row.
struct MenuEntry {
    button: Button,
    mode: GameMode,
}

pub struct MenuState {
    entries: Vec<MenuEntry>,
    /// Screen size the current button layout was computed for. Resizes that
    /// happen while another state covers the menu never reach it as events,
    /// so rendering re-checks this against the actual frame area.
    last_size: (u16, u16),
}

impl MenuState {
    pub fn new() -> Self {
        let entries = vec![
            MenuEntry {
                button: Button::new("Singleplayer"),
                mode: GameMode::SinglePlayer,
            },
            MenuEntry {
                button: Button::new("Multiplayer"),
                mode: GameMode::MultiPlayer,
            },
        ];
        Self {
            entries,
            last_size: (0, 0),
        }
    }

    /// Centers the buttons horizontally and spreads them below the title.
    fn layout(&mut self, screen: (u16, u16)) {
        let (width, height) = screen;
        self.last_size = screen;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            let x = width.saturating_sub(entry.button.width()) / 2;
            let y = height / 2 + 2 * i as u16;
            entry.button.set_position(x, y);
        }
    }
}

impl State for MenuState {
    fn on_enter(&mut self, ctx: &mut Context) -> Result<()> {
        self.layout(ctx.screen);
        for entry in &mut self.entries {
            entry.button.update(true);
        }
        Ok(())
    }

    fn handle_event(&mut self, ctx: &mut Context, event: &InputEvent) -> Transition {
        match *event {
            InputEvent::PointerMove { x, y } => {
                for entry in &mut self.entries {
                    entry.button.handle_pointer_move(x, y);
                }
                Transition::None
            }
            InputEvent::PointerUp { x, y } => {
                for entry in &self.entries {
                    if entry.button.contains(x, y) {
                        ctx.mode = entry.mode;
                        return Transition::Push(StateKind::Board);
                    }
                }
                Transition::None
            }
            InputEvent::Key(KeyCode::Esc) => Transition::Quit,
            InputEvent::Resize { width, height } => {
                self.layout((width, height));
                Transition::None
            }
            _ => Transition::None,
        }
    }

    fn update(&mut self, _ctx: &mut Context) -> Transition {
        for entry in &mut self.entries {
            entry.button.update(false);
        }
        Transition::None
    }

    fn render(&mut self, _ctx: &Context, frame: &mut Frame) {
        let area = frame.size();
        let (width, height) = (area.width, area.height);
        if (width, height) != self.last_size {
            self.layout((width, height));
        }

        let title: Vec<Line> = TITLE_BANNER
            .iter()
            .map(|row| {
                Line::from(Span::styled(
                    *row,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();

        let title_area = Rect::new(0, height / 6, width, TITLE_BANNER.len() as u16)
            .intersection(frame.size());
        frame.render_widget(
            Paragraph::new(title).alignment(Alignment::Center),
            title_area,
        );

        for entry in &self.entries {
            entry.button.render(frame);
        }

        let hint_area =
            Rect::new(0, height.saturating_sub(2), width, 1).intersection(frame.size());
        frame.render_widget(
            Paragraph::new("click a mode to play, q to quit")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            hint_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        let mut ctx = Context::new(3, 3, 60);
        ctx.screen = (80, 24);
        ctx
    }

    #[test]
    fn test_click_selects_a_mode_and_pushes_the_board() {
        let mut ctx = ctx();
        let mut menu = MenuState::new();
        menu.on_enter(&mut ctx).unwrap();

        // "Singleplayer" is 12 wide, centered on an 80-column screen.
        let transition = menu.handle_event(&mut ctx, &InputEvent::PointerUp { x: 40, y: 12 });
        assert_eq!(transition, Transition::Push(StateKind::Board));
        assert_eq!(ctx.mode, GameMode::SinglePlayer);

        let transition = menu.handle_event(&mut ctx, &InputEvent::PointerUp { x: 40, y: 14 });
        assert_eq!(transition, Transition::Push(StateKind::Board));
        assert_eq!(ctx.mode, GameMode::MultiPlayer);
    }

    #[test]
    fn test_click_outside_the_buttons_does_nothing() {
        let mut ctx = ctx();
        let mut menu = MenuState::new();
        menu.on_enter(&mut ctx).unwrap();

        let transition = menu.handle_event(&mut ctx, &InputEvent::PointerUp { x: 1, y: 1 });
        assert_eq!(transition, Transition::None);
        assert_eq!(ctx.mode, GameMode::None);
    }

    #[test]
    fn test_pointer_move_updates_hover() {
        let mut ctx = ctx();
        let mut menu = MenuState::new();
        menu.on_enter(&mut ctx).unwrap();

        menu.handle_event(&mut ctx, &InputEvent::PointerMove { x: 40, y: 12 });
        assert!(menu.entries[0].button.hover());
        assert!(!menu.entries[1].button.hover());

        menu.handle_event(&mut ctx, &InputEvent::PointerMove { x: 0, y: 0 });
        assert!(!menu.entries[0].button.hover());
    }

    #[test]
    fn test_buttons_follow_a_resize_that_happened_while_covered() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        // The board state swallows resize events while it covers the menu,
        // so the menu comes back laid out for the old screen. The next
        // render must recenter the buttons for the real frame size.
        let mut ctx = ctx();
        let mut menu = MenuState::new();
        menu.on_enter(&mut ctx).unwrap();
        menu.on_pause();
        ctx.screen = (40, 12);
        menu.on_resume();

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|frame| menu.render(&ctx, frame)).unwrap();

        // "Singleplayer" recentered on a 40-column screen sits at y = 6.
        let transition = menu.handle_event(&mut ctx, &InputEvent::PointerUp { x: 20, y: 6 });
        assert_eq!(transition, Transition::Push(StateKind::Board));
        assert_eq!(ctx.mode, GameMode::SinglePlayer);
    }

    #[test]
    fn test_escape_quits() {
        let mut ctx = ctx();
        let mut menu = MenuState::new();
        menu.on_enter(&mut ctx).unwrap();

        let transition = menu.handle_event(&mut ctx, &InputEvent::Key(KeyCode::Esc));
        assert_eq!(transition, Transition::Quit);
    }
}
