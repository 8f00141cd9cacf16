//! # Board State
//!
//! The playing screen. Owns the board, the per-session scores and the minimax
//! engine, and advances one move per fixed tick: a pending human click, then
//! (in single-player mode) the computer's reply, then a pending round reset.
//! Scores live exactly as long as this state does; popping back to the menu
//! discards them.

use crate::app::{Context, GameMode, InputEvent};
use crate::state::{State, Transition};
use crate::tui::layout::{self, ScreenLayout};
use anyhow::{Context as _, Result};
use crossterm::event::KeyCode;
use minimax::{Board, Minimax, Symbol};
use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};
use tracing::{debug, info};

pub struct BoardState {
    board: Board,
    engine: Minimax,
    /// True while it is X's turn. X is the human side in single-player mode.
    player_turn: bool,
    x_score: u32,
    o_score: u32,
    single_player: bool,
    info_area: Rect,
    last_area: Rect,
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            board: Board::new(3, 3).expect("default 3x3 board is a valid configuration"),
            engine: Minimax::new(Symbol::O),
            player_turn: true,
            x_score: 0,
            o_score: 0,
            single_player: false,
            info_area: Rect::default(),
            last_area: Rect::default(),
        }
    }

    fn layout(&mut self, screen: (u16, u16)) {
        let area = Rect::new(0, 0, screen.0, screen.1);
        let ScreenLayout { board, info } = layout::split_screen(area);
        self.info_area = info;
        self.last_area = area;

        let rects = layout::cell_rects(board, self.board.dimension());
        for (index, rect) in rects.into_iter().enumerate() {
            self.board.set_cell_rect(index, rect);
        }
    }

    fn round_live(&self) -> bool {
        !self.board.win && !self.board.is_full()
    }

    /// Places a mark, runs win detection, and either banks the win or passes
    /// the turn.
    fn apply_move(&mut self, index: usize, symbol: Symbol) {
        self.board.place(index, symbol);

        if let Some((winner, _)) = self.board.check_win(true) {
            self.board.win = true;
            self.board.win_symbol = Some(winner);
            match winner {
                Symbol::X => self.x_score += 1,
                Symbol::O => self.o_score += 1,
            }
            info!(%winner, x_score = self.x_score, o_score = self.o_score, "round won");
        } else {
            self.player_turn = !self.player_turn;
        }
    }
}

impl State for BoardState {
    fn on_enter(&mut self, ctx: &mut Context) -> Result<()> {
        self.board
            .reset(ctx.dimension, ctx.win_length)
            .context("invalid board configuration")?;

        self.single_player = ctx.mode == GameMode::SinglePlayer;
        self.player_turn = rand::thread_rng().gen_bool(0.5);
        self.x_score = 0;
        self.o_score = 0;
        self.layout(ctx.screen);

        info!(
            dimension = ctx.dimension,
            win_length = ctx.win_length,
            single_player = self.single_player,
            "entering board"
        );
        Ok(())
    }

    fn on_exit(&mut self, _ctx: &mut Context) {
        debug!(x_score = self.x_score, o_score = self.o_score, "leaving board");
    }

    fn handle_event(&mut self, ctx: &mut Context, event: &InputEvent) -> Transition {
        match *event {
            InputEvent::PointerDown { x, y } => {
                let human_to_move = !self.single_player || self.player_turn;
                if self.round_live() && human_to_move {
                    if let Some(index) = self.board.resolve_click(x, y) {
                        self.board.clicked_cell_index = Some(index);
                    }
                } else if !self.round_live() {
                    self.board.reset_requested = true;
                }
                Transition::None
            }
            InputEvent::Key(KeyCode::Char('m') | KeyCode::Char('M')) => {
                ctx.mode = GameMode::None;
                Transition::Pop
            }
            InputEvent::Resize { width, height } => {
                self.layout((width, height));
                Transition::None
            }
            _ => Transition::None,
        }
    }

    fn update(&mut self, _ctx: &mut Context) -> Transition {
        if let Some(index) = self.board.clicked_cell_index.take() {
            let symbol = if self.player_turn { Symbol::X } else { Symbol::O };
            self.apply_move(index, symbol);
        } else if self.single_player && !self.player_turn && self.round_live() {
            if let Some(index) = self.engine.best_move(&mut self.board) {
                self.apply_move(index, self.engine.computer_symbol());
            }
        } else if self.board.reset_requested {
            self.board.new_round();
            // The side that did not start the last round starts the next one.
            self.player_turn = !self.player_turn;
        }
        Transition::None
    }

    fn render(&mut self, _ctx: &Context, frame: &mut Frame) {
        let area = frame.size();
        if area != self.last_area {
            self.layout((area.width, area.height));
        }

        for cell in self.board.cells() {
            let rect = layout::to_rect(cell.rect).intersection(area);
            if rect.width == 0 || rect.height == 0 {
                continue;
            }

            let bg = if cell.render_win {
                Color::Green
            } else {
                Color::Gray
            };
            frame.render_widget(Block::default().style(Style::default().bg(bg)), rect);

            if let Some(symbol) = cell.symbol {
                let fg = match symbol {
                    Symbol::X => Color::Red,
                    Symbol::O => Color::Blue,
                };
                let glyph_row =
                    Rect::new(rect.x, rect.y + rect.height / 2, rect.width, 1).intersection(rect);
                frame.render_widget(
                    Paragraph::new(symbol.to_string())
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)),
                    glyph_row,
                );
            }
        }

        self.render_info(frame);
    }
}

impl BoardState {
    fn render_info(&self, frame: &mut Frame) {
        let area = self.info_area.intersection(frame.size());
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Underline sits below the side to move; in single-player it always
        // marks the human side, like the original scoreboard did.
        let turn_live = self.round_live();
        let x_active = turn_live && (self.player_turn || self.single_player);
        let o_active = turn_live && !x_active;

        let score_style = |fg, active: bool| {
            let style = Style::default().fg(fg).add_modifier(Modifier::BOLD);
            if active {
                style.add_modifier(Modifier::UNDERLINED)
            } else {
                style
            }
        };

        let score_line = Line::from(vec![
            Span::styled(format!("O {}", self.o_score), score_style(Color::Blue, o_active)),
            Span::raw("      "),
            Span::styled(format!("X {}", self.x_score), score_style(Color::Red, x_active)),
        ]);

        let mut lines = vec![Line::default(), score_line, Line::default()];

        if self.board.win {
            if let Some(winner) = self.board.win_symbol {
                lines.push(Line::from(format!(
                    "{winner} wins the round - click to continue"
                )));
            }
        } else if self.board.is_full() {
            lines.push(Line::from(Span::styled(
                "TIE - click to continue",
                Style::default().add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::default());
        }

        lines.push(Line::from(Span::styled(
            "Press M for menu",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            area,
        );
    }
}
