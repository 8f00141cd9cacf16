//! # Application State and Core Components
//!
//! Shared data that flows through the state machine: the selected game mode,
//! the board configuration taken from the command line, the last known
//! pointer position and terminal size, and the platform-neutral input events
//! the TUI layer translates crossterm events into.

use crate::state::{StateKind, StateStack, Transition};
use crossterm::event::KeyCode;

/// Which kind of match the player picked on the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// No mode selected yet (on the menu).
    #[default]
    None,
    /// Human versus the minimax engine.
    SinglePlayer,
    /// Two humans sharing the board.
    MultiPlayer,
}

/// Platform-neutral input events dispatched to the active state.
///
/// The TUI loop translates raw crossterm events into these before dispatch,
/// so states never touch the terminal backend directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerMove { x: u16, y: u16 },
    PointerDown { x: u16, y: u16 },
    PointerUp { x: u16, y: u16 },
    Key(KeyCode),
    Resize { width: u16, height: u16 },
}

/// Data shared between the application loop and every state.
#[derive(Debug, Clone)]
pub struct Context {
    /// The mode selected on the menu; cleared when returning to it.
    pub mode: GameMode,
    /// Board side length in cells.
    pub dimension: usize,
    /// Consecutive symbols needed for a win.
    pub win_length: usize,
    /// Logical updates per second.
    pub tick_rate: u32,
    /// Last reported pointer position, in terminal coordinates.
    pub pointer: (u16, u16),
    /// Last known terminal size (width, height).
    pub screen: (u16, u16),
}

impl Context {
    pub fn new(dimension: usize, win_length: usize, tick_rate: u32) -> Self {
        Self {
            mode: GameMode::None,
            dimension,
            win_length,
            tick_rate,
            pointer: (0, 0),
            screen: (0, 0),
        }
    }
}

/// The application: a state stack plus the shared context, driven by the TUI
/// loop.
pub struct App {
    pub ctx: Context,
    pub stack: StateStack,
    running: bool,
}

impl App {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            stack: StateStack::new(),
            running: false,
        }
    }

    /// Enters the initial menu state. The application starts stopped again if
    /// the menu fails to enter and the stack stays empty.
    pub fn start(&mut self) {
        self.running = true;
        self.stack.change(&mut self.ctx, StateKind::Menu);
        if self.stack.is_empty() {
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Applies a transition requested by the active state. An empty stack
    /// afterwards stops the application.
    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::None => {}
            Transition::Push(kind) => self.stack.push_kind(&mut self.ctx, kind),
            Transition::Pop => self.stack.pop(&mut self.ctx),
            Transition::Quit => self.running = false,
        }
        if self.stack.is_empty() {
            self.running = false;
        }
    }
}
