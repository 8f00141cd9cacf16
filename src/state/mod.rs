//! # Game State Machine
//!
//! A last-in-first-out stack of game states (menu, board) with explicit
//! lifecycle hooks. Only the top of the stack receives input, update and
//! render dispatch each frame; states underneath stay suspended until they
//! surface again.
//!
//! States never manipulate the stack directly. They return a [`Transition`]
//! from their input/update hooks and the application loop applies it after
//! dispatch, which keeps borrows simple and transition points well defined.

pub mod board;
pub mod menu;

use crate::app::{Context, InputEvent};
use anyhow::Result;
use ratatui::Frame;
use tracing::error;

/// The state variants the stack can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Menu,
    Board,
}

/// A stack operation requested by a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Stay where we are.
    None,
    /// Suspend the current state and enter a new one on top of it.
    Push(StateKind),
    /// Leave the current state and resume the one underneath.
    Pop,
    /// Stop the application loop.
    Quit,
}

/// Lifecycle and dispatch hooks every game state implements.
///
/// `on_enter` may fail (a state can refuse to come up, mirroring a resource
/// that fails to load); the stack then aborts the transition. The remaining
/// hooks are infallible.
pub trait State {
    fn on_enter(&mut self, ctx: &mut Context) -> Result<()>;

    fn on_exit(&mut self, _ctx: &mut Context) {}

    /// Called when another state is pushed on top of this one.
    fn on_pause(&mut self) {}

    /// Called when this state becomes the top again after a pop.
    fn on_resume(&mut self) {}

    fn handle_event(&mut self, ctx: &mut Context, event: &InputEvent) -> Transition;

    /// One fixed-timestep update.
    fn update(&mut self, ctx: &mut Context) -> Transition;

    fn render(&mut self, ctx: &Context, frame: &mut Frame);
}

fn build(kind: StateKind) -> Box<dyn State> {
    match kind {
        StateKind::Menu => Box::new(menu::MenuState::new()),
        StateKind::Board => Box::new(board::BoardState::new()),
    }
}

/// The stack owning the live states.
#[derive(Default)]
pub struct StateStack {
    states: Vec<Box<dyn State>>,
}

impl StateStack {
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Replaces the current top (if any) with a new state: the old top is
    /// exited and removed, then the new state is entered. Used for the
    /// initial empty-stack to menu transition.
    pub fn change(&mut self, ctx: &mut Context, kind: StateKind) {
        if let Some(mut top) = self.states.pop() {
            top.on_exit(ctx);
        }
        self.enter_and_push(ctx, build(kind));
    }

    /// Suspends the current top and enters a new state above it. If entering
    /// fails the transition is aborted and the suspended state resumes, so
    /// the stack is never left half-entered.
    pub fn push(&mut self, ctx: &mut Context, state: Box<dyn State>) {
        if let Some(top) = self.states.last_mut() {
            top.on_pause();
        }
        if !self.enter_and_push(ctx, state) {
            if let Some(top) = self.states.last_mut() {
                top.on_resume();
            }
        }
    }

    pub fn push_kind(&mut self, ctx: &mut Context, kind: StateKind) {
        self.push(ctx, build(kind));
    }

    /// Exits and removes the current top, resuming the state underneath.
    pub fn pop(&mut self, ctx: &mut Context) {
        if let Some(mut top) = self.states.pop() {
            top.on_exit(ctx);
        }
        if let Some(top) = self.states.last_mut() {
            top.on_resume();
        }
    }

    fn enter_and_push(&mut self, ctx: &mut Context, mut state: Box<dyn State>) -> bool {
        match state.on_enter(ctx) {
            Ok(()) => {
                self.states.push(state);
                true
            }
            Err(err) => {
                error!("state transition aborted: {err:#}");
                false
            }
        }
    }

    pub fn handle_event(&mut self, ctx: &mut Context, event: &InputEvent) -> Transition {
        match self.states.last_mut() {
            Some(top) => top.handle_event(ctx, event),
            None => Transition::None,
        }
    }

    pub fn update(&mut self, ctx: &mut Context) -> Transition {
        match self.states.last_mut() {
            Some(top) => top.update(ctx),
            None => Transition::None,
        }
    }

    pub fn render(&mut self, ctx: &Context, frame: &mut Frame) {
        if let Some(top) = self.states.last_mut() {
            top.render(ctx, frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::RefCell;
    use std::rc::Rc;

    type EventLog = Rc<RefCell<Vec<String>>>;

    /// Records every lifecycle call it receives, tagged with a name.
    struct ProbeState {
        name: &'static str,
        log: EventLog,
        fail_enter: bool,
    }

    impl ProbeState {
        fn boxed(name: &'static str, log: &EventLog) -> Box<dyn State> {
            Box::new(Self {
                name,
                log: log.clone(),
                fail_enter: false,
            })
        }

        fn failing(name: &'static str, log: &EventLog) -> Box<dyn State> {
            Box::new(Self {
                name,
                log: log.clone(),
                fail_enter: true,
            })
        }

        fn record(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{}:{hook}", self.name));
        }
    }

    impl State for ProbeState {
        fn on_enter(&mut self, _ctx: &mut Context) -> Result<()> {
            self.record("enter");
            if self.fail_enter {
                bail!("probe refused to enter");
            }
            Ok(())
        }

        fn on_exit(&mut self, _ctx: &mut Context) {
            self.record("exit");
        }

        fn on_pause(&mut self) {
            self.record("pause");
        }

        fn on_resume(&mut self) {
            self.record("resume");
        }

        fn handle_event(&mut self, _ctx: &mut Context, _event: &InputEvent) -> Transition {
            Transition::None
        }

        fn update(&mut self, _ctx: &mut Context) -> Transition {
            self.record("update");
            Transition::None
        }

        fn render(&mut self, _ctx: &Context, _frame: &mut Frame) {}
    }

    fn ctx() -> Context {
        Context::new(3, 3, 60)
    }

    fn taken(log: &EventLog) -> Vec<String> {
        log.borrow_mut().drain(..).collect()
    }

    #[test]
    fn test_push_then_pop_resumes_without_exiting() {
        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        let mut ctx = ctx();
        let mut stack = StateStack::new();

        stack.push(&mut ctx, ProbeState::boxed("menu", &log));
        stack.push(&mut ctx, ProbeState::boxed("board", &log));
        stack.pop(&mut ctx);

        let events = taken(&log);
        assert_eq!(
            events,
            vec!["menu:enter", "menu:pause", "board:enter", "board:exit", "menu:resume"]
        );
        // Crucially the menu was never exited while the board sat on top.
        assert!(!events.contains(&"menu:exit".to_string()));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_failed_enter_aborts_the_push() {
        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        let mut ctx = ctx();
        let mut stack = StateStack::new();

        stack.push(&mut ctx, ProbeState::boxed("menu", &log));
        stack.push(&mut ctx, ProbeState::failing("board", &log));

        assert_eq!(stack.len(), 1);
        assert_eq!(
            taken(&log),
            vec!["menu:enter", "menu:pause", "board:enter", "menu:resume"]
        );

        // The surviving top still receives dispatch.
        stack.update(&mut ctx);
        assert_eq!(taken(&log), vec!["menu:update"]);
    }

    #[test]
    fn test_only_the_top_receives_updates() {
        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        let mut ctx = ctx();
        let mut stack = StateStack::new();

        stack.push(&mut ctx, ProbeState::boxed("menu", &log));
        stack.push(&mut ctx, ProbeState::boxed("board", &log));
        taken(&log);

        stack.update(&mut ctx);
        assert_eq!(taken(&log), vec!["board:update"]);
    }

    #[test]
    fn test_pop_to_empty_stack() {
        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        let mut ctx = ctx();
        let mut stack = StateStack::new();

        stack.push(&mut ctx, ProbeState::boxed("menu", &log));
        stack.pop(&mut ctx);

        assert!(stack.is_empty());
        assert_eq!(taken(&log), vec!["menu:enter", "menu:exit"]);
        assert_eq!(stack.update(&mut ctx), Transition::None);
    }
}
