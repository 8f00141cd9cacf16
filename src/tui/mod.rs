//! # Terminal Loop Module
//!
//! Terminal setup/teardown and the application loop. The loop is
//! single-threaded and runs three phases in a fixed order every iteration:
//! drain all pending input events, run zero or more fixed-timestep updates
//! from a wall-clock accumulator, render the active state once. Updates
//! advance at the configured tick rate regardless of how fast frames are
//! drawn.

pub mod layout;
pub mod widgets;

use crate::app::{App, InputEvent};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// Sets up the terminal, runs the application loop and restores the terminal
/// afterwards, also on error paths.
pub fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Per-second frame and tick counters, reported through the log like the
/// loop has always done.
struct LoopStats {
    frames: u32,
    ticks: u32,
    since: Instant,
}

impl LoopStats {
    fn new() -> Self {
        Self {
            frames: 0,
            ticks: 0,
            since: Instant::now(),
        }
    }

    fn log_each_second(&mut self) {
        if self.since.elapsed() >= Duration::from_secs(1) {
            debug!(frames = self.frames, ticks = self.ticks, "loop rate");
            self.frames = 0;
            self.ticks = 0;
            self.since = Instant::now();
        }
    }
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let size = terminal.size()?;
    app.ctx.screen = (size.width, size.height);

    app.start();

    let tick = Duration::from_secs_f64(1.0 / f64::from(app.ctx.tick_rate.max(1)));
    let mut last = Instant::now();
    let mut accumulator = Duration::ZERO;
    let mut stats = LoopStats::new();

    while app.is_running() {
        // Sleep until input arrives or the next tick is due.
        let timeout = tick.saturating_sub(accumulator);
        event::poll(timeout)?;

        let now = Instant::now();
        accumulator += now - last;
        last = now;

        // Input phase: drain everything that queued up.
        while event::poll(Duration::ZERO)? {
            if let Some(input) = translate(app, event::read()?) {
                let transition = app.stack.handle_event(&mut app.ctx, &input);
                app.apply(transition);
            }
        }

        // Update phase: catch the logical clock up to the wall clock.
        while accumulator >= tick {
            let transition = app.stack.update(&mut app.ctx);
            app.apply(transition);
            accumulator -= tick;
            stats.ticks += 1;
        }

        // Render phase.
        terminal.draw(|frame| app.stack.render(&app.ctx, frame))?;
        stats.frames += 1;
        stats.log_each_second();
    }

    Ok(())
}

/// Translates a raw crossterm event into the platform-neutral event the
/// states consume, updating the shared pointer position and screen size along
/// the way. `q` and Ctrl-C stop the application from anywhere.
fn translate(app: &mut App, event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.code == KeyCode::Char('q')
                || (key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL))
            {
                app.quit();
                return None;
            }
            Some(InputEvent::Key(key.code))
        }
        Event::Mouse(mouse) => {
            app.ctx.pointer = (mouse.column, mouse.row);
            let (x, y) = app.ctx.pointer;
            match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                    Some(InputEvent::PointerMove { x, y })
                }
                MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown { x, y }),
                MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::PointerUp { x, y }),
                _ => None,
            }
        }
        Event::Resize(width, height) => {
            app.ctx.screen = (width, height);
            Some(InputEvent::Resize { width, height })
        }
        _ => None,
    }
}
