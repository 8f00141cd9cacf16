//! # Board Model
//!
//! The playing field of the game: a square grid of cells generalized over an
//! arbitrary dimension and an arbitrary win-run length. The board knows how to
//! accept placements, detect winning runs along rows, columns and both
//! diagonal orientations, and translate a pointer position into a cell index.
//!
//! The grid is stored as a flat vector indexed `row * dimension + col`. Each
//! cell carries its on-screen bounding rectangle so click resolution can stay
//! on the model side, and a `render_win` flag the UI uses to highlight the
//! winning run once a round ends.

use thiserror::Error;

/// A player mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// Returns the opposing symbol.
    pub fn opponent(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::X => write!(f, "X"),
            Symbol::O => write!(f, "O"),
        }
    }
}

/// Screen-space bounding rectangle of a cell, in terminal coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Whether the given point lies inside this rectangle.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// One square of the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// The mark occupying this cell, if any.
    pub symbol: Option<Symbol>,
    /// Where this cell lives on screen; set by the layout pass.
    pub rect: CellRect,
    /// True when this cell is part of the winning run of the current round.
    pub render_win: bool,
}

/// Configuration errors raised when building or resizing a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimension must be at least 1, got {0}")]
    InvalidDimension(usize),
    #[error("win length must be between 1 and the board dimension ({dimension}), got {win_length}")]
    InvalidWinLength { dimension: usize, win_length: usize },
}

/// The game board.
///
/// Invariants: `free_cells` always equals the number of empty cells, and a
/// non-empty cell stays claimed by the same symbol until the next round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
    dimension: usize,
    free_cells: usize,
    symbols_to_win: usize,
    /// A cell index produced by click resolution, awaiting consumption by the
    /// next update tick. `None` means no move is pending.
    pub clicked_cell_index: Option<usize>,
    /// Set once a winning run has been detected this round.
    pub win: bool,
    /// The winning side; only meaningful while `win` is true.
    pub win_symbol: Option<Symbol>,
    /// Set by input handling when a finished round should be cleared.
    pub reset_requested: bool,
}

impl Board {
    /// Creates a board of `dimension x dimension` cells that is won by
    /// `symbols_to_win` consecutive equal marks along any line.
    pub fn new(dimension: usize, symbols_to_win: usize) -> Result<Self, BoardError> {
        Self::validate(dimension, symbols_to_win)?;
        Ok(Self {
            cells: vec![Cell::default(); dimension * dimension],
            dimension,
            free_cells: dimension * dimension,
            symbols_to_win,
            clicked_cell_index: None,
            win: false,
            win_symbol: None,
            reset_requested: false,
        })
    }

    fn validate(dimension: usize, symbols_to_win: usize) -> Result<(), BoardError> {
        if dimension == 0 {
            return Err(BoardError::InvalidDimension(dimension));
        }
        if symbols_to_win == 0 || symbols_to_win > dimension {
            return Err(BoardError::InvalidWinLength {
                dimension,
                win_length: symbols_to_win,
            });
        }
        Ok(())
    }

    /// Reinitializes the board with a (possibly new) configuration.
    ///
    /// All cells become empty, every flag is cleared and cell geometry is
    /// discarded. Fails without touching the board if the configuration is
    /// invalid.
    pub fn reset(&mut self, dimension: usize, symbols_to_win: usize) -> Result<(), BoardError> {
        Self::validate(dimension, symbols_to_win)?;
        self.cells = vec![Cell::default(); dimension * dimension];
        self.dimension = dimension;
        self.free_cells = dimension * dimension;
        self.symbols_to_win = symbols_to_win;
        self.clicked_cell_index = None;
        self.win = false;
        self.win_symbol = None;
        self.reset_requested = false;
        Ok(())
    }

    /// Clears marks and flags for a fresh round while keeping the cell
    /// geometry intact.
    pub fn new_round(&mut self) {
        for cell in &mut self.cells {
            cell.symbol = None;
            cell.render_win = false;
        }
        self.free_cells = self.cells.len();
        self.clicked_cell_index = None;
        self.win = false;
        self.win_symbol = None;
        self.reset_requested = false;
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn symbols_to_win(&self) -> usize {
        self.symbols_to_win
    }

    pub fn free_cells(&self) -> usize {
        self.free_cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Updates the screen rectangle of a cell. Called by the layout pass
    /// whenever the terminal area changes.
    pub fn set_cell_rect(&mut self, index: usize, rect: CellRect) {
        self.cells[index].rect = rect;
    }

    /// Places `symbol` into the empty cell at `index`.
    ///
    /// Callers must verify the cell is empty and the index in range; placing
    /// into an occupied cell is a programming error, not a runtime condition.
    pub fn place(&mut self, index: usize, symbol: Symbol) {
        debug_assert!(index < self.cells.len(), "cell index out of range");
        debug_assert!(self.cells[index].symbol.is_none(), "cell already occupied");
        self.cells[index].symbol = Some(symbol);
        self.free_cells -= 1;
    }

    /// Removes the mark at `index`, undoing a previous `place`. Used by the
    /// search engine to probe hypothetical positions.
    pub fn clear_cell(&mut self, index: usize) {
        debug_assert!(self.cells[index].symbol.is_some(), "cell already empty");
        self.cells[index].symbol = None;
        self.free_cells += 1;
    }

    pub fn is_full(&self) -> bool {
        self.free_cells == 0
    }

    /// Returns the first empty cell (in storage order) whose rectangle
    /// contains the pointer position.
    pub fn resolve_click(&self, x: u16, y: u16) -> Option<usize> {
        self.cells
            .iter()
            .position(|cell| cell.symbol.is_none() && cell.rect.contains(x, y))
    }

    /// Scans every row, column and diagonal for `symbols_to_win` consecutive
    /// equal marks.
    ///
    /// Lines are visited in a fixed order: row 0, column 0, row 1, column 1,
    /// ..., then anti-diagonals by ascending `row + col`, then main diagonals
    /// by ascending `col - row`; the first run to reach the threshold wins.
    /// When `mark_winning_cells` is true the cells of that run get their
    /// `render_win` flag set; with it false the grid is left untouched, which
    /// the search engine relies on while probing hypothetical positions.
    pub fn check_win(&mut self, mark_winning_cells: bool) -> Option<(Symbol, Vec<usize>)> {
        let (symbol, run) = self.find_winning_run()?;
        if mark_winning_cells {
            for &index in &run {
                self.cells[index].render_win = true;
            }
        }
        Some((symbol, run))
    }

    fn find_winning_run(&self) -> Option<(Symbol, Vec<usize>)> {
        let d = self.dimension;
        let mut run: Vec<usize> = Vec::with_capacity(self.symbols_to_win);

        // Rows and columns, interleaved by line index.
        for i in 0..d {
            run.clear();
            for j in 0..d {
                if let Some(symbol) = self.extend_run(i * d + j, &mut run) {
                    return Some((symbol, run));
                }
            }
            run.clear();
            for j in 0..d {
                if let Some(symbol) = self.extend_run(j * d + i, &mut run) {
                    return Some((symbol, run));
                }
            }
        }

        // Anti-diagonals: cells sharing row + col, scanned top to bottom.
        for sum in 0..(2 * d - 1) {
            run.clear();
            let first_row = sum.saturating_sub(d - 1);
            let last_row = sum.min(d - 1);
            for row in first_row..=last_row {
                let col = sum - row;
                if let Some(symbol) = self.extend_run(row * d + col, &mut run) {
                    return Some((symbol, run));
                }
            }
        }

        // Main diagonals: cells sharing col - row, scanned top to bottom.
        for offset in -(d as isize - 1)..=(d as isize - 1) {
            run.clear();
            let first_row = (-offset).max(0) as usize;
            let last_row = ((d as isize - 1 - offset).min(d as isize - 1)) as usize;
            for row in first_row..=last_row {
                let col = (row as isize + offset) as usize;
                if let Some(symbol) = self.extend_run(row * d + col, &mut run) {
                    return Some((symbol, run));
                }
            }
        }

        None
    }

    /// Feeds one cell into the current run, returning the winning symbol when
    /// the run reaches the threshold. An empty cell or a symbol change breaks
    /// the run.
    fn extend_run(&self, index: usize, run: &mut Vec<usize>) -> Option<Symbol> {
        let symbol = match self.cells[index].symbol {
            Some(symbol) => symbol,
            None => {
                run.clear();
                return None;
            }
        };

        if let Some(&last) = run.last() {
            if self.cells[last].symbol != Some(symbol) {
                run.clear();
            }
        }

        run.push(index);

        if run.len() == self.symbols_to_win {
            Some(symbol)
        } else {
            None
        }
    }
}
