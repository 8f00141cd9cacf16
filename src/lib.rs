//! # Minimax Search Engine
//!
//! A depth-limited minimax search over the tic-tac-toe [`Board`]. The engine
//! probes every empty cell with the computer's symbol, scores the resulting
//! position by recursive adversarial search, and keeps the cell with the best
//! score for the computer.
//!
//! The scoring convention is asymmetric by design: the human symbol is always
//! the maximizer worth +1 on a win and the computer symbol is always the
//! minimizer worth -1, regardless of whose turn the recursion is simulating.
//! The computer therefore picks the move with the *minimum* score. Wins are
//! not depth-weighted; a win found deep in the tree scores the same as an
//! immediate one.
//!
//! Search depth is capped at two plies independent of board fullness. That
//! keeps the opponent beatable on purpose and bounds the cost on larger
//! boards; it is a difficulty/performance tradeoff, not an oversight. There
//! is no pruning and no memoization, the tree is small enough not to need
//! either.

pub mod board;

pub use board::{Board, BoardError, Cell, CellRect, Symbol};

/// Number of plies searched below a probed move before the evaluation is cut
/// off.
pub const DEPTH_LIMIT: u32 = 2;

/// Places a symbol on construction and removes it again on drop, so a probed
/// position is restored even if evaluation returns early.
struct ScopedPlacement<'a> {
    board: &'a mut Board,
    index: usize,
}

impl<'a> ScopedPlacement<'a> {
    fn new(board: &'a mut Board, index: usize, symbol: Symbol) -> Self {
        board.place(index, symbol);
        Self { board, index }
    }

    fn board(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for ScopedPlacement<'_> {
    fn drop(&mut self) {
        self.board.clear_cell(self.index);
    }
}

/// The minimax engine, parameterized by which symbols the two sides play.
#[derive(Debug, Clone, Copy)]
pub struct Minimax {
    human: Symbol,
    computer: Symbol,
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new(Symbol::O)
    }
}

impl Minimax {
    /// Creates an engine playing `computer`; the opposing symbol is treated
    /// as the human side.
    pub fn new(computer: Symbol) -> Self {
        Self {
            human: computer.opponent(),
            computer,
        }
    }

    pub fn computer_symbol(&self) -> Symbol {
        self.computer
    }

    /// Chooses the computer's move for the current position.
    ///
    /// Every empty cell is tried in storage order; ties are broken by the
    /// lowest index, which makes the choice deterministic for a given board.
    /// Returns `None` only when the board has no empty cell left.
    pub fn best_move(&self, board: &mut Board) -> Option<usize> {
        let mut best_score = i32::MAX;
        let mut best_index = None;

        for index in 0..board.cell_count() {
            if board.cell(index).symbol.is_some() {
                continue;
            }

            let mut probe = ScopedPlacement::new(board, index, self.computer);
            let score = self.minimax(probe.board(), 0, true);
            drop(probe);

            if score < best_score {
                best_score = score;
                best_index = Some(index);
            }
        }

        best_index
    }

    /// Recursive evaluation of the current position.
    ///
    /// Terminal checks run in a fixed order: a detected win scores by symbol
    /// identity even when it coincides with the depth cutoff, the cutoff
    /// itself scores 0, and a full board scores 0.
    fn minimax(&self, board: &mut Board, depth: u32, maximizing: bool) -> i32 {
        let win = board.check_win(false);

        if win.is_some() || depth == DEPTH_LIMIT {
            return match win {
                Some((symbol, _)) if symbol == self.human => 1,
                Some((symbol, _)) if symbol == self.computer => -1,
                _ => 0,
            };
        }

        if board.is_full() {
            return 0;
        }

        let symbol = if maximizing { self.human } else { self.computer };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for index in 0..board.cell_count() {
            if board.cell(index).symbol.is_some() {
                continue;
            }

            let mut probe = ScopedPlacement::new(board, index, symbol);
            let score = self.minimax(probe.board(), depth + 1, !maximizing);
            drop(probe);

            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(x: &[usize], o: &[usize]) -> Board {
        let mut board = Board::new(3, 3).unwrap();
        for &i in x {
            board.place(i, Symbol::X);
        }
        for &i in o {
            board.place(i, Symbol::O);
        }
        board
    }

    #[test]
    fn test_empty_board_is_deterministic() {
        // With the two-ply cutoff no line is reachable from an empty board,
        // so every cell scores 0 and the lowest index wins the tie.
        let mut board = Board::new(3, 3).unwrap();
        let engine = Minimax::default();
        assert_eq!(engine.best_move(&mut board), Some(0));
    }

    #[test]
    fn test_probing_restores_the_board() {
        let mut board = board_with(&[0, 1], &[4]);
        let engine = Minimax::default();
        engine.best_move(&mut board);

        assert_eq!(board.free_cells(), 6);
        assert_eq!(board.cell(0).symbol, Some(Symbol::X));
        assert_eq!(board.cell(1).symbol, Some(Symbol::X));
        assert_eq!(board.cell(4).symbol, Some(Symbol::O));
        for index in [2, 3, 5, 6, 7, 8] {
            assert_eq!(board.cell(index).symbol, None);
        }
    }

    #[test]
    fn test_blocks_an_immediate_threat() {
        // X threatens to complete the top row at 2; every non-blocking reply
        // hands X a one-move win.
        let mut board = board_with(&[0, 1], &[4]);
        let engine = Minimax::default();
        assert_eq!(engine.best_move(&mut board), Some(2));
    }

    #[test]
    fn test_blocks_a_diagonal_threat() {
        let mut board = board_with(&[0, 4], &[1, 3]);
        let engine = Minimax::default();
        assert_eq!(engine.best_move(&mut board), Some(8));
    }

    #[test]
    fn test_takes_an_immediate_win() {
        // O completes the middle row at 5; taking it outranks blocking the X
        // threat at 8. Probing 8 also scores a win for O (it leaves {3,4,5}
        // and {0,4,8} open at once), but 5 is the lower index.
        let mut board = board_with(&[6, 7], &[3, 4]);
        let engine = Minimax::default();
        assert_eq!(engine.best_move(&mut board), Some(5));
    }

    #[test]
    fn test_a_fork_ties_with_an_immediate_win() {
        // O wins outright at 5, but probing 2 forks {3,4,5} with {2,4,6},
        // which the search scores exactly the same; the lowest index wins
        // the tie, so the engine forks instead of finishing the row.
        let mut board = board_with(&[0, 1], &[3, 4]);
        let engine = Minimax::default();
        assert_eq!(engine.best_move(&mut board), Some(2));
    }

    #[test]
    fn test_win_preferred_over_block() {
        // Both sides threaten; the engine grabs its own win instead of
        // blocking.
        let mut board = board_with(&[6, 7], &[0, 1]);
        let engine = Minimax::new(Symbol::O);
        assert_eq!(engine.best_move(&mut board), Some(2));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board = board_with(&[0, 2, 3, 7, 8], &[1, 4, 5, 6]);
        let engine = Minimax::default();
        assert_eq!(engine.best_move(&mut board), None);
    }

    #[test]
    fn test_single_free_cell() {
        let mut board = board_with(&[0, 1, 5, 6], &[2, 3, 4, 7]);
        let engine = Minimax::default();
        assert_eq!(engine.best_move(&mut board), Some(8));
    }
}
