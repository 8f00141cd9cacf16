//! # Layout Module
//!
//! Screen geometry for the board view: splitting the terminal into a board
//! area and a score panel, and carving the board area into per-cell
//! rectangles. Cells keep a roughly 2:1 width/height ratio so they look
//! square in a terminal, and the grid is centered inside its area.

use minimax::CellRect;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Gap between neighboring cells, in terminal cells.
const CELL_GAP: u16 = 1;

/// The two vertical regions of the board view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub board: Rect,
    pub info: Rect,
}

/// Splits the screen into the board area (top three quarters) and the score
/// panel (bottom quarter), matching the classic 9:3 viewport split.
pub fn split_screen(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(3, 4), Constraint::Ratio(1, 4)])
        .split(area);

    ScreenLayout {
        board: chunks[0],
        info: chunks[1],
    }
}

/// Computes the bounding rectangle of every cell of a `dimension x dimension`
/// grid centered inside `area`, in row-major storage order.
///
/// Degenerate areas still produce one rectangle per cell (possibly empty
/// ones); callers clip against the frame before drawing.
pub fn cell_rects(area: Rect, dimension: usize) -> Vec<CellRect> {
    let d = dimension as u16;
    if d == 0 {
        return Vec::new();
    }

    let gaps = CELL_GAP * (d - 1);
    let mut cell_h = (area.height.saturating_sub(gaps) / d).max(1);
    let cell_w = (area.width.saturating_sub(gaps) / d).max(1).min(cell_h * 2);
    cell_h = cell_h.min((cell_w / 2).max(1));

    let total_w = cell_w * d + gaps;
    let total_h = cell_h * d + gaps;
    let x0 = area.x + area.width.saturating_sub(total_w) / 2;
    let y0 = area.y + area.height.saturating_sub(total_h) / 2;

    let mut rects = Vec::with_capacity(dimension * dimension);
    for row in 0..d {
        for col in 0..d {
            rects.push(CellRect::new(
                x0 + col * (cell_w + CELL_GAP),
                y0 + row * (cell_h + CELL_GAP),
                cell_w,
                cell_h,
            ));
        }
    }
    rects
}

/// Converts a model-side cell rectangle into a ratatui drawing rectangle.
pub fn to_rect(rect: CellRect) -> Rect {
    Rect::new(rect.x, rect.y, rect.width, rect.height)
}
