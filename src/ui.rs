//! Drawing: the visible playfield as a grid of flat-coloured rectangles.

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS, TOTAL_ROWS};
use crate::game::GameState;
use ratatui::Frame;
use ratatui::style::Style;

/// Terminal columns per board cell; two columns roughly square a cell up.
const CELL_COLS: u16 = 2;

/// Paints the board centred in the frame. Every cell is an equal-size
/// background-styled run in the theme's empty or filled colour; rows in the
/// clear animation render uniformly from the engine's blink state.
pub fn draw(frame: &mut Frame, state: &GameState) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    buf.set_style(area, Style::default().bg(state.theme.background));

    let board_cols = BOARD_WIDTH as u16 * CELL_COLS;
    let board_rows = BOARD_HEIGHT as u16;
    let x0 = area.x + area.width.saturating_sub(board_cols) / 2;
    let y0 = area.y + area.height.saturating_sub(board_rows) / 2;

    let blink = state.clearing_rows();
    for row in HIDDEN_ROWS..TOTAL_ROWS {
        let y = y0 + (row - HIDDEN_ROWS) as u16;
        if y >= area.y + area.height {
            break;
        }
        for col in 0..BOARD_WIDTH {
            let x = x0 + col as u16 * CELL_COLS;
            if x + CELL_COLS > area.x + area.width {
                break;
            }
            let occupied = match blink {
                Some((rows, filled)) if rows.contains(&row) => filled,
                _ => state.board.cell(col, row),
            };
            let color = if occupied {
                state.theme.filled
            } else {
                state.theme.empty
            };
            buf.set_string(x, y, "  ", Style::default().bg(color));
        }
    }

    if y0 > area.y {
        let status = format!("score {}  level {}", state.score, state.level);
        let style = Style::default()
            .fg(state.theme.filled)
            .bg(state.theme.background);
        buf.set_string(x0, y0 - 1, status, style);
    }
}
