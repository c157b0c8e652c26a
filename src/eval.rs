//! Positional scoring for the search cutoff

use static_assertions::*;

use crate::board::{Board, Cell, GameState};

/// The score of a position the engine's player has won
pub const WIN_SCORE: i32 = i32::MAX - 100;
/// The score of a position the opponent has won
pub const LOSS_SCORE: i32 = -WIN_SCORE;
/// The score of a drawn position
pub const DRAW_SCORE: i32 = 0;

// the sentinels must negate cleanly and dominate any positional value
const_assert!(LOSS_SCORE > i32::MIN);
const_assert!(WIN_SCORE > DRAW_SCORE && DRAW_SCORE > LOSS_SCORE);

// relative weights of the three window scans; diagonal alignments are
// underrepresented by raw window count, so they weigh heaviest
const ROW_WEIGHT: i32 = 1;
const COLUMN_WEIGHT: i32 = 1;
const DIAGONAL_WEIGHT: i32 = 2;

/// Scores positions from a fixed player's point of view.
///
/// Which tokens count as "ours" is settled once at match start. Terminal
/// positions collapse to the sentinel scores; anything else is the signed
/// sum of row, column and diagonal alignment potential.
pub struct Evaluator {
    rows: usize,
    columns: usize,
    alignment: usize,
    my_cell: Cell,
    your_cell: Cell,
    my_win: GameState,
    your_win: GameState,
}

impl Evaluator {
    pub fn new(rows: usize, columns: usize, alignment: usize, first_player: bool) -> Self {
        let (my_cell, your_cell) = if first_player {
            (Cell::PlayerOne, Cell::PlayerTwo)
        } else {
            (Cell::PlayerTwo, Cell::PlayerOne)
        };
        let (my_win, your_win) = if first_player {
            (GameState::PlayerOneWin, GameState::PlayerTwoWin)
        } else {
            (GameState::PlayerTwoWin, GameState::PlayerOneWin)
        };
        Self {
            rows,
            columns,
            alignment,
            my_cell,
            your_cell,
            my_win,
            your_win,
        }
    }

    /// Scores the current position, terminal states first
    pub fn score(&self, board: &dyn Board) -> i32 {
        let state = board.state();
        if state == self.my_win {
            WIN_SCORE
        } else if state == self.your_win {
            LOSS_SCORE
        } else if state == GameState::Draw {
            DRAW_SCORE
        } else {
            self.row_score(board) + self.column_score(board) + self.diagonal_score(board)
        }
    }

    // every length-X horizontal window owned by a single player counts,
    // scanning from the top row down so full rows end the scan early
    fn row_score(&self, board: &dyn Board) -> i32 {
        let mut score = 0;
        for row in (0..self.rows).rev() {
            let occupied = (0..self.columns)
                .filter(|&c| board.cell(row, c) != Cell::Empty)
                .count();
            if occupied == 0 {
                // an empty row cannot affect the score
                continue;
            }
            if occupied == self.columns {
                // gravity: everything below a full row is full too, and a
                // full row holds no single-owner window in a live game
                break;
            }

            for start in 0..(self.columns + 1).saturating_sub(self.alignment) {
                score += self.window_score(ROW_WEIGHT, |i| board.cell(row, start + i));
            }
        }
        score
    }

    // the run of same-owner tokens at the top of each column's stack,
    // counted only while it can still grow into a winning alignment
    fn column_score(&self, board: &dyn Board) -> i32 {
        let mut score = 0;
        for column in 0..self.columns {
            let mut row = self.rows;
            while row > 0 && board.cell(row - 1, column) == Cell::Empty {
                row -= 1;
            }
            let empty_above = self.rows - row;
            if row == 0 {
                continue;
            }

            let owner = board.cell(row - 1, column);
            let mut run = 0i32;
            while row > 0 && board.cell(row - 1, column) == owner {
                run += 1;
                row -= 1;
            }

            if empty_above + run as usize >= self.alignment {
                let contribution = run * run * COLUMN_WEIGHT;
                score += if owner == self.my_cell {
                    contribution
                } else {
                    -contribution
                };
            }
        }
        score
    }

    // same single-owner window rule as the rows, along both diagonals
    fn diagonal_score(&self, board: &dyn Board) -> i32 {
        let mut score = 0;
        let x = self.alignment;
        for row in 0..(self.rows + 1).saturating_sub(x) {
            // ascending: up and to the right
            for col in 0..(self.columns + 1).saturating_sub(x) {
                score += self.window_score(DIAGONAL_WEIGHT, |i| board.cell(row + i, col + i));
            }
            // descending: up and to the left
            for col in (x - 1)..self.columns {
                score += self.window_score(DIAGONAL_WEIGHT, |i| board.cell(row + i, col - i));
            }
        }
        score
    }

    // a window counts only when exactly one player has tokens in it,
    // contributing the square of the token count
    fn window_score(&self, weight: i32, cell_at: impl Fn(usize) -> Cell) -> i32 {
        let mut mine = 0i32;
        let mut yours = 0i32;
        for i in 0..self.alignment {
            let cell = cell_at(i);
            if cell == self.my_cell {
                mine += 1;
            } else if cell == self.your_cell {
                yours += 1;
            }
        }
        if mine > 0 && yours == 0 {
            mine * mine * weight
        } else if yours > 0 && mine == 0 {
            -(yours * yours * weight)
        } else {
            0
        }
    }
}
