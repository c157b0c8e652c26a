//! An agent to pick columns under a wall-clock budget

use anyhow::{bail, Result};
use log::debug;

use std::time::{Duration, Instant};

use crate::board::{Board, GameState};
use crate::eval::Evaluator;
use crate::transposition_table::{TranspositionTable, ZobristTable};

// fraction of the move budget spent before the search starts unwinding
const BUDGET_MARGIN: f64 = 0.98;

/// Returns the column visiting order for a board of the given width: the
/// center column first, then alternating outward. Central columns join
/// more potential alignments, so searching them first tightens the
/// alpha-beta bounds earlier and prunes more.
pub fn column_order(columns: usize) -> Vec<usize> {
    let midpoint = columns / 2;
    let mut order = Vec::with_capacity(columns);

    order.push(midpoint);
    // an even width has two central columns
    let low_midpoint = if columns % 2 == 0 {
        order.push(midpoint - 1);
        midpoint - 1
    } else {
        midpoint
    };

    let mut offset = 1;
    while order.len() < columns {
        order.push(low_midpoint - offset);
        order.push(midpoint + offset);
        offset += 1;
    }
    order
}

/// A software player for connection games on an M×N gravity board
///
/// # Notes
/// One engine instance serves one seat for one match: construction fixes
/// which tokens are "ours", the per-move time budget, and the match-scoped
/// search state (Zobrist table and transposition cache). Each call to
/// [`choose_move`](Engine::choose_move) deepens an alpha-beta search until
/// the budget nears exhaustion.
///
/// # Position Scoring
/// Positions are scored from this engine's point of view: a won position
/// maps to the maximum sentinel, a lost one to the minimum, a draw to 0,
/// and anything else to a heuristic count of alignment potential strictly
/// between the sentinels.
pub struct Engine {
    columns: usize,
    soft_budget: Duration,
    move_started: Instant,
    move_order: Vec<usize>,
    evaluator: Evaluator,
    zobrist: ZobristTable,
    cache: TranspositionTable,

    /// The number of nodes searched by this `Engine` so far (for diagnostics only)
    pub node_count: usize,
}

impl Engine {
    /// One-time setup for a match seat.
    ///
    /// `first_player` states whether this engine moves first, which fixes
    /// the token color and win classification counted as "ours" for the
    /// whole match. `timeout` is the wall-clock budget for each
    /// [`choose_move`](Engine::choose_move) call.
    pub fn new(
        rows: usize,
        columns: usize,
        alignment: usize,
        first_player: bool,
        timeout: Duration,
    ) -> Result<Self> {
        if rows == 0 || columns == 0 {
            bail!("the board needs at least one row and one column");
        }
        if alignment < 2 {
            bail!("alignments shorter than 2 make every move a win");
        }
        if alignment > rows && alignment > columns {
            bail!(
                "{} tokens can never align on a {}x{} board",
                alignment,
                rows,
                columns
            );
        }
        if timeout.is_zero() {
            bail!("the move budget must be positive");
        }

        Ok(Self {
            columns,
            soft_budget: timeout.mul_f64(BUDGET_MARGIN),
            move_started: Instant::now(),
            move_order: column_order(columns),
            evaluator: Evaluator::new(rows, columns, alignment, first_player),
            zobrist: ZobristTable::new(rows, columns),
            cache: TranspositionTable::new(),
            node_count: 0,
        })
    }

    /// Static identity string reported to the host
    pub fn name() -> &'static str {
        "connectx-ai"
    }

    /// Picks a column for the current position within the move budget.
    ///
    /// An untouched board short-circuits to the center column. Otherwise
    /// the search deepens iteratively, sweeping every legal root move at
    /// each depth, until the budget nears exhaustion; the budget is polled
    /// between root moves and inside every recursive call. If it expires
    /// before depth 1 finishes a single move, the first legal column
    /// stands as a safe fallback.
    ///
    /// The best column and score persist across deepening iterations, so a
    /// mid-sweep deadline can mix evaluations from different depths. This
    /// is accepted behavior, not a special case.
    pub fn choose_move(&mut self, board: &mut dyn Board) -> Result<usize> {
        self.move_started = Instant::now();

        if board.occupied_cells() == 0 {
            return Ok(self.columns / 2);
        }

        let legal = board.legal_columns();
        let mut best_column = match legal.first() {
            Some(&column) => column,
            None => bail!("no legal move: every column is full"),
        };
        let mut best_score = i32::MIN;
        let mut depth = 1;

        while !self.out_of_time() {
            for i in 0..self.move_order.len() {
                let column = self.move_order[i];
                if board.is_column_full(column) {
                    continue;
                }
                if self.out_of_time() {
                    break;
                }

                board.apply_move(column);
                let score = self.search(board, i32::MIN, i32::MAX, depth - 1, false);
                board.undo_last_move();

                if score > best_score {
                    best_score = score;
                    best_column = column;
                }
            }

            debug!(
                "depth {}: best column {} scoring {} ({} nodes, {} cached)",
                depth,
                best_column,
                best_score,
                self.node_count,
                self.cache.len()
            );
            depth += 1;
        }

        Ok(best_column)
    }

    /// Performs game tree search
    ///
    /// Returns the score of the position (see [Position Scoring])
    ///
    /// [Position Scoring]: #position-scoring
    pub(crate) fn search(
        &mut self,
        board: &mut dyn Board,
        mut alpha: i32,
        mut beta: i32,
        depth: u32,
        maximizing: bool,
    ) -> i32 {
        self.node_count += 1;

        // a cached evaluation satisfies the query only if it searched at
        // least as deep as we are about to
        let fingerprint = self.zobrist.fingerprint(board);
        if let Some(evaluation) = self.cache.get(fingerprint, depth) {
            return evaluation;
        }

        if depth == 0 || board.state() != GameState::Playing || self.out_of_time() {
            let evaluation = self.evaluator.score(board);
            self.cache.store(fingerprint, evaluation, depth);
            return evaluation;
        }

        if maximizing {
            let mut value = i32::MIN;
            for i in 0..self.move_order.len() {
                let column = self.move_order[i];
                if board.is_column_full(column) {
                    continue;
                }
                board.apply_move(column);
                value = value.max(self.search(board, alpha, beta, depth - 1, false));
                board.undo_last_move();
                if value >= beta {
                    // the minimizing parent will never allow this line
                    break;
                }
                alpha = alpha.max(value);
            }
            value
        } else {
            let mut value = i32::MAX;
            for i in 0..self.move_order.len() {
                let column = self.move_order[i];
                if board.is_column_full(column) {
                    continue;
                }
                board.apply_move(column);
                value = value.min(self.search(board, alpha, beta, depth - 1, true));
                board.undo_last_move();
                if value <= alpha {
                    // the maximizing parent will never allow this line
                    break;
                }
                beta = beta.min(value);
            }
            value
        }
    }

    // once this trips, every pending search frame unwinds through the
    // cutoff path, undoing its move on the way out
    fn out_of_time(&self) -> bool {
        self.move_started.elapsed() >= self.soft_budget
    }
}
