use rand::Rng;

use std::collections::HashMap;

use crate::board::{Board, Cell};

// cell occupancies are indexed 0..3 in the value table
const CELL_STATES: usize = 3;

/// Random table for fingerprinting board occupancy.
///
/// Holds one independent 64-bit value per (row, column, occupancy) triple,
/// generated once per match and immutable afterwards.
pub struct ZobristTable {
    rows: usize,
    columns: usize,
    values: Vec<u64>,
}

impl ZobristTable {
    pub fn new(rows: usize, columns: usize) -> Self {
        let mut rng = rand::rng();
        let values = (0..rows * columns * CELL_STATES)
            .map(|_| rng.random())
            .collect();
        Self {
            rows,
            columns,
            values,
        }
    }

    /// Recomputes the position fingerprint from scratch by folding every
    /// cell's occupancy value together with XOR. The result depends only on
    /// the occupancy pattern, not on the move order that produced it.
    pub fn fingerprint(&self, board: &dyn Board) -> u64 {
        let mut hash = 0;
        for row in 0..self.rows {
            for column in 0..self.columns {
                let state = match board.cell(row, column) {
                    Cell::PlayerOne => 0,
                    Cell::PlayerTwo => 1,
                    Cell::Empty => 2,
                };
                hash ^= self.values[(row * self.columns + column) * CELL_STATES + state];
            }
        }
        hash
    }
}

#[derive(Copy, Clone, Debug)]
pub struct TranspositionEntry {
    pub fingerprint: u64,
    pub evaluation: i32,
    pub depth: u32,
}

/// Evaluation cache keyed by position fingerprint.
///
/// Unbounded: entries are overwritten but never evicted, and the table is
/// dropped with the engine at the end of the match.
pub struct TranspositionTable {
    entries: HashMap<u64, TranspositionEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the stored evaluation only if it was computed at `depth` or
    /// deeper; a shallower entry never answers a deeper query.
    pub fn get(&self, fingerprint: u64, depth: u32) -> Option<i32> {
        self.entries
            .get(&fingerprint)
            .filter(|entry| entry.depth >= depth)
            .map(|entry| entry.evaluation)
    }

    pub fn store(&mut self, fingerprint: u64, evaluation: i32, depth: u32) {
        self.entries.insert(
            fingerprint,
            TranspositionEntry {
                fingerprint,
                evaluation,
                depth,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
