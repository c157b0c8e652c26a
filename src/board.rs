use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

/// The board surface the search engine plays on.
///
/// The host owns the position; the engine only observes cells and drives
/// `apply_move`/`undo_last_move` as a strict stack protocol: every applied
/// move must be undone, in reverse order, before control returns to the
/// host. Columns fill bottom-up, with row 0 at the bottom.
pub trait Board {
    fn cell(&self, row: usize, column: usize) -> Cell;
    fn legal_columns(&self) -> Vec<usize>;
    fn is_column_full(&self, column: usize) -> bool;
    fn occupied_cells(&self) -> usize;
    fn apply_move(&mut self, column: usize);
    fn undo_last_move(&mut self);
    fn state(&self) -> GameState;
}

#[derive(Clone)]
pub struct ArrayBoard {
    cells: Vec<Cell>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
    rows: usize,
    columns: usize,
    alignment: usize,
    pub player_one: bool,
    // column played and the state it was played from, for undo
    history: Vec<(usize, GameState)>,
    num_moves: usize,
    pub state: GameState,
}

impl ArrayBoard {
    pub fn new(rows: usize, columns: usize, alignment: usize) -> Self {
        Self {
            cells: vec![Cell::Empty; rows * columns],
            heights: vec![0; columns],
            rows,
            columns,
            alignment,
            player_one: true,
            history: Vec::new(),
            num_moves: 0,
            state: GameState::Playing,
        }
    }

    pub fn from_str(rows: usize, columns: usize, alignment: usize, moves: &str) -> Result<Self> {
        let mut board = Self::new(rows, columns, alignment);

        for column_char in moves.chars() {
            match column_char.to_digit(10) {
                Some(column) => {
                    let _ = board.play_checked(column as usize)?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Validated move entry for the host: columns are one-indexed here,
    /// matching what a player types at the prompt.
    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState> {
        if !matches!(self.state, GameState::Playing) {
            return Err(anyhow!("Invalid move, the game is over"));
        }
        if column_one_indexed < 1 || column_one_indexed > self.columns {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                self.columns
            ));
        }
        let column = column_one_indexed - 1;
        if !self.playable(column) {
            return Err(anyhow!("Invalid move, column {} full", column_one_indexed));
        }

        self.apply_move(column);

        Ok(self.state)
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        let cols: String = (1..=self.columns).map(|x| x.to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..self.rows {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for (idx, cell) in self.cells.iter().enumerate() {
            let (pos_x, pos_y) = (
                origin_x + (idx % self.columns) as u16,
                origin_y - (idx / self.columns) as u16,
            );

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match cell {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
        }
        stdout
            .queue(MoveTo(origin_x + self.columns as u16, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }

    fn playable(&self, column: usize) -> bool {
        self.heights[column] < self.rows
    }

    // would dropping a token in this column win for the player to move?
    fn check_winning_move(&self, column: usize) -> bool {
        let player = if self.player_one {
            Cell::PlayerOne
        } else {
            Cell::PlayerTwo
        };
        let needed = self.alignment - 1;

        // check vertical alignment below the landing cell
        if self.heights[column] >= needed
            && (1..=needed)
                .all(|d| self.cells[column + self.columns * (self.heights[column] - d)] == player)
        {
            return true;
        }

        // check horizontal and diagonal alignment through the landing cell
        for dy_dx in -1i32..=1 {
            let mut run = 0;
            for dx in [-1i32, 1].iter() {
                let mut x = column as i32 + dx;
                let mut y = self.heights[column] as i32 + dx * dy_dx;
                loop {
                    if x < 0
                        || x >= self.columns as i32
                        || y < 0
                        || y >= self.rows as i32
                        || self.cells[x as usize + self.columns * y as usize] != player
                    {
                        break;
                    }
                    x += dx;
                    y += dx * dy_dx;
                    run += 1;
                }
            }
            if run >= needed {
                return true;
            }
        }

        false
    }
}

impl Board for ArrayBoard {
    fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[column + self.columns * row]
    }

    fn legal_columns(&self) -> Vec<usize> {
        (0..self.columns).filter(|&c| self.playable(c)).collect()
    }

    fn is_column_full(&self, column: usize) -> bool {
        !self.playable(column)
    }

    fn occupied_cells(&self) -> usize {
        self.num_moves
    }

    fn apply_move(&mut self, column: usize) {
        let player = if self.player_one {
            Cell::PlayerOne
        } else {
            Cell::PlayerTwo
        };
        self.history.push((column, self.state));
        let winning = self.check_winning_move(column);

        self.cells[column + self.columns * self.heights[column]] = player;
        self.heights[column] += 1;
        self.num_moves += 1;

        self.state = if winning {
            if self.player_one {
                GameState::PlayerOneWin
            } else {
                GameState::PlayerTwoWin
            }
        } else if self.num_moves == self.rows * self.columns {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.player_one = !self.player_one;
    }

    fn undo_last_move(&mut self) {
        let (column, prior_state) = self
            .history
            .pop()
            .expect("undo_last_move called without a matching apply_move");
        self.heights[column] -= 1;
        self.cells[column + self.columns * self.heights[column]] = Cell::Empty;
        self.num_moves -= 1;
        self.player_one = !self.player_one;
        self.state = prior_state;
    }

    fn state(&self) -> GameState {
        self.state
    }
}
