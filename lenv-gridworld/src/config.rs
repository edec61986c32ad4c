//! Configuration of [`GridWorld`](super::GridWorld).
use crate::Tile;
use lenv_core::{EnvConfig, EnvError};
use serde::{Deserialize, Serialize};

/// Configuration of [`GridWorld`](super::GridWorld).
///
/// The default grid has 4 columns and 3 rows, the agent starts in the top-left
/// corner:
///
/// ```text
/// 0 0 0 2
/// 0 0 3 3
/// 0 0 0 1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridWorldConfig {
    /// Rows of the grid.
    pub grid: Vec<Vec<Tile>>,

    /// Start cell, `[column, row]`.
    pub start: [usize; 2],

    /// Reward for entering a good tile.
    pub good_reward: f64,

    /// Reward for entering a bad tile.
    pub bad_reward: f64,
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        use crate::Tile::{Accessible as O, Bad as B, Good as G, Inaccessible as X};

        Self {
            grid: vec![vec![O, O, O, B], vec![O, O, X, X], vec![O, O, O, G]],
            start: [0, 0],
            good_reward: 100.0,
            bad_reward: -100.0,
        }
    }
}

impl GridWorldConfig {
    /// Sets the rows of the grid.
    pub fn grid(mut self, grid: Vec<Vec<Tile>>) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the start cell.
    pub fn start(mut self, column: usize, row: usize) -> Self {
        self.start = [column, row];
        self
    }

    /// Sets the reward for entering a good tile.
    pub fn good_reward(mut self, v: f64) -> Self {
        self.good_reward = v;
        self
    }

    /// Sets the reward for entering a bad tile.
    pub fn bad_reward(mut self, v: f64) -> Self {
        self.bad_reward = v;
        self
    }

    /// Returns `(columns, rows)`.
    pub fn size(&self) -> (usize, usize) {
        (self.grid.first().map_or(0, Vec::len), self.grid.len())
    }

    /// Returns the tile at `(column, row)`, `None` outside of the grid.
    pub fn tile(&self, column: usize, row: usize) -> Option<Tile> {
        self.grid.get(row).and_then(|r| r.get(column)).copied()
    }
}

impl EnvConfig for GridWorldConfig {
    fn validate(&self) -> Result<(), EnvError> {
        let (columns, rows) = self.size();
        if rows == 0 || columns == 0 {
            return Err(EnvError::Config("the grid is empty".to_string()));
        }
        if let Some(row) = self.grid.iter().position(|r| r.len() != columns) {
            return Err(EnvError::Config(format!(
                "row {} has {} tiles, expected {}",
                row,
                self.grid[row].len(),
                columns
            )));
        }
        match self.tile(self.start[0], self.start[1]) {
            Some(Tile::Accessible) => Ok(()),
            Some(tile) => Err(EnvError::Config(format!(
                "start cell {:?} is {:?}, expected an accessible tile",
                self.start, tile
            ))),
            None => Err(EnvError::Config(format!(
                "start cell {:?} is outside of the {}x{} grid",
                self.start, columns, rows
            ))),
        }
    }
}
