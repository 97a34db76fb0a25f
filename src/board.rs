//! Board representation for Rush Hour puzzles.
//!
//! A board is a rectangular grid occupied by straight-line vehicles, one of
//! which is the primary piece that must reach the exit. States are immutable
//! values: the search engine holds many of them at once, so a move never
//! mutates its source state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashSet;
use thiserror::Error;

/// Single-character vehicle identifier, unique within a puzzle.
pub type VehicleId = char;

/// A grid cell coordinate. The exit cell lies one step outside the grid,
/// so both coordinates are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The position one step away in the given direction.
    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

/// Axis a vehicle is allowed to move along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One of the four single-step move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Row/column delta of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// The axis this direction moves along.
    pub fn axis(self) -> Orientation {
        match self {
            Direction::Left | Direction::Right => Orientation::Horizontal,
            Direction::Up | Direction::Down => Orientation::Vertical,
        }
    }
}

/// Cell occupancy, row-major. Equality and hashing over the cell array is
/// the state-deduplication key for the search engine: two states are the
/// same state iff their grids are cell-for-cell identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<Option<VehicleId>>,
}

impl Grid {
    fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; (rows * cols) as usize],
        }
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    /// Occupant of a cell, `None` when empty or out of bounds.
    pub fn cell(&self, pos: Position) -> Option<VehicleId> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells[(pos.row * self.cols + pos.col) as usize]
    }

    pub(crate) fn set(&mut self, pos: Position, id: VehicleId) {
        self.cells[(pos.row * self.cols + pos.col) as usize] = Some(id);
    }

    pub(crate) fn clear(&mut self, pos: Position) {
        self.cells[(pos.row * self.cols + pos.col) as usize] = None;
    }

    /// Render the grid as one string per row, `.` for empty cells.
    pub fn render(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| self.cell(Position::new(row, col)).unwrap_or('.'))
                    .collect()
            })
            .collect()
    }
}

/// A rigid straight-line piece. Positions are kept sorted ascending along
/// the varying coordinate, so `positions[0]` and the last entry are the two
/// ends of the vehicle.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    pub orientation: Orientation,
    pub positions: SmallVec<[Position; 4]>,
    pub is_primary: bool,
}

impl Vehicle {
    pub fn front(&self) -> Position {
        self.positions[0]
    }

    pub fn back(&self) -> Position {
        self.positions[self.positions.len() - 1]
    }
}

/// Reasons a puzzle description cannot form a valid board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: i32, cols: i32 },
    #[error("vehicle '{0}' occupies no cells")]
    EmptyVehicle(VehicleId),
    #[error("non-primary vehicle '{0}' must occupy at least 2 cells")]
    TooSmall(VehicleId),
    #[error("vehicle '{0}' cells are not contiguous along its orientation")]
    NotContiguous(VehicleId),
    #[error("duplicate vehicle id '{0}'")]
    DuplicateId(VehicleId),
    #[error("vehicle '{id}' is out of bounds at ({row}, {col})")]
    OutOfBounds { id: VehicleId, row: i32, col: i32 },
    #[error("vehicles '{first}' and '{second}' overlap at ({row}, {col})")]
    Overlap {
        first: VehicleId,
        second: VehicleId,
        row: i32,
        col: i32,
    },
    #[error("no vehicle is marked as the primary piece")]
    NoPrimary,
    #[error("more than one vehicle is marked as the primary piece")]
    MultiplePrimaries,
    #[error("exit at ({row}, {col}) is not one step beyond the border in line with the primary piece")]
    ExitMisaligned { row: i32, col: i32 },
}

/// One immutable snapshot of the puzzle.
///
/// Equality and hashing delegate to the grid: vehicle bookkeeping is derived
/// from cell occupancy and is not part of the deduplication key. The exit
/// cell never changes across the states of one puzzle.
#[derive(Debug, Clone)]
pub struct BoardState {
    pub(crate) grid: Grid,
    pub(crate) vehicles: Vec<Vehicle>,
    pub(crate) primary: usize,
    pub(crate) exit: Position,
}

impl PartialEq for BoardState {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
    }
}

impl Eq for BoardState {}

impl std::hash::Hash for BoardState {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.grid.hash(state);
    }
}

impl BoardState {
    /// Build and validate an initial state.
    ///
    /// This is the only way to obtain a `BoardState` from outside the crate,
    /// so every state the search engine ever sees satisfies the board
    /// invariants by construction. Vehicle positions are sorted along the
    /// varying coordinate; the exit must be exactly one step beyond the
    /// border, in the primary piece's row or column.
    pub fn new(
        rows: i32,
        cols: i32,
        mut vehicles: Vec<Vehicle>,
        exit: Position,
    ) -> Result<Self, BoardError> {
        if rows <= 0 || cols <= 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }

        let mut primary = None;
        let mut seen_ids = HashSet::new();
        for (idx, vehicle) in vehicles.iter_mut().enumerate() {
            if vehicle.positions.is_empty() {
                return Err(BoardError::EmptyVehicle(vehicle.id));
            }
            if !vehicle.is_primary && vehicle.positions.len() < 2 {
                return Err(BoardError::TooSmall(vehicle.id));
            }
            if !seen_ids.insert(vehicle.id) {
                return Err(BoardError::DuplicateId(vehicle.id));
            }
            match vehicle.orientation {
                Orientation::Horizontal => vehicle.positions.sort_by_key(|p| p.col),
                Orientation::Vertical => vehicle.positions.sort_by_key(|p| p.row),
            }
            for pair in vehicle.positions.windows(2) {
                let contiguous = match vehicle.orientation {
                    Orientation::Horizontal => {
                        pair[1].row == pair[0].row && pair[1].col == pair[0].col + 1
                    }
                    Orientation::Vertical => {
                        pair[1].col == pair[0].col && pair[1].row == pair[0].row + 1
                    }
                };
                if !contiguous {
                    return Err(BoardError::NotContiguous(vehicle.id));
                }
            }
            if vehicle.is_primary && primary.replace(idx).is_some() {
                return Err(BoardError::MultiplePrimaries);
            }
        }
        let primary = primary.ok_or(BoardError::NoPrimary)?;

        let mut grid = Grid::new(rows, cols);
        for vehicle in &vehicles {
            for &pos in &vehicle.positions {
                if !grid.in_bounds(pos) {
                    return Err(BoardError::OutOfBounds {
                        id: vehicle.id,
                        row: pos.row,
                        col: pos.col,
                    });
                }
                if let Some(first) = grid.cell(pos) {
                    return Err(BoardError::Overlap {
                        first,
                        second: vehicle.id,
                        row: pos.row,
                        col: pos.col,
                    });
                }
                grid.set(pos, vehicle.id);
            }
        }

        let piece = &vehicles[primary];
        let aligned = match piece.orientation {
            Orientation::Horizontal => {
                exit.row == piece.front().row && (exit.col == -1 || exit.col == cols)
            }
            Orientation::Vertical => {
                exit.col == piece.front().col && (exit.row == -1 || exit.row == rows)
            }
        };
        if !aligned {
            return Err(BoardError::ExitMisaligned {
                row: exit.row,
                col: exit.col,
            });
        }

        Ok(Self {
            grid,
            vehicles,
            primary,
            exit,
        })
    }

    /// Assemble a successor state from already-consistent parts.
    pub(crate) fn from_parts(
        grid: Grid,
        vehicles: Vec<Vehicle>,
        primary: usize,
        exit: Position,
    ) -> Self {
        Self {
            grid,
            vehicles,
            primary,
            exit,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn primary(&self) -> &Vehicle {
        &self.vehicles[self.primary]
    }

    pub fn exit(&self) -> Position {
        self.exit
    }

    /// Which way the primary piece must travel to reach the exit.
    pub fn exit_direction(&self) -> Direction {
        match self.primary().orientation {
            Orientation::Horizontal => {
                if self.exit.col < 0 {
                    Direction::Left
                } else {
                    Direction::Right
                }
            }
            Orientation::Vertical => {
                if self.exit.row < 0 {
                    Direction::Up
                } else {
                    Direction::Down
                }
            }
        }
    }

    /// The primary piece's cell nearest the exit.
    pub fn leading_cell(&self) -> Position {
        let primary = self.primary();
        match self.exit_direction() {
            Direction::Left | Direction::Up => primary.front(),
            Direction::Right | Direction::Down => primary.back(),
        }
    }

    /// Goal test: the primary piece's leading cell is the border cell
    /// adjacent to the exit, or the exit cell itself once the piece has
    /// started leaving the grid. Depends only on the piece's positions and
    /// the exit, never on how the state was reached.
    pub fn is_solved(&self) -> bool {
        let lead = self.leading_cell();
        lead == self.exit || lead.step(self.exit_direction()) == self.exit
    }
}
