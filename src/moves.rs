//! Legal-move generation.
//!
//! Every vehicle has exactly two candidate directions, the ones along its
//! own orientation. A shift by one step is legal when each target cell is
//! in bounds and empty, with one exception: the primary piece's leading
//! cell may land on the exit cell just outside the grid. That exit step is
//! the only way any vehicle leaves the board, and a piece that has started
//! leaving never moves again.
//!
//! Enumeration order is fixed (vehicle insertion order, then the negative
//! direction before the positive one) so that frontier tie-breaking in the
//! search engine is deterministic.

use crate::board::{BoardState, Direction, Orientation, VehicleId};
use smallvec::SmallVec;

/// A single-step move of one vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub vehicle: VehicleId,
    pub direction: Direction,
}

/// A successor state together with the move that produced it.
#[derive(Debug, Clone)]
pub struct Successor {
    pub state: BoardState,
    pub mv: Move,
}

impl BoardState {
    /// Enumerate all legal one-step transitions from this state.
    ///
    /// Each returned state is a fresh value owning its own grid and vehicle
    /// list; later moves can never observe or mutate it.
    pub fn legal_moves(&self) -> Vec<Successor> {
        let mut successors = Vec::new();
        for (idx, vehicle) in self.vehicles.iter().enumerate() {
            let directions = match vehicle.orientation {
                Orientation::Horizontal => [Direction::Left, Direction::Right],
                Orientation::Vertical => [Direction::Up, Direction::Down],
            };
            for direction in directions {
                if let Some(state) = self.apply_move(idx, direction) {
                    successors.push(Successor {
                        state,
                        mv: Move {
                            vehicle: vehicle.id,
                            direction,
                        },
                    });
                }
            }
        }
        successors
    }

    /// Shift one vehicle a single step, returning the resulting state or
    /// `None` when the move is blocked.
    fn apply_move(&self, idx: usize, direction: Direction) -> Option<BoardState> {
        let vehicle = &self.vehicles[idx];

        // A piece partway through the exit is off the board for good.
        if vehicle.positions.iter().any(|&p| !self.grid.in_bounds(p)) {
            return None;
        }

        // Work on a grid with the vehicle lifted off, so the cells it
        // vacates read as empty.
        let mut grid = self.grid.clone();
        for &pos in &vehicle.positions {
            grid.clear(pos);
        }

        let mut new_positions: SmallVec<[_; 4]> = SmallVec::new();
        for &pos in &vehicle.positions {
            let target = pos.step(direction);
            let legal = if grid.in_bounds(target) {
                grid.cell(target).is_none()
            } else {
                vehicle.is_primary && target == self.exit
            };
            if !legal {
                return None;
            }
            new_positions.push(target);
        }

        for &pos in &new_positions {
            if grid.in_bounds(pos) {
                grid.set(pos, vehicle.id);
            }
        }
        let mut vehicles = self.vehicles.clone();
        vehicles[idx].positions = new_positions;
        Some(BoardState::from_parts(grid, vehicles, self.primary, self.exit))
    }
}
