//! Heuristic library for the informed search strategies.
//!
//! All four heuristics are non-negative, pure functions of a state. Only
//! `distance` is admissible (a true lower bound on remaining moves). The
//! others deliberately trade accuracy for expansion speed and may
//! overestimate; greedy and A* runs pick whichever trade-off the caller
//! wants, so the estimator is injected per run rather than hard-coded.

use crate::board::{BoardState, Orientation, Position, Vehicle, VehicleId};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Caller-selectable heuristic variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum Heuristic {
    /// Manhattan distance from the primary piece's leading cell to the
    /// border cell in front of the exit. Admissible.
    Distance,
    /// Count of distinct vehicles between the primary piece and the exit.
    Blocking,
    /// Sum of `Distance` and `Blocking`.
    Combined,
    /// Blocking count weighted by how obstructed each blocker itself is.
    PathComplexity,
}

impl Heuristic {
    /// Estimated remaining effort for a state. Zero at any solved state
    /// for the admissible variant; the others only promise non-negative.
    pub fn evaluate(self, state: &BoardState) -> f32 {
        match self {
            Heuristic::Distance => distance_to_exit(state) as f32,
            Heuristic::Blocking => blocking_vehicles(state) as f32,
            Heuristic::Combined => (distance_to_exit(state) + blocking_vehicles(state)) as f32,
            Heuristic::PathComplexity => path_complexity(state),
        }
    }
}

/// Moves still needed by the primary piece alone: the gap between its
/// leading cell and the border cell in front of the exit.
pub fn distance_to_exit(state: &BoardState) -> u32 {
    let lead = state.leading_cell();
    let exit = state.exit();
    let manhattan = (lead.row - exit.row).abs() + (lead.col - exit.col).abs();
    (manhattan as u32).saturating_sub(1)
}

/// Distinct vehicles occupying cells between the primary piece's leading
/// edge and the exit, along the exit axis.
pub fn blocking_vehicles(state: &BoardState) -> u32 {
    blocking_ids(state).len() as u32
}

/// Blocking count plus 0.5 for every secondary blocker, a vehicle that is
/// itself the nearest obstruction beyond either end of a primary blocker.
/// Approximates the extra moves needed to clear an obstructed blocker.
pub fn path_complexity(state: &BoardState) -> f32 {
    let blockers = blocking_ids(state);
    if blockers.is_empty() {
        return 0.0;
    }
    let mut complexity = blockers.len() as f32;
    for id in &blockers {
        if let Some(vehicle) = state.vehicles().iter().find(|v| v.id == *id) {
            complexity += secondary_blockers(state, vehicle) as f32 * 0.5;
        }
    }
    complexity
}

/// Ids of the vehicles sitting on the exit path, in the order encountered
/// walking from the leading cell toward the exit.
fn blocking_ids(state: &BoardState) -> SmallVec<[VehicleId; 4]> {
    let direction = state.exit_direction();
    let primary_id = state.primary().id;
    let mut ids: SmallVec<[VehicleId; 4]> = SmallVec::new();
    let mut pos = state.leading_cell().step(direction);
    while state.grid().in_bounds(pos) {
        if let Some(id) = state.grid().cell(pos) {
            if id != primary_id && !ids.contains(&id) {
                ids.push(id);
            }
        }
        pos = pos.step(direction);
    }
    ids
}

/// Nearest obstruction beyond each end of a vehicle, along its own axis.
/// The primary piece counts as an obstruction like any other.
fn secondary_blockers(state: &BoardState, vehicle: &Vehicle) -> u32 {
    let (dr, dc) = match vehicle.orientation {
        Orientation::Horizontal => (0, 1),
        Orientation::Vertical => (1, 0),
    };
    let mut ids: SmallVec<[VehicleId; 2]> = SmallVec::new();
    let scans = [
        (vehicle.front(), (-dr, -dc)),
        (vehicle.back(), (dr, dc)),
    ];
    for (start, (sr, sc)) in scans {
        let mut pos = Position::new(start.row + sr, start.col + sc);
        while state.grid().in_bounds(pos) {
            if let Some(id) = state.grid().cell(pos) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
                break;
            }
            pos = Position::new(pos.row + sr, pos.col + sc);
        }
    }
    ids.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: char, orientation: Orientation, cells: &[(i32, i32)], is_primary: bool) -> Vehicle {
        Vehicle {
            id,
            orientation,
            positions: cells.iter().map(|&(r, c)| Position::new(r, c)).collect(),
            is_primary,
        }
    }

    fn board(vehicles: Vec<Vehicle>, exit: (i32, i32)) -> BoardState {
        BoardState::new(6, 6, vehicles, Position::new(exit.0, exit.1)).unwrap()
    }

    #[test]
    fn test_distance_counts_cells_to_border() {
        let state = board(
            vec![vehicle('P', Orientation::Horizontal, &[(2, 0), (2, 1)], true)],
            (2, 6),
        );
        // Leading cell at col 1, border cell at col 5.
        assert_eq!(distance_to_exit(&state), 4);
    }

    #[test]
    fn test_distance_zero_at_goal() {
        let state = board(
            vec![vehicle('P', Orientation::Horizontal, &[(2, 4), (2, 5)], true)],
            (2, 6),
        );
        assert!(state.is_solved());
        assert_eq!(distance_to_exit(&state), 0);
    }

    #[test]
    fn test_distance_toward_left_exit() {
        let state = board(
            vec![vehicle('P', Orientation::Horizontal, &[(1, 2), (1, 3)], true)],
            (1, -1),
        );
        // Leading cell at col 2, border cell at col 0.
        assert_eq!(distance_to_exit(&state), 2);
    }

    #[test]
    fn test_blocking_counts_distinct_vehicles() {
        let state = board(
            vec![
                vehicle('P', Orientation::Horizontal, &[(2, 0), (2, 1)], true),
                vehicle('A', Orientation::Vertical, &[(2, 3), (3, 3)], false),
                vehicle('B', Orientation::Vertical, &[(1, 5), (2, 5)], false),
                // Not on the exit row: must not count.
                vehicle('C', Orientation::Horizontal, &[(4, 2), (4, 3)], false),
            ],
            (2, 6),
        );
        assert_eq!(blocking_vehicles(&state), 2);
    }

    #[test]
    fn test_blocking_zero_with_clear_path() {
        let state = board(
            vec![
                vehicle('P', Orientation::Horizontal, &[(2, 0), (2, 1)], true),
                vehicle('C', Orientation::Horizontal, &[(4, 2), (4, 3)], false),
            ],
            (2, 6),
        );
        assert_eq!(blocking_vehicles(&state), 0);
    }

    #[test]
    fn test_combined_is_sum() {
        let state = board(
            vec![
                vehicle('P', Orientation::Horizontal, &[(2, 0), (2, 1)], true),
                vehicle('A', Orientation::Vertical, &[(2, 3), (3, 3)], false),
            ],
            (2, 6),
        );
        assert_eq!(
            Heuristic::Combined.evaluate(&state),
            Heuristic::Distance.evaluate(&state) + Heuristic::Blocking.evaluate(&state)
        );
    }

    #[test]
    fn test_path_complexity_without_secondary_blockers() {
        let state = board(
            vec![
                vehicle('P', Orientation::Horizontal, &[(2, 3), (2, 4)], true),
                vehicle('A', Orientation::Vertical, &[(2, 5), (3, 5)], false),
            ],
            (2, 6),
        );
        // One free blocker, nothing beyond either of its ends.
        assert_eq!(path_complexity(&state), 1.0);
    }

    #[test]
    fn test_path_complexity_adds_half_per_secondary_blocker() {
        let state = board(
            vec![
                vehicle('P', Orientation::Horizontal, &[(2, 3), (2, 4)], true),
                vehicle('A', Orientation::Vertical, &[(2, 5), (3, 5)], false),
                // Nearest obstruction below A.
                vehicle('B', Orientation::Horizontal, &[(4, 4), (4, 5)], false),
            ],
            (2, 6),
        );
        assert_eq!(path_complexity(&state), 1.5);
    }

    #[test]
    fn test_path_complexity_zero_without_blockers() {
        let state = board(
            vec![
                vehicle('P', Orientation::Horizontal, &[(2, 0), (2, 1)], true),
                vehicle('B', Orientation::Horizontal, &[(4, 4), (4, 5)], false),
            ],
            (2, 6),
        );
        assert_eq!(path_complexity(&state), 0.0);
    }

    #[test]
    fn test_all_heuristics_non_negative_and_injectable() {
        let state = board(
            vec![
                vehicle('P', Orientation::Horizontal, &[(2, 0), (2, 1)], true),
                vehicle('A', Orientation::Vertical, &[(2, 3), (3, 3)], false),
            ],
            (2, 6),
        );
        for h in [
            Heuristic::Distance,
            Heuristic::Blocking,
            Heuristic::Combined,
            Heuristic::PathComplexity,
        ] {
            assert!(h.evaluate(&state) >= 0.0);
        }
    }
}
