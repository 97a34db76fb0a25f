//! Puzzle description format at the parser/core boundary.
//!
//! Upstream tooling hands the solver a JSON document naming the grid
//! dimensions, the vehicles and the exit cell. The exit is encoded
//! explicitly as the cell one step beyond the border the primary piece
//! leaves through, e.g. `{"row": 2, "col": 6}` on a 6x6 board; nothing is
//! inferred from the grid. Deserialization plus [`PuzzleConfig::into_state`]
//! either yields a state satisfying every board invariant or fails, so the
//! search core never re-validates.

use crate::board::{BoardError, BoardState, Orientation, Position, Vehicle, VehicleId};
use serde::{Deserialize, Serialize};

/// One vehicle entry of a puzzle description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub id: VehicleId,
    pub orientation: Orientation,
    pub positions: Vec<Position>,
    #[serde(default, rename = "isPrimary")]
    pub is_primary: bool,
}

/// A complete puzzle description as uploaded or piped in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    #[serde(default)]
    pub name: String,
    pub rows: i32,
    pub cols: i32,
    pub exit: Position,
    pub vehicles: Vec<VehicleSpec>,
}

impl PuzzleConfig {
    /// Convert the description into a validated initial state.
    pub fn into_state(self) -> Result<BoardState, BoardError> {
        let vehicles = self
            .vehicles
            .into_iter()
            .map(|spec| Vehicle {
                id: spec.id,
                orientation: spec.orientation,
                positions: spec.positions.into_iter().collect(),
                is_primary: spec.is_primary,
            })
            .collect();
        BoardState::new(self.rows, self.cols, vehicles, self.exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_MOVE_PUZZLE: &str = r#"{
        "name": "two-move",
        "rows": 6,
        "cols": 6,
        "exit": { "row": 2, "col": 6 },
        "vehicles": [
            {
                "id": "P",
                "orientation": "horizontal",
                "isPrimary": true,
                "positions": [ { "row": 2, "col": 3 }, { "row": 2, "col": 4 } ]
            },
            {
                "id": "A",
                "orientation": "vertical",
                "positions": [ { "row": 2, "col": 5 }, { "row": 3, "col": 5 } ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_and_convert() {
        let config: PuzzleConfig = serde_json::from_str(TWO_MOVE_PUZZLE).unwrap();
        assert_eq!(config.name, "two-move");
        let state = config.into_state().unwrap();
        assert_eq!(state.primary().id, 'P');
        assert_eq!(state.exit(), Position::new(2, 6));
        assert_eq!(state.grid().render()[2], "...PPA");
    }

    #[test]
    fn test_is_primary_defaults_to_false() {
        let json = r#"{ "id": "A", "orientation": "vertical",
                        "positions": [ { "row": 0, "col": 0 }, { "row": 1, "col": 0 } ] }"#;
        let spec: VehicleSpec = serde_json::from_str(json).unwrap();
        assert!(!spec.is_primary);
    }

    #[test]
    fn test_structurally_invalid_config_is_rejected() {
        let mut config: PuzzleConfig = serde_json::from_str(TWO_MOVE_PUZZLE).unwrap();
        config.exit = Position::new(4, 6);
        assert!(matches!(
            config.into_state().unwrap_err(),
            BoardError::ExitMisaligned { .. }
        ));

        let mut config: PuzzleConfig = serde_json::from_str(TWO_MOVE_PUZZLE).unwrap();
        config.vehicles[1].positions = vec![Position::new(2, 4), Position::new(3, 4)];
        assert!(matches!(
            config.into_state().unwrap_err(),
            BoardError::Overlap { .. }
        ));
    }

    #[test]
    fn test_malformed_json_fails_to_parse() {
        assert!(serde_json::from_str::<PuzzleConfig>("{ \"rows\": 6 }").is_err());
    }
}
