//! Structural comparison between a decoded goal grid and the actual map.

use megaverse_types::{Cell, Grid, RemoteCell, RemoteMap};

/// How much of a cell to compare.
///
/// [`CompareMode::KindOnly`] treats a red marker and a blue marker as equal;
/// it is the default because convergence grading on the remote side keys on
/// kind alone. [`CompareMode::Full`] also requires attribute equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareMode {
    #[default]
    KindOnly,
    Full,
}

/// Pure structural equality check: false when row counts differ, when any
/// corresponding row's column count differs, or when any position disagrees
/// under the given mode.
#[must_use]
pub fn maps_match(goal: &Grid, actual: &RemoteMap, mode: CompareMode) -> bool {
    if goal.len() != actual.content.len() {
        return false;
    }
    for (goal_row, actual_row) in goal.iter().zip(&actual.content) {
        if goal_row.len() != actual_row.len() {
            return false;
        }
        for (goal_cell, actual_cell) in goal_row.iter().zip(actual_row) {
            let matches = match mode {
                CompareMode::KindOnly => {
                    goal_cell.kind() == actual_cell.as_ref().and_then(RemoteCell::kind)
                }
                CompareMode::Full => {
                    *goal_cell == actual_cell.as_ref().map_or(Cell::Empty, RemoteCell::to_cell)
                }
            };
            if !matches {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::{CompareMode, maps_match};
    use megaverse_types::{Cell, MarkerColor, RemoteMap, RemoteState};

    fn remote_map(content: serde_json::Value) -> RemoteMap {
        let state: RemoteState =
            serde_json::from_value(serde_json::json!({ "map": { "content": content } })).unwrap();
        state.map
    }

    fn goal() -> Vec<Vec<Cell>> {
        vec![
            vec![
                Cell::Anchor,
                Cell::Marker {
                    color: MarkerColor::Red,
                },
            ],
            vec![Cell::Empty, Cell::Anchor],
        ]
    }

    #[test]
    fn kind_only_ignores_attribute_differences() {
        // actual marker is blue, goal marker is red
        let actual = remote_map(serde_json::json!([
            [{"type": 0}, {"type": 1, "color": "blue"}],
            [null, {"type": 0}]
        ]));
        assert!(maps_match(&goal(), &actual, CompareMode::KindOnly));
        assert!(!maps_match(&goal(), &actual, CompareMode::Full));
    }

    #[test]
    fn full_mode_accepts_exact_match() {
        let actual = remote_map(serde_json::json!([
            [{"type": 0}, {"type": 1, "color": "red"}],
            [null, {"type": 0}]
        ]));
        assert!(maps_match(&goal(), &actual, CompareMode::Full));
    }

    #[test]
    fn differing_row_count_never_matches() {
        let actual = remote_map(serde_json::json!([[{"type": 0}, {"type": 1, "color": "red"}]]));
        assert!(!maps_match(&goal(), &actual, CompareMode::KindOnly));
    }

    #[test]
    fn differing_column_count_never_matches() {
        let actual = remote_map(serde_json::json!([
            [{"type": 0}, {"type": 1, "color": "red"}, null],
            [null, {"type": 0}]
        ]));
        assert!(!maps_match(&goal(), &actual, CompareMode::KindOnly));
    }

    #[test]
    fn flipping_one_cell_kind_breaks_the_match() {
        // goal expects an anchor at (1, 1); the actual map has a vector
        let actual = remote_map(serde_json::json!([
            [{"type": 0}, {"type": 1, "color": "red"}],
            [null, {"type": 2, "direction": "up"}]
        ]));
        assert!(!maps_match(&goal(), &actual, CompareMode::KindOnly));
    }

    #[test]
    fn populated_goal_cell_does_not_match_empty_actual_cell() {
        let actual = remote_map(serde_json::json!([
            [{"type": 0}, null],
            [null, {"type": 0}]
        ]));
        assert!(!maps_match(&goal(), &actual, CompareMode::KindOnly));
    }

    #[test]
    fn empty_grids_match() {
        let actual = remote_map(serde_json::json!([]));
        assert!(maps_match(&Vec::new(), &actual, CompareMode::KindOnly));
        assert!(maps_match(&Vec::new(), &actual, CompareMode::Full));
    }
}
