//! Entity detection: partition a typed grid into per-kind record lists.

use megaverse_types::{EntityKind, Grid, PositionedEntity};

/// Per-kind positional records, each list in strict row-major order. That
/// order is load-bearing: creation order can matter on the remote side, and
/// tests assert it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedEntities {
    pub anchors: Vec<PositionedEntity>,
    pub markers: Vec<PositionedEntity>,
    pub vectors: Vec<PositionedEntity>,
}

impl DetectedEntities {
    #[must_use]
    pub fn total(&self) -> usize {
        self.anchors.len() + self.markers.len() + self.vectors.len()
    }

    /// All records in write order: every anchor, then every marker, then
    /// every vector. Anchors must exist before the entities layered on them.
    pub fn in_kind_order(&self) -> impl Iterator<Item = &PositionedEntity> {
        self.anchors
            .iter()
            .chain(&self.markers)
            .chain(&self.vectors)
    }
}

/// Scan a grid row-major and collect a record for every non-empty cell.
/// Total function; empty cells are skipped.
#[must_use]
pub fn detect_entities(grid: &Grid) -> DetectedEntities {
    let mut detected = DetectedEntities::default();
    for (row, cells) in grid.iter().enumerate() {
        for (column, cell) in cells.iter().enumerate() {
            let Some(entity) = PositionedEntity::from_cell(*cell, row, column) else {
                continue;
            };
            match entity.kind() {
                EntityKind::Anchor => detected.anchors.push(entity),
                EntityKind::Marker => detected.markers.push(entity),
                EntityKind::Vector => detected.vectors.push(entity),
            }
        }
    }
    detected
}

#[cfg(test)]
mod tests {
    use super::detect_entities;
    use crate::codec::decode_goal;
    use megaverse_types::{MarkerColor, PositionedEntity, VectorDirection};

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    #[test]
    fn partitions_decoded_goal_by_kind_and_position() {
        let grid = decode_goal(&rows(&[
            &["POLYANET", "RED_SOLOON", "LEFT_COMETH"],
            &["BLUE_SOLOON", "SPACE", "POLYANET"],
        ]));
        let detected = detect_entities(&grid);

        assert_eq!(
            detected.anchors,
            vec![
                PositionedEntity::Anchor { row: 0, column: 0 },
                PositionedEntity::Anchor { row: 1, column: 2 },
            ]
        );
        assert_eq!(
            detected.markers,
            vec![
                PositionedEntity::Marker {
                    row: 0,
                    column: 1,
                    color: MarkerColor::Red
                },
                PositionedEntity::Marker {
                    row: 1,
                    column: 0,
                    color: MarkerColor::Blue
                },
            ]
        );
        assert_eq!(
            detected.vectors,
            vec![PositionedEntity::Vector {
                row: 0,
                column: 2,
                direction: VectorDirection::Left
            }]
        );
    }

    #[test]
    fn record_count_equals_recognized_token_count() {
        let grid = decode_goal(&rows(&[
            &["POLYANET", "SPACE", "WHITE_SOLOON"],
            &["GARBAGE", "DOWN_COMETH", "POLYANET"],
        ]));
        assert_eq!(detect_entities(&grid).total(), 4);
    }

    #[test]
    fn lists_are_row_major_ascending() {
        let grid = decode_goal(&rows(&[
            &["SPACE", "POLYANET"],
            &["POLYANET", "POLYANET"],
        ]));
        let anchors = detect_entities(&grid).anchors;
        let positions: Vec<_> = anchors.iter().map(|e| (e.row(), e.column())).collect();
        assert_eq!(positions, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn empty_grid_detects_nothing() {
        let detected = detect_entities(&Vec::new());
        assert_eq!(detected.total(), 0);
        assert_eq!(detected.in_kind_order().count(), 0);
    }

    #[test]
    fn kind_order_iterates_anchors_then_markers_then_vectors() {
        let grid = decode_goal(&rows(&[&["UP_COMETH", "RED_SOLOON", "POLYANET"]]));
        let detected = detect_entities(&grid);
        let kinds: Vec<_> = detected.in_kind_order().map(PositionedEntity::kind).collect();
        let names: Vec<_> = kinds.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["anchor", "marker", "vector"]);
    }
}
