//! Core grid domain types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A decoded goal or actual grid: row-major, zero-indexed, rectangular in
/// the happy case (dimension mismatches are caught by the comparator, not
/// here).
pub type Grid = Vec<Vec<Cell>>;

/// Which attribute value space a parse error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Color,
    Direction,
}

impl AttributeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AttributeKind::Color => "color",
            AttributeKind::Direction => "direction",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value '{raw}'; expected one of: {expected:?}")]
pub struct AttributeParseError {
    kind: AttributeKind,
    raw: String,
    expected: &'static [&'static str],
}

impl AttributeParseError {
    #[must_use]
    pub fn new(kind: AttributeKind, raw: impl Into<String>, expected: &'static [&'static str]) -> Self {
        Self {
            kind,
            raw: raw.into(),
            expected,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> AttributeKind {
        self.kind
    }
}

/// Marker color attribute. Serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Blue,
    Red,
    Purple,
    White,
}

const MARKER_COLOR_VALUES: &[&str] = &["blue", "red", "purple", "white"];

impl MarkerColor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MarkerColor::Blue => "blue",
            MarkerColor::Red => "red",
            MarkerColor::Purple => "purple",
            MarkerColor::White => "white",
        }
    }

    /// Case-insensitive parse from a goal-grid token fragment.
    pub fn parse(raw: &str) -> Result<Self, AttributeParseError> {
        match raw.to_ascii_lowercase().as_str() {
            "blue" => Ok(MarkerColor::Blue),
            "red" => Ok(MarkerColor::Red),
            "purple" => Ok(MarkerColor::Purple),
            "white" => Ok(MarkerColor::White),
            _ => Err(AttributeParseError::new(
                AttributeKind::Color,
                raw,
                MARKER_COLOR_VALUES,
            )),
        }
    }
}

impl fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vector direction attribute. Serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorDirection {
    Up,
    Down,
    Left,
    Right,
}

const VECTOR_DIRECTION_VALUES: &[&str] = &["up", "down", "left", "right"];

impl VectorDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            VectorDirection::Up => "up",
            VectorDirection::Down => "down",
            VectorDirection::Left => "left",
            VectorDirection::Right => "right",
        }
    }

    /// Case-insensitive parse from a goal-grid token fragment.
    pub fn parse(raw: &str) -> Result<Self, AttributeParseError> {
        match raw.to_ascii_lowercase().as_str() {
            "up" => Ok(VectorDirection::Up),
            "down" => Ok(VectorDirection::Down),
            "left" => Ok(VectorDirection::Left),
            "right" => Ok(VectorDirection::Right),
            _ => Err(AttributeParseError::new(
                AttributeKind::Direction,
                raw,
                VECTOR_DIRECTION_VALUES,
            )),
        }
    }
}

impl fmt::Display for VectorDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three entity kinds, in creation-order precedence: anchors carry the
/// grid, markers and vectors are layered on top of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Anchor,
    Marker,
    Vector,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityKind::Anchor => "anchor",
            EntityKind::Marker => "marker",
            EntityKind::Vector => "vector",
        }
    }

    /// The remote service's name for this kind.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            EntityKind::Anchor => "polyanet",
            EntityKind::Marker => "soloon",
            EntityKind::Vector => "cometh",
        }
    }

    /// The remote collection path segment (`POST {base}/{path}`).
    #[must_use]
    pub const fn collection_path(self) -> &'static str {
        match self {
            EntityKind::Anchor => "polyanets",
            EntityKind::Marker => "soloons",
            EntityKind::Vector => "comeths",
        }
    }

    /// The wire `type` code used in actual-map cells.
    #[must_use]
    pub const fn wire_code(self) -> u8 {
        match self {
            EntityKind::Anchor => 0,
            EntityKind::Marker => 1,
            EntityKind::Vector => 2,
        }
    }

    /// Inverse of [`EntityKind::wire_code`]; unknown codes are tolerated as
    /// `None` rather than rejected.
    #[must_use]
    pub const fn from_wire_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(EntityKind::Anchor),
            1 => Some(EntityKind::Marker),
            2 => Some(EntityKind::Vector),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One grid cell. The attribute is part of the variant, so a marker without
/// a color is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Anchor,
    Marker {
        color: MarkerColor,
    },
    Vector {
        direction: VectorDirection,
    },
}

impl Cell {
    #[must_use]
    pub const fn kind(self) -> Option<EntityKind> {
        match self {
            Cell::Empty => None,
            Cell::Anchor => Some(EntityKind::Anchor),
            Cell::Marker { .. } => Some(EntityKind::Marker),
            Cell::Vector { .. } => Some(EntityKind::Vector),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A non-empty cell plus its coordinates: the unit of wire-level create and
/// delete calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionedEntity {
    Anchor {
        row: usize,
        column: usize,
    },
    Marker {
        row: usize,
        column: usize,
        color: MarkerColor,
    },
    Vector {
        row: usize,
        column: usize,
        direction: VectorDirection,
    },
}

impl PositionedEntity {
    /// Build a record for a non-empty cell at (row, column). `None` for
    /// empty cells; detectors rely on this to skip them.
    #[must_use]
    pub const fn from_cell(cell: Cell, row: usize, column: usize) -> Option<Self> {
        match cell {
            Cell::Empty => None,
            Cell::Anchor => Some(PositionedEntity::Anchor { row, column }),
            Cell::Marker { color } => Some(PositionedEntity::Marker { row, column, color }),
            Cell::Vector { direction } => Some(PositionedEntity::Vector {
                row,
                column,
                direction,
            }),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            PositionedEntity::Anchor { .. } => EntityKind::Anchor,
            PositionedEntity::Marker { .. } => EntityKind::Marker,
            PositionedEntity::Vector { .. } => EntityKind::Vector,
        }
    }

    #[must_use]
    pub const fn row(&self) -> usize {
        match self {
            PositionedEntity::Anchor { row, .. }
            | PositionedEntity::Marker { row, .. }
            | PositionedEntity::Vector { row, .. } => *row,
        }
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            PositionedEntity::Anchor { column, .. }
            | PositionedEntity::Marker { column, .. }
            | PositionedEntity::Vector { column, .. } => *column,
        }
    }
}

impl fmt::Display for PositionedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionedEntity::Anchor { row, column } => write!(f, "anchor at ({row}, {column})"),
            PositionedEntity::Marker { row, column, color } => {
                write!(f, "{color} marker at ({row}, {column})")
            }
            PositionedEntity::Vector {
                row,
                column,
                direction,
            } => write!(f, "{direction} vector at ({row}, {column})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AttributeKind, Cell, EntityKind, MarkerColor, PositionedEntity, VectorDirection,
    };

    #[test]
    fn color_parse_is_case_insensitive() {
        assert_eq!(MarkerColor::parse("RED"), Ok(MarkerColor::Red));
        assert_eq!(MarkerColor::parse("Blue"), Ok(MarkerColor::Blue));
        assert_eq!(MarkerColor::parse("white"), Ok(MarkerColor::White));
    }

    #[test]
    fn color_parse_rejects_unknown_value() {
        let err = MarkerColor::parse("green").unwrap_err();
        assert_eq!(err.kind(), AttributeKind::Color);
    }

    #[test]
    fn direction_parse_rejects_unknown_value() {
        let err = VectorDirection::parse("sideways").unwrap_err();
        assert_eq!(err.kind(), AttributeKind::Direction);
    }

    #[test]
    fn wire_code_round_trips_for_known_kinds() {
        for kind in [EntityKind::Anchor, EntityKind::Marker, EntityKind::Vector] {
            assert_eq!(EntityKind::from_wire_code(kind.wire_code()), Some(kind));
        }
        assert_eq!(EntityKind::from_wire_code(7), None);
    }

    #[test]
    fn cell_kind_matches_variant() {
        assert_eq!(Cell::Empty.kind(), None);
        assert_eq!(Cell::Anchor.kind(), Some(EntityKind::Anchor));
        let marker = Cell::Marker {
            color: MarkerColor::Purple,
        };
        assert_eq!(marker.kind(), Some(EntityKind::Marker));
    }

    #[test]
    fn positioned_entity_skips_empty_cells() {
        assert_eq!(PositionedEntity::from_cell(Cell::Empty, 0, 0), None);
        let entity = PositionedEntity::from_cell(Cell::Anchor, 2, 3).unwrap();
        assert_eq!(entity.kind(), EntityKind::Anchor);
        assert_eq!((entity.row(), entity.column()), (2, 3));
    }

    #[test]
    fn positioned_entity_display_names_the_attribute() {
        let entity = PositionedEntity::Vector {
            row: 1,
            column: 4,
            direction: VectorDirection::Left,
        };
        assert_eq!(entity.to_string(), "left vector at (1, 4)");
    }
}
