//! Wire types for the remote megaverse service.
//!
//! Shapes are fixed by the external provider:
//!
//! - `GET {base}/map/{candidate}/goal` -> [`GoalResponse`]
//! - `GET {base}/map/{candidate}` -> [`RemoteState`]
//!
//! Bookkeeping fields on the actual map (`_id`, `candidateId`, `phase`,
//! `__v`) are tolerated but never interpreted.

use serde::{Deserialize, Serialize};

use crate::model::{Cell, EntityKind, Grid, MarkerColor, VectorDirection};

/// The declared goal grid, textually encoded (one token per cell).
#[derive(Debug, Clone, Deserialize)]
pub struct GoalResponse {
    pub goal: Vec<Vec<String>>,
}

/// The authoritative actual state as returned by the remote service.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteState {
    pub map: RemoteMap,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteMap {
    pub content: Vec<Vec<Option<RemoteCell>>>,
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "candidateId", default)]
    pub candidate_id: Option<String>,
    #[serde(default)]
    pub phase: Option<i64>,
    #[serde(rename = "__v", default)]
    pub version: Option<i64>,
}

impl RemoteMap {
    /// Convert the wire content into a typed [`Grid`]. Absent cells, unknown
    /// type codes, and cells missing a required attribute all become
    /// [`Cell::Empty`].
    #[must_use]
    pub fn to_grid(&self) -> Grid {
        self.content
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_ref().map_or(Cell::Empty, RemoteCell::to_cell))
                    .collect()
            })
            .collect()
    }
}

/// One populated cell of the actual map. `type` is the remote kind code
/// (0 = polyanet/anchor, 1 = soloon/marker, 2 = cometh/vector).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCell {
    #[serde(rename = "type")]
    pub kind_code: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<MarkerColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<VectorDirection>,
}

impl RemoteCell {
    /// The entity kind named by the wire code, if it is one we know.
    #[must_use]
    pub const fn kind(&self) -> Option<EntityKind> {
        EntityKind::from_wire_code(self.kind_code)
    }

    /// Full typed conversion. A marker without a color (or vector without a
    /// direction) cannot be represented and degrades to [`Cell::Empty`];
    /// kind-only comparison goes through [`RemoteCell::kind`] instead so it
    /// still sees such cells.
    #[must_use]
    pub const fn to_cell(&self) -> Cell {
        match (self.kind_code, self.color, self.direction) {
            (0, _, _) => Cell::Anchor,
            (1, Some(color), _) => Cell::Marker { color },
            (2, _, Some(direction)) => Cell::Vector { direction },
            _ => Cell::Empty,
        }
    }
}
