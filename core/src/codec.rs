//! Goal-grid decoding.
//!
//! The goal map arrives as rows of string tokens: `POLYANET` for an anchor,
//! `<COLOR>_SOLOON` for a marker, `<DIRECTION>_COMETH` for a vector, and
//! anything else (`SPACE` included) for an empty cell. Decoding is total and
//! permissive: a token we cannot recognize becomes an empty cell, never an
//! error. Row and column order is preserved exactly as given, because every
//! downstream position index is derived from it.

use megaverse_types::{Cell, Grid, MarkerColor, VectorDirection};

const ANCHOR_TOKEN: &str = "POLYANET";
const MARKER_SUFFIX: &str = "SOLOON";
const VECTOR_SUFFIX: &str = "COMETH";

/// Decode raw goal rows into a typed grid.
#[must_use]
pub fn decode_goal(rows: &[Vec<String>]) -> Grid {
    rows.iter()
        .map(|row| row.iter().map(|token| decode_token(token)).collect())
        .collect()
}

fn decode_token(token: &str) -> Cell {
    let normalized = token.trim().to_ascii_uppercase();
    if normalized == ANCHOR_TOKEN {
        return Cell::Anchor;
    }

    // Attribute-carrying tokens are exactly `<ATTRIBUTE>_<KIND>`.
    let mut parts = normalized.split('_');
    let (Some(attribute), Some(kind), None) = (parts.next(), parts.next(), parts.next()) else {
        return Cell::Empty;
    };

    match kind {
        MARKER_SUFFIX => {
            MarkerColor::parse(attribute).map_or(Cell::Empty, |color| Cell::Marker { color })
        }
        VECTOR_SUFFIX => VectorDirection::parse(attribute)
            .map_or(Cell::Empty, |direction| Cell::Vector { direction }),
        _ => Cell::Empty,
    }
}
