//! Shared domain and wire types for the megaverse reconciler.
//!
//! # Organization
//!
//! - [`model`] - the typed grid domain: cells, entity kinds, attributes, and
//!   positioned entity records. Everything here is a tagged sum type, so an
//!   entity cannot exist without the attribute its kind requires.
//! - [`remote`] - serde types mirroring the remote megaverse service's wire
//!   format. On the wire the kinds are named polyanet/soloon/cometh;
//!   [`EntityKind`] owns that mapping so nothing else has to know about it.

mod model;
mod remote;

pub use model::{
    AttributeKind, AttributeParseError, Cell, EntityKind, Grid, MarkerColor, PositionedEntity,
    VectorDirection,
};
pub use remote::{GoalResponse, RemoteCell, RemoteMap, RemoteState};
