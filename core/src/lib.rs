//! Reconciliation pipeline for the megaverse grid.
//!
//! # Pipeline
//!
//! ```text
//! fetch goal -> codec::decode_goal -> detect::detect_entities
//!            -> create per kind (anchors, markers, vectors)
//!            -> fetch actual -> compare::maps_match
//! ```
//!
//! [`reconcile::Reconciler`] orchestrates; [`codec`], [`detect`], and
//! [`compare`] are pure and independently testable. All remote I/O goes
//! through `megaverse-client`.

pub mod codec;
pub mod compare;
pub mod detect;
pub mod reconcile;

pub use compare::CompareMode;
pub use detect::DetectedEntities;
pub use reconcile::{ReconcileError, Reconciler, ReconcilerConfig};
