//! Run orchestration: drive the remote grid toward (or away from) the goal.
//!
//! Both runs are strictly sequential: one network call completes before the
//! next begins, which is deliberate given the remote service's aggressive
//! rate limiting. The first failing call aborts the rest of the run and no
//! compensating rollback is attempted; re-invoking clean/create is the
//! operator's recovery path.

use megaverse_client::{ClientError, RemoteClient};
use megaverse_types::Grid;

use crate::codec::decode_goal;
use crate::compare::{CompareMode, maps_match};
use crate::detect::{DetectedEntities, detect_entities};

/// Per-run settings, constructed once at startup and passed in.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Static identifier sent with every remote call.
    pub candidate_id: String,
    /// When set, convergence verification also compares attributes
    /// ([`CompareMode::Full`]); the default compares kinds only, which is
    /// what the remote side grades on.
    pub strict_verification: bool,
}

impl ReconcilerConfig {
    #[must_use]
    pub fn new(candidate_id: impl Into<String>) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            strict_verification: false,
        }
    }

    #[must_use]
    pub fn with_strict_verification(mut self, strict: bool) -> Self {
        self.strict_verification = strict;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("actual map does not match goal map after creation")]
    Convergence,
}

/// Orchestrates fetch, decode, detect, write, and verify.
pub struct Reconciler {
    client: RemoteClient,
    config: ReconcilerConfig,
}

impl Reconciler {
    #[must_use]
    pub fn new(client: RemoteClient, config: ReconcilerConfig) -> Self {
        Self { client, config }
    }

    /// Create every entity the goal map declares, then verify convergence.
    ///
    /// Writes happen per kind in fixed order (anchors, markers, vectors):
    /// markers and vectors are layered on anchors in the target system, so
    /// anchors-first is a structural precondition, not an optimization.
    pub async fn create_megaverse(&self) -> Result<bool, ReconcileError> {
        let candidate = self.config.candidate_id.as_str();
        let rows = self.client.fetch_goal(candidate).await?;
        let goal = decode_goal(&rows);
        let entities = detect_entities(&goal);
        tracing::info!(
            anchors = entities.anchors.len(),
            markers = entities.markers.len(),
            vectors = entities.vectors.len(),
            "creating megaverse from goal map"
        );

        self.create_all(&entities).await?;

        let actual = self.client.fetch_actual(candidate).await?;
        if !maps_match(&goal, &actual.map, self.compare_mode()) {
            tracing::warn!("actual map diverged from goal map after creation");
            return Err(ReconcileError::Convergence);
        }
        tracing::info!("megaverse converged on goal map");
        Ok(true)
    }

    /// Delete every entity currently present in the actual map.
    ///
    /// No post-delete verification is performed; the asymmetry with
    /// [`Reconciler::create_megaverse`] is deliberate.
    pub async fn clean_megaverse(&self) -> Result<bool, ReconcileError> {
        let candidate = self.config.candidate_id.as_str();
        let actual = self.client.fetch_actual(candidate).await?;
        let grid: Grid = actual.map.to_grid();
        let entities = detect_entities(&grid);
        tracing::info!(total = entities.total(), "cleaning megaverse");

        for entity in entities.in_kind_order() {
            self.client.delete_entity(entity, candidate).await?;
        }
        tracing::info!("megaverse cleaned");
        Ok(true)
    }

    async fn create_all(&self, entities: &DetectedEntities) -> Result<(), ClientError> {
        let candidate = self.config.candidate_id.as_str();
        for entity in entities.in_kind_order() {
            self.client.create_entity(entity, candidate).await?;
        }
        Ok(())
    }

    fn compare_mode(&self) -> CompareMode {
        if self.config.strict_verification {
            CompareMode::Full
        } else {
            CompareMode::KindOnly
        }
    }
}
