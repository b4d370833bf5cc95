//! Collaborator store traits.
//!
//! The analyzer itself is pure; these traits are the seams its caller uses
//! to assemble inputs and persist results. Implementations must be safe to
//! call concurrently for different scenes without coordination.

use async_trait::async_trait;

use vismem_models::{
    SceneRecord, ShotRecord, ShowrunnerDecision, StoryboardPanel, VisualMemoryRecord,
};

use crate::error::StoreResult;
use crate::plan::ScenePlan;

/// Read access to scene metadata, shots, and storyboard panels.
#[async_trait]
pub trait SceneStore: Send + Sync {
    /// Look up scene metadata by id within a project.
    async fn get_scene(&self, project_id: &str, scene_id: &str)
        -> StoreResult<Option<SceneRecord>>;

    /// All shot records for a scene, in planning order.
    async fn shots_for_scene(&self, scene_id: &str) -> StoreResult<Vec<ShotRecord>>;

    /// Storyboard panels for a scene, in panel order. Fallback shot source.
    async fn storyboard_for_scene(&self, scene_id: &str) -> StoreResult<Vec<StoryboardPanel>>;
}

/// Read access to showrunner narrative decisions.
#[async_trait]
pub trait ShowrunnerStore: Send + Sync {
    async fn decision_for_scene(&self, scene_id: &str)
        -> StoreResult<Option<ShowrunnerDecision>>;
}

/// Read/write access to per-scene visual memory records.
#[async_trait]
pub trait VisualMemoryStore: Send + Sync {
    /// Fetch the stored record for a scene, if any.
    async fn get_by_scene(&self, scene_id: &str) -> StoreResult<Option<VisualMemoryRecord>>;

    /// Fetch a record by its position within a project. Used for the
    /// previous-scene lookup at `(episode_number, scene_number - 1)`.
    async fn get_by_position(
        &self,
        project_id: &str,
        episode_number: u32,
        scene_number: u32,
    ) -> StoreResult<Option<VisualMemoryRecord>>;

    /// Upsert keyed by `scene_id`: recomputing a scene overwrites its record
    /// wholesale, last writer wins.
    async fn upsert(&self, record: VisualMemoryRecord) -> StoreResult<()>;

    /// All records for a project, ordered by (episode, scene number).
    async fn list_for_project(&self, project_id: &str) -> StoreResult<Vec<VisualMemoryRecord>>;
}

/// Write access for seeding scene plans into a store.
#[async_trait]
pub trait ScenePlanWriter: Send + Sync {
    async fn put_plan(&self, plan: ScenePlan) -> StoreResult<()>;
}
