//! In-memory store backing the default server wiring and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use vismem_models::{
    SceneRecord, ShotRecord, ShowrunnerDecision, StoryboardPanel, VisualMemoryRecord,
};

use crate::error::StoreResult;
use crate::plan::ScenePlan;
use crate::repos::{ScenePlanWriter, SceneStore, ShowrunnerStore, VisualMemoryStore};

/// Thread-safe in-memory store, keyed by scene id throughout.
#[derive(Default)]
pub struct InMemoryStore {
    scenes: RwLock<HashMap<String, SceneRecord>>,
    shots: RwLock<HashMap<String, Vec<ShotRecord>>>,
    storyboards: RwLock<HashMap<String, Vec<StoryboardPanel>>>,
    decisions: RwLock<HashMap<String, ShowrunnerDecision>>,
    memories: RwLock<HashMap<String, VisualMemoryRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SceneStore for InMemoryStore {
    async fn get_scene(
        &self,
        project_id: &str,
        scene_id: &str,
    ) -> StoreResult<Option<SceneRecord>> {
        let scenes = self.scenes.read().await;
        Ok(scenes
            .get(scene_id)
            .filter(|s| s.project_id == project_id)
            .cloned())
    }

    async fn shots_for_scene(&self, scene_id: &str) -> StoreResult<Vec<ShotRecord>> {
        let shots = self.shots.read().await;
        Ok(shots.get(scene_id).cloned().unwrap_or_default())
    }

    async fn storyboard_for_scene(&self, scene_id: &str) -> StoreResult<Vec<StoryboardPanel>> {
        let storyboards = self.storyboards.read().await;
        Ok(storyboards.get(scene_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ShowrunnerStore for InMemoryStore {
    async fn decision_for_scene(
        &self,
        scene_id: &str,
    ) -> StoreResult<Option<ShowrunnerDecision>> {
        let decisions = self.decisions.read().await;
        Ok(decisions.get(scene_id).cloned())
    }
}

#[async_trait]
impl VisualMemoryStore for InMemoryStore {
    async fn get_by_scene(&self, scene_id: &str) -> StoreResult<Option<VisualMemoryRecord>> {
        let memories = self.memories.read().await;
        Ok(memories.get(scene_id).cloned())
    }

    async fn get_by_position(
        &self,
        project_id: &str,
        episode_number: u32,
        scene_number: u32,
    ) -> StoreResult<Option<VisualMemoryRecord>> {
        let memories = self.memories.read().await;
        Ok(memories
            .values()
            .find(|m| {
                m.project_id == project_id
                    && m.episode_number == episode_number
                    && m.scene_number == scene_number
            })
            .cloned())
    }

    async fn upsert(&self, record: VisualMemoryRecord) -> StoreResult<()> {
        let mut memories = self.memories.write().await;
        let replaced = memories.insert(record.scene_id.clone(), record).is_some();
        if replaced {
            info!("Replaced existing visual memory record");
        }
        Ok(())
    }

    async fn list_for_project(&self, project_id: &str) -> StoreResult<Vec<VisualMemoryRecord>> {
        let memories = self.memories.read().await;
        let mut records: Vec<VisualMemoryRecord> = memories
            .values()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect();
        records.sort_by_key(|m| (m.episode_number, m.scene_number));
        Ok(records)
    }
}

#[async_trait]
impl ScenePlanWriter for InMemoryStore {
    async fn put_plan(&self, plan: ScenePlan) -> StoreResult<()> {
        let scene_id = plan.scene.id.clone();

        self.scenes
            .write()
            .await
            .insert(scene_id.clone(), plan.scene);
        self.shots.write().await.insert(scene_id.clone(), plan.shots);
        self.storyboards
            .write()
            .await
            .insert(scene_id.clone(), plan.storyboard);

        match plan.showrunner {
            Some(decision) => {
                self.decisions.write().await.insert(scene_id, decision);
            }
            None => {
                self.decisions.write().await.remove(&scene_id);
            }
        }

        Ok(())
    }
}
