use std::sync::Arc;

use pitch_core::{ActionRequest, BehaviourSettings, Vector2, WorldSnapshot};

use crate::skills::ObstacleMemory;

/// The state a behaviour sub-tree reads and writes during a tick.
///
/// The snapshot is shared and read-only. The request and the hierarchy trace are
/// owned by this sub-tree and handed to the host after the tick.
pub struct World {
    snapshot: Arc<WorldSnapshot>,
    settings: Arc<BehaviourSettings>,
    obstacles: ObstacleMemory,
    hierarchy: String,
    pub request: ActionRequest,
}

impl World {
    pub fn new(snapshot: Arc<WorldSnapshot>, settings: Arc<BehaviourSettings>) -> Self {
        let mut obstacles = ObstacleMemory::new();
        obstacles.update(&snapshot);
        Self {
            snapshot,
            settings,
            obstacles,
            hierarchy: String::new(),
            request: ActionRequest::default(),
        }
    }

    /// Start a new cycle with a fresh snapshot.
    pub fn update(&mut self, snapshot: Arc<WorldSnapshot>) {
        self.obstacles.update(&snapshot);
        self.snapshot = snapshot;
    }

    pub fn snapshot(&self) -> &WorldSnapshot {
        &self.snapshot
    }

    pub fn settings(&self) -> &BehaviourSettings {
        &self.settings
    }

    pub fn obstacles(&self) -> &ObstacleMemory {
        &self.obstacles
    }

    /// Seconds on the snapshot clock.
    pub fn now(&self) -> f64 {
        self.snapshot.timestamp
    }

    /// The ball position we act on, ego or team ball.
    pub fn ball_position(&self) -> Vector2 {
        self.snapshot
            .ball_position(self.settings.team_ball_time_padding)
    }

    pub fn hierarchy(&self) -> &str {
        &self.hierarchy
    }

    pub(crate) fn push_hierarchy(&mut self, name: &str) {
        self.hierarchy.push_str(name);
        self.hierarchy.push('.');
    }

    /// Return the trace collected so far and start a new one.
    pub fn take_hierarchy(&mut self) -> String {
        std::mem::take(&mut self.hierarchy)
    }
}
