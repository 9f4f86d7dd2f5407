use super::types::{Obstacle, TrajectoryPoint, Wall};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A path submitted for storage together with the inputs it was planned from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrajectory {
    pub wall: Wall,
    pub obstacles: Vec<Obstacle>,
    pub path: Vec<TrajectoryPoint>,
}

/// A stored trajectory. `id` is assigned by the store and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub id: i64,
    pub wall: Wall,
    pub obstacles: Vec<Obstacle>,
    pub path: Vec<TrajectoryPoint>,
    pub timestamp: DateTime<Utc>,
}

impl Trajectory {
    pub fn from_new(id: i64, new: NewTrajectory, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            wall: new.wall,
            obstacles: new.obstacles,
            path: new.path,
            timestamp,
        }
    }
}

/// Newest first; equal timestamps fall back to the higher id.
pub fn sort_by_recency(trajectories: &mut [Trajectory]) {
    trajectories.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
}
