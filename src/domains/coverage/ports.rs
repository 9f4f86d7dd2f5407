use super::trajectory::{NewTrajectory, Trajectory};
use crate::common::DomainResult;
use async_trait::async_trait;

/// Port for persisting generated trajectories (in-memory, file, postgres, ...).
#[async_trait]
pub trait TrajectoryStore: Send + Sync {
    /// Persist a trajectory and return it with its assigned id and timestamp.
    async fn save(&self, trajectory: NewTrajectory) -> DomainResult<Trajectory>;
    async fn get(&self, id: i64) -> DomainResult<Option<Trajectory>>;
    /// All stored trajectories, newest first.
    async fn list(&self) -> DomainResult<Vec<Trajectory>>;
}
