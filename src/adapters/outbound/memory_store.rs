use crate::common::DomainResult;
use crate::domains::coverage::{sort_by_recency, NewTrajectory, Trajectory, TrajectoryStore};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

/// In-memory trajectory store for tests and development
#[derive(Debug, Default)]
pub struct InMemoryTrajectoryStore {
    trajectories: RwLock<Vec<Trajectory>>,
}

impl InMemoryTrajectoryStore {
    pub fn new() -> Self {
        Self {
            trajectories: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TrajectoryStore for InMemoryTrajectoryStore {
    async fn save(&self, trajectory: NewTrajectory) -> DomainResult<Trajectory> {
        let mut store = self.trajectories.write().await;
        let id = store.last().map(|t| t.id + 1).unwrap_or(1);
        let saved = Trajectory::from_new(id, trajectory, Utc::now());
        store.push(saved.clone());
        Ok(saved)
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Trajectory>> {
        let store = self.trajectories.read().await;
        Ok(store.iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Trajectory>> {
        let mut all = self.trajectories.read().await.clone();
        sort_by_recency(&mut all);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::coverage::{Obstacle, TrajectoryPoint, Wall};

    fn sample() -> NewTrajectory {
        NewTrajectory {
            wall: Wall::new(5.0, 5.0),
            obstacles: vec![Obstacle::new(1.0, 1.0, 0.25, 0.25)],
            path: vec![TrajectoryPoint::new(0.0, 0.0), TrajectoryPoint::new(1.0, 0.0)],
        }
    }

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let store = InMemoryTrajectoryStore::new();
        let a = store.save(sample()).await.unwrap();
        let b = store.save(sample()).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        let loaded = store.get(2).await.unwrap().unwrap();
        assert_eq!(loaded, b);
        assert!(store.get(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = InMemoryTrajectoryStore::new();
        for _ in 0..3 {
            store.save(sample()).await.unwrap();
        }
        let ids: Vec<i64> = store.list().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
