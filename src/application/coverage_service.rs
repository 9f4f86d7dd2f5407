use std::sync::Arc;
use crate::common::{DomainError, DomainResult};
use crate::domains::coverage::{
    CoveragePlanner, NewTrajectory, PlanInput, Trajectory, TrajectoryPoint, TrajectoryStore,
};
use crate::domains::logger::DynLogger;

/// Application service tying the planner to trajectory storage.
pub struct CoverageService {
    planner: CoveragePlanner,
    store: Arc<dyn TrajectoryStore>,
    logger: DynLogger,
}

impl CoverageService {
    pub fn new(planner: CoveragePlanner, store: Arc<dyn TrajectoryStore>, logger: DynLogger) -> Self {
        Self { planner, store, logger }
    }

    pub fn planner(&self) -> &CoveragePlanner {
        &self.planner
    }

    pub fn plan(&self, input: &PlanInput) -> DomainResult<Vec<TrajectoryPoint>> {
        self.logger.info(&format!(
            "Planning coverage for {}x{} wall with {} obstacle(s)",
            input.wall.width,
            input.wall.height,
            input.obstacles.len()
        ));

        match self.planner.plan(&input.wall, &input.obstacles) {
            Ok(path) => {
                self.logger.info(&format!("Generated path with {} point(s)", path.len()));
                Ok(path)
            }
            Err(e) => {
                self.logger.warn(&format!("Rejected planning request: {}", e));
                Err(e)
            }
        }
    }

    pub async fn save(&self, trajectory: NewTrajectory) -> DomainResult<Trajectory> {
        let saved = self.store.save(trajectory).await.map_err(|e| {
            self.logger.error(&format!("Failed to save trajectory: {}", e));
            e
        })?;
        self.logger.info(&format!(
            "Saved trajectory {} with {} point(s)",
            saved.id,
            saved.path.len()
        ));
        Ok(saved)
    }

    pub async fn get(&self, id: i64) -> DomainResult<Trajectory> {
        self.store
            .get(id)
            .await?
            .ok_or(DomainError::TrajectoryNotFound { id })
    }

    pub async fn list(&self) -> DomainResult<Vec<Trajectory>> {
        self.store.list().await
    }
}
