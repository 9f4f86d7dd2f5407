use crate::common::{DomainError, DomainResult};
use crate::domains::coverage::{sort_by_recency, NewTrajectory, Trajectory, TrajectoryStore};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

/// File-based trajectory store.
///
/// Records are kept in JSON Lines format (one trajectory per line) and only
/// ever appended. The next id is recovered from the file when the store is
/// opened, so ids keep increasing across restarts.
pub struct FileTrajectoryStore {
    path: PathBuf,
    // Next id to hand out; the lock also serialises appends.
    next_id: Mutex<i64>,
}

impl FileTrajectoryStore {
    pub async fn open<P: Into<PathBuf>>(path: P) -> DomainResult<Self> {
        let path = path.into();
        let existing = read_all(&path).await?;
        let next_id = existing.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Ok(Self {
            path,
            next_id: Mutex::new(next_id),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> DomainResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    DomainError::InfrastructureError(format!("Failed to create store directory: {}", e))
                })?;
            }
        }
        Ok(())
    }
}

async fn read_all(path: &Path) -> DomainResult<Vec<Trajectory>> {
    if !path.exists() {
        return Ok(vec![]);
    }

    let file = File::open(path).await.map_err(|e| {
        DomainError::InfrastructureError(format!("Failed to open trajectory file {}: {}", path.display(), e))
    })?;

    let mut lines = BufReader::new(file).lines();
    let mut trajectories = Vec::new();
    let mut line_number = 0u64;

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| DomainError::InfrastructureError(format!("Failed to read line: {}", e)))?
    {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }
        let trajectory: Trajectory = serde_json::from_str(&line).map_err(|e| {
            DomainError::InfrastructureError(format!(
                "Failed to deserialize trajectory at line {}: {}",
                line_number, e
            ))
        })?;
        trajectories.push(trajectory);
    }

    Ok(trajectories)
}

#[async_trait]
impl TrajectoryStore for FileTrajectoryStore {
    async fn save(&self, trajectory: NewTrajectory) -> DomainResult<Trajectory> {
        let mut next_id = self.next_id.lock().await;
        self.ensure_parent_dir().await?;

        let saved = Trajectory::from_new(*next_id, trajectory, Utc::now());
        let mut json_line = serde_json::to_string(&saved)?;
        json_line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                DomainError::InfrastructureError(format!(
                    "Failed to open trajectory file {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

        file.write_all(json_line.as_bytes())
            .await
            .map_err(|e| DomainError::InfrastructureError(format!("Failed to write trajectory: {}", e)))?;
        file.flush()
            .await
            .map_err(|e| DomainError::InfrastructureError(format!("Failed to flush file: {}", e)))?;

        *next_id += 1;
        Ok(saved)
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Trajectory>> {
        let _guard = self.next_id.lock().await;
        Ok(read_all(&self.path).await?.into_iter().find(|t| t.id == id))
    }

    async fn list(&self) -> DomainResult<Vec<Trajectory>> {
        let mut all = {
            let _guard = self.next_id.lock().await;
            read_all(&self.path).await?
        };
        sort_by_recency(&mut all);
        Ok(all)
    }
}
