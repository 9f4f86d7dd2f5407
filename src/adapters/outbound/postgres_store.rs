use crate::common::{DomainError, DomainResult};
use crate::config::PostgresConfig;
use crate::domains::coverage::{NewTrajectory, Trajectory, TrajectoryStore, Wall};
use async_trait::async_trait;
use deadpool_postgres::{Config, Pool, PoolConfig, Runtime};
use tokio_postgres::{NoTls, Row};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS trajectories (
        id BIGSERIAL PRIMARY KEY,
        wall_width DOUBLE PRECISION NOT NULL,
        wall_height DOUBLE PRECISION NOT NULL,
        obstacles JSONB NOT NULL,
        trajectory JSONB NOT NULL,
        "timestamp" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    );

    CREATE INDEX IF NOT EXISTS idx_timestamp
    ON trajectories ("timestamp");
"#;

const SELECT_COLUMNS: &str = "SELECT id, wall_width, wall_height, obstacles, trajectory, \"timestamp\" FROM trajectories";

const INSERT: &str = "INSERT INTO trajectories (wall_width, wall_height, obstacles, trajectory)
     VALUES ($1, $2, $3, $4)
     RETURNING id, \"timestamp\"";

const NEWEST_FIRST: &str = "ORDER BY \"timestamp\" DESC, id DESC";

pub struct PostgresTrajectoryStore {
    pool: Pool,
}

impl PostgresTrajectoryStore {
    /// Build a pool from configuration and make sure the schema exists.
    pub async fn connect(config: PostgresConfig) -> DomainResult<Self> {
        let mut pg_config = Config::new();
        pg_config.host = Some(config.host);
        pg_config.port = Some(config.port);
        pg_config.dbname = Some(config.database);
        pg_config.user = Some(config.username);
        pg_config.password = Some(config.password);
        pg_config.pool = Some(PoolConfig::new(config.max_connections as usize));

        let pool = pg_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| DomainError::InfrastructureError(format!("Failed to create PostgreSQL pool: {}", e)))?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: Pool) -> DomainResult<Self> {
        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    async fn client(&self) -> DomainResult<deadpool_postgres::Object> {
        self.pool
            .get()
            .await
            .map_err(|e| DomainError::InfrastructureError(format!("Failed to get database connection: {}", e)))
    }

    async fn initialize_schema(&self) -> DomainResult<()> {
        let client = self.client().await?;
        client
            .batch_execute(SCHEMA)
            .await
            .map_err(|e| DomainError::InfrastructureError(format!("Failed to initialize database schema: {}", e)))
    }
}

fn row_to_trajectory(row: &Row) -> DomainResult<Trajectory> {
    let obstacles: serde_json::Value = row.get(3);
    let path: serde_json::Value = row.get(4);
    Ok(Trajectory {
        id: row.get(0),
        wall: Wall::new(row.get(1), row.get(2)),
        obstacles: serde_json::from_value(obstacles)?,
        path: serde_json::from_value(path)?,
        timestamp: row.get(5),
    })
}

#[async_trait]
impl TrajectoryStore for PostgresTrajectoryStore {
    async fn save(&self, trajectory: NewTrajectory) -> DomainResult<Trajectory> {
        let client = self.client().await?;
        let obstacles = serde_json::to_value(&trajectory.obstacles)?;
        let path = serde_json::to_value(&trajectory.path)?;

        let row = client
            .query_one(
                INSERT,
                &[&trajectory.wall.width, &trajectory.wall.height, &obstacles, &path],
            )
            .await
            .map_err(|e| DomainError::InfrastructureError(format!("Failed to save trajectory: {}", e)))?;

        Ok(Trajectory::from_new(row.get(0), trajectory, row.get(1)))
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Trajectory>> {
        let client = self.client().await?;
        let row = client
            .query_opt(format!("{} WHERE id = $1", SELECT_COLUMNS).as_str(), &[&id])
            .await
            .map_err(|e| DomainError::InfrastructureError(format!("Failed to load trajectory: {}", e)))?;

        row.as_ref().map(row_to_trajectory).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<Trajectory>> {
        let client = self.client().await?;
        let rows = client
            .query(format!("{} {}", SELECT_COLUMNS, NEWEST_FIRST).as_str(), &[])
            .await
            .map_err(|e| DomainError::InfrastructureError(format!("Failed to list trajectories: {}", e)))?;

        rows.iter().map(row_to_trajectory).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_keeps_timestamp_column_and_index() {
        assert!(SCHEMA.contains(r#""timestamp" TIMESTAMPTZ NOT NULL DEFAULT NOW()"#));
        assert!(SCHEMA.contains(r#"ON trajectories ("timestamp")"#));
        assert!(!SCHEMA.contains("created_at"));
    }

    #[test]
    fn queries_read_and_order_by_timestamp() {
        assert!(SELECT_COLUMNS.ends_with(r#"trajectory, "timestamp" FROM trajectories"#));
        assert!(INSERT.ends_with(r#"RETURNING id, "timestamp""#));
        assert_eq!(NEWEST_FIRST, r#"ORDER BY "timestamp" DESC, id DESC"#);
    }
}
