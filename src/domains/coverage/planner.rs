use super::types::{Obstacle, TrajectoryPoint, Wall};
use crate::common::{DomainError, DomainResult};

/// Sampling resolution in metres used when none is configured.
pub const DEFAULT_STEP: f64 = 0.5;

/// Largest sampling grid (columns x rows) a single plan may cover.
pub const MAX_GRID_POINTS: usize = 5_000_000;

/// Boustrophedon coverage planner.
///
/// Rows are spaced `step` apart starting at `y = 0`; each row samples columns
/// at multiples of `step` from `x = 0` up to the wall width, alternating
/// direction so consecutive rows join into one zig-zag. Samples that fall
/// inside an obstacle are dropped, leaving a gap in the path.
///
/// The far edges are only visited when the wall extent is an exact multiple
/// of `step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoveragePlanner {
    step: f64,
}

impl CoveragePlanner {
    pub fn new(step: f64) -> DomainResult<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(DomainError::invalid_input(format!(
                "Planner step must be a positive number, got {}",
                step
            )));
        }
        Ok(Self { step })
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn plan(&self, wall: &Wall, obstacles: &[Obstacle]) -> DomainResult<Vec<TrajectoryPoint>> {
        if !(wall.width > 0.0 && wall.height > 0.0) {
            return Err(DomainError::invalid_input(
                "Wall dimensions must be positive numbers",
            ));
        }
        if !(wall.width.is_finite() && wall.height.is_finite()) {
            return Err(DomainError::invalid_input("Wall dimensions must be finite"));
        }

        let step = self.step;
        let column_count = (wall.width / step).floor() + 1.0;
        let row_count = (wall.height / step).floor() + 1.0;
        if column_count * row_count > MAX_GRID_POINTS as f64 {
            return Err(DomainError::invalid_input(format!(
                "Wall {}x{} at step {} exceeds {} samples",
                wall.width, wall.height, step, MAX_GRID_POINTS
            )));
        }

        let last_column = column_count as usize - 1;
        let mut path = Vec::new();
        let mut row = 0usize;

        loop {
            let y = row as f64 * step;
            if y > wall.height {
                break;
            }

            let columns: Box<dyn Iterator<Item = usize>> = if row % 2 == 0 {
                Box::new(0..=last_column)
            } else {
                Box::new((0..=last_column).rev())
            };

            for column in columns {
                let x = column as f64 * step;
                if !is_inside_obstacle(obstacles, x, y) {
                    path.push(TrajectoryPoint::new(x, y));
                }
            }
            row += 1;
        }

        Ok(path)
    }
}

impl Default for CoveragePlanner {
    fn default() -> Self {
        Self { step: DEFAULT_STEP }
    }
}

pub fn is_inside_obstacle(obstacles: &[Obstacle], x: f64, y: f64) -> bool {
    obstacles.iter().any(|o| o.contains(x, y))
}

/// Plans with the default step.
pub fn plan(wall: &Wall, obstacles: &[Obstacle]) -> DomainResult<Vec<TrajectoryPoint>> {
    CoveragePlanner::default().plan(wall, obstacles)
}
