use serde::{Deserialize, Serialize};

/// Rectangular wall area, anchored at the origin. Extents are in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub width: f64,
    pub height: f64,
}

impl Wall {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Rectangular no-go region given by its bottom-left corner and extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Closed-interval containment: points on the boundary are inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x <= x && x <= self.x + self.width) && (self.y <= y && y <= self.y + self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub x: f64,
    pub y: f64,
}

impl TrajectoryPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Body of a planning request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInput {
    pub wall: Wall,
    pub obstacles: Vec<Obstacle>,
}
