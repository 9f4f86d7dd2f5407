pub mod planner;
pub mod ports;
pub mod trajectory;
pub mod types;

pub use planner::*;
pub use ports::*;
pub use trajectory::*;
pub use types::*;
