pub mod console_logger;
pub mod file_logger;
pub mod file_store;
pub mod memory_store;
pub mod multi_logger;
pub mod postgres_store;

pub use console_logger::*;
pub use file_logger::*;
pub use file_store::*;
pub use memory_store::*;
pub use multi_logger::*;
pub use postgres_store::*;
