pub mod console_logger;
pub mod file_logger;
pub mod fixtures;
pub mod mock_route_service;
pub mod mock_storage;
pub mod multi_logger;
pub mod noop_logger;

pub use console_logger::*;
pub use file_logger::*;
pub use fixtures::*;
pub use mock_route_service::*;
pub use mock_storage::*;
pub use multi_logger::*;
pub use noop_logger::*;
