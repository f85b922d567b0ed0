pub mod container;
pub mod route_session_service;

pub use container::*;
pub use route_session_service::*;
