pub mod logger;
pub mod route;

pub use logger::*;
pub use route::*;
