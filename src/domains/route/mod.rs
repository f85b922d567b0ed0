pub mod aggregate;
pub mod events;
pub mod forms;
pub mod ports;
pub mod projections;
pub mod schedule;
pub mod types;

pub use aggregate::*;
pub use events::*;
pub use forms::*;
pub use ports::*;
pub use projections::*;
pub use schedule::*;
pub use types::*;
