pub mod aggregate;
pub mod glider;
pub mod period;

pub use aggregate::*;
pub use glider::*;
pub use period::*;
