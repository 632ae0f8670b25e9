pub mod fix;
pub mod header;
pub mod main;

pub use fix::*;
pub use header::*;
pub use main::*;
