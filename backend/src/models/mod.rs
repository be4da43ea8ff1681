pub mod body;
pub mod geometry;
pub mod time;

pub use body::*;
pub use geometry::*;
pub use time::*;
