pub mod error;
pub mod fork;
pub mod math;
pub mod path;
pub mod tessellation;

pub use error::{Result, TubeForkError};
pub use fork::{Fork, ForkManager, ForkParams};
pub use math::Frame;
pub use path::MainPath;
