mod args;
mod error;
mod task;
mod timer;
mod world;

pub use args::*;
pub use error::*;
pub use task::*;
pub use timer::*;
pub use world::*;
