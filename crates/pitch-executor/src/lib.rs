//! The decision core of a field robot: a behaviour tree engine, the skills built on
//! it, and the team positioning that picks each robot's role.

pub mod behaviour;
pub mod positioning;
pub mod skills;
mod ticker;

pub use behaviour::{BehaviourError, TaskStatus};
pub use ticker::Ticker;
