mod action;
mod angle;
pub mod geom;
mod ids;
pub mod math;
mod pose;
mod settings;
mod world;

pub use action::*;
pub use angle::*;
pub use ids::*;
pub use pose::*;
pub use settings::*;
pub use world::*;

pub type Vector2 = nalgebra::Vector2<f64>;
