// src/motion/mod.rs
pub mod estimator;
pub mod limits;
pub mod vector;

pub use estimator::{MoveEstimate, MoveEstimator, ProfileKind};
pub use limits::KinematicLimits;
pub use vector::{Vector4, EPSILON};
