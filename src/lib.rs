// src/lib.rs - G-code run time estimation and remaining-time annotation

pub mod cli;
pub mod config;
pub mod error;
pub mod estimate;
pub mod file_manager;
pub mod format;
pub mod gcode;
pub mod motion;
pub mod sink;

pub use config::{ConfigError, TimerConfig};
pub use error::TimerError;
pub use estimate::{annotate, estimate_total};
pub use gcode::{Command, GCodeLine, MotionState, MotionStateMachine, Word};
pub use motion::{KinematicLimits, MoveEstimate, MoveEstimator, ProfileKind, Vector4, EPSILON};
pub use sink::{AnnotatingEmitter, LineSink, TimeAccumulator};
