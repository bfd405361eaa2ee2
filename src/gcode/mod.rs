// src/gcode/mod.rs
pub mod machine;
pub mod parser;

pub use machine::{MotionState, MotionStateMachine};
pub use parser::{parse_line, Command, GCodeLine, Word};
