// src/motion/limits.rs
use super::vector::Vector4;

/// Acceleration and jerk ceilings shared read-only by every move computation
/// of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicLimits {
    /// Ceiling for extruding moves, mm/s².
    pub max_print_accel: Vector4,
    /// Ceiling for travel moves, mm/s². The E component is always 0.
    pub max_move_accel: Vector4,
    /// Per-axis instantaneous speed change, mm/s.
    pub max_jerk: Vector4,
    pub jerk_efficiency: f64,
    pub accel_efficiency: f64,
    pub speed_multiplier: f64,
}

impl Default for KinematicLimits {
    fn default() -> Self {
        Self {
            max_print_accel: Vector4::new(200.0, 200.0, 30.0, 1000.0),
            max_move_accel: Vector4::new(200.0, 200.0, 30.0, 0.0),
            max_jerk: Vector4::new(15.0, 15.0, 0.0, 1000.0),
            jerk_efficiency: 1.0,
            accel_efficiency: 1.0,
            speed_multiplier: 1.0,
        }
    }
}

impl KinematicLimits {
    pub fn max_jerk_magnitude(&self) -> f64 {
        self.max_jerk.norm()
    }

    /// Acceleration ceiling for a move: print limits when it extrudes,
    /// travel limits otherwise.
    pub fn accel_for(&self, movement: &Vector4) -> Vector4 {
        if movement.e != 0.0 {
            self.max_print_accel
        } else {
            self.max_move_accel
        }
    }
}
