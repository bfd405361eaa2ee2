// src/motion/estimator.rs
//! Per-move duration model.
//!
//! Each linear move is timed on its own with a jerk-limited trapezoidal
//! velocity profile: the move starts and ends at the jerk speed allowed by
//! its direction, accelerates to the commanded speed, cruises, and
//! decelerates. Moves too short to reach cruise speed fall back to a
//! triangular profile. No lookahead is performed; neighbouring moves never
//! influence each other's entry or exit speed.

use super::limits::KinematicLimits;
use super::vector::{Vector4, EPSILON};

/// Velocity profile chosen for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Zero-length move, no time attributed.
    Stationary,
    /// Accelerate, cruise, decelerate.
    Trapezoid,
    /// Never reaches cruise speed.
    Triangle,
    /// No usable acceleration or cruise speed; timed at the jerk speed.
    JerkLimited,
}

/// Result of timing one linear move.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveEstimate {
    pub target: Vector4,
    pub movement: Vector4,
    pub length: f64,
    /// Cruise velocity along the move direction, mm/s.
    pub target_speed: Vector4,
    /// Start/stop speed per axis, mm/s.
    pub jerk_speed: Vector4,
    /// Effective acceleration magnitude, mm/s².
    pub acceleration: f64,
    /// Length of one acceleration ramp, s.
    pub accel_time: f64,
    /// Total move time, s.
    pub duration: f64,
    pub profile: ProfileKind,
}

impl MoveEstimate {
    fn stationary(target: Vector4, movement: Vector4, length: f64) -> Self {
        Self {
            target,
            movement,
            length,
            target_speed: Vector4::ZERO,
            jerk_speed: Vector4::ZERO,
            acceleration: 0.0,
            accel_time: 0.0,
            duration: 0.0,
            profile: ProfileKind::Stationary,
        }
    }
}

/// Times moves against a fixed set of limits.
#[derive(Debug, Clone)]
pub struct MoveEstimator<'a> {
    limits: &'a KinematicLimits,
    max_jerk_magnitude: f64,
}

impl<'a> MoveEstimator<'a> {
    pub fn new(limits: &'a KinematicLimits) -> Self {
        Self {
            limits,
            max_jerk_magnitude: limits.max_jerk_magnitude(),
        }
    }

    pub fn limits(&self) -> &'a KinematicLimits {
        self.limits
    }

    /// Time a straight move from `from` to `target` at `feed_rate` mm/s.
    ///
    /// The returned duration is always finite and non-negative.
    pub fn estimate(&self, from: Vector4, target: Vector4, feed_rate: f64) -> MoveEstimate {
        let limits = self.limits;
        let movement = target - from;
        let length = movement.norm();
        if length <= EPSILON {
            return MoveEstimate::stationary(target, movement, length);
        }

        let rate_factor = limits.speed_multiplier * feed_rate / length;
        let target_speed = movement.scale(rate_factor);

        // Spread the full jerk magnitude along the move direction, then shrink
        // the whole vector until no axis exceeds its own ceiling.
        let jerk_raw = movement.abs().scale(self.max_jerk_magnitude / length);
        let jerk_clamp = jerk_raw
            .zip_map(limits.max_jerk, |j, max| if j > max { max / j } else { 1.0 })
            .fold(1.0, f64::min);
        let jerk_speed = jerk_raw.scale(jerk_clamp * limits.jerk_efficiency);
        let jerk_magnitude = jerk_speed.norm();

        let speed_delta = target_speed
            .abs()
            .zip_map(jerk_speed, |speed, jerk| (speed - jerk).max(0.0));

        let accel_limits = limits.accel_for(&movement);
        let starved = speed_delta
            .components()
            .iter()
            .zip(accel_limits.components())
            .any(|(dv, a)| *dv > EPSILON && a <= EPSILON);
        if starved {
            tracing::warn!(
                "Move {:?} needs acceleration on an axis with a zero ceiling; that axis is ignored",
                movement
            );
        }

        // The slowest axis to reach speed sets the ramp time for all of them.
        let accel_time = speed_delta
            .zip_map(accel_limits, |dv, a| if a > EPSILON { dv / a } else { 0.0 })
            .fold(0.0, f64::max);

        let (accel_time, acceleration) = if accel_time > EPSILON {
            let accel = speed_delta.map(|dv| dv / accel_time);
            (accel_time, accel.norm() * limits.accel_efficiency)
        } else {
            (0.0, 0.0)
        };

        let speed_magnitude = target_speed.norm();
        let ramp_distance = (2.0 * jerk_magnitude + acceleration * accel_time) * accel_time;

        let (duration, profile) = if length > ramp_distance {
            if speed_magnitude > EPSILON {
                (
                    2.0 * accel_time + (length - ramp_distance) / speed_magnitude,
                    ProfileKind::Trapezoid,
                )
            } else {
                tracing::warn!("Linear move of {:.3} mm without a feed rate", length);
                (jerk_limited(length, jerk_magnitude), ProfileKind::JerkLimited)
            }
        } else if acceleration > EPSILON {
            // length = a·t²/4 + jerk·t, positive root.
            let root = (jerk_magnitude * jerk_magnitude + acceleration * length).sqrt();
            ((root - jerk_magnitude) / (acceleration / 2.0), ProfileKind::Triangle)
        } else {
            (jerk_limited(length, jerk_magnitude), ProfileKind::JerkLimited)
        };

        tracing::debug!(
            ?profile,
            length,
            accel_time,
            acceleration,
            jerk = jerk_magnitude,
            duration,
            "Timed linear move"
        );

        MoveEstimate {
            target,
            movement,
            length,
            target_speed,
            jerk_speed,
            acceleration,
            accel_time,
            duration,
            profile,
        }
    }
}

fn jerk_limited(length: f64, jerk_magnitude: f64) -> f64 {
    if jerk_magnitude > EPSILON {
        length / jerk_magnitude
    } else {
        0.0
    }
}
