// src/format.rs - Human-readable durations and annotation text
use std::io::{self, Write};

use crate::motion::{KinematicLimits, Vector4};

/// Format seconds as `HHhMMmSSs`, flooring each field.
///
/// Negative and non-finite inputs print as zero.
pub fn format_duration(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    let hours = (seconds / 3600.0).floor();
    let minutes = ((seconds - 3600.0 * hours) / 60.0).floor();
    let secs = (seconds - 3600.0 * hours - 60.0 * minutes).floor();
    format!("{:02}h{:02}m{:02}s", hours as u64, minutes as u64, secs as u64)
}

/// `M117` line announcing the total run time.
pub fn total_line(total: f64) -> String {
    format!("M117 TTL {}", format_duration(total))
}

/// `M117` line announcing the remaining run time.
pub fn status_line(remaining: f64) -> String {
    format!("M117 ETR {}", format_duration(remaining))
}

fn percent(efficiency: f64) -> i64 {
    (efficiency * 100.0).round() as i64
}

fn axes4(v: &Vector4) -> String {
    format!("({}, {}, {}, {})", v.x, v.y, v.z, v.e)
}

/// Comment block summarising the limits used, followed by the total time.
pub fn write_header<W: Write + ?Sized>(
    out: &mut W,
    limits: &KinematicLimits,
    total: f64,
) -> io::Result<()> {
    let accel = percent(limits.accel_efficiency);
    let m = &limits.max_move_accel;
    writeln!(out, "; ---")?;
    writeln!(
        out,
        "; Decorated with timestamps by {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(
        out,
        "; Print acceleration settings (X,Y,Z,E) in mm/(s^2): {}, {}% avg efficiency",
        axes4(&limits.max_print_accel),
        accel
    )?;
    writeln!(
        out,
        "; Move acceleration settings (X,Y,Z) in mm/(s^2): ({}, {}, {}), {}% avg efficiency",
        m.x, m.y, m.z, accel
    )?;
    writeln!(
        out,
        "; Max jerk settings (X,Y,Z,E) in mm/s: {}, {}% avg efficiency",
        axes4(&limits.max_jerk),
        percent(limits.jerk_efficiency)
    )?;
    writeln!(out, "; ---")?;
    writeln!(out)?;
    writeln!(out, "{}", total_line(total))
}
