// src/estimate.rs - The two passes over a program
use std::io::{self, BufRead, Write};

use crate::gcode::MotionStateMachine;
use crate::motion::KinematicLimits;
use crate::sink::{AnnotatingEmitter, TimeAccumulator};

/// First pass: total estimated time of the program in seconds.
pub fn estimate_total<R: BufRead>(reader: R, limits: &KinematicLimits) -> io::Result<f64> {
    let mut machine = MotionStateMachine::new(limits);
    let mut accumulator = TimeAccumulator::new();
    let lines = machine.process_reader(reader, &mut accumulator)?;
    tracing::debug!("Estimated {} lines: {:.3}s", lines, accumulator.total());
    Ok(accumulator.total())
}

/// Second pass: write the header and the program with remaining-time
/// annotations to `out`. `total` is the result of [`estimate_total`] over the
/// same program and limits.
///
/// Returns the number of status lines inserted.
pub fn annotate<R: BufRead, W: Write>(
    reader: R,
    out: W,
    limits: &KinematicLimits,
    total: f64,
) -> io::Result<u64> {
    let mut machine = MotionStateMachine::new(limits);
    let mut emitter = AnnotatingEmitter::new(out, total);
    emitter.write_header(limits)?;
    machine.process_reader(reader, &mut emitter)?;
    emitter.flush()?;
    Ok(emitter.status_lines())
}
