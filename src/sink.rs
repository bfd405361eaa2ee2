// src/sink.rs - Consumers of processed lines
use std::io::{self, Write};

use crate::format::{status_line, write_header};
use crate::motion::KinematicLimits;

/// Receives every input line, in order, exactly once, with the time the
/// line takes to execute.
pub trait LineSink {
    fn handle_line(&mut self, line: &str, duration: f64) -> io::Result<()>;
}

impl<F: FnMut(&str, f64)> LineSink for F {
    fn handle_line(&mut self, line: &str, duration: f64) -> io::Result<()> {
        self(line, duration);
        Ok(())
    }
}

/// Sums line durations into a total run time.
#[derive(Debug, Clone, Default)]
pub struct TimeAccumulator {
    total: f64,
}

impl TimeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimated time in seconds for everything seen so far.
    pub fn total(&self) -> f64 {
        self.total
    }
}

impl LineSink for TimeAccumulator {
    fn handle_line(&mut self, _line: &str, duration: f64) -> io::Result<()> {
        self.total += duration;
        Ok(())
    }
}

/// Re-emits each line and inserts a remaining-time status line whenever the
/// remaining time, rounded to whole seconds, changes.
///
/// `total` must come from a [`TimeAccumulator`] pass over the same program
/// with the same limits.
#[derive(Debug)]
pub struct AnnotatingEmitter<W: Write> {
    out: W,
    total: f64,
    current: f64,
    last_printed: f64,
    status_lines: u64,
}

impl<W: Write> AnnotatingEmitter<W> {
    pub fn new(out: W, total: f64) -> Self {
        Self {
            out,
            total,
            current: 0.0,
            last_printed: total.round(),
            status_lines: 0,
        }
    }

    /// Write the limits summary and total-time line that precede the program.
    pub fn write_header(&mut self, limits: &KinematicLimits) -> io::Result<()> {
        write_header(&mut self.out, limits, self.total)
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Time accumulated over the lines emitted so far.
    pub fn elapsed(&self) -> f64 {
        self.current
    }

    /// Number of status lines inserted so far.
    pub fn status_lines(&self) -> u64 {
        self.status_lines
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LineSink for AnnotatingEmitter<W> {
    fn handle_line(&mut self, line: &str, duration: f64) -> io::Result<()> {
        writeln!(self.out, "{}", line)?;
        self.current += duration;
        let remaining = (self.total - self.current).round();
        if remaining != self.last_printed {
            self.last_printed = remaining;
            self.status_lines += 1;
            writeln!(self.out, "{}", status_line(remaining))?;
        }
        Ok(())
    }
}
