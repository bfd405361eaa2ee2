// src/gcode/machine.rs - Single-pass motion state machine
use std::io::{self, BufRead};

use super::parser::{parse_line, Command, GCodeLine};
use crate::motion::{KinematicLimits, MoveEstimator, Vector4};
use crate::sink::LineSink;

/// Tool position and modal feed rate tracked while walking a program.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionState {
    pub position: Vector4,
    /// mm/s
    pub feed_rate: f64,
}

/// Walks a program line by line, tracking position and timing every `G1`.
///
/// A fresh machine starts at the origin with no feed rate. Each pass over a
/// program should use its own machine.
#[derive(Debug, Clone)]
pub struct MotionStateMachine<'a> {
    state: MotionState,
    estimator: MoveEstimator<'a>,
    lines: u64,
}

impl<'a> MotionStateMachine<'a> {
    pub fn new(limits: &'a KinematicLimits) -> Self {
        Self {
            state: MotionState::default(),
            estimator: MoveEstimator::new(limits),
            lines: 0,
        }
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn position(&self) -> Vector4 {
        self.state.position
    }

    pub fn limits(&self) -> &'a KinematicLimits {
        self.estimator.limits()
    }

    /// Number of lines processed so far.
    pub fn lines_processed(&self) -> u64 {
        self.lines
    }

    /// Apply one line to the state and return the time it takes.
    pub fn step(&mut self, line: &str) -> f64 {
        self.lines += 1;
        let Some(parsed) = parse_line(line) else {
            return 0.0;
        };
        match parsed.command {
            Command::LinearMove => self.linear_move(&parsed),
            Command::Home => {
                self.home(&parsed);
                0.0
            }
            Command::SetPosition => {
                self.set_position(&parsed);
                0.0
            }
            Command::Other(cmd) => {
                tracing::trace!("Passing through {}", cmd);
                0.0
            }
        }
    }

    /// Process one line and hand it to `sink` together with its duration.
    pub fn process_line<S: LineSink + ?Sized>(&mut self, line: &str, sink: &mut S) -> io::Result<()> {
        let duration = self.step(line);
        sink.handle_line(line, duration)
    }

    /// Process every line of `reader`, returning the number of lines seen.
    ///
    /// Line terminators (`\n` or `\r\n`) are stripped before the line reaches
    /// the sink. Invalid UTF-8 is replaced rather than rejected.
    pub fn process_reader<R: BufRead, S: LineSink + ?Sized>(
        &mut self,
        mut reader: R,
        sink: &mut S,
    ) -> io::Result<u64> {
        let mut buf = Vec::new();
        let mut count = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            let line = String::from_utf8_lossy(&buf);
            self.process_line(&line, sink)?;
            count += 1;
        }
        Ok(count)
    }

    fn linear_move(&mut self, line: &GCodeLine<'_>) -> f64 {
        let mut target = self.state.position;
        for word in line.words() {
            match word.letter {
                'X' => target.x = word.value,
                'Y' => target.y = word.value,
                'Z' => target.z = word.value,
                'E' => target.e = word.value,
                'F' => self.state.feed_rate = word.value / 60.0,
                _ => {}
            }
        }
        let estimate = self
            .estimator
            .estimate(self.state.position, target, self.state.feed_rate);
        self.state.position = estimate.target;
        estimate.duration
    }

    /// `G28`: a bare `G28` sends X, Y and Z to 0; otherwise only the named
    /// axes take the given values. Homing time is not modelled.
    fn home(&mut self, line: &GCodeLine<'_>) {
        let pos = &mut self.state.position;
        if !line.has_params() {
            pos.x = 0.0;
            pos.y = 0.0;
            pos.z = 0.0;
            return;
        }
        for word in line.words() {
            match word.letter {
                'X' => pos.x = word.value,
                'Y' => pos.y = word.value,
                'Z' => pos.z = word.value,
                _ => {}
            }
        }
    }

    /// `G92`: a bare `G92` zeroes every axis, extrusion included.
    fn set_position(&mut self, line: &GCodeLine<'_>) {
        let pos = &mut self.state.position;
        if !line.has_params() {
            *pos = Vector4::ZERO;
            return;
        }
        for word in line.words() {
            match word.letter {
                'X' => pos.x = word.value,
                'Y' => pos.y = word.value,
                'Z' => pos.z = word.value,
                'E' => pos.e = word.value,
                _ => {}
            }
        }
    }
}
