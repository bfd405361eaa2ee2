// src/file_manager.rs - Opening programs and choosing where annotated output goes
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::TimerError;
use crate::estimate::{annotate, estimate_total};
use crate::motion::KinematicLimits;

/// Where the annotated program is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Default output path: `.timed` inserted before the extension, or appended
/// when there is none. `part.gcode` becomes `part.timed.gcode`.
pub fn timed_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().map(OsString::from).unwrap_or_default();
    let mut name = stem;
    name.push(".timed");
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Runs both passes over files on disk with one set of limits.
#[derive(Debug, Clone)]
pub struct FileManager<'a> {
    limits: &'a KinematicLimits,
}

impl<'a> FileManager<'a> {
    pub fn new(limits: &'a KinematicLimits) -> Self {
        Self { limits }
    }

    fn open(&self, path: &Path) -> Result<BufReader<File>, TimerError> {
        let file = File::open(path).map_err(|source| TimerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(BufReader::new(file))
    }

    /// Total estimated time of the program at `path`, in seconds.
    pub fn estimate(&self, path: &Path) -> Result<f64, TimerError> {
        tracing::info!("Estimating G-code file: {}", path.display());
        let reader = self.open(path)?;
        let total = estimate_total(reader, self.limits).map_err(|source| TimerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("{}: {:.1}s", path.display(), total);
        Ok(total)
    }

    /// Re-read `path` and write the annotated program to `target`.
    pub fn annotate(&self, path: &Path, target: &OutputTarget, total: f64) -> Result<(), TimerError> {
        let reader = self.open(path)?;
        match target {
            OutputTarget::Stdout => {
                let stdout = io::stdout();
                self.write_annotated(reader, stdout.lock(), path, Path::new("<stdout>"), total)
            }
            OutputTarget::File(out_path) => {
                tracing::info!("Writing annotated G-code file: {}", out_path.display());
                let file = File::create(out_path).map_err(|source| TimerError::Write {
                    path: out_path.clone(),
                    source,
                })?;
                self.write_annotated(reader, BufWriter::new(file), path, out_path, total)
            }
        }
    }

    fn write_annotated<W: Write>(
        &self,
        reader: BufReader<File>,
        out: W,
        in_path: &Path,
        out_path: &Path,
        total: f64,
    ) -> Result<(), TimerError> {
        // Writer errors are reported against the output, everything else
        // against the input.
        let mut out = TrackedWriter { inner: out, failed: false };
        match annotate(reader, &mut out, self.limits, total) {
            Ok(status_lines) => {
                tracing::debug!("Inserted {} status lines", status_lines);
                Ok(())
            }
            Err(source) if out.failed => Err(TimerError::Write {
                path: out_path.to_path_buf(),
                source,
            }),
            Err(source) => Err(TimerError::Read {
                path: in_path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Remembers whether an error came from the writer.
struct TrackedWriter<W> {
    inner: W,
    failed: bool,
}

impl<W: Write> Write for TrackedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).inspect_err(|_| self.failed = true)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().inspect_err(|_| self.failed = true)
    }
}
