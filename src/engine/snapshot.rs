//! Snapshot ledger
//!
//! Workers record periodic views of their local populations into a shared,
//! frame-indexed ledger; after every worker has joined, the coordinator
//! writes one file per frame. All frames are preallocated before workers
//! start, so a record touches exactly one per-frame mutex for the duration of
//! a slice copy; workers on different frames never contend.
//!
//! File format: `iter{n}.txt`, one individual per line, comma-separated
//! decision variables followed by the objective value, ASCII, trailing
//! newline per line.

use std::fmt::Write as _;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, error};

use crate::genome::traits::Genome;
use crate::population::individual::Individual;

/// Render an individual as a snapshot line (no trailing newline)
pub fn format_individual<G: Genome>(individual: &Individual<G>) -> String {
    let mut line = String::new();
    for gene in individual.genome().genes() {
        let _ = write!(line, "{}, ", gene);
    }
    let _ = write!(line, "{}", individual.objective());
    line
}

/// Write a whole population to `path`, one individual per line
pub fn write_population<G: Genome>(
    path: &Path,
    population: &[Individual<G>],
) -> std::io::Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    for individual in population {
        writeln!(writer, "{}", format_individual(individual))?;
    }
    writer.flush()
}

/// Frame-indexed snapshot store shared by all workers
#[derive(Debug)]
pub struct SnapshotLedger<G: Genome> {
    frames: Vec<Mutex<Vec<Option<Individual<G>>>>>,
    print_every: usize,
}

impl<G: Genome> SnapshotLedger<G> {
    /// Preallocate `frame_count` frames of `population_size` vacant slots.
    ///
    /// Frame `f` corresponds to iteration `(f + 1) * print_every`.
    pub fn new(frame_count: usize, population_size: usize, print_every: usize) -> Self {
        let frames = (0..frame_count)
            .map(|_| Mutex::new(vec![None; population_size]))
            .collect();
        Self {
            frames,
            print_every,
        }
    }

    /// Number of preallocated frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Record a worker's local population into frame `frame` starting at
    /// slice offset `offset`.
    ///
    /// Workers own disjoint slice ranges, so concurrent records only contend
    /// when they target the same frame, and then only for the duration of
    /// the copy.
    pub fn record(&self, frame: usize, offset: usize, local: &[Individual<G>]) {
        let Some(slot) = self.frames.get(frame) else {
            debug_assert!(false, "snapshot frame {frame} out of range");
            return;
        };

        let mut buffer = slot.lock().unwrap_or_else(PoisonError::into_inner);
        for (i, individual) in local.iter().enumerate() {
            if let Some(cell) = buffer.get_mut(offset + i) {
                *cell = Some(individual.clone());
            }
        }
    }

    /// Filled slots in a frame (for accounting)
    pub fn frame_occupancy(&self, frame: usize) -> usize {
        self.frames
            .get(frame)
            .map(|slot| {
                slot.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .iter()
                    .filter(|cell| cell.is_some())
                    .count()
            })
            .unwrap_or(0)
    }

    /// Write one `iter{n}.txt` file per frame into `dir`, creating the
    /// directory if needed.
    ///
    /// An I/O failure on one frame is reported and the remaining frames are
    /// still attempted; the search result does not depend on this succeeding.
    /// Returns the paths actually written.
    pub fn flush(&self, dir: &Path) -> Vec<PathBuf> {
        if self.frames.is_empty() {
            return Vec::new();
        }
        if let Err(err) = fs::create_dir_all(dir) {
            error!(dir = %dir.display(), %err, "cannot create snapshot directory");
            return Vec::new();
        }

        let mut written = Vec::with_capacity(self.frames.len());
        for (frame, slot) in self.frames.iter().enumerate() {
            let iteration = (frame + 1) * self.print_every;
            let path = dir.join(format!("iter{}.txt", iteration));
            let buffer = slot.lock().unwrap_or_else(PoisonError::into_inner);
            match Self::write_frame(&path, &buffer) {
                Ok(()) => written.push(path),
                Err(err) => error!(path = %path.display(), %err, "cannot write snapshot frame"),
            }
        }
        debug!(files = written.len(), "snapshot frames flushed");
        written
    }

    fn write_frame(path: &Path, frame: &[Option<Individual<G>>]) -> std::io::Result<()> {
        let file = fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        for individual in frame.iter().flatten() {
            writeln!(writer, "{}", format_individual(individual))?;
        }
        writer.flush()
    }
}
