//! Where the resource relaxation is computed.
//!
//! The default [`CpuBackend`] updates the grid in place. [`ParallelBackend`]
//! stands in for an accelerator: it uploads the cells into a staging buffer,
//! relaxes it in chunks on its own worker pool, and downloads the result.
//! Both run the same per-cell arithmetic through [`relax`], so the choice of
//! backend never changes simulation outcomes.

use std::sync::OnceLock;

use rayon::prelude::*;

use biotope_core::GridBackendKind;

/// Cells per work item handed to a worker.
const DEFAULT_CHUNK: usize = 4096;

/// Why a backend could not run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    /// The backend has no execution resources.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The staged buffer came back with the wrong number of cells.
    #[error("staged buffer holds {actual} cells, expected {expected}")]
    ShapeMismatch {
        /// Cells in the grid.
        expected: usize,
        /// Cells returned by the backend.
        actual: usize,
    },
}

/// Computes one regeneration step over the whole grid.
///
/// Implementations must either update every cell or leave `cells` untouched
/// and return an error, so the caller can retry on another backend.
pub trait GridBackend: std::fmt::Debug + Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Apply `cell += alpha * (1 - cell)` and clamp to `[0, 1]`.
    fn regenerate(&self, cells: &mut [f32], alpha: f32) -> Result<(), BackendError>;
}

/// The shared per-cell rule.
///
/// Any `alpha` of one or more refills a cell in a single step, so the rate
/// is bounded to `[0, 1]` first. A rate that does not fit in an `f32`
/// arrives here as infinity, and `inf * 0` would otherwise poison full cells.
pub fn relax(cells: &mut [f32], alpha: f32) {
    let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    for cell in cells {
        *cell = (*cell + alpha * (1.0 - *cell)).clamp(0.0, 1.0);
    }
}

/// In-place update on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackend;

impl GridBackend for CpuBackend {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn regenerate(&self, cells: &mut [f32], alpha: f32) -> Result<(), BackendError> {
        relax(cells, alpha);
        Ok(())
    }
}

/// Staged update on a dedicated worker pool.
#[derive(Debug)]
pub struct ParallelBackend {
    pool: Result<rayon::ThreadPool, String>,
    chunk: usize,
}

impl ParallelBackend {
    /// Build a backend with `threads` workers (0 lets the pool decide).
    ///
    /// Failing to start the pool is not an error here: the backend reports
    /// itself unavailable on every call and the caller falls back.
    pub fn new(threads: usize) -> Self {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("biotope-grid-{i}"))
            .build()
            .map_err(|e| e.to_string());
        Self {
            pool,
            chunk: DEFAULT_CHUNK,
        }
    }

    /// Override the number of cells per work item.
    pub fn with_chunk(mut self, chunk: usize) -> Self {
        self.chunk = chunk.max(1);
        self
    }

    /// Whether the worker pool started.
    pub fn is_available(&self) -> bool {
        self.pool.is_ok()
    }
}

impl GridBackend for ParallelBackend {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn regenerate(&self, cells: &mut [f32], alpha: f32) -> Result<(), BackendError> {
        let pool = self
            .pool
            .as_ref()
            .map_err(|reason| BackendError::Unavailable(reason.clone()))?;

        let mut staged = cells.to_vec();
        let chunk = self.chunk;
        pool.install(|| {
            staged
                .par_chunks_mut(chunk)
                .for_each(|part| relax(part, alpha));
        });

        if staged.len() != cells.len() {
            return Err(BackendError::ShapeMismatch {
                expected: cells.len(),
                actual: staged.len(),
            });
        }
        cells.copy_from_slice(&staged);
        Ok(())
    }
}

/// The backend selected by a configuration.
pub fn backend_for(kind: GridBackendKind) -> Box<dyn GridBackend> {
    match kind {
        GridBackendKind::Cpu => Box::new(CpuBackend),
        GridBackendKind::Parallel => Box::new(ParallelBackend::new(0)),
    }
}

/// A process-wide backend of the given kind. The parallel worker pool is
/// started on first use and kept for the life of the process.
pub fn shared_backend(kind: GridBackendKind) -> &'static dyn GridBackend {
    static PARALLEL: OnceLock<ParallelBackend> = OnceLock::new();
    match kind {
        GridBackendKind::Cpu => &CpuBackend,
        GridBackendKind::Parallel => PARALLEL.get_or_init(|| ParallelBackend::new(0)),
    }
}
