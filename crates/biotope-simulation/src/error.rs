use biotope_core::CoreError;

use crate::backend::BackendError;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors surfaced by the simulation engine.
///
/// Backend failures inside a tick are recovered by the resource system and
/// never reach this type through [`crate::scheduler::Scheduler::step`]; the
/// variant exists for callers that drive a [`crate::backend::GridBackend`]
/// directly.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Invalid configuration or broken population bookkeeping.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A grid backend could not complete its work.
    #[error("grid backend error: {0}")]
    Backend(#[from] BackendError),
}
