//! Tick-based life simulation for Biotope.
//!
//! Each tick runs a fixed pipeline of systems over a [`biotope_core::World`]
//! and its [`biotope_core::Population`]: resource regrowth, movement,
//! foraging, aging, disease, conflict, reproduction and mortality. All
//! randomness comes from the world's RNG and agents are always visited in id
//! order, so a seed fully determines a run.

/// Aging system: age, cooldown and upkeep.
pub mod aging;
/// Where grid-wide resource updates are computed.
pub mod backend;
/// Simulation clock for tracking ticks and simulated years.
pub mod clock;
/// Conflict system: fights between hungry and fed agents.
pub mod conflict;
/// Mutable context passed to systems each tick.
pub mod context;
/// Disease system and the annual-to-tick probability conversion.
pub mod disease;
/// Error types for the simulation crate.
pub mod error;
/// Foraging system: eating and hunger tracking.
pub mod foraging;
/// Per-tick samples and running totals.
pub mod history;
/// World and population construction.
pub mod init;
/// Mortality system: disease, starvation and old age.
pub mod mortality;
/// Movement system: the random walk.
pub mod movement;
/// Reproduction system: pairing within cells.
pub mod reproduction;
/// Resource system: food regrowth.
pub mod resources;
/// The fixed tick pipeline.
pub mod scheduler;
/// Top-level simulation driver.
pub mod simulation;
/// Per-tick counters.
pub mod summary;
/// The trait that all simulation systems implement.
pub mod system;

#[cfg(test)]
mod test_support;

/// Re-exports of the grid backends.
pub use backend::{shared_backend, BackendError, CpuBackend, GridBackend, ParallelBackend};
/// Re-export of [`clock::SimClock`].
pub use clock::SimClock;
/// Re-export of [`context::TickContext`].
pub use context::TickContext;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of the history types.
pub use history::{History, RunTotals, Sample};
/// Re-exports of the construction functions.
pub use init::{create_world, populate};
/// Re-exports of the scheduler.
pub use scheduler::{step, Scheduler, PIPELINE};
/// Re-exports of [`simulation::Simulation`] and [`simulation::ConfigChange`].
pub use simulation::{ConfigChange, Simulation};
/// Re-exports of the summary types.
pub use summary::{DeathCause, DeathTally, TickSummary};
/// Re-export of [`system::System`].
pub use system::System;
