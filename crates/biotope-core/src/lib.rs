//! Core types for Biotope: agents, the population arena, the resource grid,
//! configuration, and the seeded RNG.
//!
//! This crate holds state only. The systems that advance it tick by tick
//! live in `biotope-simulation`; a front end reads agents and grid cells
//! from here and pushes replacement [`SimConfig`] values back.

/// Agents and the small value types they are made of.
pub mod agent;
/// Simulation parameters and time-unit conversion.
pub mod config;
/// Error types used throughout the crate.
pub mod error;
/// Grid topology and the resource field.
pub mod grid;
/// The live population, keyed by stable identity.
pub mod population;
/// Two-stream deterministic randomness.
pub mod rng;
/// The environment shared by all systems.
pub mod world;

/// Re-export agent types.
pub use agent::{Agent, AgentId, Position, Sex};
/// Re-export configuration types.
pub use config::{GridBackendKind, SimConfig, TimeUnit};
/// Re-export error types.
pub use error::{ConfigError, CoreError, CoreResult};
/// Re-export grid types.
pub use grid::{ResourceGrid, Topology};
/// Re-export the population arena.
pub use population::Population;
/// Re-export the RNG.
pub use rng::SimRng;
/// Re-export the world model.
pub use world::World;
