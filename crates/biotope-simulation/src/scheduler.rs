use biotope_core::config::SimConfig;
use biotope_core::population::Population;
use biotope_core::world::World;

use crate::aging::AgingSystem;
use crate::backend::{backend_for, shared_backend, GridBackend};
use crate::conflict::ConflictSystem;
use crate::context::TickContext;
use crate::disease::DiseaseSystem;
use crate::error::SimResult;
use crate::foraging::ForagingSystem;
use crate::mortality::MortalitySystem;
use crate::movement::MovementSystem;
use crate::reproduction::ReproductionSystem;
use crate::resources::ResourceSystem;
use crate::summary::TickSummary;
use crate::system::System;

/// The systems of one tick, in execution order.
///
/// Foraging precedes conflict so hunger is current, conflict precedes
/// reproduction so the dead cannot mate, and reproduction precedes
/// mortality so newborns face the death checks of their first tick.
pub const PIPELINE: [&dyn System; 8] = [
    &ResourceSystem,
    &MovementSystem,
    &ForagingSystem,
    &AgingSystem,
    &DiseaseSystem,
    &ConflictSystem,
    &ReproductionSystem,
    &MortalitySystem,
];

/// Names of the pipeline stages, in order.
pub fn pipeline_names() -> [&'static str; 8] {
    PIPELINE.map(|system| system.name())
}

/// Runs the pipeline. Holds nothing but the grid backend, so one scheduler
/// can step any number of worlds.
#[derive(Debug)]
pub struct Scheduler {
    backend: Box<dyn GridBackend>,
}

impl Scheduler {
    pub fn new(backend: Box<dyn GridBackend>) -> Self {
        Self { backend }
    }

    /// A scheduler using the backend the configuration asks for.
    pub fn for_config(config: &SimConfig) -> Self {
        Self::new(backend_for(config.compute_backend))
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Advance `world` and `population` by one tick.
    pub fn step(&self, world: &mut World, population: &mut Population) -> SimResult<TickSummary> {
        run_pipeline(self.backend.as_ref(), world, population)
    }
}

/// Advance by one tick on the shared backend the world's configuration
/// selects. Repeated calls reuse the same worker pool.
pub fn step(world: &mut World, population: &mut Population) -> SimResult<TickSummary> {
    let backend = shared_backend(world.config().compute_backend);
    run_pipeline(backend, world, population)
}

fn run_pipeline(
    backend: &dyn GridBackend,
    world: &mut World,
    population: &mut Population,
) -> SimResult<TickSummary> {
    let mut summary = TickSummary::default();
    for system in PIPELINE {
        let mut ctx = TickContext {
            world: &mut *world,
            population: &mut *population,
            summary: &mut summary,
            backend,
        };
        system.run(&mut ctx)?;
    }
    summary.infected = population.infected_count();

    tracing::debug!(
        population = population.len(),
        births = summary.births,
        deaths = summary.deaths.total(),
        infected = summary.infected,
        conflicts = summary.conflicts,
        "tick complete"
    );
    Ok(summary)
}
