//! Fixtures shared by the unit tests of the individual systems.

use biotope_core::{
    Agent, AgentId, Population, Position, ResourceGrid, Sex, SimConfig, SimRng, World,
};

use crate::backend::CpuBackend;
use crate::context::TickContext;
use crate::error::SimResult;
use crate::summary::TickSummary;
use crate::system::System;

/// A small bounded world with every cell holding `food`.
pub fn world_with_food(config: SimConfig, food: f32) -> World {
    let grid = ResourceGrid::filled(config.width, config.height, food);
    let rng = SimRng::new(config.seed);
    World::from_parts(config, rng, grid).unwrap()
}

/// A plain adult agent at `(x, y)`.
pub fn agent(id: u64, x: u32, y: u32, sex: Sex) -> Agent {
    Agent::new(AgentId(id), Position::new(x, y), sex).with_age(30.0)
}

/// Population holding exactly the given agents.
pub fn population_of(agents: impl IntoIterator<Item = Agent>) -> Population {
    let mut population = Population::new();
    for agent in agents {
        population.insert(agent).unwrap();
    }
    population
}

/// Run one system on its own, on the CPU backend.
pub fn run_system(
    system: &dyn System,
    world: &mut World,
    population: &mut Population,
) -> SimResult<TickSummary> {
    let mut summary = TickSummary::default();
    let mut ctx = TickContext {
        world,
        population,
        summary: &mut summary,
        backend: &CpuBackend,
    };
    system.run(&mut ctx)?;
    Ok(summary)
}
