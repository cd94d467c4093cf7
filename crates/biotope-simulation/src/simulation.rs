use biotope_core::config::SimConfig;
use biotope_core::population::Population;
use biotope_core::world::World;

use crate::clock::SimClock;
use crate::error::SimResult;
use crate::history::{History, Sample};
use crate::init::{create_world, populate};
use crate::scheduler::Scheduler;
use crate::summary::TickSummary;

/// How [`Simulation::apply_config`] handled a new configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    /// The world and population were rebuilt from scratch.
    Reset,
    /// The new values take effect from the next tick.
    Applied,
}

/// The top-level simulation driver.
///
/// Owns the world, the population, the scheduler and the run history, and
/// advances them one tick at a time.
pub struct Simulation {
    world: World,
    population: Population,
    scheduler: Scheduler,
    clock: SimClock,
    history: History,
    last_summary: Option<TickSummary>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.clock.tick())
            .field("population", &self.population.len())
            .field("backend", &self.scheduler.backend_name())
            .field("samples", &self.history.len())
            .finish()
    }
}

impl Simulation {
    /// Build a world and its starting population from `config`.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        let mut world = create_world(config)?;
        let population = populate(&mut world)?;
        Ok(Self {
            scheduler: Scheduler::for_config(world.config()),
            clock: SimClock::new(world.years_per_tick()),
            history: History::default(),
            last_summary: None,
            world,
            population,
        })
    }

    /// Keep at most `capacity` history samples (0 keeps all).
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history = History::new(capacity);
        self
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> SimResult<&TickSummary> {
        let summary = self.scheduler.step(&mut self.world, &mut self.population)?;
        let tick = self.clock.advance();
        self.history.record(Sample::capture(
            tick,
            &self.population,
            &self.world.grid,
            &summary,
        ));
        Ok(&*self.last_summary.insert(summary))
    }

    /// Advance the simulation by `n` ticks.
    pub fn run(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    /// Replace the configuration.
    ///
    /// Changes to the grid shape, the starting population, the initial food
    /// or the time unit rebuild everything from the new seed; anything else
    /// takes effect on the next tick without disturbing the current state.
    /// An invalid configuration is rejected and the simulation is left as
    /// it was.
    pub fn apply_config(&mut self, config: SimConfig) -> SimResult<ConfigChange> {
        let config = config.validated()?;
        if self.world.config().requires_reset(&config) {
            self.rebuild(config)?;
            return Ok(ConfigChange::Reset);
        }

        if config.compute_backend != self.world.config().compute_backend {
            self.scheduler = Scheduler::for_config(&config);
        }
        self.world.reconfigure(config)?;
        tracing::info!(tick = self.clock.tick(), "configuration applied");
        Ok(ConfigChange::Applied)
    }

    /// Start over from the current configuration and its seed.
    pub fn reset(&mut self) -> SimResult<()> {
        self.rebuild(self.world.config().clone())
    }

    fn rebuild(&mut self, config: SimConfig) -> SimResult<()> {
        let mut world = create_world(config)?;
        let population = populate(&mut world)?;
        self.scheduler = Scheduler::for_config(world.config());
        self.clock = SimClock::new(world.years_per_tick());
        self.history.clear();
        self.last_summary = None;
        self.world = world;
        self.population = population;
        tracing::info!(seed = self.world.config().seed, "simulation reset");
        Ok(())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn config(&self) -> &SimConfig {
        self.world.config()
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Summary of the most recent tick, if any ran since the last reset.
    pub fn last_summary(&self) -> Option<&TickSummary> {
        self.last_summary.as_ref()
    }

    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }

    pub fn backend_name(&self) -> &'static str {
        self.scheduler.backend_name()
    }

    /// Extract the world and population, consuming the simulation.
    pub fn into_parts(self) -> (World, Population) {
        (self.world, self.population)
    }
}
