use crate::context::TickContext;
use crate::error::SimResult;
use crate::system::System;

/// Advances age, counts down the reproduction cooldown and charges the
/// yearly maintenance cost, all scaled to the tick's year fraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgingSystem;

impl System for AgingSystem {
    fn name(&self) -> &'static str {
        "aging"
    }

    fn run(&self, ctx: &mut TickContext<'_>) -> SimResult<()> {
        let years = ctx.years_per_tick();
        let upkeep = ctx.world.config().maintenance_energy_per_year * years;
        for agent in ctx.population.iter_mut() {
            agent.age_years += years;
            agent.repro_cooldown_years = (agent.repro_cooldown_years - years).max(0.0);
            agent.energy -= upkeep;
        }
        Ok(())
    }
}
