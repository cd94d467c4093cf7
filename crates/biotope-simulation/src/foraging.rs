use biotope_core::config::SimConfig;
use biotope_core::grid::ResourceGrid;
use biotope_core::population::Population;

use crate::context::TickContext;
use crate::error::SimResult;
use crate::system::System;

/// Most food an agent can take from its cell in one tick.
pub const BITE_SIZE: f64 = 0.1;
/// Energy gained per unit of food eaten.
pub const ENERGY_PER_FOOD: f64 = 5.0;
/// Ticks an agent counts as "recently fed" after a meal.
pub const RECENT_MEAL_TICKS: u8 = 5;

/// Agents eat from their own cell and track hunger.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForagingSystem;

impl System for ForagingSystem {
    fn name(&self) -> &'static str {
        "foraging"
    }

    fn run(&self, ctx: &mut TickContext<'_>) -> SimResult<()> {
        let (config, _, grid) = ctx.world.split_mut();
        forage(config, grid, ctx.population);
        Ok(())
    }
}

/// Feed every agent in id order. Agents sharing a cell compete for the
/// same food, so earlier ids eat first.
pub fn forage(config: &SimConfig, grid: &mut ResourceGrid, population: &mut Population) {
    for agent in population.iter_mut() {
        let available = f64::from(grid.get(agent.position));
        let eat = available.min(BITE_SIZE);
        if eat > 0.0 {
            grid.set(agent.position, (available - eat) as f32);
            agent.energy += eat * ENERGY_PER_FOOD;
        }

        if eat > 0.0 && eat >= config.min_eat_to_count {
            agent.ate_recent_ticks = RECENT_MEAL_TICKS;
            agent.hunger_streak_ticks = 0;
        } else {
            agent.hunger_streak_ticks = agent.hunger_streak_ticks.saturating_add(1);
            agent.ate_recent_ticks = agent.ate_recent_ticks.saturating_sub(1);
        }
    }
}
