//! Building a fresh world and its starting population.

use biotope_core::agent::{Agent, Position, Sex};
use biotope_core::config::SimConfig;
use biotope_core::error::CoreError;
use biotope_core::grid::ResourceGrid;
use biotope_core::population::Population;
use biotope_core::rng::SimRng;
use biotope_core::world::World;

use crate::error::SimResult;

/// Fraction of the cell count that becomes vegetation patches, per unit of
/// mean food.
const PATCH_DENSITY: f64 = 0.02;
/// Patch radius range, in cells, inclusive.
const PATCH_RADIUS: (i64, i64) = (3, 12);
/// Oldest starting age, as a fraction of the lifespan.
const MAX_START_AGE_FRACTION: f64 = 0.95;

/// Seed the RNG from the configuration and lay out the initial food.
pub fn create_world(config: SimConfig) -> SimResult<World> {
    config.validate().map_err(CoreError::from)?;
    let mut rng = SimRng::new(config.seed);
    let grid = initial_grid(&config, &mut rng);
    Ok(World::from_parts(config, rng, grid)?)
}

/// The starting food layout: a uniform fill when `initial_food_flat` is set,
/// otherwise randomly placed circular patches.
///
/// Each patch draws, in order, its centre column and row, a radius, and an
/// intensity in `[mean / 2, min(1, 1.5 * mean))`; every cell within the
/// radius gains the intensity, capped at 1. Patches do not wrap.
pub fn initial_grid(config: &SimConfig, rng: &mut SimRng) -> ResourceGrid {
    let mean = config.initial_food_mean;
    if config.initial_food_flat {
        return ResourceGrid::filled(config.width, config.height, mean as f32);
    }

    let mut grid = ResourceGrid::filled(config.width, config.height, 0.0);
    let cells = f64::from(config.width) * f64::from(config.height);
    let patches = ((cells * mean * PATCH_DENSITY) as usize).max(1);

    for _ in 0..patches {
        let cx = i64::from(rng.below(config.width));
        let cy = i64::from(rng.below(config.height));
        let radius = rng.between(PATCH_RADIUS.0, PATCH_RADIUS.1);
        let intensity = rng.uniform_between(mean * 0.5, (mean * 1.5).min(1.0)) as f32;
        paint_patch(&mut grid, cx, cy, radius, intensity);
    }
    tracing::debug!(patches, mean = grid.mean(), "initial food laid out");
    grid
}

fn paint_patch(grid: &mut ResourceGrid, cx: i64, cy: i64, radius: i64, intensity: f32) {
    let x_max = i64::from(grid.width()) - 1;
    let y_max = i64::from(grid.height()) - 1;
    for y in (cy - radius).max(0)..=(cy + radius).min(y_max) {
        for x in (cx - radius).max(0)..=(cx + radius).min(x_max) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            // Both coordinates were clamped to the grid above.
            let pos = Position::new(x as u32, y as u32);
            grid.set(pos, (grid.get(pos) + intensity).clamp(0.0, 1.0));
        }
    }
}

/// Create the starting population, drawing from the world's RNG.
///
/// Ages come from the bulk stream as one normal batch and are clamped to
/// `[0, 0.95 * max_age]`. Per agent the scalar stream then yields sex,
/// infection, column and row.
pub fn populate(world: &mut World) -> SimResult<Population> {
    let (config, rng, _) = world.split_mut();
    let count = config.initial_agents;
    let ages = rng.normal_samples(
        config.initial_age_median_years,
        config.initial_age_spread_years.max(0.0),
        count,
    );
    let oldest = MAX_START_AGE_FRACTION * config.max_age_years;

    let mut population = Population::new();
    for age in ages {
        let sex = if rng.chance(0.5) { Sex::Male } else { Sex::Female };
        let infected = rng.chance(config.initial_infected_pct);
        let x = rng.below(config.width);
        let y = rng.below(config.height);

        let id = population.allocate_id();
        let agent = Agent::new(id, Position::new(x, y), sex)
            .with_energy(config.initial_energy)
            .with_age(age.clamp(0.0, oldest))
            .with_max_age(config.max_age_years)
            .with_infection(infected);
        population.insert(agent)?;
    }

    tracing::info!(
        agents = population.len(),
        infected = population.infected_count(),
        "population created"
    );
    Ok(population)
}
