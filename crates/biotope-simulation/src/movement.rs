use biotope_core::agent::Agent;
use biotope_core::grid::Topology;

use crate::context::TickContext;
use crate::error::SimResult;
use crate::system::System;

/// Random walk: each agent steps to one of the nine cells around it.
///
/// Two scalar draws per agent, in id order: `dx` then `dy`, each in `-1..=1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementSystem;

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn run(&self, ctx: &mut TickContext<'_>) -> SimResult<()> {
        let topology = ctx.world.topology();
        let rng = &mut ctx.world.rng;
        for agent in ctx.population.iter_mut() {
            let dx = rng.between(-1, 1);
            let dy = rng.between(-1, 1);
            step(agent, topology, dx, dy);
        }
        Ok(())
    }
}

/// Move one agent by `(dx, dy)`, wrapping or clamping at the edges.
pub fn step(agent: &mut Agent, topology: Topology, dx: i64, dy: i64) {
    agent.position = topology.offset(agent.position, dx, dy);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{agent, population_of, run_system, world_with_food};
    use biotope_core::{Position, Sex, SimConfig};

    #[test]
    fn step_wraps_on_torus() {
        let topology = Topology::new(8, 8, true);
        let mut a = agent(0, 0, 7, Sex::Male);
        step(&mut a, topology, -1, 1);
        assert_eq!(a.position, Position::new(7, 0));
    }

    #[test]
    fn step_clamps_on_bounded_grid() {
        let topology = Topology::new(8, 8, false);
        let mut a = agent(0, 0, 7, Sex::Male);
        step(&mut a, topology, -1, 1);
        assert_eq!(a.position, Position::new(0, 7));
    }

    #[test]
    fn agents_move_at_most_one_cell() {
        let config = SimConfig::default().with_size(20, 20).with_toroidal(false);
        let mut world = world_with_food(config, 0.0);
        let mut population =
            population_of((0..30).map(|i| agent(i, 5 + (i as u32 % 10), 10, Sex::Female)));
        let before: Vec<Position> = population.iter().map(|a| a.position).collect();

        run_system(&MovementSystem, &mut world, &mut population).unwrap();

        for (old, agent) in before.iter().zip(population.iter()) {
            assert!(old.x.abs_diff(agent.position.x) <= 1);
            assert!(old.y.abs_diff(agent.position.y) <= 1);
        }
    }

    #[test]
    fn all_nine_offsets_occur_evenly() {
        let config = SimConfig::default()
            .with_size(21, 21)
            .with_toroidal(false)
            .with_seed(5);
        let mut world = world_with_food(config, 0.0);
        let mut population = population_of((0..900).map(|i| agent(i, 10, 10, Sex::Male)));

        run_system(&MovementSystem, &mut world, &mut population).unwrap();

        let mut counts = std::collections::BTreeMap::new();
        for a in population.iter() {
            let offset = (
                i64::from(a.position.x) - 10,
                i64::from(a.position.y) - 10,
            );
            *counts.entry(offset).or_insert(0u32) += 1;
        }
        assert_eq!(counts.len(), 9);
        for (offset, n) in counts {
            assert!((40..=160).contains(&n), "offset {offset:?} seen {n} times");
        }
    }

    #[test]
    fn movement_is_seed_deterministic() {
        let config = SimConfig::default().with_size(10, 10).with_seed(77);
        let run = || {
            let mut world = world_with_food(config.clone(), 0.0);
            let mut population = population_of((0..10).map(|i| agent(i, 5, 5, Sex::Male)));
            run_system(&MovementSystem, &mut world, &mut population).unwrap();
            population.iter().map(|a| a.position).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
