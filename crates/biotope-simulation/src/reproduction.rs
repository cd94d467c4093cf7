use biotope_core::agent::{Agent, AgentId, Sex};
use biotope_core::config::SimConfig;
use biotope_core::error::CoreError;

use crate::context::TickContext;
use crate::error::SimResult;
use crate::system::System;

/// Males and females sharing a cell pair up and may have a child.
///
/// Cells are visited in ascending `(x, y)` order. Within a cell the males
/// and the females are shuffled separately and zipped into pairs; surplus
/// agents of either sex sit the tick out. Each eligible pair draws once
/// against the meeting probability and, on success, both parents pay the
/// cost, enter cooldown, and a child is placed in their cell. Children join
/// the population after every cell has been processed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReproductionSystem;

impl System for ReproductionSystem {
    fn name(&self) -> &'static str {
        "reproduction"
    }

    fn run(&self, ctx: &mut TickContext<'_>) -> SimResult<()> {
        let (config, rng, _) = ctx.world.split_mut();
        let population = &mut *ctx.population;
        let mut children = Vec::new();

        for (cell, ids) in population.by_cell() {
            let (mut males, mut females): (Vec<AgentId>, Vec<AgentId>) = ids
                .into_iter()
                .partition(|&id| population.get(id).is_some_and(|a| a.sex == Sex::Male));
            if males.is_empty() || females.is_empty() {
                continue;
            }
            rng.shuffle(&mut males);
            rng.shuffle(&mut females);

            for (&father, &mother) in males.iter().zip(females.iter()) {
                let (Some(m), Some(f)) = (population.get(father), population.get(mother)) else {
                    continue;
                };
                if !is_fertile(config, m) || !is_fertile(config, f) {
                    continue;
                }
                if !rng.chance(config.reproduction_prob_per_meeting) {
                    continue;
                }
                let max_age = (m.max_age_years + f.max_age_years) / 2.0;

                for parent in [father, mother] {
                    let parent = population
                        .get_mut(parent)
                        .ok_or(CoreError::AgentNotFound(parent))?;
                    parent.energy -= config.reproduction_cost;
                    parent.repro_cooldown_years = config.reproduction_cooldown_years;
                }

                let sex = if rng.chance(0.5) { Sex::Male } else { Sex::Female };
                let child = Agent::new(population.allocate_id(), cell, sex)
                    .with_energy(config.child_energy)
                    .with_max_age(max_age);
                tracing::trace!(child = %child.id, %father, %mother, "born");
                children.push(child);
            }
        }

        ctx.summary.births += children.len();
        for child in children {
            population.insert(child)?;
        }
        Ok(())
    }
}

/// Old enough, fed enough, and not cooling down.
pub fn is_fertile(config: &SimConfig, agent: &Agent) -> bool {
    agent.age_years >= config.maturity_age_years
        && agent.energy >= config.reproduction_energy_min
        && agent.repro_cooldown_years <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{agent, population_of, run_system, world_with_food};
    use biotope_core::{Position, SimConfig};

    fn one_cell() -> SimConfig {
        let mut config = SimConfig::default().with_size(1, 1).with_seed(1);
        config.reproduction_prob_per_meeting = 1.0;
        config
    }

    fn parent(id: u64, sex: Sex) -> Agent {
        agent(id, 0, 0, sex).with_energy(20.0)
    }

    #[test]
    fn eligible_pair_has_one_child() {
        let config = one_cell();
        let mut world = world_with_food(config.clone(), 0.0);
        let mut population = population_of([
            parent(0, Sex::Male).with_max_age(70.0),
            parent(1, Sex::Female).with_max_age(90.0),
        ]);

        let summary = run_system(&ReproductionSystem, &mut world, &mut population).unwrap();

        assert_eq!(summary.births, 1);
        assert_eq!(population.len(), 3);
        for id in [AgentId(0), AgentId(1)] {
            let p = population.get(id).unwrap();
            assert_eq!(p.energy, 15.0);
            assert_eq!(p.repro_cooldown_years, config.reproduction_cooldown_years);
        }
        let child = population.get(AgentId(2)).unwrap();
        assert_eq!(child.position, Position::new(0, 0));
        assert_eq!(child.energy, config.child_energy);
        assert_eq!(child.age_years, 0.0);
        assert_eq!(child.max_age_years, 80.0);
        assert!(!child.infected);
    }

    #[test]
    fn surplus_agents_sit_out() {
        let mut world = world_with_food(one_cell(), 0.0);
        let mut population = population_of([
            parent(0, Sex::Male),
            parent(1, Sex::Male),
            parent(2, Sex::Male),
            parent(3, Sex::Female),
        ]);

        let summary = run_system(&ReproductionSystem, &mut world, &mut population).unwrap();

        assert_eq!(summary.births, 1);
        let cooling = population
            .iter()
            .filter(|a| a.sex == Sex::Male && a.repro_cooldown_years > 0.0)
            .count();
        assert_eq!(cooling, 1);
    }

    #[test]
    fn ineligible_pairs_do_not_draw() {
        let config = one_cell();
        let mut world = world_with_food(config.clone(), 0.0);
        let mut cooling = parent(1, Sex::Female);
        cooling.repro_cooldown_years = 0.5;
        let mut population = population_of([
            parent(0, Sex::Male).with_age(config.maturity_age_years - 1.0),
            cooling,
        ]);
        let before = population.clone();

        let summary = run_system(&ReproductionSystem, &mut world, &mut population).unwrap();

        assert_eq!(summary.births, 0);
        assert_eq!(population, before);
    }

    #[test]
    fn same_sex_cell_has_no_births() {
        let mut world = world_with_food(one_cell(), 0.0);
        let mut population = population_of([parent(0, Sex::Female), parent(1, Sex::Female)]);
        let summary = run_system(&ReproductionSystem, &mut world, &mut population).unwrap();
        assert_eq!(summary.births, 0);
        assert_eq!(population.len(), 2);
    }

    #[test]
    fn fertility_thresholds_are_inclusive() {
        let config = SimConfig::default();
        let a = agent(0, 0, 0, Sex::Male)
            .with_age(config.maturity_age_years)
            .with_energy(config.reproduction_energy_min);
        assert!(is_fertile(&config, &a));
        let young = a.clone().with_age(config.maturity_age_years - 0.01);
        assert!(!is_fertile(&config, &young));
    }
}
