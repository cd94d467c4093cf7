use biotope_core::agent::Agent;
use biotope_core::config::SimConfig;
use biotope_core::rng::SimRng;

use crate::context::TickContext;
use crate::disease::per_tick_probability;
use crate::error::SimResult;
use crate::summary::DeathCause;
use crate::system::System;

/// Removes agents that die of disease, starvation or old age.
#[derive(Debug, Clone, Copy, Default)]
pub struct MortalitySystem;

impl System for MortalitySystem {
    fn name(&self) -> &'static str {
        "mortality"
    }

    fn run(&self, ctx: &mut TickContext<'_>) -> SimResult<()> {
        let years = ctx.years_per_tick();
        let (config, rng, _) = ctx.world.split_mut();

        let mut dead = Vec::new();
        for agent in ctx.population.iter() {
            if let Some(cause) = cause_of_death(config, rng, years, agent) {
                tracing::trace!(agent = %agent.id, %cause, "died");
                ctx.summary.deaths.record(cause);
                dead.push(agent.id);
            }
        }
        ctx.population.remove_all(&dead)?;
        Ok(())
    }
}

/// The first cause that applies, checked in priority order: disease, then
/// starvation, then age.
///
/// Only agents past the disease-mortality onset consume a draw.
pub fn cause_of_death(
    config: &SimConfig,
    rng: &mut SimRng,
    years_per_tick: f64,
    agent: &Agent,
) -> Option<DeathCause> {
    if agent.infected
        && agent.disease_years >= config.disease_mortality_after_years
        && rng.chance(per_tick_probability(
            config.disease_mortality_annual_prob,
            years_per_tick,
        ))
    {
        return Some(DeathCause::Disease);
    }
    if agent.energy <= 0.0 {
        return Some(DeathCause::Starvation);
    }
    if agent.age_years > agent.max_age_years {
        return Some(DeathCause::Age);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{agent, population_of, run_system, world_with_food};
    use biotope_core::{AgentId, Sex, TimeUnit};

    fn config() -> SimConfig {
        let mut config = SimConfig::default()
            .with_size(2, 2)
            .with_time_unit(TimeUnit::Year);
        config.disease_mortality_annual_prob = 1.0;
        config
    }

    #[test]
    fn disease_takes_priority_over_starvation() {
        let config = config();
        let mut rng = SimRng::new(0);
        let mut sick = agent(0, 0, 0, Sex::Male).with_energy(-1.0).with_infection(true);
        sick.disease_years = config.disease_mortality_after_years;
        assert_eq!(
            cause_of_death(&config, &mut rng, 1.0, &sick),
            Some(DeathCause::Disease)
        );
    }

    #[test]
    fn starvation_before_age() {
        let config = config();
        let mut rng = SimRng::new(0);
        let old_and_empty = agent(0, 0, 0, Sex::Female)
            .with_energy(0.0)
            .with_age(100.0);
        assert_eq!(
            cause_of_death(&config, &mut rng, 1.0, &old_and_empty),
            Some(DeathCause::Starvation)
        );
    }

    #[test]
    fn age_must_strictly_exceed_lifespan() {
        let config = config();
        let mut rng = SimRng::new(0);
        let at_limit = agent(0, 0, 0, Sex::Male).with_age(80.0);
        assert_eq!(cause_of_death(&config, &mut rng, 1.0, &at_limit), None);
        let past = at_limit.with_age(80.5);
        assert_eq!(
            cause_of_death(&config, &mut rng, 1.0, &past),
            Some(DeathCause::Age)
        );
    }

    #[test]
    fn early_infection_falls_through_without_drawing() {
        let config = config();
        let mut rng = SimRng::new(4);
        let mut reference = SimRng::new(4);
        let sick = agent(0, 0, 0, Sex::Male).with_energy(0.0).with_infection(true);
        assert_eq!(
            cause_of_death(&config, &mut rng, 1.0, &sick),
            Some(DeathCause::Starvation)
        );
        assert_eq!(rng.uniform().to_bits(), reference.uniform().to_bits());
    }

    #[test]
    fn system_tallies_and_removes() {
        let mut world = world_with_food(config(), 0.0);
        let mut population = population_of([
            agent(0, 0, 0, Sex::Male).with_energy(-2.0),
            agent(1, 0, 0, Sex::Female).with_age(90.0),
            agent(2, 1, 1, Sex::Female),
        ]);

        let summary = run_system(&MortalitySystem, &mut world, &mut population).unwrap();

        assert_eq!(summary.deaths.starvation, 1);
        assert_eq!(summary.deaths.age, 1);
        assert_eq!(summary.deaths.total(), 2);
        assert_eq!(population.ids(), vec![AgentId(2)]);
    }
}
