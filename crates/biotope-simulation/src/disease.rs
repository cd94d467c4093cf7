use crate::context::TickContext;
use crate::error::SimResult;
use crate::system::System;

/// Convert an annual probability into the probability for a tick lasting
/// `year_fraction` years, preserving the compounded annual rate.
pub fn per_tick_probability(annual: f64, year_fraction: f64) -> f64 {
    if year_fraction == 0.0 {
        return 0.0;
    }
    if year_fraction == 1.0 {
        return annual;
    }
    1.0 - (1.0 - annual).powf(year_fraction)
}

/// Infection, disease progression and recovery.
///
/// Healthy agents draw once for infection. Infected agents accumulate
/// disease time, lose energy, and past the recovery threshold draw once for
/// recovery. Death from disease is decided by mortality.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiseaseSystem;

impl System for DiseaseSystem {
    fn name(&self) -> &'static str {
        "disease"
    }

    fn run(&self, ctx: &mut TickContext<'_>) -> SimResult<()> {
        let years = ctx.years_per_tick();
        let (config, rng, _) = ctx.world.split_mut();
        let p_infect = per_tick_probability(config.infection_annual_prob, years);
        let p_recover = per_tick_probability(config.disease_recovery_annual_prob, years);
        let drain = config.disease_energy_loss_per_year * years;

        for agent in ctx.population.iter_mut() {
            if !agent.infected {
                if rng.chance(p_infect) {
                    agent.infected = true;
                    agent.disease_years = 0.0;
                    tracing::trace!(agent = %agent.id, "infected");
                }
                continue;
            }

            agent.disease_years += years;
            agent.energy -= drain;
            if agent.disease_years >= config.disease_recovery_after_years
                && rng.chance(p_recover)
            {
                agent.recover();
                tracing::trace!(agent = %agent.id, "recovered");
            }
        }
        Ok(())
    }
}
