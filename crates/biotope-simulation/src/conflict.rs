use std::collections::BTreeMap;

use biotope_core::agent::{Agent, AgentId, Position};
use biotope_core::config::SimConfig;
use biotope_core::error::CoreError;
use biotope_core::grid::Topology;
use biotope_core::population::Population;

use crate::context::TickContext;
use crate::error::SimResult;
use crate::summary::DeathCause;
use crate::system::System;

/// What a hungry agent sees in the eight cells around it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighborhood {
    /// Someone nearby ate recently.
    pub eater: bool,
    /// One of those eaters is at or above the strong-energy threshold.
    pub strong_eater: bool,
    /// Someone nearby is hungry too.
    pub hungry: bool,
}

/// Hungry agents may be killed when they end up next to a fed one, or,
/// less often, next to another hungry one.
///
/// Every agent whose hunger streak reached the threshold is evaluated once,
/// in id order, against the positions at the start of the system. Agents
/// killed here still count as neighbours for the rest of the pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictSystem;

impl System for ConflictSystem {
    fn name(&self) -> &'static str {
        "conflict"
    }

    fn run(&self, ctx: &mut TickContext<'_>) -> SimResult<()> {
        let topology = ctx.world.topology();
        let (config, rng, _) = ctx.world.split_mut();
        let population = &mut *ctx.population;

        for agent in population.iter_mut() {
            agent.at_risk_conflict = false;
        }

        let cells = population.by_cell();
        let mut killed = Vec::new();

        for id in population.ids() {
            let agent = population.get(id).ok_or(CoreError::AgentNotFound(id))?;
            if agent.hunger_streak_ticks < config.conflict_hunger_ticks {
                continue;
            }
            let hood = scan(config, topology, &cells, population, agent);
            let Some(p) = kill_probability(config, agent.energy, hood) else {
                continue;
            };
            let position = agent.position;

            let agent = population
                .get_mut(id)
                .ok_or(CoreError::AgentNotFound(id))?;
            agent.at_risk_conflict = true;
            ctx.summary.conflicts += 1;

            if rng.chance(p) {
                tracing::trace!(agent = %id, x = position.x, y = position.y, "killed in conflict");
                killed.push(id);
                ctx.summary.conflict_positions.push(position);
                ctx.summary.deaths.record(DeathCause::Conflict);
            }
        }

        population.remove_all(&killed)?;
        Ok(())
    }
}

/// Look at every other agent in the cells around `agent`.
pub fn scan(
    config: &SimConfig,
    topology: Topology,
    cells: &BTreeMap<Position, Vec<AgentId>>,
    population: &Population,
    agent: &Agent,
) -> Neighborhood {
    let mut hood = Neighborhood::default();
    for cell in topology.neighbors(agent.position) {
        let Some(ids) = cells.get(&cell) else {
            continue;
        };
        for other in ids
            .iter()
            .filter(|&&other| other != agent.id)
            .filter_map(|&other| population.get(other))
        {
            if other.ate_recently() {
                hood.eater = true;
                if other.energy >= config.conflict_strong_energy_thresh {
                    hood.strong_eater = true;
                }
            }
            if other.hunger_streak_ticks >= config.conflict_hunger_ticks {
                hood.hungry = true;
            }
        }
    }
    hood
}

/// Probability that a hungry agent with `energy` dies, or `None` if its
/// neighbourhood gives no reason for a fight.
pub fn kill_probability(config: &SimConfig, energy: f64, hood: Neighborhood) -> Option<f64> {
    let mut p = if hood.eater {
        config.conflict_kill_prob
    } else if hood.hungry {
        config.conflict_kill_prob_hungry_pair
    } else {
        return None;
    };
    if energy < config.conflict_weak_energy_thresh {
        p += config.conflict_bonus_if_weak;
    }
    if hood.strong_eater {
        p += config.conflict_bonus_if_strong;
    }
    Some(p.clamp(0.0, 1.0))
}
