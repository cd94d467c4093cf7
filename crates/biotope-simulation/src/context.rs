use biotope_core::population::Population;
use biotope_core::world::World;

use crate::backend::GridBackend;
use crate::summary::TickSummary;

/// Mutable context passed to each system during a tick.
pub struct TickContext<'a> {
    pub world: &'a mut World,
    pub population: &'a mut Population,
    /// Counters for the tick in progress.
    pub summary: &'a mut TickSummary,
    /// Where grid-wide updates are computed.
    pub backend: &'a dyn GridBackend,
}

impl TickContext<'_> {
    pub fn years_per_tick(&self) -> f64 {
        self.world.years_per_tick()
    }
}
