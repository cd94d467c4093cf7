use biotope_core::grid::ResourceGrid;

use crate::backend::{relax, GridBackend};
use crate::context::TickContext;
use crate::error::SimResult;
use crate::system::System;

/// Regrows food toward saturation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceSystem;

impl System for ResourceSystem {
    fn name(&self) -> &'static str {
        "resources"
    }

    fn run(&self, ctx: &mut TickContext<'_>) -> SimResult<()> {
        let alpha = ctx.world.config().resource_regen_rate as f32;
        regenerate(&mut ctx.world.grid, alpha, ctx.backend);
        Ok(())
    }
}

/// Apply one regeneration step on `backend`, falling back to the CPU rule
/// if the backend fails.
pub fn regenerate(grid: &mut ResourceGrid, alpha: f32, backend: &dyn GridBackend) {
    if let Err(err) = backend.regenerate(grid.cells_mut(), alpha) {
        tracing::warn!(backend = backend.name(), error = %err, "grid backend failed, using cpu");
        relax(grid.cells_mut(), alpha);
    }
}
