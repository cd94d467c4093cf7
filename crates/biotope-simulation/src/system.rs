use crate::context::TickContext;
use crate::error::SimResult;

/// One stage of the tick pipeline.
///
/// Systems are stateless: everything they read or write lives in the
/// context, so the same instance can run against any world. The scheduler
/// runs them in a fixed order; see [`crate::scheduler::PIPELINE`].
pub trait System: std::fmt::Debug {
    /// Human-readable name for this system.
    fn name(&self) -> &'static str;

    /// Called once per tick.
    fn run(&self, ctx: &mut TickContext<'_>) -> SimResult<()>;
}
