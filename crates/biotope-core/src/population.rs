use std::collections::BTreeMap;

use crate::agent::{Agent, AgentId, Position};
use crate::error::{CoreError, CoreResult};

/// The live population, addressed by stable identity.
///
/// Agents are kept ordered by [`AgentId`], so every traversal visits them in
/// the same order on every run. Identities come from a monotonic counter and
/// are never handed out twice, even after the holder dies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    agents: BTreeMap<AgentId, Agent>,
    next_id: u64,
}

impl Population {
    /// Create an empty population whose first identity will be `#0`.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Identity
    // -----------------------------------------------------------------------

    /// Reserve a fresh identity.
    ///
    /// The counter stops at `u64::MAX`; once the identity space is spent,
    /// inserting the repeated identity fails with
    /// [`CoreError::DuplicateAgent`].
    pub fn allocate_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// The identity the next call to [`allocate_id`](Self::allocate_id) returns.
    pub fn peek_next_id(&self) -> AgentId {
        AgentId(self.next_id)
    }

    /// Highest identity among living agents.
    pub fn max_id(&self) -> Option<AgentId> {
        self.agents.keys().next_back().copied()
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Add an agent. Its identity must not belong to a living agent.
    ///
    /// Inserting an identity that was never allocated advances the counter
    /// past it, so later allocations cannot collide.
    pub fn insert(&mut self, agent: Agent) -> CoreResult<AgentId> {
        let id = agent.id;
        if self.agents.contains_key(&id) {
            return Err(CoreError::DuplicateAgent(id));
        }
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.agents.insert(id, agent);
        Ok(id)
    }

    /// Remove an agent and return it.
    pub fn remove(&mut self, id: AgentId) -> CoreResult<Agent> {
        self.agents.remove(&id).ok_or(CoreError::AgentNotFound(id))
    }

    /// Remove several agents at once, in the order given.
    pub fn remove_all(&mut self, ids: &[AgentId]) -> CoreResult<Vec<Agent>> {
        ids.iter().map(|id| self.remove(*id)).collect()
    }

    /// Get an agent by identity.
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Get a mutable agent by identity.
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    /// Whether the agent is alive.
    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    /// Number of living agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether nobody is alive.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    // -----------------------------------------------------------------------
    // Traversal
    // -----------------------------------------------------------------------

    /// Agents in ascending identity order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Mutable agents in ascending identity order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.values_mut()
    }

    /// Snapshot of living identities in ascending order.
    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    /// Group identities by occupied cell. Cells come out in ascending
    /// `(x, y)` order and each bucket lists identities in ascending order.
    pub fn by_cell(&self) -> BTreeMap<Position, Vec<AgentId>> {
        let mut cells: BTreeMap<Position, Vec<AgentId>> = BTreeMap::new();
        for agent in self.agents.values() {
            cells.entry(agent.position).or_default().push(agent.id);
        }
        cells
    }

    /// Number of infected agents.
    pub fn infected_count(&self) -> usize {
        self.agents.values().filter(|a| a.infected).count()
    }
}
