use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of an agent. Assigned once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Biological sex. Reproduction pairs one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "M"),
            Self::Female => write!(f, "F"),
        }
    }
}

/// An integer grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, `0..width`.
    pub x: u32,
    /// Row, `0..height`.
    pub y: u32,
}

impl Position {
    /// Create a position from its coordinates.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A living individual.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Stable identity.
    pub id: AgentId,
    /// Current cell.
    pub position: Position,
    /// Stored energy. Can dip below zero within a tick; mortality removes
    /// agents that end the tick at or below zero.
    pub energy: f64,
    /// Age in years.
    pub age_years: f64,
    /// Age beyond which the agent dies of old age.
    pub max_age_years: f64,
    /// Cells per move. Not consumed by any system yet.
    pub speed: u32,
    /// Sensing radius in cells. Not consumed by any system yet.
    pub vision: u32,
    /// Biological sex.
    pub sex: Sex,
    /// Years left before the agent may reproduce again.
    pub repro_cooldown_years: f64,
    /// Whether the agent currently carries the disease.
    pub infected: bool,
    /// Years spent infected. Zero whenever `infected` is false.
    pub disease_years: f64,
    /// Ticks left on the "ate recently" marker.
    pub ate_recent_ticks: u8,
    /// Consecutive ticks without a meal that counted.
    pub hunger_streak_ticks: u32,
    /// Set by the conflict system for agents evaluated as potential victims
    /// this tick.
    pub at_risk_conflict: bool,
}

impl Agent {
    /// Default energy of a fresh agent.
    pub const DEFAULT_ENERGY: f64 = 10.0;
    /// Default maximum lifespan of a fresh agent.
    pub const DEFAULT_MAX_AGE_YEARS: f64 = 80.0;

    /// Create a newborn-like agent: zero age, healthy, default energy and
    /// lifespan.
    pub fn new(id: AgentId, position: Position, sex: Sex) -> Self {
        Self {
            id,
            position,
            energy: Self::DEFAULT_ENERGY,
            age_years: 0.0,
            max_age_years: Self::DEFAULT_MAX_AGE_YEARS,
            speed: 1,
            vision: 4,
            sex,
            repro_cooldown_years: 0.0,
            infected: false,
            disease_years: 0.0,
            ate_recent_ticks: 0,
            hunger_streak_ticks: 0,
            at_risk_conflict: false,
        }
    }

    /// Set the starting energy.
    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = energy;
        self
    }

    /// Set the starting age.
    pub fn with_age(mut self, age_years: f64) -> Self {
        self.age_years = age_years;
        self
    }

    /// Set the maximum lifespan.
    pub fn with_max_age(mut self, max_age_years: f64) -> Self {
        self.max_age_years = max_age_years;
        self
    }

    /// Start infected, with no accumulated disease time.
    pub fn with_infection(mut self, infected: bool) -> Self {
        self.infected = infected;
        self.disease_years = 0.0;
        self
    }

    /// Whether the agent ate enough within the last few ticks.
    pub fn ate_recently(&self) -> bool {
        self.ate_recent_ticks > 0
    }

    /// Clear the infection and its accumulated time together.
    pub fn recover(&mut self) {
        self.infected = false;
        self.disease_years = 0.0;
    }
}
