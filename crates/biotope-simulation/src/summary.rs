use serde::Serialize;

use biotope_core::agent::Position;

/// Why an agent was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    Starvation,
    Age,
    Disease,
    Conflict,
}

impl DeathCause {
    /// Every cause, in reporting order.
    pub const ALL: [DeathCause; 4] = [
        Self::Starvation,
        Self::Age,
        Self::Disease,
        Self::Conflict,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starvation => "starvation",
            Self::Age => "age",
            Self::Disease => "disease",
            Self::Conflict => "conflict",
        }
    }
}

impl std::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deaths counted per cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeathTally {
    pub starvation: usize,
    pub age: usize,
    pub disease: usize,
    pub conflict: usize,
}

impl DeathTally {
    /// Count one death.
    pub fn record(&mut self, cause: DeathCause) {
        *self.slot(cause) += 1;
    }

    pub fn get(&self, cause: DeathCause) -> usize {
        match cause {
            DeathCause::Starvation => self.starvation,
            DeathCause::Age => self.age,
            DeathCause::Disease => self.disease,
            DeathCause::Conflict => self.conflict,
        }
    }

    /// Deaths across all causes.
    pub fn total(&self) -> usize {
        self.starvation + self.age + self.disease + self.conflict
    }

    /// Add another tally into this one.
    pub fn merge(&mut self, other: &DeathTally) {
        for cause in DeathCause::ALL {
            *self.slot(cause) += other.get(cause);
        }
    }

    fn slot(&mut self, cause: DeathCause) -> &mut usize {
        match cause {
            DeathCause::Starvation => &mut self.starvation,
            DeathCause::Age => &mut self.age,
            DeathCause::Disease => &mut self.disease,
            DeathCause::Conflict => &mut self.conflict,
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickSummary {
    /// Children added by reproduction.
    pub births: usize,
    /// Removals by cause, conflict included.
    pub deaths: DeathTally,
    /// Infected agents alive after the tick.
    pub infected: usize,
    /// Conflict evaluations (hungry agents next to an eating one).
    pub conflicts: usize,
    /// Cells where a conflict killed an agent, in resolution order.
    pub conflict_positions: Vec<Position>,
}

impl TickSummary {
    /// Population change caused by this tick.
    pub fn net_change(&self) -> i64 {
        self.births as i64 - self.deaths.total() as i64
    }
}
