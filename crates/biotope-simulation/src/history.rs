use std::collections::VecDeque;

use serde::Serialize;

use biotope_core::agent::Sex;
use biotope_core::grid::ResourceGrid;
use biotope_core::population::Population;

use crate::summary::{DeathTally, TickSummary};

/// Samples kept by default.
pub const DEFAULT_CAPACITY: usize = 600;

/// State of the run after one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub tick: u64,
    pub population: usize,
    pub males: usize,
    pub females: usize,
    pub infected: usize,
    pub births: usize,
    pub deaths: DeathTally,
    pub conflicts: usize,
    pub mean_energy: f64,
    pub mean_age_years: f64,
    pub mean_food: f64,
}

impl Sample {
    /// Summarize the population and grid as they stand after `summary`.
    pub fn capture(
        tick: u64,
        population: &Population,
        grid: &ResourceGrid,
        summary: &TickSummary,
    ) -> Self {
        let count = population.len();
        let males = population.iter().filter(|a| a.sex == Sex::Male).count();
        let (energy, age) = population
            .iter()
            .fold((0.0, 0.0), |(e, a), agent| (e + agent.energy, a + agent.age_years));
        let mean = |total: f64| if count == 0 { 0.0 } else { total / count as f64 };
        Self {
            tick,
            population: count,
            males,
            females: count - males,
            infected: summary.infected,
            births: summary.births,
            deaths: summary.deaths,
            conflicts: summary.conflicts,
            mean_energy: mean(energy),
            mean_age_years: mean(age),
            mean_food: grid.mean(),
        }
    }
}

/// Counts accumulated since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunTotals {
    pub births: usize,
    pub deaths: DeathTally,
    pub conflicts: usize,
}

/// Rolling window of recent samples plus running totals.
#[derive(Debug, Clone)]
pub struct History {
    samples: VecDeque<Sample>,
    capacity: usize,
    totals: RunTotals,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl History {
    /// Keep at most `capacity` samples; 0 means unbounded.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            capacity,
            totals: RunTotals::default(),
        }
    }

    /// Append a sample, dropping the oldest when full, and fold its counts
    /// into the totals.
    pub fn record(&mut self, sample: Sample) {
        self.totals.births += sample.births;
        self.totals.deaths.merge(&sample.deaths);
        self.totals.conflicts += sample.conflicts;

        if self.capacity > 0 && self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn totals(&self) -> &RunTotals {
        &self.totals
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Forget all samples and totals.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.totals = RunTotals::default();
    }
}
