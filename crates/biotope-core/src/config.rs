//! Simulation parameters.
//!
//! A [`SimConfig`] is an immutable snapshot: systems only ever read it, and
//! changing a parameter means building a new value. Configurations are
//! checked once by [`SimConfig::validate`] before a world is created from
//! them, so systems can rely on positive grid dimensions and probabilities
//! in `[0, 1]`.
//!
//! ## Example `biotope.toml`
//!
//! ```toml
//! seed = 7
//! width = 64
//! height = 64
//! time_unit = "month"
//! initial_agents = 300
//! ```
//!
//! Missing keys fall back to [`SimConfig::default`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError, CoreResult};

/// How much in-world time one tick represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    /// One tick is a year.
    Year,
    /// One tick is a twelfth of a year.
    #[default]
    Month,
    /// One tick is a 365th of a year.
    Day,
}

impl TimeUnit {
    /// Years represented by a single tick.
    pub fn years_per_tick(self) -> f64 {
        match self {
            Self::Year => 1.0,
            Self::Month => 1.0 / 12.0,
            Self::Day => 1.0 / 365.0,
        }
    }

    /// All units, in the order a front end cycles through them.
    pub const ALL: [TimeUnit; 3] = [Self::Year, Self::Month, Self::Day];
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year => write!(f, "year"),
            Self::Month => write!(f, "month"),
            Self::Day => write!(f, "day"),
        }
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "day" => Ok(Self::Day),
            other => Err(format!("unknown time unit '{other}' (expected year, month or day)")),
        }
    }
}

/// Where the resource-regeneration step is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridBackendKind {
    /// In place on the calling thread.
    #[default]
    Cpu,
    /// On a staged copy split across a worker pool, falling back to `Cpu`.
    Parallel,
}

impl fmt::Display for GridBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Parallel => write!(f, "parallel"),
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // World
    /// RNG seed for deterministic simulation.
    pub seed: u64,
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Whether grid edges wrap around.
    pub toroidal: bool,

    // Initial population
    /// Number of agents created at world initialization.
    pub initial_agents: usize,
    /// Centre of the initial age distribution, in years.
    pub initial_age_median_years: f64,
    /// Standard deviation of the initial age distribution, in years.
    pub initial_age_spread_years: f64,
    /// Fraction of the initial population that starts infected.
    pub initial_infected_pct: f64,
    /// Energy of agents created at world initialization.
    pub initial_energy: f64,
    /// Maximum lifespan of agents created at world initialization.
    pub max_age_years: f64,

    // Time
    /// Ticks per second requested from a front end. Never read by systems.
    pub tick_rate_hz: u32,
    /// In-world time represented by one tick.
    pub time_unit: TimeUnit,

    // Resources
    /// Fraction of the gap to 1.0 regrown per tick.
    pub resource_regen_rate: f64,
    /// Target mean food level of the initial grid.
    pub initial_food_mean: f64,
    /// Fill the initial grid uniformly instead of with patches.
    pub initial_food_flat: bool,
    /// Backend used by the resource system.
    pub compute_backend: GridBackendKind,

    // Foraging and upkeep
    /// Smallest bite that counts as having eaten.
    pub min_eat_to_count: f64,
    /// Energy spent per year just staying alive.
    pub maintenance_energy_per_year: f64,

    // Reproduction
    /// Minimum age for both partners.
    pub maturity_age_years: f64,
    /// Minimum energy for both partners.
    pub reproduction_energy_min: f64,
    /// Energy each partner pays on a successful conception.
    pub reproduction_cost: f64,
    /// Years a partner must wait after a successful conception.
    pub reproduction_cooldown_years: f64,
    /// Energy of a newborn.
    pub child_energy: f64,
    /// Probability that an eligible pair conceives.
    pub reproduction_prob_per_meeting: f64,

    // Disease
    /// Annual probability that a healthy agent becomes infected.
    pub infection_annual_prob: f64,
    /// Energy drained per year of infection.
    pub disease_energy_loss_per_year: f64,
    /// Years of infection after which the disease can kill.
    pub disease_mortality_after_years: f64,
    /// Annual probability of dying once past the mortality onset.
    pub disease_mortality_annual_prob: f64,
    /// Years of infection after which recovery becomes possible.
    pub disease_recovery_after_years: f64,
    /// Annual probability of recovering once past the recovery threshold.
    pub disease_recovery_annual_prob: f64,

    // Conflict
    /// Hunger streak at which an agent turns violent.
    pub conflict_hunger_ticks: u32,
    /// Kill probability when a hungry agent meets a recent eater.
    pub conflict_kill_prob: f64,
    /// Kill probability when two hungry agents meet.
    pub conflict_kill_prob_hungry_pair: f64,
    /// Added kill probability for a weak victim.
    pub conflict_bonus_if_weak: f64,
    /// Energy below which a victim is weak.
    pub conflict_weak_energy_thresh: f64,
    /// Added kill probability when a strong eater is adjacent.
    pub conflict_bonus_if_strong: f64,
    /// Energy at or above which an eater is strong.
    pub conflict_strong_energy_thresh: f64,

    // Presentation
    /// Whether a front end flashes cells where conflict deaths happened.
    pub show_conflict_flash: bool,
    /// How long a conflict flash stays visible, in seconds.
    pub conflict_flash_duration_s: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: 128,
            height: 128,
            toroidal: true,

            initial_agents: 800,
            initial_age_median_years: 25.0,
            initial_age_spread_years: 8.0,
            initial_infected_pct: 0.02,
            initial_energy: 10.0,
            max_age_years: 80.0,

            tick_rate_hz: 15,
            time_unit: TimeUnit::Month,

            resource_regen_rate: 0.001,
            initial_food_mean: 0.00001,
            initial_food_flat: false,
            compute_backend: GridBackendKind::Cpu,

            min_eat_to_count: 0.02,
            maintenance_energy_per_year: 0.3,

            maturity_age_years: 16.0,
            reproduction_energy_min: 15.0,
            reproduction_cost: 5.0,
            reproduction_cooldown_years: 1.0,
            child_energy: 10.0,
            reproduction_prob_per_meeting: 0.5,

            infection_annual_prob: 0.0005,
            disease_energy_loss_per_year: 2.0,
            disease_mortality_after_years: 5.0,
            disease_mortality_annual_prob: 0.2,
            disease_recovery_after_years: 2.0,
            disease_recovery_annual_prob: 0.1,

            conflict_hunger_ticks: 5,
            conflict_kill_prob: 0.30,
            conflict_kill_prob_hungry_pair: 0.12,
            conflict_bonus_if_weak: 0.10,
            conflict_weak_energy_thresh: 5.0,
            conflict_bonus_if_strong: 0.10,
            conflict_strong_energy_thresh: 20.0,

            show_conflict_flash: true,
            conflict_flash_duration_s: 1.0,
        }
    }
}

impl SimConfig {
    /// Set the RNG seed for deterministic simulation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the grid dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Choose between wrapping and clamped grid edges.
    pub fn with_toroidal(mut self, toroidal: bool) -> Self {
        self.toroidal = toroidal;
        self
    }

    /// Set the initial population size.
    pub fn with_initial_agents(mut self, count: usize) -> Self {
        self.initial_agents = count;
        self
    }

    /// Set the in-world time represented by one tick.
    pub fn with_time_unit(mut self, unit: TimeUnit) -> Self {
        self.time_unit = unit;
        self
    }

    /// Select the resource-regeneration backend.
    pub fn with_backend(mut self, backend: GridBackendKind) -> Self {
        self.compute_backend = backend;
        self
    }

    /// Years represented by one tick under this configuration.
    pub fn years_per_tick(&self) -> f64 {
        self.time_unit.years_per_tick()
    }

    /// Check every parameter, returning the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::TickRate);
        }
        if self.max_age_years.is_nan() || self.max_age_years <= 0.0 {
            return Err(ConfigError::Lifespan(self.max_age_years));
        }

        let probabilities = [
            ("initial_infected_pct", self.initial_infected_pct),
            ("initial_food_mean", self.initial_food_mean),
            ("reproduction_prob_per_meeting", self.reproduction_prob_per_meeting),
            ("infection_annual_prob", self.infection_annual_prob),
            ("disease_mortality_annual_prob", self.disease_mortality_annual_prob),
            ("disease_recovery_annual_prob", self.disease_recovery_annual_prob),
            ("conflict_kill_prob", self.conflict_kill_prob),
            ("conflict_kill_prob_hungry_pair", self.conflict_kill_prob_hungry_pair),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }

        let non_negative = [
            ("initial_age_median_years", self.initial_age_median_years),
            ("initial_age_spread_years", self.initial_age_spread_years),
            ("initial_energy", self.initial_energy),
            ("resource_regen_rate", self.resource_regen_rate),
            ("min_eat_to_count", self.min_eat_to_count),
            ("maintenance_energy_per_year", self.maintenance_energy_per_year),
            ("maturity_age_years", self.maturity_age_years),
            ("reproduction_energy_min", self.reproduction_energy_min),
            ("reproduction_cost", self.reproduction_cost),
            ("reproduction_cooldown_years", self.reproduction_cooldown_years),
            ("child_energy", self.child_energy),
            ("disease_energy_loss_per_year", self.disease_energy_loss_per_year),
            ("disease_mortality_after_years", self.disease_mortality_after_years),
            ("disease_recovery_after_years", self.disease_recovery_after_years),
            ("conflict_bonus_if_weak", self.conflict_bonus_if_weak),
            ("conflict_weak_energy_thresh", self.conflict_weak_energy_thresh),
            ("conflict_bonus_if_strong", self.conflict_bonus_if_strong),
            ("conflict_strong_energy_thresh", self.conflict_strong_energy_thresh),
            ("conflict_flash_duration_s", self.conflict_flash_duration_s),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        Ok(())
    }

    /// Consume the configuration, returning it only if it validates.
    pub fn validated(self) -> CoreResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Whether switching from `self` to `next` invalidates the current world
    /// and population.
    ///
    /// Shape, initial-population, initial-demographic, initial-food and
    /// time-unit parameters force a rebuild; rates, thresholds and
    /// presentation settings do not.
    pub fn requires_reset(&self, next: &SimConfig) -> bool {
        self.width != next.width
            || self.height != next.height
            || self.initial_agents != next.initial_agents
            || self.initial_food_mean != next.initial_food_mean
            || self.initial_food_flat != next.initial_food_flat
            || self.time_unit != next.time_unit
            || self.initial_age_median_years != next.initial_age_median_years
            || self.initial_age_spread_years != next.initial_age_spread_years
            || self.initial_infected_pct != next.initial_infected_pct
            || self.initial_energy != next.initial_energy
            || self.max_age_years != next.max_age_years
    }

    /// Parse and validate a TOML document. Missing keys take default values.
    pub fn from_toml_str(source: &str) -> CoreResult<Self> {
        let config: SimConfig =
            toml::from_str(source).map_err(|e| CoreError::ConfigFormat(e.to_string()))?;
        config.validated()
    }

    /// Render the configuration as a TOML document.
    pub fn to_toml_string(&self) -> CoreResult<String> {
        toml::to_string_pretty(self).map_err(|e| CoreError::ConfigFormat(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SimConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!((config.width, config.height), (128, 128));
        assert!(config.toroidal);
        assert_eq!(config.initial_agents, 800);
        assert_eq!(config.time_unit, TimeUnit::Month);
        assert_eq!(config.conflict_hunger_ticks, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_chain() {
        let config = SimConfig::default()
            .with_seed(123)
            .with_size(10, 20)
            .with_toroidal(false)
            .with_initial_agents(3)
            .with_time_unit(TimeUnit::Year)
            .with_backend(GridBackendKind::Parallel);
        assert_eq!(config.seed, 123);
        assert_eq!((config.width, config.height), (10, 20));
        assert!(!config.toroidal);
        assert_eq!(config.initial_agents, 3);
        assert!((config.years_per_tick() - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.compute_backend, GridBackendKind::Parallel);
    }

    #[test]
    fn years_per_tick_by_unit() {
        assert_eq!(TimeUnit::Year.years_per_tick(), 1.0);
        assert!((TimeUnit::Month.years_per_tick() * 12.0 - 1.0).abs() < 1e-12);
        assert!((TimeUnit::Day.years_per_tick() * 365.0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn time_unit_parses_case_insensitively() {
        assert_eq!("Day".parse::<TimeUnit>().unwrap(), TimeUnit::Day);
        assert_eq!("YEAR".parse::<TimeUnit>().unwrap(), TimeUnit::Year);
        assert!("week".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn zero_width_rejected() {
        let err = SimConfig::default().with_size(0, 10).validate().unwrap_err();
        assert_eq!(err, ConfigError::EmptyGrid { width: 0, height: 10 });
    }

    #[test]
    fn probability_out_of_range_rejected() {
        let config = SimConfig {
            conflict_kill_prob: 1.5,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Probability {
                name: "conflict_kill_prob",
                ..
            })
        ));
    }

    #[test]
    fn non_finite_rate_rejected() {
        for rate in [f64::NAN, f64::INFINITY] {
            let config = SimConfig {
                resource_regen_rate: rate,
                ..SimConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NonFinite {
                    name: "resource_regen_rate",
                    ..
                })
            ));
        }
        let err = SimConfig::from_toml_str("resource_regen_rate = inf").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn negative_rate_rejected() {
        let config = SimConfig {
            maintenance_energy_per_year: -1.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                name: "maintenance_energy_per_year",
                ..
            })
        ));
    }

    #[test]
    fn non_positive_lifespan_rejected() {
        let config = SimConfig {
            max_age_years: 0.0,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Lifespan(_))));
    }

    #[test]
    fn zero_tick_rate_rejected() {
        let config = SimConfig {
            tick_rate_hz: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TickRate));
    }

    #[test]
    fn reset_needed_for_shape_changes_only() {
        let base = SimConfig::default();

        assert!(base.requires_reset(&base.clone().with_size(64, 128)));
        assert!(base.requires_reset(&base.clone().with_initial_agents(10)));
        assert!(base.requires_reset(&base.clone().with_time_unit(TimeUnit::Day)));
        assert!(base.requires_reset(&SimConfig {
            initial_food_flat: true,
            ..base.clone()
        }));
        assert!(base.requires_reset(&SimConfig {
            initial_energy: 99.0,
            ..base.clone()
        }));
        assert!(base.requires_reset(&SimConfig {
            max_age_years: 40.0,
            ..base.clone()
        }));

        assert!(!base.requires_reset(&SimConfig {
            tick_rate_hz: 60,
            show_conflict_flash: false,
            resource_regen_rate: 0.05,
            ..base.clone()
        }));
        assert!(!base.requires_reset(&base.clone().with_seed(9)));
    }

    #[test]
    fn toml_partial_document_uses_defaults() {
        let config = SimConfig::from_toml_str(
            r#"
seed = 7
width = 32
time_unit = "day"
compute_backend = "parallel"
"#,
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.width, 32);
        assert_eq!(config.height, 128);
        assert_eq!(config.time_unit, TimeUnit::Day);
        assert_eq!(config.compute_backend, GridBackendKind::Parallel);
    }

    #[test]
    fn toml_invalid_values_rejected() {
        let err = SimConfig::from_toml_str("height = 0").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));

        let err = SimConfig::from_toml_str("width = \"wide\"").unwrap_err();
        assert!(matches!(err, CoreError::ConfigFormat(_)));
    }

    #[test]
    fn toml_render_parses_back() {
        let config = SimConfig::default().with_seed(99).with_size(16, 8);
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("seed = 99"));
        assert_eq!(SimConfig::from_toml_str(&text).unwrap(), config);
    }
}
