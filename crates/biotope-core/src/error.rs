use crate::agent::AgentId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or mutating simulation state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The configuration was rejected before any world was built.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// A configuration file could not be parsed or rendered.
    #[error("configuration format error: {0}")]
    ConfigFormat(String),

    /// The requested agent is not part of the live population.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// An agent with the same identity is already alive.
    #[error("agent already exists: {0}")]
    DuplicateAgent(AgentId),

    /// A resource grid does not match the configured dimensions.
    #[error("grid is {actual_width}x{actual_height} but configuration expects {width}x{height}")]
    GridMismatch {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
        /// Width of the supplied grid.
        actual_width: u32,
        /// Height of the supplied grid.
        actual_height: u32,
    },
}

/// A single inconsistent configuration parameter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Grid width or height is zero.
    #[error("grid dimensions must be positive (got {width}x{height})")]
    EmptyGrid {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },

    /// A probability lies outside `[0, 1]` or is not a number.
    #[error("{name} must be a probability in [0, 1] (got {value})")]
    Probability {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A rate, threshold, or duration is infinite or not a number.
    #[error("{name} must be a finite number (got {value})")]
    NonFinite {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A rate, threshold, or duration is negative.
    #[error("{name} must be non-negative (got {value})")]
    Negative {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The maximum lifespan is zero or negative.
    #[error("max_age_years must be positive (got {0})")]
    Lifespan(f64),

    /// The presentation tick rate is zero.
    #[error("tick_rate_hz must be at least 1")]
    TickRate,
}
