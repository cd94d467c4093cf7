use crate::config::SimConfig;
use crate::error::{CoreError, CoreResult};
use crate::grid::{ResourceGrid, Topology};
use crate::rng::SimRng;

/// The shared environment: configuration, randomness, and the resource grid.
///
/// Systems only read the configuration. It changes between ticks through
/// [`World::reconfigure`], or by building a new world when the grid shape
/// changes.
#[derive(Debug, Clone)]
pub struct World {
    config: SimConfig,
    /// The only randomness source systems may draw from.
    pub rng: SimRng,
    /// Food per cell.
    pub grid: ResourceGrid,
}

impl World {
    /// Assemble a world from already-initialized parts.
    ///
    /// Fails if the configuration does not validate or the grid does not
    /// match the configured dimensions.
    pub fn from_parts(config: SimConfig, rng: SimRng, grid: ResourceGrid) -> CoreResult<Self> {
        config.validate()?;
        if grid.width() != config.width || grid.height() != config.height {
            return Err(CoreError::GridMismatch {
                width: config.width,
                height: config.height,
                actual_width: grid.width(),
                actual_height: grid.height(),
            });
        }
        tracing::info!(
            seed = config.seed,
            width = config.width,
            height = config.height,
            toroidal = config.toroidal,
            "world created"
        );
        Ok(Self { config, rng, grid })
    }

    /// The configuration systems read this tick.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Grid shape and edge behaviour.
    pub fn topology(&self) -> Topology {
        Topology::new(self.config.width, self.config.height, self.config.toroidal)
    }

    /// Years represented by one tick.
    pub fn years_per_tick(&self) -> f64 {
        self.config.years_per_tick()
    }

    /// Borrow configuration, RNG and grid separately so a system can read
    /// parameters while drawing and writing.
    pub fn split_mut(&mut self) -> (&SimConfig, &mut SimRng, &mut ResourceGrid) {
        (&self.config, &mut self.rng, &mut self.grid)
    }

    /// Swap in a configuration that keeps the grid shape, leaving the grid
    /// and RNG position as they are. On error the world is unchanged.
    pub fn reconfigure(&mut self, config: SimConfig) -> CoreResult<()> {
        config.validate()?;
        if config.width != self.grid.width() || config.height != self.grid.height() {
            return Err(CoreError::GridMismatch {
                width: config.width,
                height: config.height,
                actual_width: self.grid.width(),
                actual_height: self.grid.height(),
            });
        }
        self.config = config;
        Ok(())
    }
}
