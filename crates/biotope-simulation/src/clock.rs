/// Tracks simulation time: a monotonic tick counter and the simulated years
/// it stands for.
#[derive(Debug, Clone)]
pub struct SimClock {
    tick: u64,
    years_per_tick: f64,
    elapsed_years: f64,
}

impl SimClock {
    /// Create a clock at tick 0 where each tick lasts `years_per_tick`.
    pub fn new(years_per_tick: f64) -> Self {
        Self {
            tick: 0,
            years_per_tick,
            elapsed_years: 0.0,
        }
    }

    /// Advance the clock by one tick. Returns the new tick number.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.elapsed_years += self.years_per_tick;
        self.tick
    }

    /// Return the current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Total simulated years since the start.
    pub fn elapsed_years(&self) -> f64 {
        self.elapsed_years
    }

    /// Whole simulated years since the start.
    pub fn year(&self) -> u64 {
        // Tolerate accumulated rounding just below a whole year.
        (self.elapsed_years + 1e-9).floor() as u64
    }

    pub fn years_per_tick(&self) -> f64 {
        self.years_per_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_initial_state() {
        let clock = SimClock::new(1.0);
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.elapsed_years(), 0.0);
        assert_eq!(clock.year(), 0);
    }

    #[test]
    fn clock_advance_increments() {
        let mut clock = SimClock::new(0.5);
        clock.advance();
        clock.advance();
        assert_eq!(clock.advance(), 3);
        assert!((clock.elapsed_years() - 1.5).abs() < f64::EPSILON);
        assert_eq!(clock.year(), 1);
    }

    #[test]
    fn twelve_months_make_a_year() {
        let mut clock = SimClock::new(1.0 / 12.0);
        for _ in 0..12 {
            clock.advance();
        }
        assert_eq!(clock.year(), 1);
    }
}
