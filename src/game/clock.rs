//! Fixed-rate tick scheduling.

use crate::config::FPS;

/// Converts variable frame times into whole ticks at a fixed rate.
///
/// # Examples
///
/// ```
/// use world_explorer::FixedTimestep;
///
/// let mut clock = FixedTimestep::new(30);
/// assert_eq!(clock.advance(0.010), 0);
/// assert_eq!(clock.advance(0.030), 1);
/// assert_eq!(clock.advance(0.100), 3);
/// ```
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    tick_us: u64,
    accumulated_us: u64,
    max_ticks_per_frame: u32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(FPS)
    }
}

impl FixedTimestep {
    /// A clock ticking `rate` times per second.
    pub fn new(rate: u32) -> Self {
        Self {
            tick_us: 1_000_000 / u64::from(rate.max(1)),
            accumulated_us: 0,
            max_ticks_per_frame: 5,
        }
    }

    /// Adds a frame's duration in seconds and returns how many ticks to run.
    ///
    /// A long stall runs at most a handful of ticks; the rest of the backlog
    /// is dropped.
    pub fn advance(&mut self, frame_seconds: f32) -> u32 {
        let frame_us = (f64::from(frame_seconds.max(0.0)) * 1_000_000.0) as u64;
        self.accumulated_us += frame_us;

        let mut ticks = 0;
        while self.accumulated_us >= self.tick_us {
            self.accumulated_us -= self.tick_us;
            ticks += 1;
            if ticks == self.max_ticks_per_frame {
                self.accumulated_us = 0;
                break;
            }
        }
        ticks
    }

    /// Seconds per tick.
    pub fn tick_seconds(&self) -> f64 {
        self.tick_us as f64 / 1_000_000.0
    }
}
