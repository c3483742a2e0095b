use std::{thread::sleep, time::{Duration, Instant}};

/// Paces the game loop at a number of ticks per second.
pub trait Ticker {
    fn set_rate(&mut self, ticks_per_second: u32);

    /// Blocks until the next tick is due.
    fn wait_for_next_tick(&mut self);
}

/// A [`Ticker`] that sleeps away whatever is left of the current tick.
pub struct FrameClock {
    interval: Duration,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(ticks_per_second: u32) -> Self {
        FrameClock { interval: interval_for(ticks_per_second), last_tick: Instant::now() }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Ticker for FrameClock {
    fn set_rate(&mut self, ticks_per_second: u32) {
        self.interval = interval_for(ticks_per_second);
    }

    fn wait_for_next_tick(&mut self) {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.interval {
            sleep(self.interval - elapsed);
        }
        self.last_tick = Instant::now();
    }
}

fn interval_for(ticks_per_second: u32) -> Duration {
    Duration::from_secs(1) / ticks_per_second.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval() {
        assert_eq!(FrameClock::new(10).interval(), Duration::from_millis(100));
        assert_eq!(FrameClock::new(0).interval(), Duration::from_secs(1));

        let mut clock = FrameClock::new(10);
        clock.set_rate(20);
        assert_eq!(clock.interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_wait_keeps_rate() {
        let mut clock = FrameClock::new(100);
        clock.wait_for_next_tick();

        let start = Instant::now();
        clock.wait_for_next_tick();
        clock.wait_for_next_tick();

        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
