//! Fixed-timestep game clock using an accumulator pattern.
//!
//! `draw_web()` calls at ~60fps with variable delta. GameTime converts
//! this into whole economy ticks of a fixed wall-clock period, so the
//! economy advances at the same rate regardless of frame rate.

/// Most ticks a single frame may catch up on after a long pause.
///
/// Browsers stop animation frames in hidden tabs, so the whole absence is
/// paid out on return. One hour at the default interval.
const MAX_CATCH_UP_TICKS: f64 = 3_600.0;

pub struct GameTime {
    /// Milliseconds per tick (1000 = one economy tick per second)
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks
    accumulator: f64,
    /// Total elapsed ticks since creation
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
}

impl GameTime {
    /// `tick_interval_ms` must be positive; zero is treated as 1ms.
    pub fn new(tick_interval_ms: u32) -> Self {
        Self {
            ms_per_tick: tick_interval_ms.max(1) as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed wall-clock timestamp (from `Date.now()` or similar).
    /// Returns the number of discrete ticks to process this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => {
                // Clamp to avoid spiral-of-death if tab was backgrounded
                (now_ms - prev).clamp(0.0, self.ms_per_tick * MAX_CATCH_UP_TICKS)
            }
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_returns_zero_ticks() {
        let mut gt = GameTime::new(1000);
        assert_eq!(gt.update(5_000.0), 0);
    }

    #[test]
    fn one_tick_per_interval() {
        let mut gt = GameTime::new(1000);
        gt.update(0.0);
        assert_eq!(gt.update(999.0), 0);
        assert_eq!(gt.update(1000.0), 1);
        assert_eq!(gt.total_ticks, 1);
    }

    #[test]
    fn remainder_carried_over() {
        let mut gt = GameTime::new(1000);
        gt.update(0.0);
        assert_eq!(gt.update(1500.0), 1); // 500ms left over
        assert_eq!(gt.update(2000.0), 1); // 500 + 500
        assert_eq!(gt.total_ticks, 2);
    }

    #[test]
    fn backgrounded_minute_pays_every_tick() {
        let mut gt = GameTime::new(1000);
        gt.update(0.0);
        assert_eq!(gt.update(60_000.0), 60);
        assert_eq!(gt.total_ticks, 60);
    }

    #[test]
    fn catch_up_is_capped_after_an_hour() {
        let mut gt = GameTime::new(1000);
        gt.update(0.0);
        assert_eq!(gt.update(86_400_000.0), 3_600);
        assert_eq!(gt.update(86_401_000.0), 1);
    }

    #[test]
    fn clock_going_backwards_yields_nothing() {
        let mut gt = GameTime::new(1000);
        gt.update(10_000.0);
        assert_eq!(gt.update(9_000.0), 0);
        assert_eq!(gt.update(10_000.0), 1);
    }

    #[test]
    fn steady_60fps() {
        let mut gt = GameTime::new(250);
        gt.update(0.0);
        let mut total = 0u32;
        for i in 1..=60 {
            total += gt.update(i as f64 * 16.667);
        }
        assert!((3..=5).contains(&total), "expected ~4 ticks, got {}", total);
    }

    #[test]
    fn zero_interval_does_not_divide_by_zero() {
        let mut gt = GameTime::new(0);
        gt.update(0.0);
        assert_eq!(gt.update(3.0), 3);
    }
}
