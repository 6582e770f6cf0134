//! Timing and stepping.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::settings::TimeParams;

/// `FrameClock` turns the wall-clock interval between two frames into the time
/// step fed to `Scene::advance`.
pub struct FrameClock {
    params: TimeParams,
    timestep: Duration,
    previous_timesteps: VecDeque<Duration>,
    last_frame_timepoint: Option<Instant>,
}

impl FrameClock {
    pub fn new(params: TimeParams) -> Self {
        FrameClock {
            params,
            timestep: Duration::new(0, 0),
            previous_timesteps: VecDeque::new(),
            last_frame_timepoint: None,
        }
    }

    /// Measures the interval since the previous call with the monotonic clock. The
    /// first call yields a zero step.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = self
            .last_frame_timepoint
            .map(|v| now.duration_since(v))
            .unwrap_or_else(|| Duration::new(0, 0));

        self.last_frame_timepoint = Some(now);
        self.advance(elapsed)
    }

    /// Feeds an interval and returns the time step in simulation units.
    pub fn advance(&mut self, mut elapsed: Duration) -> f32 {
        // If fps lower than minimum, simply clamp it.
        if self.params.min_fps > 0 {
            let max = Duration::from_millis(u64::from(1000 / self.params.min_fps));
            if elapsed > max {
                warn!("Frame interval {:?} is clamped to {:?}.", elapsed, max);
                elapsed = max;
            }
        }

        // Perform timestep smoothing.
        let smoothing_step = self.params.time_smooth_step as usize;
        if smoothing_step > 0 {
            self.previous_timesteps.push_front(elapsed);
            self.previous_timesteps.truncate(smoothing_step);

            let sum = self
                .previous_timesteps
                .iter()
                .fold(Duration::new(0, 0), |acc, v| acc + *v);
            self.timestep = sum / self.previous_timesteps.len() as u32;
        } else {
            self.timestep = elapsed;
        }

        self.delta_time()
    }

    /// Returns the last (clamped, smoothed) frame interval.
    #[inline]
    pub fn timestep(&self) -> Duration {
        self.timestep
    }

    /// Returns the last time step in simulation units.
    #[inline]
    pub fn delta_time(&self) -> f32 {
        let secs = self.timestep.as_secs() as f32 + self.timestep.subsec_nanos() as f32 * 1e-9;
        secs * self.params.time_scale
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new(TimeParams::default());
        assert_eq!(clock.tick(), 0.0);
    }
}
