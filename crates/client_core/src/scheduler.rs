//! Fixed-step simulation clock.
//!
//! Render frames arrive at whatever rate the display gives us; simulation
//! ticks run at a fixed rate. The accumulator converts one into the other
//! and exposes the leftover fraction for render interpolation.

/// Default simulation rate, ticks per second.
pub const DEFAULT_TICK_HZ: f32 = 20.0;

/// Frame deltas above this are clamped so a stall (debugger, window drag)
/// does not trigger a burst of catch-up ticks.
const MAX_FRAME_DT: f32 = 0.25;

#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_HZ)
    }
}

impl FixedStep {
    /// A clock ticking `hz` times per second. Non-positive rates fall back
    /// to the default.
    #[must_use]
    pub fn new(hz: f32) -> Self {
        let hz = if hz > 0.0 { hz } else { DEFAULT_TICK_HZ };
        Self {
            step: 1.0 / hz,
            accumulator: 0.0,
        }
    }

    /// Seconds per tick.
    #[must_use]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed one frame's wall-clock delta; returns how many fixed ticks to
    /// run before rendering.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;
        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }

    /// Fraction of the next tick already elapsed, in `[0, 1)`. Feed this to
    /// the blend parameter of the render pass.
    #[must_use]
    pub fn blend(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn accumulates_partial_frames_into_ticks() {
        let mut clock = FixedStep::new(20.0);
        assert_eq!(clock.advance(0.03), 0);
        assert_eq!(clock.advance(0.03), 1);
        assert_abs_diff_eq!(clock.blend(), 0.2, epsilon = 1e-4);
    }

    #[test]
    fn long_frame_is_clamped() {
        let mut clock = FixedStep::new(20.0);
        let ticks = clock.advance(10.0);
        assert!(ticks <= 5, "ticks {ticks}");
    }

    #[test]
    fn garbage_dt_is_ignored() {
        let mut clock = FixedStep::new(20.0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(-5.0), 0);
        assert_eq!(clock.blend(), 0.0);
    }
}
