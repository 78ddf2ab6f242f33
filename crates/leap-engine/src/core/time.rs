/// Fixed timestep accumulator.
/// Movement constants are per frame, so the simulation must always advance
/// in whole steps of the same length regardless of display rate.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    /// Upper bound on steps per host frame; excess time is dropped.
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self { dt, accumulator: 0.0, max_steps: 10 }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add host frame time. Returns the number of fixed steps to run now.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !(frame_dt > 0.0) {
            return 0;
        }
        self.accumulator = (self.accumulator + frame_dt).min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Fraction of a step left over, for interpolating between steps.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Drop any banked time, e.g. after the host was paused.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(DT);
        assert_eq!(ts.accumulate(DT), 1);
    }

    #[test]
    fn banks_partial_frames() {
        let mut ts = FixedTimestep::new(DT);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
        let a = ts.alpha();
        assert!((0.0..1.0).contains(&a), "alpha was {}", a);
    }

    #[test]
    fn long_frames_are_capped() {
        let mut ts = FixedTimestep::new(DT);
        assert_eq!(ts.accumulate(1.0), 10);
        let mut ts = FixedTimestep::new(DT).with_max_steps(3);
        assert_eq!(ts.accumulate(1.0), 3);
    }

    #[test]
    fn negative_or_nan_time_is_ignored() {
        let mut ts = FixedTimestep::new(DT);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.accumulate(f32::NAN), 0);
        assert_eq!(ts.accumulate(DT), 1);
    }

    #[test]
    fn reset_drops_banked_time() {
        let mut ts = FixedTimestep::new(DT);
        ts.accumulate(0.01);
        ts.reset();
        assert_eq!(ts.alpha(), 0.0);
    }
}
