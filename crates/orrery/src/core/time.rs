/// Converts variable frame deltas into reference-frame units.
///
/// Body speeds are expressed in radians per reference frame (1/60 s by
/// default). Scaling by elapsed time keeps motion independent of the
/// display refresh rate; one reference-length delta advances exactly one
/// frame's worth of rotation.
pub struct FrameClock {
    /// Duration of one reference frame in seconds.
    reference_dt: f32,
    /// Upper bound on frames consumed by a single tick.
    max_frames: f32,
    /// Total reference frames elapsed since creation.
    elapsed_frames: f64,
}

impl FrameClock {
    pub fn new(reference_dt: f32, max_frames: f32) -> Self {
        Self {
            reference_dt,
            max_frames,
            elapsed_frames: 0.0,
        }
    }

    /// Convert a frame delta (seconds) to reference frames.
    /// Non-finite or non-positive deltas advance nothing.
    pub fn frames_for(&mut self, dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0.0 || self.reference_dt <= 0.0 {
            return 0.0;
        }
        // Cap to prevent a huge jump after the tab was backgrounded
        let frames = (dt / self.reference_dt).min(self.max_frames);
        self.elapsed_frames += frames as f64;
        frames
    }

    /// Record one fixed reference frame (the refresh-coupled baseline).
    pub fn single_frame(&mut self) -> f32 {
        self.elapsed_frames += 1.0;
        1.0
    }

    /// The reference frame duration.
    pub fn reference_dt(&self) -> f32 {
        self.reference_dt
    }

    pub fn elapsed_frames(&self) -> f64 {
        self.elapsed_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_reference_frame() {
        let mut clock = FrameClock::new(1.0 / 60.0, 10.0);
        let frames = clock.frames_for(1.0 / 60.0);
        assert!((frames - 1.0).abs() < 1e-5);
    }

    #[test]
    fn high_refresh_rate_scales_down() {
        let mut clock = FrameClock::new(1.0 / 60.0, 10.0);
        let frames = clock.frames_for(1.0 / 120.0);
        assert!((frames - 0.5).abs() < 1e-5);
    }

    #[test]
    fn caps_at_max_frames() {
        let mut clock = FrameClock::new(1.0 / 60.0, 10.0);
        assert_eq!(clock.frames_for(5.0), 10.0);
    }

    #[test]
    fn bad_deltas_advance_nothing() {
        let mut clock = FrameClock::new(1.0 / 60.0, 10.0);
        assert_eq!(clock.frames_for(-1.0), 0.0);
        assert_eq!(clock.frames_for(f32::NAN), 0.0);
        assert_eq!(clock.elapsed_frames(), 0.0);
    }
}
