//! Time-based tweens shared by the scroll, reveal and marquee animators.

/// Easing curve applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Quadratic ease-out: 1 - (1 - t)^2
    #[default]
    Power1Out,
    /// Exponential ease-out: 1 - 2^(-10t)
    ExponentialOut,
    /// min(1, 1.001 - 2^(-10t)), reaches exactly 1 slightly before t = 1.
    ExponentialOutClamped,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Self::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::ExponentialOutClamped => (1.001 - 2.0_f32.powf(-10.0 * t)).min(1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Forever,
}

/// A single value animated from `from` to `to`.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    delay: f32,
    easing: Easing,
    repeat: Repeat,
    /// Seconds since the tween was created, including the delay.
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            delay: 0.0,
            easing: Easing::default(),
            repeat: Repeat::Once,
            elapsed: 0.0,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn advance(&mut self, dt: f32) {
        if dt <= 0.0 || self.is_complete() {
            return;
        }
        self.elapsed += dt;

        // Keep a looping tween's clock within one cycle so f32 steps stay
        // representable.
        if self.repeat == Repeat::Forever && self.duration > 0.0 && self.elapsed > self.delay {
            self.elapsed = self.delay + (self.elapsed - self.delay) % self.duration;
        }
    }

    /// Linear progress in [0, 1] for the current cycle.
    pub fn progress(&self) -> f32 {
        let active = self.elapsed - self.delay;
        if active <= 0.0 {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }

        match self.repeat {
            Repeat::Once => (active / self.duration).min(1.0),
            Repeat::Forever => (active % self.duration) / self.duration,
        }
    }

    pub fn value(&self) -> f32 {
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    pub fn is_complete(&self) -> bool {
        match self.repeat {
            Repeat::Once => self.elapsed - self.delay >= self.duration,
            Repeat::Forever => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Power1Out,
            Easing::ExponentialOut,
            Easing::ExponentialOutClamped,
        ] {
            assert!(easing.apply(0.0) < 0.01, "{:?}", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?}", easing);
        }
    }

    #[test]
    fn clamped_exponential_saturates_early() {
        assert_eq!(Easing::ExponentialOutClamped.apply(0.999), 1.0);
        assert!(Easing::ExponentialOut.apply(0.5) < 1.0);
    }

    #[test]
    fn delay_holds_start_value() {
        let mut t = Tween::new(50.0, 0.0, 0.8).with_delay(0.3);
        t.advance(0.2);
        assert_eq!(t.value(), 50.0);
        t.advance(1.0);
        assert!(t.is_complete());
        assert_eq!(t.value(), 0.0);
    }

    #[test]
    fn forever_wraps_and_never_completes() {
        let mut t = Tween::new(0.0, -50.0, 20.0)
            .with_easing(Easing::Linear)
            .with_repeat(Repeat::Forever);
        t.advance(25.0);
        assert!(!t.is_complete());
        assert!((t.value() - -12.5).abs() < 1e-3);
    }

    #[test]
    fn forever_clock_stays_within_one_cycle() {
        let mut t = Tween::new(0.0, 1.0, 2.0)
            .with_delay(0.5)
            .with_repeat(Repeat::Forever);
        t.advance(1_000_001.0);
        assert!(t.elapsed >= 0.5 && t.elapsed < 2.5);
        let before = t.elapsed;
        t.advance(0.01);
        assert!(t.elapsed > before);
    }
}
