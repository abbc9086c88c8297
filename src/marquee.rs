use crate::tween::{Easing, Repeat, Tween};

/// Seconds per full loop.
pub const MARQUEE_DURATION: f32 = 20.0;
/// Content is duplicated once, so shifting by half its width is seamless.
pub const MARQUEE_SHIFT_PERCENT: f32 = -50.0;

/// Endless linear horizontal scroll of the marquee strip.
pub struct MarqueeAnimator {
    tween: Tween,
}

impl MarqueeAnimator {
    pub fn new() -> Self {
        Self {
            tween: Tween::new(0.0, MARQUEE_SHIFT_PERCENT, MARQUEE_DURATION)
                .with_easing(Easing::Linear)
                .with_repeat(Repeat::Forever),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.tween.advance(dt);
    }

    /// Current translation as a percentage of content width.
    pub fn offset_percent(&self) -> f32 {
        self.tween.value()
    }

    pub fn translate_px(&self, content_width: f32) -> f32 {
        content_width * self.offset_percent() / 100.0
    }
}

impl Default for MarqueeAnimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_linearly() {
        let mut marquee = MarqueeAnimator::new();
        assert_eq!(marquee.offset_percent(), 0.0);
        marquee.advance(5.0);
        assert!((marquee.offset_percent() - -12.5).abs() < 1e-4);
        assert!((marquee.translate_px(2000.0) - -250.0).abs() < 1e-2);
    }

    #[test]
    fn loops_forever() {
        let mut marquee = MarqueeAnimator::new();
        for _ in 0..100 {
            marquee.advance(0.5);
        }
        // 50 s in: 2.5 loops, halfway through the third.
        assert!((marquee.offset_percent() - -25.0).abs() < 1e-2);
        assert!(marquee.offset_percent() <= 0.0 && marquee.offset_percent() > -50.0);
    }

    #[test]
    fn keeps_moving_after_long_uptime() {
        let mut marquee = MarqueeAnimator::new();
        // A whole number of loops: back at the start.
        marquee.advance(600_000.0);
        assert!(marquee.offset_percent().abs() < 1e-3);

        for _ in 0..120 {
            marquee.advance(1.0 / 60.0);
        }
        // 2 s into a loop.
        assert!((marquee.offset_percent() - -5.0).abs() < 1e-2);
    }
}
