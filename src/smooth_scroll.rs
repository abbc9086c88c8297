//! Inertial scrolling: wheel and touch input move a target, and the visible
//! scroll position eases toward it once per frame.

use crate::tween::Easing;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOptions {
    /// Seconds for one eased scroll animation.
    pub duration: f32,
    pub easing: Easing,
    pub wheel_multiplier: f32,
    pub touch_multiplier: f32,
    /// When false, touch deltas are applied immediately.
    pub smooth_touch: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            duration: 1.2,
            easing: Easing::ExponentialOutClamped,
            wheel_multiplier: 1.0,
            touch_multiplier: 2.0,
            smooth_touch: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: f32,
    to: f32,
    elapsed: f32,
}

pub struct ScrollController {
    options: ScrollOptions,
    /// Position currently shown.
    animated: f32,
    /// Position the animation is heading to.
    target: f32,
    /// Maximum scroll offset (content size minus viewport).
    limit: f32,
    stopped: bool,
    animation: Option<ScrollAnimation>,
    last_time_ms: Option<f64>,
}

impl ScrollController {
    pub fn new(options: ScrollOptions, limit: f32) -> Self {
        Self {
            options,
            animated: 0.0,
            target: 0.0,
            limit: limit.max(0.0),
            stopped: false,
            animation: None,
            last_time_ms: None,
        }
    }

    pub fn scroll(&self) -> f32 {
        self.animated
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Suspend input-driven scrolling and drop any in-flight animation.
    pub fn stop(&mut self) {
        if !self.stopped {
            log::debug!("smooth scroll stopped at {:.1}", self.animated);
        }
        self.stopped = true;
        self.animation = None;
        self.target = self.animated;
    }

    pub fn start(&mut self) {
        if self.stopped {
            log::debug!("smooth scroll resumed");
        }
        self.stopped = false;
    }

    /// New content extent. Positions beyond it are pulled back.
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        if self.animated > self.limit {
            self.animated = self.limit;
            self.animation = None;
        }
    }

    pub fn on_wheel(&mut self, delta: f32) {
        if self.stopped {
            return;
        }
        let to = (self.target + delta * self.options.wheel_multiplier).clamp(0.0, self.limit);
        self.animate_to(to);
    }

    pub fn on_touch(&mut self, delta: f32) {
        if self.stopped {
            return;
        }
        let to = (self.target + delta * self.options.touch_multiplier).clamp(0.0, self.limit);
        if self.options.smooth_touch {
            self.animate_to(to);
        } else {
            self.jump_to(to);
        }
    }

    /// Programmatic eased scroll, honoured even while stopped.
    pub fn scroll_to(&mut self, y: f32) {
        self.animate_to(y.clamp(0.0, self.limit));
    }

    /// Drive the animation. Must be called once per frame with a
    /// monotonically increasing timestamp in milliseconds.
    pub fn raf(&mut self, time_ms: f64) {
        let dt = match self.last_time_ms {
            Some(last) => ((time_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_time_ms = Some(time_ms);
        self.advance(dt);
    }

    fn advance(&mut self, dt: f32) {
        let Some(anim) = self.animation.as_mut() else {
            return;
        };

        anim.elapsed += dt;
        let progress = if self.options.duration > 0.0 {
            (anim.elapsed / self.options.duration).min(1.0)
        } else {
            1.0
        };
        let eased = self.options.easing.apply(progress);
        self.animated = anim.from + (anim.to - anim.from) * eased;

        if progress >= 1.0 {
            self.animated = anim.to;
            self.animation = None;
        }
    }

    fn animate_to(&mut self, to: f32) {
        self.target = to;
        self.animation = Some(ScrollAnimation {
            from: self.animated,
            to,
            elapsed: 0.0,
        });
    }

    fn jump_to(&mut self, to: f32) {
        self.target = to;
        self.animated = to;
        self.animation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frames(scroll: &mut ScrollController, start_ms: f64, frames: usize) -> f64 {
        let mut t = start_ms;
        for _ in 0..frames {
            scroll.raf(t);
            t += 16.0;
        }
        t
    }

    #[test]
    fn wheel_eases_to_target() {
        let mut scroll = ScrollController::new(ScrollOptions::default(), 5000.0);
        scroll.raf(0.0);
        scroll.on_wheel(300.0);
        assert_eq!(scroll.target(), 300.0);

        scroll.raf(100.0);
        let partial = scroll.scroll();
        assert!(partial > 0.0 && partial < 300.0);

        run_frames(&mut scroll, 116.0, 100);
        assert_eq!(scroll.scroll(), 300.0);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn target_is_clamped_to_limit() {
        let mut scroll = ScrollController::new(ScrollOptions::default(), 200.0);
        scroll.on_wheel(1000.0);
        assert_eq!(scroll.target(), 200.0);
        scroll.on_wheel(-5000.0);
        assert_eq!(scroll.target(), 0.0);
    }

    #[test]
    fn stopped_ignores_input() {
        let mut scroll = ScrollController::new(ScrollOptions::default(), 5000.0);
        scroll.stop();
        scroll.on_wheel(400.0);
        scroll.on_touch(50.0);
        run_frames(&mut scroll, 0.0, 10);
        assert_eq!(scroll.scroll(), 0.0);
        assert!(scroll.is_stopped());

        scroll.start();
        scroll.on_wheel(400.0);
        assert_eq!(scroll.target(), 400.0);
    }

    #[test]
    fn stop_cancels_in_flight_animation() {
        let mut scroll = ScrollController::new(ScrollOptions::default(), 5000.0);
        scroll.raf(0.0);
        scroll.on_wheel(1000.0);
        scroll.raf(200.0);
        let frozen = scroll.scroll();
        scroll.stop();
        run_frames(&mut scroll, 216.0, 50);
        assert_eq!(scroll.scroll(), frozen);
    }

    #[test]
    fn scroll_to_works_while_stopped() {
        let mut scroll = ScrollController::new(ScrollOptions::default(), 5000.0);
        scroll.stop();
        scroll.scroll_to(9000.0);
        assert_eq!(scroll.target(), 5000.0);
        run_frames(&mut scroll, 0.0, 100);
        assert_eq!(scroll.scroll(), 5000.0);
        assert!(scroll.is_stopped());
    }

    #[test]
    fn touch_without_smoothing_jumps() {
        let mut scroll = ScrollController::new(ScrollOptions::default(), 5000.0);
        scroll.on_touch(25.0);
        assert_eq!(scroll.scroll(), 50.0);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn shrinking_limit_pulls_position_back() {
        let mut scroll = ScrollController::new(ScrollOptions::default(), 5000.0);
        scroll.on_touch(1000.0);
        scroll.set_limit(300.0);
        assert_eq!(scroll.scroll(), 300.0);
        assert_eq!(scroll.target(), 300.0);
    }
}
