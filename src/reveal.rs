//! One-shot staggered reveal of section children as they scroll into view.

use crate::tween::{Easing, Tween};

/// Start offset (px) children slide up from.
pub const REVEAL_OFFSET_Y: f32 = 50.0;
pub const REVEAL_DURATION: f32 = 0.8;
pub const REVEAL_STAGGER: f32 = 0.1;
/// A section triggers once its top crosses this fraction of the viewport.
pub const REVEAL_START: f32 = 0.8;

/// Resolved style of one child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildStyle {
    pub y: f32,
    pub opacity: f32,
}

impl ChildStyle {
    pub const HIDDEN: ChildStyle = ChildStyle {
        y: REVEAL_OFFSET_Y,
        opacity: 0.0,
    };
    pub const SHOWN: ChildStyle = ChildStyle { y: 0.0, opacity: 1.0 };
}

struct ChildTweens {
    y: Tween,
    opacity: Tween,
}

struct Section {
    /// Document-space top edge.
    top: f32,
    child_count: usize,
    /// Empty until triggered.
    tweens: Vec<ChildTweens>,
    triggered: bool,
}

pub struct RevealAnimator {
    sections: Vec<Section>,
}

impl RevealAnimator {
    /// `sections` are (top offset, direct child count) pairs in document order.
    pub fn new(sections: impl IntoIterator<Item = (f32, usize)>) -> Self {
        let sections = sections
            .into_iter()
            .map(|(top, child_count)| Section {
                top,
                child_count,
                tweens: Vec::new(),
                triggered: false,
            })
            .collect();
        Self { sections }
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_triggered(&self, section: usize) -> bool {
        self.sections.get(section).is_some_and(|s| s.triggered)
    }

    /// Check trigger thresholds for the current scroll position. Returns the
    /// number of sections that fired on this call.
    pub fn on_scroll(&mut self, scroll_y: f32, viewport_height: f32) -> usize {
        let threshold = viewport_height * REVEAL_START;
        let mut fired = 0;

        for (index, section) in self.sections.iter_mut().enumerate() {
            if section.triggered || section.top - scroll_y > threshold {
                continue;
            }

            section.triggered = true;
            section.tweens = (0..section.child_count)
                .map(|i| {
                    let delay = i as f32 * REVEAL_STAGGER;
                    ChildTweens {
                        y: Tween::new(REVEAL_OFFSET_Y, 0.0, REVEAL_DURATION)
                            .with_delay(delay)
                            .with_easing(Easing::Power1Out),
                        opacity: Tween::new(0.0, 1.0, REVEAL_DURATION)
                            .with_delay(delay)
                            .with_easing(Easing::Power1Out),
                    }
                })
                .collect();
            fired += 1;
            log::debug!("reveal: section {} triggered at scroll {:.0}", index, scroll_y);
        }

        fired
    }

    pub fn advance(&mut self, dt: f32) {
        for section in &mut self.sections {
            for child in &mut section.tweens {
                child.y.advance(dt);
                child.opacity.advance(dt);
            }
        }
    }

    /// Style for a child; `None` if the index is out of range.
    pub fn child_style(&self, section: usize, child: usize) -> Option<ChildStyle> {
        let section = self.sections.get(section)?;
        if child >= section.child_count {
            return None;
        }

        Some(match section.tweens.get(child) {
            Some(t) => ChildStyle {
                y: t.y.value(),
                opacity: t.opacity.value(),
            },
            None => ChildStyle::HIDDEN,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_start_hidden() {
        let reveal = RevealAnimator::new([(2000.0, 3)]);
        assert_eq!(reveal.child_style(0, 0), Some(ChildStyle::HIDDEN));
        assert_eq!(reveal.child_style(0, 3), None);
        assert_eq!(reveal.child_style(1, 0), None);
    }

    #[test]
    fn triggers_at_eighty_percent() {
        let mut reveal = RevealAnimator::new([(1000.0, 2)]);
        // top at 1000 - 150 = 850 > 800
        assert_eq!(reveal.on_scroll(150.0, 1000.0), 0);
        assert!(!reveal.is_triggered(0));
        // top at 800
        assert_eq!(reveal.on_scroll(200.0, 1000.0), 1);
        assert!(reveal.is_triggered(0));
    }

    #[test]
    fn fires_once_even_after_scrolling_back() {
        let mut reveal = RevealAnimator::new([(500.0, 1)]);
        assert_eq!(reveal.on_scroll(0.0, 1000.0), 1);
        reveal.advance(2.0);
        assert_eq!(reveal.child_style(0, 0), Some(ChildStyle::SHOWN));

        assert_eq!(reveal.on_scroll(0.0, 100.0), 0);
        assert_eq!(reveal.on_scroll(0.0, 1000.0), 0);
        assert_eq!(reveal.child_style(0, 0), Some(ChildStyle::SHOWN));
    }

    #[test]
    fn children_are_staggered() {
        let mut reveal = RevealAnimator::new([(0.0, 3)]);
        reveal.on_scroll(0.0, 800.0);
        reveal.advance(0.15);

        let first = reveal.child_style(0, 0).unwrap();
        let second = reveal.child_style(0, 1).unwrap();
        let third = reveal.child_style(0, 2).unwrap();
        assert!(first.opacity > second.opacity);
        assert!(second.opacity > 0.0);
        assert_eq!(third, ChildStyle::HIDDEN);

        reveal.advance(1.0);
        for i in 0..3 {
            assert_eq!(reveal.child_style(0, i), Some(ChildStyle::SHOWN));
        }
    }
}
