//! Startup wiring: builds every controller whose mount point exists and
//! drives them from the host frame loop.

use std::time::Duration;

use rand::Rng;

use crate::camera::Camera;
use crate::config::SiteConfig;
use crate::consent::{ConsentBanner, ConsentStore};
use crate::contact_form::FormController;
use crate::error::ConsentError;
use crate::marquee::MarqueeAnimator;
use crate::navigation::NavigationController;
use crate::particle_field::ParticleField;
use crate::pointer::PointerState;
use crate::reveal::RevealAnimator;
use crate::smooth_scroll::{ScrollController, ScrollOptions};

pub struct Site<R: Rng> {
    width: u32,
    height: u32,
    document_height: f32,
    pointer: PointerState,
    camera: Camera,
    scroll: ScrollController,
    field: Option<ParticleField>,
    navigation: Option<NavigationController>,
    reveal: RevealAnimator,
    marquee: Option<(MarqueeAnimator, f32)>,
    form: Option<FormController<R>>,
    consent: Option<ConsentBanner<Box<dyn ConsentStore>>>,
    elapsed: Duration,
}

impl<R: Rng> Site<R> {
    pub fn new(config: &SiteConfig, store: Box<dyn ConsentStore>, rng: R) -> Self {
        let page = &config.page;
        let (width, height) = (config.width, config.height);

        let field = page.hero_canvas.then(ParticleField::default);
        let navigation = page.navigation.then(NavigationController::new);
        let marquee = page.marquee_width.map(|w| (MarqueeAnimator::new(), w));
        let form = page.contact_form.then(|| FormController::new(rng));
        let consent = page
            .cookie_popup
            .then(|| ConsentBanner::new(store, config.consent_delay()));
        let reveal = RevealAnimator::new(page.sections.iter().map(|s| (s.top, s.children)));

        log::info!(
            "site wired: hero={} nav={} marquee={} form={} cookies={} sections={}",
            field.is_some(),
            navigation.is_some(),
            marquee.is_some(),
            form.is_some(),
            consent.is_some(),
            reveal.section_count()
        );

        let mut site = Self {
            width,
            height,
            document_height: page.document_height,
            pointer: PointerState::default(),
            camera: Camera::new(width, height),
            scroll: ScrollController::new(
                ScrollOptions::default(),
                page.document_height - height as f32,
            ),
            field,
            navigation,
            reveal,
            marquee,
            form,
            consent,
            elapsed: Duration::ZERO,
        };
        // Sections already in view reveal immediately.
        site.reveal.on_scroll(0.0, height as f32);
        site
    }

    /// One display refresh. `dt` in seconds, `now_ms` a monotonic timestamp.
    pub fn tick(&mut self, dt: f32, now_ms: f64) {
        self.elapsed += Duration::from_secs_f32(dt.max(0.0));

        self.scroll.raf(now_ms);
        self.reveal.on_scroll(self.scroll.scroll(), self.height as f32);
        self.reveal.advance(dt);

        if let Some((marquee, _)) = &mut self.marquee {
            marquee.advance(dt);
        }
        if let Some(field) = &mut self.field {
            field.tick(self.pointer);
        }
        if let Some(consent) = &mut self.consent {
            consent.tick(self.elapsed);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.camera.resize(width, height);
        self.scroll.set_limit(self.document_height - height as f32);
    }

    pub fn pointer_moved(&mut self, px: f32, py: f32) {
        self.pointer = PointerState::from_pixels(px, py, self.width as f32, self.height as f32);
    }

    pub fn wheel(&mut self, delta: f32) {
        self.scroll.on_wheel(delta);
    }

    pub fn touch(&mut self, delta: f32) {
        self.scroll.on_touch(delta);
    }

    /// Burger click. No-op without navigation markup.
    pub fn toggle_menu(&mut self) {
        if let Some(nav) = &mut self.navigation {
            nav.toggle(&mut self.scroll);
        }
    }

    pub fn menu_link(&mut self) {
        if let Some(nav) = &mut self.navigation {
            nav.close_from_link(&mut self.scroll);
        }
    }

    /// No-op without a cookie popup.
    pub fn accept_cookies(&mut self) -> Result<(), ConsentError> {
        match &mut self.consent {
            Some(consent) => consent.accept(),
            None => Ok(()),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    /// Split borrow for the renderer.
    pub fn field_and_camera(&mut self) -> Option<(&mut ParticleField, &Camera)> {
        let camera = &self.camera;
        self.field.as_mut().map(|field| (field, camera))
    }

    pub fn navigation(&self) -> Option<&NavigationController> {
        self.navigation.as_ref()
    }

    pub fn reveal(&self) -> &RevealAnimator {
        &self.reveal
    }

    /// Marquee translation in px.
    pub fn marquee_offset(&self) -> Option<f32> {
        self.marquee.as_ref().map(|(m, width)| m.translate_px(*width))
    }

    pub fn form(&self) -> Option<&FormController<R>> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormController<R>> {
        self.form.as_mut()
    }

    pub fn cookie_banner_visible(&self) -> bool {
        self.consent.as_ref().is_some_and(|c| c.is_visible())
    }

    /// One-line summary for the terminal.
    pub fn status_line(&self) -> String {
        let menu = match &self.navigation {
            Some(nav) if nav.is_open() => "open",
            Some(_) => "closed",
            None => "n/a",
        };
        let revealed = (0..self.reveal.section_count())
            .filter(|&i| self.reveal.is_triggered(i))
            .count();
        format!(
            "scroll {:.0}/{:.0} | menu {} | sections {}/{} | marquee {:.0}px | cookies {}",
            self.scroll.scroll(),
            self.scroll.limit(),
            menu,
            revealed,
            self.reveal.section_count(),
            self.marquee_offset().unwrap_or(0.0),
            if self.cookie_banner_visible() { "shown" } else { "hidden" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PageLayout, SectionLayout};
    use crate::consent::MemoryConsentStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn site_with(page: PageLayout) -> Site<StdRng> {
        let config = SiteConfig {
            width: 800,
            height: 1000,
            page,
            ..SiteConfig::default()
        };
        Site::new(
            &config,
            Box::new(MemoryConsentStore::default()),
            StdRng::seed_from_u64(9),
        )
    }

    fn run(site: &mut Site<StdRng>, frames: usize) {
        let start = site.elapsed().as_secs_f64() * 1000.0;
        for i in 0..frames {
            site.tick(0.016, start + i as f64 * 16.0);
        }
    }

    #[test]
    fn missing_mount_points_disable_controllers() {
        let mut site = site_with(PageLayout {
            hero_canvas: false,
            navigation: false,
            marquee_width: None,
            contact_form: false,
            cookie_popup: false,
            sections: Vec::new(),
            document_height: 1000.0,
        });

        site.toggle_menu();
        site.menu_link();
        site.accept_cookies().unwrap();
        run(&mut site, 200);

        assert!(site.field().is_none());
        assert!(site.navigation().is_none());
        assert!(site.form().is_none());
        assert_eq!(site.marquee_offset(), None);
        assert!(!site.cookie_banner_visible());
    }

    #[test]
    fn open_menu_blocks_wheel() {
        let mut site = site_with(PageLayout::default());
        site.toggle_menu();
        site.wheel(500.0);
        run(&mut site, 120);
        assert_eq!(site.scroll().scroll(), 0.0);

        site.menu_link();
        site.wheel(500.0);
        run(&mut site, 120);
        assert_eq!(site.scroll().scroll(), 500.0);
    }

    #[test]
    fn scrolling_reveals_sections() {
        let mut site = site_with(PageLayout {
            sections: vec![
                SectionLayout { top: 300.0, children: 1 },
                SectionLayout { top: 2000.0, children: 1 },
            ],
            document_height: 5000.0,
            ..PageLayout::default()
        });
        assert!(site.reveal().is_triggered(0));
        assert!(!site.reveal().is_triggered(1));

        site.wheel(1300.0);
        run(&mut site, 120);
        assert!(site.reveal().is_triggered(1));
    }

    #[test]
    fn cookie_banner_appears_then_accepts() {
        let mut site = site_with(PageLayout::default());
        run(&mut site, 60);
        assert!(!site.cookie_banner_visible());
        run(&mut site, 100);
        assert!(site.cookie_banner_visible());
        site.accept_cookies().unwrap();
        assert!(!site.cookie_banner_visible());
    }

    #[test]
    fn pointer_uses_current_viewport() {
        let mut site = site_with(PageLayout::default());
        site.resize(400, 200);
        site.pointer_moved(400.0, 0.0);
        assert_eq!(site.pointer(), PointerState { x: 1.0, y: 1.0 });
        assert!((site.camera().aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn particle_field_ticks_with_site() {
        let mut site = site_with(PageLayout::default());
        run(&mut site, 10);
        let field = site.field().unwrap();
        assert!((field.time() - 0.3).abs() < 1e-4);
        assert_eq!(field.len(), 2500);
    }
}
