use crate::smooth_scroll::ScrollController;

/// Icon shown on the burger button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIcon {
    Menu,
    Close,
}

impl MenuIcon {
    /// Icon-sprite glyph name.
    pub fn glyph(self) -> &'static str {
        match self {
            MenuIcon::Menu => "menu",
            MenuIcon::Close => "x",
        }
    }
}

/// Page body overflow style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyOverflow {
    Auto,
    Hidden,
}

/// Mobile menu panel state. While open, page scrolling is locked.
#[derive(Debug)]
pub struct NavigationController {
    open: bool,
    icon: MenuIcon,
    overflow: BodyOverflow,
}

impl NavigationController {
    pub fn new() -> Self {
        Self {
            open: false,
            icon: MenuIcon::Menu,
            overflow: BodyOverflow::Auto,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn icon(&self) -> MenuIcon {
        self.icon
    }

    pub fn overflow(&self) -> BodyOverflow {
        self.overflow
    }

    /// Burger click.
    pub fn toggle(&mut self, scroll: &mut ScrollController) {
        if self.open {
            self.close(scroll);
        } else {
            self.open = true;
            self.icon = MenuIcon::Close;
            self.overflow = BodyOverflow::Hidden;
            scroll.stop();
            log::debug!("menu opened");
        }
    }

    /// Any menu link click closes the panel, whatever its state.
    pub fn close_from_link(&mut self, scroll: &mut ScrollController) {
        self.close(scroll);
    }

    fn close(&mut self, scroll: &mut ScrollController) {
        if self.open {
            log::debug!("menu closed");
        }
        self.open = false;
        self.icon = MenuIcon::Menu;
        self.overflow = BodyOverflow::Auto;
        scroll.start();
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}
