pub const SCROLL_THRESHOLD: f64 = 100.0;

/// Mobile menu driven by the hamburger button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationMenu {
    open: bool,
}

impl NavigationMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// A nav link or in-page anchor was followed.
    pub fn on_link_clicked(&mut self) {
        self.open = false;
    }

    /// Returns true when the key closed the menu.
    pub fn on_key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.open {
            self.open = false;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavbarStyle {
    pub background: &'static str,
    pub box_shadow: &'static str,
}

impl NavbarStyle {
    pub const TOP: NavbarStyle = NavbarStyle {
        background: "rgba(255, 255, 255, 0.95)",
        box_shadow: "none",
    };

    pub const SCROLLED: NavbarStyle = NavbarStyle {
        background: "rgba(255, 255, 255, 0.98)",
        box_shadow: "0 2px 20px rgba(0, 0, 0, 0.1)",
    };

    pub fn for_scroll(scroll_y: f64) -> Self {
        if scroll_y > SCROLL_THRESHOLD {
            Self::SCROLLED
        } else {
            Self::TOP
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_toggle_and_close() {
        let mut menu = NavigationMenu::new();
        menu.toggle();
        assert!(menu.is_open());
        menu.on_link_clicked();
        assert!(!menu.is_open());
    }

    #[test]
    fn test_escape_only_closes_open_menu() {
        let mut menu = NavigationMenu::new();
        assert!(!menu.on_key("Escape"));

        menu.toggle();
        assert!(!menu.on_key("Enter"));
        assert!(menu.is_open());
        assert!(menu.on_key("Escape"));
        assert!(!menu.is_open());
    }

    #[test]
    fn test_navbar_style_threshold() {
        assert_eq!(NavbarStyle::for_scroll(0.0), NavbarStyle::TOP);
        assert_eq!(NavbarStyle::for_scroll(100.0), NavbarStyle::TOP);
        assert_eq!(NavbarStyle::for_scroll(100.5), NavbarStyle::SCROLLED);
    }
}
