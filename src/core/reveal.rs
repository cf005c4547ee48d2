use std::collections::BTreeSet;

pub const VISIBILITY_THRESHOLD: f64 = 0.1;
/// Bottom root margin; the viewport is shrunk by this much before testing.
pub const ROOT_MARGIN_BOTTOM: f64 = -50.0;

/// Vertical extent of an element relative to the viewport top, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBox {
    pub top: f64,
    pub height: f64,
}

impl ElementBox {
    /// Share of the element inside the margin-adjusted viewport.
    pub fn visible_ratio(&self, viewport_height: f64) -> f64 {
        if self.height <= 0.0 {
            return 0.0;
        }
        let view_bottom = viewport_height + ROOT_MARGIN_BOTTOM;
        let overlap = (self.top + self.height).min(view_bottom) - self.top.max(0.0);
        (overlap / self.height).clamp(0.0, 1.0)
    }
}

/// Tracks fade-in sections; once revealed an element stays revealed.
#[derive(Debug, Default)]
pub struct RevealTracker {
    observed: BTreeSet<String>,
    visible: BTreeSet<String>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, id: impl Into<String>) {
        self.observed.insert(id.into());
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    /// Feeds one scroll/layout sample; returns ids that just crossed into view.
    pub fn on_layout<'a, I>(&mut self, boxes: I, viewport_height: f64) -> Vec<String>
    where
        I: IntoIterator<Item = (&'a str, ElementBox)>,
    {
        let mut revealed = Vec::new();
        for (id, element) in boxes {
            if !self.observed.contains(id) || self.visible.contains(id) {
                continue;
            }
            let ratio = element.visible_ratio(viewport_height);
            if ratio > 0.0 && ratio >= VISIBILITY_THRESHOLD {
                self.visible.insert(id.to_string());
                revealed.push(id.to_string());
            }
        }
        if !revealed.is_empty() {
            tracing::debug!("Revealed {:?}", revealed);
        }
        revealed
    }
}
