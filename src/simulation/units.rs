//! Linear mapping between physical lengths and render-space pixels
//!
//! `UnitScale` carries a single `pixels_per_unit` factor derived from the
//! configured visible height and the panel's pixel height. Both inputs can
//! change at runtime (slider/window resize) and the factor is recomputed on
//! every change so the two directions stay consistent.

#[derive(Debug, Clone)]
pub struct UnitScale {
    visible_height: f64, // length units shown between ground and panel top
    panel_px: f64,       // panel height in pixels
    pixels_per_unit: f64,
}

impl UnitScale {
    pub fn new(visible_height: f64, panel_px: f64) -> Self {
        let mut scale = Self {
            visible_height: visible_height.max(f64::MIN_POSITIVE),
            panel_px: panel_px.max(1.0),
            pixels_per_unit: 1.0,
        };
        scale.recompute();
        scale
    }

    fn recompute(&mut self) {
        self.pixels_per_unit = self.panel_px / self.visible_height;
    }

    /// Length units -> pixels.
    pub fn to_render(&self, length: f64) -> f64 {
        length * self.pixels_per_unit
    }

    /// Pixels -> length units.
    pub fn from_render(&self, px: f64) -> f64 {
        px / self.pixels_per_unit
    }

    pub fn set_visible_height(&mut self, visible_height: f64) {
        self.visible_height = visible_height.max(f64::MIN_POSITIVE);
        self.recompute();
    }

    pub fn set_panel_px(&mut self, panel_px: f64) {
        self.panel_px = panel_px.max(1.0);
        self.recompute();
    }

    pub fn visible_height(&self) -> f64 {
        self.visible_height
    }

    pub fn pixels_per_unit(&self) -> f64 {
        self.pixels_per_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_exact() {
        let scale = UnitScale::new(2.0, 440.0);
        for h in [0.0, 0.05, 1.4, 2.0] {
            let back = scale.from_render(scale.to_render(h));
            assert!((back - h).abs() < 1e-12, "round trip drifted: {} -> {}", h, back);
        }
    }

    #[test]
    fn factor_tracks_visible_height() {
        let mut scale = UnitScale::new(2.0, 440.0);
        assert!((scale.to_render(1.0) - 220.0).abs() < 1e-12);

        scale.set_visible_height(4.0);
        assert!((scale.to_render(1.0) - 110.0).abs() < 1e-12);

        scale.set_panel_px(880.0);
        assert!((scale.to_render(1.0) - 220.0).abs() < 1e-12);
    }
}
