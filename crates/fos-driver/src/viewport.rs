//! Viewport metrics
//!
//! The design viewport (750 units by default) is stretched over the device
//! width; their ratio is the pixel size of one design unit.

/// Design viewport width used when none is configured
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 750.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Pinned device width; `None` (or zero) means "ask the document"
    device_width: Option<f64>,
    viewport_width: f64,
}

impl Viewport {
    pub fn new(device_width: Option<f64>, viewport_width: f64) -> Self {
        Self {
            device_width,
            viewport_width,
        }
    }

    /// Pinned device width, or `client_width` when none is pinned
    pub fn device_width(&self, client_width: f64) -> f64 {
        self.device_width.filter(|w| *w > 0.0).unwrap_or(client_width)
    }

    pub fn set_device_width(&mut self, width: Option<f64>) {
        self.device_width = width;
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    /// Device pixels per design unit; `None` for a degenerate viewport
    pub fn scale_ratio(&self, client_width: f64) -> Option<f64> {
        let ratio = self.device_width(client_width) / self.viewport_width;
        (ratio.is_finite() && ratio > 0.0).then_some(ratio)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(None, DEFAULT_VIEWPORT_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_width_when_unpinned() {
        let viewport = Viewport::default();
        assert_eq!(viewport.device_width(375.0), 375.0);
        assert_eq!(viewport.scale_ratio(375.0), Some(0.5));
    }

    #[test]
    fn test_pinned_width() {
        let mut viewport = Viewport::default();
        viewport.set_device_width(Some(1500.0));
        assert_eq!(viewport.scale_ratio(375.0), Some(2.0));

        viewport.set_device_width(Some(0.0));
        assert_eq!(viewport.device_width(320.0), 320.0);
    }

    #[test]
    fn test_degenerate_viewport() {
        let viewport = Viewport::new(None, 0.0);
        assert_eq!(viewport.scale_ratio(375.0), None);
    }
}
