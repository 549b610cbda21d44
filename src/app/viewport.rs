/// Size of the output surface as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f32,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

/// Host environment that owns the output surfaces (a page, a window system).
pub trait SurfaceHost {
    /// Looks up the surface matching `selector`.
    fn find_surface(&self, selector: &str) -> Option<SurfaceSize>;
}

/// Logical size, pixel density and camera aspect of the output surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    pixel_ratio: f32,
    max_pixel_ratio: f32,
}

impl Viewport {
    #[must_use]
    pub fn new(size: SurfaceSize, max_pixel_ratio: f32) -> Self {
        let mut viewport = Self {
            width: 0,
            height: 0,
            pixel_ratio: 1.0,
            max_pixel_ratio,
        };
        viewport.resize(size.width, size.height, size.device_pixel_ratio);
        viewport
    }

    /// Applies a new logical size. The device pixel ratio is capped at the
    /// configured maximum.
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) {
        self.width = width;
        self.height = height;
        self.pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        };
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Camera aspect ratio (width / height). A zero height yields 1.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Size of the drawing buffer in physical pixels.
    #[must_use]
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width as f32 * self.pixel_ratio).round() as u32,
            (self.height as f32 * self.pixel_ratio).round() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped() {
        let viewport = Viewport::new(SurfaceSize::new(800, 600, 3.0), 2.0);
        assert!((viewport.pixel_ratio() - 2.0).abs() < f32::EPSILON);
        assert_eq!(viewport.physical_size(), (1600, 1200));
    }

    #[test]
    fn resize_updates_aspect() {
        let mut viewport = Viewport::new(SurfaceSize::new(800, 600, 1.0), 2.0);
        viewport.resize(1920, 1080, 1.5);
        assert!((viewport.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(viewport.physical_size(), (2880, 1620));
    }

    #[test]
    fn degenerate_sizes() {
        let mut viewport = Viewport::new(SurfaceSize::new(800, 0, f32::NAN), 2.0);
        assert!((viewport.aspect() - 1.0).abs() < f32::EPSILON);
        assert!((viewport.pixel_ratio() - 1.0).abs() < f32::EPSILON);
        viewport.resize(10, 10, 0.0);
        assert!((viewport.pixel_ratio() - 1.0).abs() < f32::EPSILON);
    }
}
