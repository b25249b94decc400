use crate::camera::PerspectiveCamera;
use crate::traits::RenderTarget;

/// Highest pixel ratio the renderer will use, whatever the display density
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Logical viewport size plus the display's device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// From a winit physical size and scale factor
    pub fn from_physical(size: winit::dpi::PhysicalSize<u32>, scale_factor: f64) -> Self {
        let logical: winit::dpi::LogicalSize<f64> = size.to_logical(scale_factor);
        Self::new(
            logical.width.round() as u32,
            logical.height.round() as u32,
            scale_factor,
        )
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio.min(MAX_PIXEL_RATIO)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Size of the drawing buffer in physical pixels
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        drawing_buffer_size(self.width, self.height, self.pixel_ratio())
    }
}

pub fn drawing_buffer_size(width: u32, height: u32, pixel_ratio: f64) -> (u32, u32) {
    (
        (width as f64 * pixel_ratio).floor() as u32,
        (height as f64 * pixel_ratio).floor() as u32,
    )
}

/// Bring camera and render target in line with a new viewport.
///
/// Runs on every notification without debouncing. Returns true if anything
/// changed; a repeat call with the same viewport is a no-op. A zero-area
/// viewport only updates the stored size.
pub fn handle_resize(
    current: &mut Viewport,
    next: Viewport,
    camera: &mut PerspectiveCamera,
    target: &mut dyn RenderTarget,
) -> bool {
    let changed = *current != next;
    *current = next;

    if next.is_empty() {
        log::debug!("Ignoring resize to empty viewport {}x{}", next.width, next.height);
        return changed;
    }

    let aspect = next.aspect();
    let mut touched = changed;

    if camera.aspect != aspect {
        camera.aspect = aspect;
        camera.update_projection_matrix();
        touched = true;
    }

    if target.size() != (next.width, next.height) {
        target.set_size(next.width, next.height);
        touched = true;
    }

    let ratio = next.pixel_ratio();
    if target.pixel_ratio() != ratio {
        target.set_pixel_ratio(ratio);
        touched = true;
    }

    if touched {
        log::debug!(
            "Resized to {}x{} @ {:.2}x (buffer {:?})",
            next.width,
            next.height,
            ratio,
            next.drawing_buffer_size()
        );
    }
    touched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped() {
        assert_eq!(Viewport::new(800, 600, 1.0).pixel_ratio(), 1.0);
        assert_eq!(Viewport::new(800, 600, 1.5).pixel_ratio(), 1.5);
        assert_eq!(Viewport::new(800, 600, 3.0).pixel_ratio(), 2.0);
    }

    #[test]
    fn drawing_buffer_scales_with_capped_ratio() {
        assert_eq!(Viewport::new(800, 600, 1.0).drawing_buffer_size(), (800, 600));
        assert_eq!(Viewport::new(800, 600, 3.0).drawing_buffer_size(), (1600, 1200));
        assert_eq!(drawing_buffer_size(101, 51, 1.5), (151, 76));
    }

    #[test]
    fn from_physical_uses_logical_size() {
        let viewport = Viewport::from_physical(winit::dpi::PhysicalSize::new(1600, 1200), 2.0);
        assert_eq!(viewport, Viewport::new(800, 600, 2.0));
    }

    #[test]
    fn aspect_of_empty_height_is_finite() {
        assert!(Viewport::new(800, 0, 1.0).aspect().is_finite());
    }
}
