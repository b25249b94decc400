use std::cell::RefCell;

use floating_rock::core::{drawing_buffer_size, Viewport};
use floating_rock::math::RngSource;
use floating_rock::state::AppState;
use floating_rock::traits::RenderTarget;

/// Render target that logs every commit it receives
struct MockTarget {
    size: (u32, u32),
    ratio: f64,
    size_calls: RefCell<Vec<(u32, u32)>>,
    ratio_calls: RefCell<Vec<f64>>,
}

impl MockTarget {
    fn new(width: u32, height: u32, ratio: f64) -> Self {
        Self {
            size: (width, height),
            ratio,
            size_calls: RefCell::new(Vec::new()),
            ratio_calls: RefCell::new(Vec::new()),
        }
    }
}

impl RenderTarget for MockTarget {
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.size_calls.borrow_mut().push((width, height));
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.ratio = ratio;
        self.ratio_calls.borrow_mut().push(ratio);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn pixel_ratio(&self) -> f64 {
        self.ratio
    }
}

fn new_state() -> AppState {
    AppState::new(Viewport::new(800, 600, 1.0), &mut RngSource::seeded(7))
}

#[cfg(test)]
mod resize_tests {
    use super::*;

    #[test]
    fn test_resize_updates_camera_and_target() {
        let mut state = new_state();
        let mut target = MockTarget::new(800, 600, 1.0);

        assert!(state.resize(Viewport::new(1024, 768, 1.0), &mut target));

        assert_eq!(state.camera.aspect, 1024.0 / 768.0);
        assert_eq!(target.size(), (1024, 768));
        assert_eq!(target.pixel_ratio(), 1.0);
        assert!(target.ratio_calls.borrow().is_empty());
        assert_eq!(state.viewport, Viewport::new(1024, 768, 1.0));
    }

    #[test]
    fn test_repeat_resize_is_noop() {
        let mut state = new_state();
        let mut target = MockTarget::new(800, 600, 1.0);

        assert!(state.resize(Viewport::new(1024, 768, 1.0), &mut target));
        let projection = state.camera.projection_matrix();

        assert!(!state.resize(Viewport::new(1024, 768, 1.0), &mut target));
        assert_eq!(target.size_calls.borrow().len(), 1);
        assert_eq!(state.camera.projection_matrix(), projection);
    }

    #[test]
    fn test_high_density_display_is_capped() {
        let mut state = new_state();
        let mut target = MockTarget::new(800, 600, 1.0);

        state.resize(Viewport::new(800, 600, 3.0), &mut target);

        assert_eq!(target.pixel_ratio(), 2.0);
        assert_eq!(*target.ratio_calls.borrow(), vec![2.0]);
        assert!(target.size_calls.borrow().is_empty());
        assert_eq!(state.viewport.drawing_buffer_size(), (1600, 1200));
    }

    #[test]
    fn test_minimized_window_leaves_target_alone() {
        let mut state = new_state();
        let mut target = MockTarget::new(800, 600, 1.0);
        let aspect = state.camera.aspect;

        state.resize(Viewport::new(0, 0, 1.0), &mut target);

        assert_eq!(state.viewport.width, 0);
        assert_eq!(state.camera.aspect, aspect);
        assert_eq!(target.size(), (800, 600));
        assert!(target.size_calls.borrow().is_empty());
    }

    #[test]
    fn test_scale_change_reads_current_window_size() {
        let mut state = new_state();
        let mut target = MockTarget::new(800, 600, 1.0);

        // Moved to a 2x display while the physical size stays 1600x1200
        let physical = winit::dpi::PhysicalSize::new(1600, 1200);
        assert!(state.resize(Viewport::from_physical(physical, 1.0), &mut target));
        assert!(state.resize(Viewport::from_physical(physical, 2.0), &mut target));

        assert_eq!(target.size(), (800, 600));
        assert_eq!(target.pixel_ratio(), 2.0);
        assert_eq!(*target.size_calls.borrow(), vec![(1600, 1200), (800, 600)]);
        assert_eq!(state.viewport.drawing_buffer_size(), (1600, 1200));

        // A later Resized carrying the same size and scale commits nothing
        assert!(!state.resize(Viewport::from_physical(physical, 2.0), &mut target));
        assert_eq!(target.size_calls.borrow().len(), 2);
    }

    #[test]
    fn test_drawing_buffer_floors_fractional_ratio() {
        assert_eq!(drawing_buffer_size(801, 601, 1.5), (1201, 901));
        assert_eq!(drawing_buffer_size(333, 333, 1.25), (416, 416));
    }
}
