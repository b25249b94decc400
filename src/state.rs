use crate::camera::{PerspectiveCamera, DEFAULT_FAR, DEFAULT_FOV_DEGREES, DEFAULT_NEAR};
use crate::core::frame_driver::{CancellationToken, FrameDriver, FrameStatus};
use crate::core::orbit::OrbitControls;
use crate::core::resize::{handle_resize, Viewport};
use crate::math::UniformSource;
use crate::scene::RockScene;
use crate::traits::{FrameTarget, RenderTarget};

/// All mutable application state, passed by reference into the frame and
/// resize handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub scene: RockScene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub driver: FrameDriver,
    pub viewport: Viewport,
}

impl AppState {
    /// Generate the rock and set up camera and controls for `viewport`
    pub fn new<R: UniformSource + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let scene = RockScene::new(rng);
        log::info!(
            "Rock generated: {} vertices, {} triangles",
            scene.rock.mesh.vertex_count(),
            scene.rock.mesh.triangle_count()
        );

        let camera = PerspectiveCamera::new(
            DEFAULT_FOV_DEGREES,
            viewport.aspect(),
            DEFAULT_NEAR,
            DEFAULT_FAR,
        );
        let controls = OrbitControls::new(camera.target).with_damping(true);

        Self {
            scene,
            camera,
            controls,
            driver: FrameDriver::new(CancellationToken::new()),
            viewport,
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.driver.token().clone()
    }

    pub fn tick(&mut self, target: &mut dyn FrameTarget) -> FrameStatus {
        self.driver
            .tick(&mut self.scene, &mut self.controls, &mut self.camera, target)
    }

    pub fn resize(&mut self, next: Viewport, target: &mut dyn RenderTarget) -> bool {
        handle_resize(&mut self.viewport, next, &mut self.camera, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::RngSource;

    #[test]
    fn new_state_matches_viewport() {
        let state = AppState::new(Viewport::new(1024, 512, 1.0), &mut RngSource::seeded(5));
        assert_eq!(state.camera.aspect, 2.0);
        assert!(state.controls.enable_damping);
        assert_eq!(state.driver.ticks(), 0);
        assert_eq!(state.scene.rock.mesh.vertex_count(), 176);
    }

    #[test]
    fn token_stops_the_driver() {
        let state = AppState::new(Viewport::new(800, 600, 1.0), &mut RngSource::seeded(5));
        state.token().cancel();
        assert!(state.driver.token().is_cancelled());
    }
}
