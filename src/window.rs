use std::sync::Arc;
use winit::window::Window as WinitWindow;

use crate::camera::PerspectiveCamera;
use crate::hud::HudStats;
use crate::renderer::RockRenderer;
use crate::scene::RockScene;
use crate::traits::FrameTarget;

/// Window plus renderer for one frame, with the overlay numbers to show
pub struct WindowFrame<'a> {
    window: &'a Arc<WinitWindow>,
    renderer: &'a mut RockRenderer,
    stats: HudStats,
}

impl<'a> WindowFrame<'a> {
    pub fn new(window: &'a Arc<WinitWindow>, renderer: &'a mut RockRenderer, stats: HudStats) -> Self {
        Self {
            window,
            renderer,
            stats,
        }
    }
}

impl FrameTarget for WindowFrame<'_> {
    fn draw(
        &mut self,
        scene: &RockScene,
        camera: &PerspectiveCamera,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let stats = HudStats {
            rock_height: scene.rock.position.y,
            vertex_count: scene.rock.mesh.vertex_count(),
            rock_extent: scene.rock.world_extent().to_array(),
            bounding_radius: scene.rock.world_bounding_radius(),
            ..self.stats
        };
        self.renderer.render(scene, camera, self.window, &stats)
    }

    fn request_redraw(&self) {
        self.window.request_redraw();
    }
}
