use crate::camera::PerspectiveCamera;
use crate::scene::RockScene;

/// Where the frame driver sends finished frames
pub trait FrameTarget {
    /// Draw the scene as seen from the camera
    fn draw(
        &mut self,
        scene: &RockScene,
        camera: &PerspectiveCamera,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Ask the host to schedule the next frame
    fn request_redraw(&self);
}
