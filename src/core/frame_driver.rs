use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::camera::PerspectiveCamera;
use crate::core::orbit::OrbitControls;
use crate::scene::RockScene;
use crate::traits::FrameTarget;

/// Phase advance per frame, in radians
pub const PHASE_STEP: f64 = 0.02;
/// Peak vertical offset of the floating rock
pub const FLOAT_AMPLITUDE: f64 = 0.3;

/// Shared stop flag for the frame loop
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Frame drawn (or attempted) and the next one scheduled
    Running,
    /// Token cancelled; nothing was done
    Stopped,
}

/// Per-frame update: float the rock, step the controls, draw, reschedule
///
/// The phase is derived from the tick count so it never drifts from
/// `PHASE_STEP * ticks`. Delta time is not used: one tick is one step,
/// whatever the refresh rate.
#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    ticks: u64,
    token: CancellationToken,
}

impl FrameDriver {
    pub fn new(token: CancellationToken) -> Self {
        Self { ticks: 0, token }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn phase(&self) -> f64 {
        PHASE_STEP * self.ticks as f64
    }

    /// Vertical offset for the current phase
    pub fn float_offset(&self) -> f32 {
        (FLOAT_AMPLITUDE * self.phase().sin()) as f32
    }

    pub fn tick(
        &mut self,
        scene: &mut RockScene,
        controls: &mut OrbitControls,
        camera: &mut PerspectiveCamera,
        target: &mut dyn FrameTarget,
    ) -> FrameStatus {
        if self.token.is_cancelled() {
            return FrameStatus::Stopped;
        }

        self.ticks += 1;
        scene.rock.position.y = self.float_offset();

        controls.update(camera);

        if let Err(e) = target.draw(scene, camera) {
            log::error!("Render error: {}", e);
        }

        target.request_redraw();
        FrameStatus::Running
    }
}
