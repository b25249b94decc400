use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use super::orbit::{DragMode, OrbitControls};
use crate::camera::PerspectiveCamera;

/// Bridges winit pointer events to the orbit controls
#[derive(Debug, Clone, Default)]
pub struct PointerAdapter {
    cursor: Option<Vec2>,
}

impl PointerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position in physical pixels
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Feed one window event. `viewport_height` must be in the same units as
    /// cursor positions (physical pixels). Returns true if the event was used.
    pub fn process_event(
        &mut self,
        event: &WindowEvent,
        controls: &mut OrbitControls,
        camera: &PerspectiveCamera,
        viewport_height: f32,
    ) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                self.cursor = Some(position);
                controls.pointer_move(position, camera, viewport_height);
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(mode) = Self::drag_mode(*button) else {
                    return false;
                };
                match state {
                    ElementState::Pressed => {
                        if let Some(cursor) = self.cursor {
                            controls.pointer_down(mode, cursor);
                        }
                    }
                    ElementState::Released => controls.pointer_up(),
                }
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                controls.wheel(amount);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.leave(controls);
                true
            }
            _ => false,
        }
    }

    /// Cursor left the window: forget it and end any drag, since the
    /// matching button release may never arrive
    pub fn leave(&mut self, controls: &mut OrbitControls) {
        self.cursor = None;
        controls.pointer_up();
    }

    /// Events that end a drag. These must reach the controls even when the
    /// overlay claims them.
    pub fn ends_drag(event: &WindowEvent) -> bool {
        matches!(
            event,
            WindowEvent::MouseInput {
                state: ElementState::Released,
                ..
            } | WindowEvent::CursorLeft { .. }
        )
    }

    fn drag_mode(button: MouseButton) -> Option<DragMode> {
        match button {
            MouseButton::Left => Some(DragMode::Rotate),
            MouseButton::Right => Some(DragMode::Pan),
            _ => None,
        }
    }
}
