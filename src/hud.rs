use winit::window::Window;

/// Numbers shown in the overlay
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HudStats {
    pub fps: f32,
    pub phase: f64,
    pub rock_height: f32,
    pub buffer_size: (u32, u32),
    pub pixel_ratio: f64,
    pub vertex_count: usize,
    /// World-space bounding box size of the rock
    pub rock_extent: [f32; 3],
    pub bounding_radius: f32,
}

impl HudStats {
    pub fn frame_time_ms(&self) -> f32 {
        if self.fps > 0.0 {
            1000.0 / self.fps
        } else {
            0.0
        }
    }
}

/// Maps egui points onto a drawing buffer of `size_in_pixels`, which is sized
/// with the capped pixel ratio. One point stays one logical pixel on screen.
pub fn screen_descriptor(size_in_pixels: [u32; 2], pixel_ratio: f64) -> egui_wgpu::ScreenDescriptor {
    egui_wgpu::ScreenDescriptor {
        size_in_pixels,
        pixels_per_point: pixel_ratio as f32,
    }
}

/// egui overlay drawn on top of the scene
pub struct Hud {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl Hud {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, window: &Window) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, format, egui_wgpu::RendererOptions::default());

        Self { ctx, state, renderer }
    }

    /// Returns true if egui consumed the event
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        window: &Window,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
        stats: &HudStats,
    ) {
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, |ctx| {
            egui::Window::new("Rock")
                .title_bar(true)
                .resizable(false)
                .fixed_pos(egui::pos2(10.0, 10.0))
                .default_width(220.0)
                .show(ctx, |ui| {
                    ui.heading(
                        egui::RichText::new(format!("{:.0} FPS", stats.fps))
                            .size(28.0)
                            .color(egui::Color32::from_rgb(74, 158, 255)),
                    );
                    ui.label(
                        egui::RichText::new(format!("{:.2} ms", stats.frame_time_ms()))
                            .size(14.0)
                            .color(egui::Color32::GRAY),
                    );

                    ui.add_space(5.0);
                    ui.separator();

                    ui.monospace(format!("Phase: {:.2}", stats.phase));
                    ui.monospace(format!("Height: {:+.3}", stats.rock_height));
                    ui.monospace(format!("Vertices: {}", stats.vertex_count));
                    let [ex, ey, ez] = stats.rock_extent;
                    ui.monospace(format!("Extent: {:.2} x {:.2} x {:.2}", ex, ey, ez));
                    ui.monospace(format!("Radius: {:.2}", stats.bounding_radius));

                    ui.add_space(5.0);
                    ui.separator();

                    ui.monospace(format!(
                        "Buffer: {}x{} @ {:.1}x",
                        stats.buffer_size.0, stats.buffer_size.1, stats.pixel_ratio
                    ));
                    ui.label(
                        egui::RichText::new("Drag to orbit, right-drag to pan, scroll to zoom")
                            .size(11.0)
                            .color(egui::Color32::GRAY),
                    );
                });
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .ctx
            .tessellate(full_output.shapes, screen_descriptor.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        self.renderer
            .update_buffers(device, queue, encoder, &tris, screen_descriptor);

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("HUD Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.renderer
                .render(&mut render_pass, &tris, screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_time_from_fps() {
        let stats = HudStats {
            fps: 50.0,
            ..Default::default()
        };
        assert!((stats.frame_time_ms() - 20.0).abs() < 1e-4);
        assert_eq!(HudStats::default().frame_time_ms(), 0.0);
    }

    #[test]
    fn descriptor_uses_capped_ratio_for_points() {
        // 800x600 logical window on a 3x display, buffer built at the 2x cap
        let descriptor = screen_descriptor([1600, 1200], 2.0);
        assert_eq!(descriptor.pixels_per_point, 2.0);

        let points = [
            descriptor.size_in_pixels[0] as f32 / descriptor.pixels_per_point,
            descriptor.size_in_pixels[1] as f32 / descriptor.pixels_per_point,
        ];
        assert_eq!(points, [800.0, 600.0]);
    }
}
