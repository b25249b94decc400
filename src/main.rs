use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use floating_rock::cli::Cli;
use floating_rock::core::{Clock, FpsCounter, FrameStatus, PointerAdapter, Viewport};
use floating_rock::hud::HudStats;
use floating_rock::loaders::load_rock_textures;
use floating_rock::math::RngSource;
use floating_rock::renderer::RockRenderer;
use floating_rock::state::AppState;
use floating_rock::window::WindowFrame;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    renderer: Option<RockRenderer>,
    state: Option<AppState>,
    pointer: PointerAdapter,
    clock: Clock,
    fps: FpsCounter,
    /// Scale factor changed; re-read the viewport on the next redraw
    scale_pending: bool,
}

impl App {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            window: None,
            renderer: None,
            state: None,
            pointer: PointerAdapter::new(),
            clock: Clock::new(),
            fps: FpsCounter::new(),
            scale_pending: false,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title("Floating Rock")
                    .with_inner_size(winit::dpi::LogicalSize::new(self.cli.width, self.cli.height)),
            )?,
        );

        let viewport = Viewport::from_physical(window.inner_size(), window.scale_factor());
        let state = match self.cli.seed {
            Some(seed) => {
                log::info!("Generating rock with seed {}", seed);
                AppState::new(viewport, &mut RngSource::seeded(seed))
            }
            None => AppState::new(viewport, &mut RngSource::thread()),
        };

        let textures = load_rock_textures(&self.cli.texture);
        let renderer = pollster::block_on(RockRenderer::new(
            window.clone(),
            &state.scene,
            &textures,
            !self.cli.no_ui,
        ))?;

        window.request_redraw();

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.state = Some(state);
        Ok(())
    }

    fn stop(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.token().cancel();
        }
        event_loop.exit();
    }

    /// Bring the state in line with the window's current size and scale
    fn sync_viewport(&mut self) {
        if let (Some(window), Some(renderer), Some(state)) =
            (&self.window, &mut self.renderer, &mut self.state)
        {
            let viewport = Viewport::from_physical(window.inner_size(), window.scale_factor());
            state.resize(viewport, renderer);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if std::mem::take(&mut self.scale_pending) {
            self.sync_viewport();
        }

        let (Some(window), Some(renderer), Some(state)) =
            (&self.window, &mut self.renderer, &mut self.state)
        else {
            return;
        };

        let delta = self.clock.tick();
        if let Some(fps) = self.fps.record(delta) {
            log::debug!("FPS: {:.1}", fps);
        }

        let stats = HudStats {
            fps: self.fps.fps(),
            phase: state.driver.phase(),
            ..Default::default()
        };
        let mut frame = WindowFrame::new(window, renderer, stats);

        if state.tick(&mut frame) == FrameStatus::Stopped {
            log::info!("Frame loop stopped after {} frames", state.driver.ticks());
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("Failed to initialize: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first. Drag-ending events still reach
        // the controls so a release over the overlay cannot leave a drag stuck.
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) && !PointerAdapter::ends_drag(&event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.stop(event_loop),
            WindowEvent::Resized(_) => {
                self.scale_pending = false;
                self.sync_viewport();
            }
            // The inner size is still the old one here; a Resized follows when
            // it changes, otherwise the next redraw picks up the new scale
            WindowEvent::ScaleFactorChanged { .. } => {
                self.scale_pending = true;
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                if let (Some(window), Some(state)) = (&self.window, &mut self.state) {
                    let height = window.inner_size().height as f32;
                    self.pointer
                        .process_event(&other, &mut state.controls, &state.camera, height);
                }
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli);

    log::info!("Floating Rock - drag to orbit, right-drag to pan, scroll to zoom, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
