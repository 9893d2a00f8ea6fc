use anyhow::Result;
use clap::Parser;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use matrix_scene::cli::Cli;
use matrix_scene::config::SceneConfig;
use matrix_scene::context::AppContext;
use matrix_scene::core::{notify_waker, GpuContext, PointerInput};
use matrix_scene::loaders::GltfLoader;
use matrix_scene::promise_demo;
use matrix_scene::render_loop::RenderLoop;
use matrix_scene::renderer::SceneRenderer;
use matrix_scene::scenes::BootstrapTask;

const INITIAL_WINDOW_WIDTH: u32 = 1280;
const INITIAL_WINDOW_HEIGHT: u32 = 720;

/// Wake-ups delivered back to the event loop
#[derive(Debug, Clone, Copy)]
enum AppEvent {
    /// A model load finished; poll the bootstrap again
    LoadProgress,
}

/// Window, GPU and scene state created once the event loop resumes
struct Session {
    window: Arc<Window>,
    ctx: AppContext,
    renderer: SceneRenderer,
}

struct App {
    cli: Cli,
    config: SceneConfig,
    session: Option<Session>,
    render_loop: RenderLoop,
    pointer: PointerInput,
    loader: GltfLoader,
    bootstrap: Option<BootstrapTask>,
    waker: Waker,
}

impl App {
    fn new(cli: Cli, config: SceneConfig, proxy: EventLoopProxy<AppEvent>) -> Self {
        let loader = GltfLoader::new(&cli.models);
        let proxy = Mutex::new(proxy);
        let waker = notify_waker(move || {
            if let Ok(proxy) = proxy.lock() {
                // Fails only once the event loop is gone
                let _ = proxy.send_event(AppEvent::LoadProgress);
            }
        });

        Self {
            cli,
            config,
            session: None,
            render_loop: RenderLoop::new(),
            pointer: PointerInput::default(),
            loader,
            bootstrap: None,
            waker,
        }
    }

    /// Poll the bootstrap; starts the render loop once the scene is assembled
    fn drive_bootstrap(&mut self) {
        let (Some(session), Some(task)) = (self.session.as_mut(), self.bootstrap.as_mut()) else {
            return;
        };

        let mut cx = Context::from_waker(&self.waker);
        let Poll::Ready(result) = task.poll(&mut session.ctx, &self.loader, &mut cx) else {
            return;
        };
        self.bootstrap = None;

        match result {
            Ok(_) => self.render_loop.start(session.window.as_ref()),
            Err(e) => log::error!("Scene bootstrap failed: {:#}", anyhow::Error::new(e)),
        }
    }

    fn create_session(&self, event_loop: &ActiveEventLoop) -> Result<Session> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title("Matrix Scene")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            )?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;
        let gpu = pollster::block_on(GpuContext::new_with_surface(&instance, &surface))?;

        let scale = window.scale_factor();
        let logical = window.inner_size().to_logical::<f64>(scale);
        let ctx = AppContext::new(
            &self.config,
            logical.width.round() as u32,
            logical.height.round() as u32,
            scale as f32,
        );

        let renderer = SceneRenderer::new(window.clone(), surface, gpu, &ctx, !self.cli.no_ui)?;

        Ok(Session {
            window,
            ctx,
            renderer,
        })
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let scale = session.window.scale_factor();
        let logical = size.to_logical::<f64>(scale);
        session.ctx.resize(
            logical.width.round() as u32,
            logical.height.round() as u32,
            scale as f32,
        );
        session.renderer.resize_surface(size.width, size.height);
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        let session = match self.create_session(event_loop) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Failed to initialize: {:#}", e);
                event_loop.exit();
                return;
            }
        };
        self.pointer = PointerInput::new(session.window.scale_factor());
        self.session = Some(session);

        // Loads run on worker threads; each completion comes back as LoadProgress
        self.bootstrap = Some(BootstrapTask::new(self.config.assets.clone()));
        self.drive_bootstrap();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::LoadProgress => self.drive_bootstrap(),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // egui sees the event first; a drag still ends when it is released over the panel
        if let Some(session) = self.session.as_mut() {
            if session.renderer.handle_event(&event) {
                self.pointer.process_captured(&event);
                return;
            }
            for action in self.pointer.process_event(&event) {
                session.ctx.apply_pointer(action);
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
            } => event_loop.exit(),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.pointer.set_scale_factor(scale_factor);
            }
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::RedrawRequested => {
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                let result = self.render_loop.tick(
                    &mut session.ctx,
                    &mut session.renderer,
                    session.window.as_ref(),
                );
                if let Err(e) = result {
                    log::error!("Render error, stopping loop: {:#}", e);
                    self.render_loop.stop();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = SceneConfig::load_or_default(cli.config.as_deref());

    if config.demo.enabled && !cli.no_demo {
        if let Err(e) = promise_demo::spawn(&config.demo) {
            log::warn!("Could not start the chaining demo: {}", e);
        }
    }

    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;
    let mut app = App::new(cli, config, event_loop.create_proxy());

    log::info!("Matrix Scene - drag to orbit, scroll to zoom, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
