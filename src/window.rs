//! SDL2 window, GL context and the polling frame loop shared by every demo.
use std::{
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
    video::{self, GLContext, GLProfile, SwapInterval},
};

use crate::{config::DemoConfig, gl_wrappers::gl_upd_viewport, logging};

/// A demo program: GPU state built once, drawn every frame.
///
/// All GL objects live in the implementing struct, so they are released
/// when the demo is dropped, before the context goes away.
pub trait Demo: Sized {
    /// Build the demo's GPU state. A context is current when this runs.
    fn init(config: &DemoConfig) -> Result<Self>;
    /// Render one frame. The framebuffer has not been cleared.
    fn draw(&mut self);
}

/// An open window with a current core-profile GL context.
pub struct GlWindow {
    // Field order is drop order: context before window before SDL.
    _gl_ctx: GLContext,
    window: video::Window,
    event_pump: sdl2::EventPump,
    _video: sdl2::VideoSubsystem,
    _sdl: sdl2::Sdl,
}

impl GlWindow {
    /// Open a window, create its context, make it current and load GL.
    pub fn open(config: &DemoConfig) -> Result<Self> {
        let sdl = sdl2::init().map_err(anyhow::Error::msg).context("SDL init failed")?;
        let video = sdl.video().map_err(anyhow::Error::msg)?;
        video
            .gl_load_library_default()
            .map_err(anyhow::Error::msg)
            .context("cannot load the OpenGL library")?;

        let (major, minor) = config.gl_version;
        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_major_version(major);
        gl_attr.set_context_minor_version(minor);
        let mut flags = gl_attr.set_context_flags();
        if cfg!(target_os = "macos") {
            flags.forward_compatible();
        }
        if cfg!(debug_assertions) {
            flags.debug();
        }
        flags.set();

        let window = video
            .window(&config.title, config.width, config.height)
            .position_centered()
            .resizable()
            .opengl()
            .build()
            .context("error creating window")?;

        let gl_ctx = window
            .gl_create_context()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("cannot create an OpenGL {major}.{minor} core context"))?;
        gl::load_with(|s| video.gl_get_proc_address(s).cast());

        let interval = if config.vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        if let Err(e) = video.gl_set_swap_interval(interval) {
            log::warn!("cannot set swap interval: {e}");
        }

        log::info!(
            "window '{}' {}x{}, GL {}.{} core, GLSL {}",
            config.title,
            config.width,
            config.height,
            major,
            minor,
            config.glsl_version
        );

        let event_pump = sdl.event_pump().map_err(anyhow::Error::msg)?;
        Ok(Self {
            _gl_ctx: gl_ctx,
            window,
            event_pump,
            _video: video,
            _sdl: sdl,
        })
    }

    /// Size of the drawable area in pixels.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }

    pub fn swap(&self) {
        self.window.gl_swap_window();
    }
}

/// Tracks frame times and logs an average about once per second.
struct FrameStats {
    frametimes: Vec<f64>,
    last_report: Instant,
}

impl FrameStats {
    fn new(capacity: usize) -> Self {
        Self {
            frametimes: Vec::with_capacity(capacity),
            last_report: Instant::now(),
        }
    }

    fn record(&mut self, frametime: Duration) {
        self.frametimes.push(frametime.as_secs_f64());
        if self.last_report.elapsed().as_secs() >= 1 && !self.frametimes.is_empty() {
            let total: f64 = self.frametimes.iter().sum();
            let avg_time = total / self.frametimes.len() as f64;
            log::debug!(
                "frametime: {avg_time:0.8}, FPS: {:0.2}, frames counted: {:05}",
                1. / avg_time,
                self.frametimes.len()
            );
            self.frametimes.clear();
            self.last_report = Instant::now();
        }
    }
}

/// Open a window for `config`, build `D` and run it until the window is
/// closed or Escape is pressed.
///
/// # Errors
/// Errors if the window, context or demo state cannot be created.
pub fn run<D: Demo>(config: DemoConfig) -> Result<()> {
    let mut window = GlWindow::open(&config)?;
    logging::install_gl_debug_output();

    let (mut frame_width, mut frame_height) = window.drawable_size();
    gl_upd_viewport(frame_width, frame_height);

    // Declared after `window` so it drops first, while the context is alive.
    let mut demo = D::init(&config).context("demo initialization failed")?;

    let frame_budget = Duration::from_micros(1_000_000 / config.soft_fps_cap.max(1));
    let mut stats = FrameStats::new(config.soft_fps_cap as usize);

    'going: loop {
        let loop_start = Instant::now();
        for event in window.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::ESCAPE),
                    ..
                } => break 'going,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => {
                    (frame_width, frame_height) = window.window.drawable_size();
                    gl_upd_viewport(frame_width, frame_height);
                    log::debug!("resized to {frame_width}x{frame_height}");
                }
                _ => {}
            }
        }

        demo.draw();
        window.swap();

        if !config.vsync {
            // Soft cap fps
            thread::sleep(frame_budget.saturating_sub(loop_start.elapsed()));
        }
        stats.record(loop_start.elapsed());
    }

    log::info!("closing '{}'", config.title);
    Ok(())
}
