//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use glow::HasContext;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Every GPU object holds a clone of [`App::gl`], so they must all be dropped
/// before the [`App`] itself.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates a resizable window with an OpenGL 3.3 core context made current.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl = sdl2::init()?;
        let video_subsystem = sdl.video()?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_depth_size(24);
        gl_attr.set_double_buffer(true);

        let window = video_subsystem
            .window(title, width, height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;
        let gl_context = window.gl_create_context()?;
        window.gl_make_current(&gl_context)?;
        if let Err(e) = video_subsystem.gl_set_swap_interval(sdl2::video::SwapInterval::VSync) {
            log::warn!("could not enable vsync: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump()?;
        let gl = Arc::new(gl);

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
        })
    }

    /// Logs the vendor and version strings of the current GL implementation.
    pub fn log_gl_info(&self) {
        unsafe {
            log::info!("Vendor: {}", self.gl.get_parameter_string(glow::VENDOR));
            log::info!("Renderer: {}", self.gl.get_parameter_string(glow::RENDERER));
            log::info!(
                "OpenGL version supported {}",
                self.gl.get_parameter_string(glow::VERSION)
            );
            log::info!(
                "GLSL version supported {}",
                self.gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION)
            );
        }
    }
}
