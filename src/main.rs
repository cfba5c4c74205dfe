use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use sdl2::{event::Event, event::WindowEvent, keyboard::Keycode};
use spincube_core::{ConfigError, DemoConfig, Viewport};

use crate::{
    abs::{App, ShaderError, ShaderProgram},
    render::SceneRenderer,
};

mod abs;
mod logging;
mod render;

/// Everything that stops the demo before the first frame.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not open window with SDL2: {0}")]
    Window(String),
    #[error("could not read shader source {}: {source}", .path.display())]
    ShaderSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error("could not create scene resources: {0}")]
    Resources(String),
}

fn read_shader_source(path: &Path) -> Result<String, StartupError> {
    std::fs::read_to_string(path).map_err(|source| StartupError::ShaderSource {
        path: path.to_path_buf(),
        source,
    })
}

fn build_renderer(app: &App, config: &DemoConfig) -> Result<SceneRenderer, StartupError> {
    let vertex_source = read_shader_source(&config.shaders.vertex)?;
    let fragment_source = read_shader_source(&config.shaders.fragment)?;
    let program = ShaderProgram::build(&app.gl, &vertex_source, &fragment_source)?;

    let viewport = Viewport::new(config.window.width, config.window.height);
    let renderer = SceneRenderer::new(&app.gl, program, config, viewport)
        .map_err(StartupError::Resources)?;
    for object in renderer.objects() {
        log::debug!(
            "{} uploaded, {} vertices",
            object.kind().name(),
            object.vertex_count()
        );
    }
    Ok(renderer)
}

fn run(config: &DemoConfig) -> Result<(), StartupError> {
    let mut app = App::new(
        &config.window.title,
        config.window.width,
        config.window.height,
    )
    .map_err(StartupError::Window)?;

    app.log_gl_info();
    log::info!(
        "Starting viewport: (width: {}, height: {})",
        config.window.width,
        config.window.height
    );

    // Declared after `app` so its GL objects are released while the context lives.
    let mut renderer = build_renderer(&app, config)?;
    let start = Instant::now();

    'running: loop {
        for event in app.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::Window {
                    win_event: WindowEvent::Resized(width, height),
                    ..
                } => {
                    renderer.resize(Viewport::from_window_size(width, height));
                    let viewport = renderer.viewport();
                    log::info!(
                        "New viewport: (width: {}, height: {})",
                        viewport.width(),
                        viewport.height()
                    );
                }
                _ => {}
            }
        }

        renderer.render(start.elapsed().as_secs_f64());
        app.window.gl_swap_window();
    }

    Ok(())
}

fn main() -> ExitCode {
    let config = match std::env::args_os().nth(1) {
        Some(path) => DemoConfig::load(PathBuf::from(path)),
        None => Ok(DemoConfig::default()),
    };

    let log_config = config
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    logging::init_logging(&log_config);

    let result = config
        .map_err(StartupError::from)
        .and_then(|config| run(&config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("ERROR: {e}");
            ExitCode::from(1)
        }
    }
}
