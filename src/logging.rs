//! Logger setup.
//!
//! Log lines go to stderr, and optionally to a file, through a [`fern`] dispatch
//! installed behind the `log` facade.

use std::{str::FromStr, sync::Once};

use log::LevelFilter;
use spincube_core::config::LogConfig;

static INIT: Once = Once::new();

/// Picks the level filter. A valid `RUST_LOG` level name wins over the
/// configured one, and anything unparsable falls back to `Info`.
pub fn level_filter(env: Option<&str>, configured: &str) -> LevelFilter {
    env.and_then(|level| LevelFilter::from_str(level.trim()).ok())
        .or_else(|| LevelFilter::from_str(configured.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Installs the global logger once. Later calls are ignored.
pub fn init_logging(config: &LogConfig) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let level = level_filter(env.as_deref(), &config.level);

        let mut dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stderr());

        if let Some(path) = &config.file {
            match fern::log_file(path) {
                Ok(file) => dispatch = dispatch.chain(file),
                Err(e) => eprintln!("could not open log file {}: {e}", path.display()),
            }
        }

        if let Err(e) = dispatch.apply() {
            eprintln!("could not install logger: {e}");
            return;
        }

        log::debug!("logging initialized at level {level}");
    });
}
