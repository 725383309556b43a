//! Protomatter example
//!
//! Opens an 800x600 window titled "protomatter engine example", creates a
//! Vulkan instance, picks the first GPU and waits for the window to close.
//! An optional `.toml` or `.ron` file given as first argument overrides the
//! title and size.

use protomatter::config::Config;
use protomatter::foundation::logging;
use protomatter::prelude::*;

fn load_config() -> Result<AppConfig, InitError> {
    match std::env::args_os().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {}", path.to_string_lossy());
            Ok(AppConfig::load_from_file(path)?)
        }
        None => Ok(AppConfig::default()),
    }
}

fn start() -> Result<VulkanApplication, InitError> {
    let config = load_config()?;
    ApplicationBuilder::new(config)
        .logger(DefaultLogger)
        .build_vulkan()
}

fn main() {
    logging::init();

    let mut app = match start() {
        Ok(app) => app,
        Err(e) => {
            log::error!("Startup failed: {e}");
            std::process::exit(1);
        }
    };

    app.run();
    app.close();
}
