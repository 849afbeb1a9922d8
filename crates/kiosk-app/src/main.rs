mod app;
mod cli;

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

fn main() {
    let args = cli::parse();

    // Initialize logging
    let log_directive = args.log_level.as_deref().unwrap_or("info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Kiosk v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load config
    let mut config = match &args.config {
        Some(path) => kiosk_config::load_config_from(std::path::Path::new(path)),
        None => kiosk_config::load_config(),
    }
    .unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        kiosk_config::KioskConfig::default()
    });

    if let Some(url) = args.url {
        config.page.url = url;
    }
    tracing::info!("Hosting {}", config.page.url);

    // Create event loop and run
    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = match app::KioskApp::new(config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Startup failed: {e}");
            return;
        }
    };

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
