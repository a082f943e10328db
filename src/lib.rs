pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod markup;
pub mod notification;
pub mod state;
pub mod ui;
pub mod viewer;
pub use error::{AppError, AppResult};

use crate::config::AppConfig;
use crate::viewer::MarkupViewer;

/// Entrypoint used by front-ends: builds the viewer from the loaded
/// configuration and starts a session around it.
pub fn run<V, F>(make_viewer: F) -> AppResult<app::App<V>>
where
    V: MarkupViewer,
    F: FnOnce(&AppConfig) -> V,
{
    logging::init();
    tracing::info!("starting markup desk");

    let config = config::load_app_config();
    let notifier = notification::notifier_for(config.notifications);
    let viewer = viewer::viewer_handle(make_viewer(&config));

    let mut app = app::App::new(viewer, config, notifier);
    app.start()?;

    tracing::info!("startup complete with {}", app.tools());
    Ok(app)
}
