use super::App;
use crate::error::{AppError, AppResult};
use crate::viewer::{LoadProgress, MarkupViewer, ViewerEvent, ViewerResult};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotStarted,
    Loading,
    Loaded,
    Failed(String),
}

impl<V: MarkupViewer> App<V> {
    /// Prepares the viewer and kicks off the model load.
    ///
    /// Returns before the model has loaded; tool state is untouched.
    pub fn start(&mut self) -> AppResult<()> {
        if self.started {
            tracing::warn!("start requested twice");
            return Err(AppError::AlreadyStarted);
        }
        self.started = true;

        if self.config.axis_gizmo.enabled {
            self.viewer
                .borrow_mut()
                .enable_axis_gizmo(self.config.axis_gizmo.ignore_z_axis);
        }

        let font_result = self.viewer.borrow_mut().set_font(&self.config.font_files);
        match font_result {
            Ok(()) => tracing::info!(count = self.config.font_files.len(), "fonts set"),
            Err(err) => self.report_failure(&AppError::from(err)),
        }

        self.begin_model_load();
        self.viewer
            .borrow_mut()
            .subscribe(Box::new(log_clicked_markup));
        Ok(())
    }

    fn begin_model_load(&mut self) {
        let model = self.config.model.clone();
        *self.load_state.borrow_mut() = LoadState::Loading;
        tracing::info!(src = %model.src, "loading model");

        let load_state = self.load_state.clone();
        let notifier = self.notifier.clone();
        let src = model.src.clone();
        let on_complete = move |result: ViewerResult<()>| match result {
            Ok(()) => {
                tracing::info!("loaded model {src}");
                *load_state.borrow_mut() = LoadState::Loaded;
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(error = %message, "model load failed");
                notifier.notify(&message);
                *load_state.borrow_mut() = LoadState::Failed(message);
            }
        };

        self.viewer
            .borrow_mut()
            .load_model(&model, Box::new(log_progress), Box::new(on_complete));
    }
}

fn log_progress(progress: &LoadProgress) {
    if let Some(percent) = progress.percent() {
        tracing::info!(kind = %progress.kind, "loading progress: {percent:.1}%");
    }
}

fn log_clicked_markup(event: &ViewerEvent) {
    match event {
        ViewerEvent::MarkupClicked {
            markup: Some(markup),
        } => {
            let id = markup
                .id()
                .map_or_else(|| "<none>".to_string(), |id| id.to_string());
            tracing::info!(%id, ?markup, "clicked on markup");
        }
        ViewerEvent::MarkupClicked { markup: None } => {}
    }
}
