use salesdash_core::{AppConfig, DashboardViews, Dataset, ViewDispatcher};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds all shared state for the CLI application.
/// The dataset lives inside the dispatcher behind an `Arc`; the dispatcher's
/// filter state belongs to this single interactive session.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    pub dispatcher: Arc<RwLock<ViewDispatcher>>,
    /// Views from the most recent emission, as last handed to the renderer
    pub views: Arc<RwLock<DashboardViews>>,
}

impl CliContext {
    pub fn new(config: AppConfig, dataset: Arc<Dataset>) -> Self {
        let dispatcher = ViewDispatcher::with_mode(dataset, config.default_mode);
        let views = dispatcher.render();
        Self {
            config: Arc::new(RwLock::new(config)),
            dispatcher: Arc::new(RwLock::new(dispatcher)),
            views: Arc::new(RwLock::new(views)),
        }
    }
}
