//! Shared application state for the HTTP API.

use std::sync::{Arc, RwLock};

use crate::config::AppConfig;
use crate::store::HrStore;
use crate::workflow::{NotificationSink, WorkflowNotifier};

/// Shared application state.
///
/// Holds the document store behind a lock (operations are single-writer),
/// the company configuration, and the workflow notifier.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<HrStore>>,
    config: Arc<AppConfig>,
    notifier: Arc<WorkflowNotifier>,
}

impl AppState {
    /// Creates application state around a store, configuration, and
    /// notification sink. The notifier's document links are rooted at the
    /// configured base URL.
    pub fn new(store: HrStore, config: AppConfig, sink: Arc<dyn NotificationSink>) -> Self {
        let notifier = WorkflowNotifier::new(sink, config.notifications.base_url.clone());
        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
            notifier: Arc::new(notifier),
        }
    }

    /// The document store.
    pub fn store(&self) -> &RwLock<HrStore> {
        &self.store
    }

    /// The company configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The workflow notifier.
    pub fn notifier(&self) -> &WorkflowNotifier {
        &self.notifier
    }
}
