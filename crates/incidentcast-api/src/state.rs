//! Application state.
//!
//! The pending-batch store and the event sink are injected through AppState
//! rather than held as globals, so handlers stay testable and concurrent
//! sessions cannot trample each other.

use std::sync::Arc;

use incidentcast_core::Config;

use crate::pending::PendingBatchStore;
use crate::services::amplitude::AmplitudeClient;
use crate::services::EventSink;

/// Main application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pending: PendingBatchStore,
    pub sink: Arc<dyn EventSink>,
}

impl AppState {
    /// Build production state: an empty pending store and a real Amplitude
    /// client configured from `config`.
    pub fn from_config(config: Config) -> Result<Arc<Self>, anyhow::Error> {
        let sink = Arc::new(AmplitudeClient::new(
            config.amplitude_endpoint(),
            config.amplitude_api_key(),
            config.amplitude_timeout_seconds(),
        )?);
        Ok(Arc::new(AppState {
            config,
            pending: PendingBatchStore::new(),
            sink,
        }))
    }

    /// Build state with a caller-supplied sink. Used by tests to record
    /// submissions instead of calling Amplitude.
    pub fn with_sink(config: Config, sink: Arc<dyn EventSink>) -> Arc<Self> {
        Arc::new(AppState {
            config,
            pending: PendingBatchStore::new(),
            sink,
        })
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
