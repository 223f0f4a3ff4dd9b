use std::sync::Arc;

use tokio::sync::RwLock;

use fleetlog_core::jobs::JobTracker;
use fleetlog_core::ledger::IssueLedger;
use fleetlog_core::registry::InstanceRegistry;
use fleetlog_core::settings::PipelineSettings;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Each aggregate sits behind its own lock so mutation of one collection
/// never blocks readers of another; a write lock on an aggregate makes each
/// single-key mutation (toggle, resolve, progress update) atomic.
///
/// Cheaply cloneable (all inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Known instances and their per-log-type collection state.
    pub registry: Arc<RwLock<InstanceRegistry>>,
    /// Detected operational issues.
    pub ledger: Arc<RwLock<IssueLedger>>,
    /// In-flight processing jobs.
    pub jobs: Arc<RwLock<JobTracker>>,
    /// Opaque settings for the external pipeline services.
    pub settings: Arc<RwLock<PipelineSettings>>,
}

impl AppState {
    /// Fresh state with empty aggregates.
    pub fn new(config: ServerConfig) -> Self {
        AppState {
            config: Arc::new(config),
            registry: Arc::new(RwLock::new(InstanceRegistry::new())),
            ledger: Arc::new(RwLock::new(IssueLedger::new())),
            jobs: Arc::new(RwLock::new(JobTracker::new())),
            settings: Arc::new(RwLock::new(PipelineSettings::new())),
        }
    }
}
