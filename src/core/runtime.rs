//! Main runtime orchestration.
//!
//! The runtime coordinates component lifecycle:
//! - Start order: storage → bootstrap → registry/resolver ready
//! - Shutdown order: stop serving → storage released
//!
//! The HTTP front door is an external collaborator; it embeds this
//! runtime and drives the registry and resolution engine through the
//! accessors below.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;

use crate::core::config::Config;
use crate::fleet::bootstrap::{self, BootstrapReport};
use crate::fleet::registry::EntityRegistry;
use crate::ops::observability::{
    ComponentStatus, FleetCounts, FleetMetrics, HealthStatus, ReadinessStatus,
};
use crate::resolve::engine::ResolutionEngine;
use crate::store::memory::MemoryStore;
use crate::store::{ConfigurationRepository, FleetStore, GroupRepository, ScreenRepository};

/// Component health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentHealth {
    /// Component is starting.
    Starting,
    /// Component is healthy and operational.
    Healthy,
    /// Component is degraded but functional.
    Degraded,
    /// Component has failed.
    Failed,
    /// Component has stopped.
    Stopped,
}

/// Health status aggregated from all components.
#[derive(Debug, Clone)]
pub struct RuntimeHealth {
    /// Storage collaborator health.
    pub storage: ComponentHealth,
    /// Registry health (bootstrapped and serving mutations).
    pub registry: ComponentHealth,
    /// Resolution engine health.
    pub resolver: ComponentHealth,
}

impl Default for RuntimeHealth {
    fn default() -> Self {
        Self {
            storage: ComponentHealth::Starting,
            registry: ComponentHealth::Starting,
            resolver: ComponentHealth::Starting,
        }
    }
}

impl RuntimeHealth {
    /// Check if the runtime is ready to serve requests.
    pub fn is_ready(&self) -> bool {
        matches!(
            (self.storage, self.registry, self.resolver),
            (
                ComponentHealth::Healthy,
                ComponentHealth::Healthy,
                ComponentHealth::Healthy | ComponentHealth::Degraded,
            )
        )
    }

    /// Check if the runtime is alive (not failed).
    pub fn is_alive(&self) -> bool {
        !matches!(
            (self.storage, self.registry, self.resolver),
            (ComponentHealth::Failed, _, _)
                | (_, ComponentHealth::Failed, _)
                | (_, _, ComponentHealth::Failed)
        )
    }
}

/// Marquee runtime holding all component handles.
pub struct Runtime {
    /// Configuration.
    config: Arc<Config>,

    /// Storage collaborator handle.
    store: Arc<dyn FleetStore>,

    /// Entity registry.
    registry: Arc<EntityRegistry>,

    /// Resolution engine.
    engine: Arc<ResolutionEngine>,

    /// Shared fleet metrics.
    metrics: Arc<FleetMetrics>,

    /// Runtime health status.
    health: RuntimeHealth,

    /// Bootstrap outcome, set after start.
    bootstrap: Option<BootstrapReport>,

    /// Whether the runtime is running.
    running: Arc<AtomicBool>,

    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,

    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
}

impl Runtime {
    /// Create a runtime over the in-memory store.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Create a runtime over an explicit store collaborator.
    pub fn with_store(config: Config, store: Arc<dyn FleetStore>) -> Result<Self> {
        config.validate().context("invalid configuration")?;

        let metrics = Arc::new(FleetMetrics::new());
        let registry = Arc::new(EntityRegistry::with_metrics(
            Arc::clone(&store),
            Arc::clone(&metrics),
        ));
        let engine = Arc::new(ResolutionEngine::with_metrics(
            Arc::clone(&store),
            Arc::clone(&metrics),
        ));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            config: Arc::new(config),
            store,
            registry,
            engine,
            metrics,
            health: RuntimeHealth::default(),
            bootstrap: None,
            running: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// The runtime configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The entity registry for front-door mutation endpoints.
    pub fn registry(&self) -> &Arc<EntityRegistry> {
        &self.registry
    }

    /// The resolution engine for the polling endpoint.
    pub fn engine(&self) -> &Arc<ResolutionEngine> {
        &self.engine
    }

    /// The shared metrics registry.
    pub fn metrics(&self) -> &Arc<FleetMetrics> {
        &self.metrics
    }

    /// Current component health.
    pub fn health(&self) -> &RuntimeHealth {
        &self.health
    }

    /// Bootstrap outcome, if the runtime has started.
    pub fn bootstrap_report(&self) -> Option<&BootstrapReport> {
        self.bootstrap.as_ref()
    }

    /// Whether the runtime is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Liveness check for the front door's /healthz.
    pub fn health_check(&self) -> HealthStatus {
        if self.health.is_alive() {
            HealthStatus::healthy()
        } else {
            HealthStatus::unhealthy("component failure")
        }
    }

    /// Readiness snapshot for the front door's /readyz.
    pub fn readiness(&self) -> ReadinessStatus {
        ReadinessStatus {
            ready: self.health.is_ready() && self.is_running(),
            components: ComponentStatus {
                storage: self.health.storage == ComponentHealth::Healthy,
                registry: self.health.registry == ComponentHealth::Healthy,
                resolver: matches!(
                    self.health.resolver,
                    ComponentHealth::Healthy | ComponentHealth::Degraded
                ),
            },
            fleet: FleetCounts {
                screens: self.store.screens().len(),
                groups: self.store.groups().len(),
                configurations: self.store.configurations().len(),
            },
        }
    }

    /// Start components in order: storage, bootstrap, registry/resolver.
    pub fn start(&mut self) -> Result<()> {
        self.health.storage = ComponentHealth::Healthy;

        let report = bootstrap::run(&self.store, &self.config).context("bootstrap failed")?;
        tracing::info!(
            default_config_id = report.default_config_id,
            created = report.created_stock_configuration,
            seeded_groups = report.seeded_groups,
            seeded_screens = report.seeded_screens,
            "bootstrap complete"
        );
        self.bootstrap = Some(report);

        self.health.registry = ComponentHealth::Healthy;
        self.health.resolver = ComponentHealth::Healthy;
        self.running.store(true, Ordering::SeqCst);
        tracing::info!(bind = %self.config.service.bind, "runtime ready");
        Ok(())
    }

    /// Start and serve until a shutdown signal arrives.
    pub async fn run(&mut self) -> Result<()> {
        self.start()?;

        let mut shutdown_rx = self.shutdown_rx.clone();
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupt received, shutting down");
            }
            _ = shutdown_rx.changed() => {
                tracing::info!("shutdown requested");
            }
        }

        self.stop();
        Ok(())
    }

    /// Request shutdown from another task.
    pub fn trigger_shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Mark all components stopped.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.health.registry = ComponentHealth::Stopped;
        self.health.resolver = ComponentHealth::Stopped;
        self.health.storage = ComponentHealth::Stopped;
        tracing::info!("runtime stopped");
    }
}
