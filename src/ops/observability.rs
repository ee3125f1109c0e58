//! Metrics and health checks.
//!
//! Metric namespaces:
//! - marquee.resolve.*
//! - marquee.propagation.*
//! - marquee.registry.*

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Health check result for /healthz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Overall healthy state.
    pub healthy: bool,
    /// Status message.
    pub message: String,
}

impl HealthStatus {
    /// Create a healthy status.
    pub fn healthy() -> Self {
        Self {
            healthy: true,
            message: "OK".to_string(),
        }
    }

    /// Create an unhealthy status.
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            healthy: false,
            message: message.into(),
        }
    }
}

/// Readiness status for the /readyz endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessStatus {
    /// Overall ready state.
    pub ready: bool,
    /// Individual component status.
    pub components: ComponentStatus,
    /// Live entity counts.
    pub fleet: FleetCounts,
}

/// Component health status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentStatus {
    /// Storage collaborator reachable.
    pub storage: bool,
    /// Registry bootstrapped and serving.
    pub registry: bool,
    /// Resolution engine serving.
    pub resolver: bool,
}

/// Live entity counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetCounts {
    pub screens: usize,
    pub groups: usize,
    pub configurations: usize,
}

/// Metric names.
pub mod metrics {
    /// Resolution requests counter.
    pub const RESOLVE_REQUESTS_TOTAL: &str = "marquee.resolve.requests_total";
    /// Resolutions answered with the inactive/minimal result.
    pub const RESOLVE_INACTIVE_TOTAL: &str = "marquee.resolve.inactive_total";
    /// Version counters advanced by configuration fan-out.
    pub const PROPAGATION_BUMPS_TOTAL: &str = "marquee.propagation.bumps_total";
    /// Registry mutations rejected with a name conflict.
    pub const REGISTRY_CONFLICTS_TOTAL: &str = "marquee.registry.conflicts_total";
    /// Live screens gauge.
    pub const FLEET_SCREENS: &str = "marquee.fleet.screens";
    /// Live groups gauge.
    pub const FLEET_GROUPS: &str = "marquee.fleet.groups";
    /// Live configurations gauge.
    pub const FLEET_CONFIGURATIONS: &str = "marquee.fleet.configurations";
}

/// Process-local fleet counters.
#[derive(Debug, Default)]
pub struct FleetMetrics {
    resolve_requests: AtomicU64,
    resolve_inactive: AtomicU64,
    propagation_bumps: AtomicU64,
    registry_conflicts: AtomicU64,
}

impl FleetMetrics {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one resolution request.
    pub fn record_resolve(&self) {
        self.resolve_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a resolution answered with the inactive/minimal result.
    pub fn record_resolve_inactive(&self) {
        self.resolve_inactive.fetch_add(1, Ordering::Relaxed);
    }

    /// Record version counters advanced by a configuration fan-out.
    pub fn record_propagation_bumps(&self, count: u64) {
        self.propagation_bumps.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a rejected duplicate-name mutation.
    pub fn record_registry_conflict(&self) {
        self.registry_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    /// Current counter values.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            resolve_requests_total: self.resolve_requests.load(Ordering::Relaxed),
            resolve_inactive_total: self.resolve_inactive.load(Ordering::Relaxed),
            propagation_bumps_total: self.propagation_bumps.load(Ordering::Relaxed),
            registry_conflicts_total: self.registry_conflicts.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time counter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub resolve_requests_total: u64,
    pub resolve_inactive_total: u64,
    pub propagation_bumps_total: u64,
    pub registry_conflicts_total: u64,
}
