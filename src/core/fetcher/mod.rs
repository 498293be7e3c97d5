//! Monitor data fetcher
//!
//! The component between the route handlers and the upstream API. It owns
//! the cache cells and decides, per request, whether to serve cached data,
//! serve stale data while revalidating in the background, fail fast during a
//! rate-limit cooldown, or call upstream under single-flight coalescing.
//!
//! The cache is process-local. Concurrently running instances each keep
//! their own cells and their own in-flight slots, so deduplication holds
//! within one instance only; that is the accepted design boundary.

pub mod cache;
pub mod flight;


use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::Config;
use crate::core::models::{Monitor, MonitorList, ServerStats};
use crate::core::normalize::{normalize_monitors, normalize_server_stats};
use crate::core::providers::hetrix::HetrixClient;
use crate::utils::error::{GatewayError, Result};

use self::cache::{CacheEntry, CachePolicy, CacheRead, ErrorKind};
use self::flight::Flight;

/// Cache entry plus its single-flight slot for one cache key
struct CacheCell<T> {
    entry: RwLock<CacheEntry<T>>,
    flight: Flight<T>,
}

impl<T> Default for CacheCell<T> {
    fn default() -> Self {
        Self {
            entry: RwLock::new(CacheEntry::default()),
            flight: Flight::default(),
        }
    }
}

/// The monitor data fetcher
///
/// Owned by the server's application state and shared across handlers;
/// lives for the process lifetime, so the cache does not survive restarts.
pub struct MonitorService {
    client: HetrixClient,
    policy: CachePolicy,
    monitors: Arc<CacheCell<MonitorList>>,
    server_stats: DashMap<String, Arc<CacheCell<ServerStats>>>,
}

impl MonitorService {
    /// Create a service with an explicit client and policy
    pub fn new(client: HetrixClient, policy: CachePolicy) -> Self {
        Self {
            client,
            policy,
            monitors: Arc::new(CacheCell::default()),
            server_stats: DashMap::new(),
        }
    }

    /// Create a service from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = HetrixClient::new(config.hetrix.clone())?;
        Ok(Self::new(client, CachePolicy::from(&config.cache)))
    }

    /// Get the monitor list, served from cache whenever possible
    ///
    /// Fails only when no usable cached data exists and the upstream call
    /// fails too.
    pub async fn get_monitors(&self) -> Result<MonitorList> {
        self.fetch_monitor_list(false).await
    }

    /// Force a refresh of the monitor list
    ///
    /// Skips the fresh/stale short-circuit and the cooldown fast-path, but
    /// still coalesces with an in-flight request.
    pub async fn refresh_monitors(&self) -> Result<MonitorList> {
        self.fetch_monitor_list(true).await
    }

    /// Get a single monitor out of the cached list
    pub async fn get_monitor(&self, id: &str) -> Result<Monitor> {
        let list = self.get_monitors().await?;
        list.monitors
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| GatewayError::not_found(format!("Monitor {} not found", id)))
    }

    /// Get server resource stats for one monitor, cached per monitor id
    ///
    /// A monitor without an agent yields `NoAgent`; that outcome is not
    /// recorded as a cache failure.
    pub async fn get_server_stats(&self, id: &str) -> Result<ServerStats> {
        let cell = self
            .server_stats
            .entry(id.to_string())
            .or_default()
            .clone();

        let client = self.client.clone();
        let monitor_id = id.to_string();
        read_through(cell, self.policy, false, move || async move {
            let raw = client.server_stats(&monitor_id).await?;
            Ok(normalize_server_stats(&raw))
        })
        .await
    }

    async fn fetch_monitor_list(&self, force: bool) -> Result<MonitorList> {
        let client = self.client.clone();
        read_through(
            Arc::clone(&self.monitors),
            self.policy,
            force,
            move || async move {
                let raw = client.list_monitors().await?;
                Ok(MonitorList {
                    monitors: normalize_monitors(&raw),
                })
            },
        )
        .await
    }
}

/// The cache-freshness decision for one call
///
/// 1. Fresh data is returned as-is, with no side effects.
/// 2. Stale data is returned immediately while a background refresh runs,
///    unless one is already in flight.
/// 3. During a rate-limit cooldown, fail fast without touching upstream.
/// 4. Otherwise call upstream under single-flight.
///
/// `force` skips steps 1-3 for explicit refreshes.
async fn read_through<T, F, Fut>(
    cell: Arc<CacheCell<T>>,
    policy: CachePolicy,
    force: bool,
    fetch: F,
) -> Result<T>
where
    T: Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    if !force {
        let read = cell.entry.read().classify(&policy);
        match read {
            CacheRead::Fresh(data) => return Ok(data),
            CacheRead::Stale(data) => {
                if !cell.flight.in_flight() {
                    let cell = Arc::clone(&cell);
                    tokio::spawn(async move {
                        if let Err(e) = run_flight(cell, policy, fetch).await {
                            debug!("Background refresh failed: {}", e);
                        }
                    });
                }
                return Ok(data);
            }
            CacheRead::Miss => {}
        }

        if let Some(remaining) = cell.entry.read().cooldown_remaining(policy.cooldown) {
            debug!("Rate-limit cooldown active, failing fast");
            return Err(GatewayError::rate_limited(Some(remaining.as_secs().max(1))));
        }
    }

    run_flight(cell, policy, fetch).await
}

/// One coalesced upstream call, including the cache update
///
/// On success the entry is replaced whole and any error state cleared. On an
/// upstream fault, data still inside the stale window substitutes for the
/// failure; only when nothing usable remains is the failure recorded and
/// propagated.
async fn run_flight<T, F, Fut>(cell: Arc<CacheCell<T>>, policy: CachePolicy, fetch: F) -> Result<T>
where
    T: Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let flight = cell.flight.clone();

    flight
        .run(move || async move {
            match fetch().await {
                Ok(data) => {
                    cell.entry.write().record_success(data.clone());
                    Ok(data)
                }
                Err(e) if e.is_upstream_fault() => {
                    if let Some(stale) = cell.entry.read().data_within(policy.stale) {
                        warn!("Upstream call failed, serving stale data: {}", e);
                        return Ok(stale);
                    }

                    let kind = match &e {
                        GatewayError::RateLimited { .. } => ErrorKind::RateLimited,
                        _ => ErrorKind::Upstream,
                    };
                    cell.entry.write().record_failure(kind);
                    Err(e)
                }
                // Configuration errors and NoAgent are stable facts, not
                // transient upstream faults; they are never cached.
                Err(e) => Err(e),
            }
        })
        .await
}
