//! Cache entry and serving policy
//!
//! One `CacheEntry` per logical resource (the monitor list, or one monitor's
//! server stats). Entries are read and written whole under their lock; no
//! caller ever observes a partially updated entry.

use std::time::{Duration, Instant};

use crate::config::CacheConfig;

/// Failure kinds recorded on a cache entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Upstream rate limit; triggers the cooldown fast-path
    RateLimited,
    /// Any other upstream fault
    Upstream,
}

/// A recorded failure with its own timestamp
#[derive(Debug, Clone, Copy)]
pub struct ErrorState {
    pub kind: ErrorKind,
    pub at: Instant,
}

/// The serving windows driving the fetch decision
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    /// Serve cached data with no side effects
    pub fresh: Duration,
    /// Serve cached data and revalidate in the background
    pub stale: Duration,
    /// After a rate-limit failure, fail fast instead of calling upstream
    pub cooldown: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            fresh: Duration::from_secs(30),
            stale: Duration::from_secs(300),
            cooldown: Duration::from_secs(60),
        }
    }
}

impl From<&CacheConfig> for CachePolicy {
    fn from(config: &CacheConfig) -> Self {
        Self {
            fresh: config.fresh(),
            stale: config.stale(),
            cooldown: config.cooldown(),
        }
    }
}

/// Outcome of reading an entry against the policy windows
#[derive(Debug)]
pub enum CacheRead<T> {
    /// Young enough to serve as-is
    Fresh(T),
    /// Still servable, but a background refresh should run
    Stale(T),
    /// Nothing usable; upstream must be called
    Miss,
}

/// Cached payload for one resource
///
/// `data` is only replaced on a successful upstream response, and
/// `fetched_at` only advances together with it.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    data: Option<T>,
    fetched_at: Option<Instant>,
    error: Option<ErrorState>,
}

impl<T> Default for CacheEntry<T> {
    fn default() -> Self {
        Self {
            data: None,
            fetched_at: None,
            error: None,
        }
    }
}

impl<T: Clone> CacheEntry<T> {
    /// Classify the entry against the serving windows
    pub fn classify(&self, policy: &CachePolicy) -> CacheRead<T> {
        match (&self.data, self.fetched_at) {
            (Some(data), Some(fetched_at)) => {
                let age = fetched_at.elapsed();
                if age < policy.fresh {
                    CacheRead::Fresh(data.clone())
                } else if age < policy.stale {
                    CacheRead::Stale(data.clone())
                } else {
                    CacheRead::Miss
                }
            }
            _ => CacheRead::Miss,
        }
    }

    /// Data younger than `window`, if any
    pub fn data_within(&self, window: Duration) -> Option<T> {
        match (&self.data, self.fetched_at) {
            (Some(data), Some(fetched_at)) if fetched_at.elapsed() < window => {
                Some(data.clone())
            }
            _ => None,
        }
    }

    /// Time left on the rate-limit cooldown, if one is active
    pub fn cooldown_remaining(&self, cooldown: Duration) -> Option<Duration> {
        self.error
            .filter(|e| e.kind == ErrorKind::RateLimited)
            .and_then(|e| cooldown.checked_sub(e.at.elapsed()))
            .filter(|remaining| !remaining.is_zero())
    }

    /// Replace the payload after a successful fetch
    pub fn record_success(&mut self, data: T) {
        self.data = Some(data);
        self.fetched_at = Some(Instant::now());
        self.error = None;
    }

    /// Record a failed fetch; existing data stays untouched
    pub fn record_failure(&mut self, kind: ErrorKind) {
        self.error = Some(ErrorState {
            kind,
            at: Instant::now(),
        });
    }

    /// Whether a failure is currently recorded
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
