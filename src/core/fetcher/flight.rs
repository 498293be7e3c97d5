//! Single-flight request coalescing
//!
//! At most one upstream request runs per cache key at any instant. Callers
//! arriving while a request is outstanding attach to the existing one and
//! share its result instead of issuing a duplicate call.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use tracing::debug;

use crate::utils::error::{GatewayError, Result};

type FlightFuture<T> = Shared<BoxFuture<'static, std::result::Result<T, GatewayError>>>;

/// The in-progress-request slot for one cache key
///
/// Cloning shares the slot; the service clones a handle into spawned
/// background refreshes.
#[derive(Clone)]
pub struct Flight<T> {
    slot: Arc<Mutex<Option<FlightFuture<T>>>>,
}

impl<T> Default for Flight<T> {
    fn default() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Flight<T> {
    /// Whether a request is currently outstanding
    pub fn in_flight(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Join the outstanding request, or start `fetch` as a new one
    ///
    /// The slot clears itself as the last step of the winning future, so a
    /// completed flight never lingers to serve later callers.
    pub async fn run<F, Fut>(&self, fetch: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let shared = {
            let mut slot = self.slot.lock();
            match slot.as_ref() {
                Some(existing) => {
                    debug!("Joining in-flight upstream request");
                    existing.clone()
                }
                None => {
                    let slot_handle = Arc::clone(&self.slot);
                    let inner = fetch();
                    let fut = async move {
                        let result = inner.await;
                        slot_handle.lock().take();
                        result
                    }
                    .boxed()
                    .shared();
                    *slot = Some(fut.clone());
                    fut
                }
            }
        };

        shared.await
    }
}
