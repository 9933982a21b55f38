//! Process-lifetime application context

use tokio::sync::Mutex;
use tracing::info;

use crate::domain::execution::SwapExecutor;
use crate::shared::types::SwapOutcome;

/// Everything a request needs, built once at startup and shared by handle.
///
/// With the execution slot enabled, swap runs never overlap: a second request
/// waits until the first one has been confirmed or failed, so two runs cannot
/// both pass the balance check and spend the same funds.
pub struct AppContext {
    executor: SwapExecutor,
    execution_slot: Option<Mutex<()>>,
}

impl AppContext {
    pub fn new(executor: SwapExecutor, serialize_swaps: bool) -> Self {
        Self {
            executor,
            execution_slot: serialize_swaps.then(|| Mutex::new(())),
        }
    }

    pub fn executor(&self) -> &SwapExecutor {
        &self.executor
    }

    pub fn serializes_swaps(&self) -> bool {
        self.execution_slot.is_some()
    }

    pub async fn execute_swap(&self) -> SwapOutcome {
        let _guard = match &self.execution_slot {
            Some(slot) => Some(match slot.try_lock() {
                Ok(guard) => guard,
                Err(_) => {
                    info!("⏳ Another swap is in flight, waiting for it to finish");
                    slot.lock().await
                }
            }),
            None => None,
        };

        self.executor.execute().await
    }
}
