use crate::types::SmsFilter;
use log::warn;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub type FailureCallback = Box<dyn FnOnce(String) + Send + 'static>;
pub type SuccessCallback = Box<dyn FnOnce(usize, String) + Send + 'static>;

/// Native message-store listing call.
///
/// `filter` is a JSON-encoded [`SmsFilter`]. Implementations must invoke
/// exactly one of the callbacks, exactly once. `on_success` receives the
/// number of records and the JSON-encoded record list.
pub trait SmsBridge: Send + Sync {
    fn list(&self, filter: String, on_failure: FailureCallback, on_success: SuccessCallback);
}

/// The two possible answers of a listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeOutcome {
    Failure(String),
    Success { count: usize, list_json: String },
}

impl NativeOutcome {
    pub fn into_result(self) -> Result<(usize, String), String> {
        match self {
            NativeOutcome::Failure(reason) => Err(reason),
            NativeOutcome::Success { count, list_json } => Ok((count, list_json)),
        }
    }
}

type OutcomeSlot = Arc<Mutex<Option<oneshot::Sender<NativeOutcome>>>>;

fn deliver(slot: &OutcomeSlot, outcome: NativeOutcome) {
    let sender = slot.lock().ok().and_then(|mut sender| sender.take());
    match sender {
        Some(tx) => {
            let _ = tx.send(outcome);
        }
        None => warn!("native bridge answered more than once, dropping {:?}", outcome),
    }
}

/// Issues one listing call and waits for whichever callback fires first.
pub async fn invoke_list(bridge: &dyn SmsBridge, filter: &SmsFilter) -> NativeOutcome {
    let filter_json = match serde_json::to_string(filter) {
        Ok(json) => json,
        Err(e) => return NativeOutcome::Failure(format!("could not encode filter: {}", e)),
    };

    let (tx, rx) = oneshot::channel();
    let success_slot: OutcomeSlot = Arc::new(Mutex::new(Some(tx)));
    let failure_slot = success_slot.clone();

    bridge.list(
        filter_json,
        Box::new(move |reason| deliver(&failure_slot, NativeOutcome::Failure(reason))),
        Box::new(move |count, list_json| {
            deliver(&success_slot, NativeOutcome::Success { count, list_json })
        }),
    );

    rx.await.unwrap_or_else(|_| {
        NativeOutcome::Failure("bridge released its callbacks without answering".to_string())
    })
}
