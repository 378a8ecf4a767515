use crate::error::FetchError;
use crate::sources::InboxSource;
use crate::state::{Alert, AppState};
use log::{debug, error, warn};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

// Spawn a fetch so the UI loop keeps drawing (and can show a permission
// prompt) while the source runs.
pub fn spawn_fetch(
    state_arc: Arc<RwLock<AppState>>,
    source: Arc<dyn InboxSource>,
) -> JoinHandle<()> {
    tokio::spawn(async move { run_fetch(state_arc, source).await })
}

/// Runs one user-triggered retrieval end to end. The state lock is only held
/// before the source starts and after it resolves.
pub async fn run_fetch(state_arc: Arc<RwLock<AppState>>, source: Arc<dyn InboxSource>) {
    let kind = source.kind();
    {
        let mut state_guard = state_arc.write().await;
        if !state_guard.platform.supports(kind) {
            warn!("{} requested on {}", kind, state_guard.platform);
            state_guard.show_alert(Alert::unsupported(kind));
            return;
        }
        if !state_guard.begin_fetch(kind) {
            debug!("{} fetch already running", kind);
            return;
        }
    }

    // Own task, so a panicking source still reaches the cleanup below.
    let worker = source.clone();
    let outcome = match tokio::spawn(async move { worker.fetch().await }).await {
        Ok(result) => result,
        Err(e) => Err(FetchError::Interrupted(e.to_string())),
    };

    let mut state_guard = state_arc.write().await;
    state_guard.end_fetch(kind);
    match outcome {
        Ok(inbox) => state_guard.apply(inbox),
        Err(e) => {
            error!("{} fetch failed: {}", kind, e);
            state_guard.show_alert(e.alert());
        }
    }
}
