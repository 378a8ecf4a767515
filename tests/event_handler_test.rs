use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};

use inboxview::error::FetchError;
use inboxview::event_handler::handle_key_event;
use inboxview::permissions::{InteractivePermissionGate, PromptRequest};
use inboxview::platform::{Platform, SourceKind};
use inboxview::sms::JsonFileSmsStore;
use inboxview::sources::{Inbox, InboxSource, SmsSource, Sources};
use inboxview::state::{Alert, AppState};
use inboxview::types::SmsRecord;
use tempfile::TempDir;

#[derive(Default)]
struct CountingMailSource {
    calls: AtomicUsize,
}

#[async_trait]
impl InboxSource for CountingMailSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Mail
    }

    async fn fetch(&self) -> Result<Inbox, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Inbox::Mail(vec![]))
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

struct StoreFile {
    _dir: TempDir,
    path: std::path::PathBuf,
}

fn write_store(records: &[SmsRecord]) -> StoreFile {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sms.json");
    std::fs::write(&path, serde_json::to_string(records).unwrap()).unwrap();
    StoreFile { _dir: dir, path }
}

fn record(id: &str, address: &str, body: &str, date: &str) -> SmsRecord {
    SmsRecord {
        id: id.to_string(),
        thread_id: None,
        address: address.to_string(),
        body: body.to_string(),
        date: date.to_string(),
        read: 1,
        status: -1,
        kind: 1,
    }
}

struct Harness {
    state_arc: Arc<RwLock<AppState>>,
    sources: Sources,
    prompt_rx: mpsc::Receiver<PromptRequest>,
    mail: Arc<CountingMailSource>,
}

fn harness(platform: Platform, store: &std::path::Path) -> Harness {
    let (prompt_tx, prompt_rx) = mpsc::channel(4);
    let gate = Arc::new(InteractivePermissionGate::new(platform, prompt_tx));
    let sms = SmsSource::new(gate, Arc::new(JsonFileSmsStore::new(store)), 100);
    let mail = Arc::new(CountingMailSource::default());
    Harness {
        state_arc: Arc::new(RwLock::new(AppState::new(platform))),
        sources: Sources {
            sms: Arc::new(sms),
            mail: mail.clone(),
        },
        prompt_rx,
        mail,
    }
}

// Stand-in for the UI loop handing the prompt to the state.
async fn deliver_prompt(h: &mut Harness) {
    let request = tokio::time::timeout(Duration::from_secs(5), h.prompt_rx.recv())
        .await
        .expect("prompt raised")
        .expect("gate alive");
    h.state_arc.write().await.show_prompt(request);
}

async fn wait_until<F: Fn(&AppState) -> bool>(state_arc: &Arc<RwLock<AppState>>, done: F) {
    for _ in 0..100 {
        if done(&*state_arc.read().await) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("state never reached the expected condition");
}

#[tokio::test]
async fn test_q_quits() {
    let h = harness(Platform::Android, std::path::Path::new("/nonexistent"));
    let quit = handle_key_event(key('q'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    assert!(quit);
}

#[tokio::test]
async fn test_any_key_dismisses_alert_without_acting() {
    let h = harness(Platform::Ios, std::path::Path::new("/nonexistent"));
    h.state_arc
        .write()
        .await
        .show_alert(Alert::new("Error", "Failed to fetch emails"));

    let quit = handle_key_event(key('e'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    assert!(!quit);
    assert!(h.state_arc.read().await.alert.is_none());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(h.mail.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_mail_key_ignored_while_loading() {
    let h = harness(Platform::Ios, std::path::Path::new("/nonexistent"));
    h.state_arc.write().await.set_loading(true);

    handle_key_event(key('e'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(h.mail.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_mail_key_starts_fetch() {
    let h = harness(Platform::Ios, std::path::Path::new("/nonexistent"));
    handle_key_event(key('e'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    let mail = h.mail.clone();
    for _ in 0..100 {
        if mail.calls.load(Ordering::SeqCst) == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(mail.calls.load(Ordering::SeqCst), 1);
    wait_until(&h.state_arc, |s| !s.loading).await;
}

#[tokio::test]
async fn test_granting_permission_lists_sms() {
    let store = write_store(
        &[
            record("1", "+15550001", "older", "1000"),
            record("2", "+15550002", "newer", "2000"),
        ],
    );
    let mut h = harness(Platform::Android, &store.path);

    handle_key_event(key('s'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    deliver_prompt(&mut h).await;
    handle_key_event(key('o'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();

    wait_until(&h.state_arc, |s| !s.messages.is_empty()).await;
    let state_guard = h.state_arc.read().await;
    assert_eq!(
        state_guard.messages,
        vec![
            "From: +15550002\nMessage: newer".to_string(),
            "From: +15550001\nMessage: older".to_string(),
        ]
    );
    assert!(state_guard.permission_prompt.is_none());
}

#[tokio::test]
async fn test_repeated_sms_key_raises_one_prompt() {
    let store = write_store(&[record("1", "+1", "hi", "1")]);
    let mut h = harness(Platform::Android, &store.path);

    handle_key_event(key('s'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    handle_key_event(key('s'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    deliver_prompt(&mut h).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(h.prompt_rx.try_recv().is_err(), "only one prompt is raised");

    handle_key_event(key('o'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    wait_until(&h.state_arc, |s| !s.messages.is_empty() && !s.sms_in_flight).await;

    let state_guard = h.state_arc.read().await;
    assert_eq!(state_guard.messages, vec!["From: +1\nMessage: hi".to_string()]);
    assert!(state_guard.alert.is_none());
}

#[tokio::test]
async fn test_sms_key_works_again_after_fetch() {
    let store = write_store(&[record("1", "+1", "hi", "1")]);
    let mut h = harness(Platform::Android, &store.path);

    handle_key_event(key('s'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    deliver_prompt(&mut h).await;
    handle_key_event(key('c'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    wait_until(&h.state_arc, |s| s.alert.is_some() && !s.sms_in_flight).await;

    // Dismiss the denial, then ask again.
    handle_key_event(key('x'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    handle_key_event(key('s'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    deliver_prompt(&mut h).await;
    assert!(h.state_arc.read().await.permission_prompt.is_some());
}

#[tokio::test]
async fn test_cancelling_permission_shows_denied_notice() {
    let store = write_store(&[record("1", "+1", "hi", "1")]);
    let mut h = harness(Platform::Android, &store.path);

    handle_key_event(key('s'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    deliver_prompt(&mut h).await;
    handle_key_event(
        KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
        h.state_arc.clone(),
        &h.sources,
    )
    .await
    .unwrap();

    wait_until(&h.state_arc, |s| s.alert.is_some()).await;
    let state_guard = h.state_arc.read().await;
    assert_eq!(
        state_guard.alert,
        Some(Alert::new(
            "Permission Denied",
            "SMS permission is required to read messages"
        ))
    );
    assert!(state_guard.messages.is_empty());
}

#[tokio::test]
async fn test_other_keys_leave_prompt_open() {
    let store = write_store(&[]);
    let mut h = harness(Platform::Android, &store.path);

    handle_key_event(key('s'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    deliver_prompt(&mut h).await;
    handle_key_event(key('j'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    assert!(h.state_arc.read().await.permission_prompt.is_some());

    handle_key_event(key('l'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    wait_until(&h.state_arc, |s| s.alert.is_some()).await;
    assert_eq!(
        h.state_arc.read().await.alert.as_ref().map(|a| a.title.clone()),
        Some("Permission Denied".to_string())
    );
}

#[tokio::test]
async fn test_missing_store_reports_fetch_failure() {
    let mut h = harness(
        Platform::Android,
        std::path::Path::new("/nonexistent/inboxview/sms.json"),
    );

    handle_key_event(key('s'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();
    deliver_prompt(&mut h).await;
    handle_key_event(key('o'), h.state_arc.clone(), &h.sources)
        .await
        .unwrap();

    wait_until(&h.state_arc, |s| s.alert.is_some()).await;
    assert_eq!(
        h.state_arc.read().await.alert,
        Some(Alert::new("Error", "Failed to fetch SMS messages"))
    );
}
