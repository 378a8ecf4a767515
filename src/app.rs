use crate::config::AppConfig;
use crate::gmail_api::{AuthSession, GoogleOAuthProvider, MailRetriever};
use crate::permissions::{InteractivePermissionGate, PromptRequest};
use crate::sms::JsonFileSmsStore;
use crate::sources::{MailSource, SmsSource, Sources};
use crate::state::AppState;
use crate::terminal::Tui;
use crate::ui::draw_main_ui;
use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{
    mpsc::{self, Receiver},
    RwLock,
};

/// Wires the sources for the configured platform. Nothing touches the network
/// or the message store until the user asks for it.
pub fn initialize_app(config: &AppConfig) -> (Arc<RwLock<AppState>>, Sources, Receiver<PromptRequest>) {
    info!("starting as {}", config.platform);

    let (prompt_tx, prompt_rx) = mpsc::channel(4);
    let gate = Arc::new(InteractivePermissionGate::new(config.platform, prompt_tx));
    let store = Arc::new(JsonFileSmsStore::new(&config.sms_store));
    let sms = SmsSource::new(gate, store, config.sms_max_count);

    let provider = Arc::new(GoogleOAuthProvider::new(config.auth.clone()));
    let retriever = MailRetriever::new(reqwest::Client::new(), config.api_base_url.clone());
    let mail = MailSource::new(AuthSession::new(provider), retriever, config.mail_limit);

    let sources = Sources {
        sms: Arc::new(sms),
        mail: Arc::new(mail),
    };
    let state_arc = Arc::new(RwLock::new(AppState::new(config.platform)));
    (state_arc, sources, prompt_rx)
}

pub async fn run_app_loop(
    terminal: &mut Tui,
    state_arc: Arc<RwLock<AppState>>,
    sources: Sources,
    mut prompt_rx: Receiver<PromptRequest>,
) -> Result<(), Box<dyn std::error::Error>> {
    use crate::event_handler::handle_key_event;
    use crossterm::event;

    loop {
        // Surface permission prompts raised by fetch tasks
        while let Ok(request) = prompt_rx.try_recv() {
            state_arc.write().await.show_prompt(request);
        }

        {
            let mut state_guard = state_arc.write().await;
            terminal.draw(|f| draw_main_ui(f, &mut state_guard))?;
        }

        if event::poll(Duration::from_millis(100))? {
            if let event::Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press
                    && handle_key_event(key, state_arc.clone(), &sources).await?
                {
                    break;
                }
            }
        }
    }

    Ok(())
}
