use crate::permissions::{PromptAnswer, PromptRequest};
use crate::platform::{Platform, SourceKind};
use crate::sources::Inbox;
use crate::types::MailMessage;
use ratatui::widgets::ListState;

/// Modal notice shown over the message list until any key is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn unsupported(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Sms => Self::new(
                "Unsupported",
                "SMS reading is not available on iOS devices",
            ),
            SourceKind::Mail => Self::new("Note", "Email fetching is configured for iOS devices"),
        }
    }
}

pub struct AppState {
    pub platform: Platform,
    /// Display strings of the last SMS listing.
    pub messages: Vec<String>,
    pub emails: Vec<MailMessage>,
    pub loading: bool,
    /// An SMS fetch is running. Not shown, only keeps a second one out.
    pub sms_in_flight: bool,
    pub alert: Option<Alert>,
    pub permission_prompt: Option<PromptRequest>,
    pub list_state: ListState,
}

impl AppState {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            messages: vec![],
            emails: vec![],
            loading: false,
            sms_in_flight: false,
            alert: None,
            permission_prompt: None,
            list_state: ListState::default(),
        }
    }

    pub fn show_alert(&mut self, alert: Alert) {
        self.alert = Some(alert);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Marks a fetch of `kind` as running. Returns false if one already is.
    pub fn begin_fetch(&mut self, kind: SourceKind) -> bool {
        let running = match kind {
            SourceKind::Mail => &mut self.loading,
            SourceKind::Sms => &mut self.sms_in_flight,
        };
        if *running {
            return false;
        }
        *running = true;
        true
    }

    pub fn end_fetch(&mut self, kind: SourceKind) {
        match kind {
            SourceKind::Mail => self.loading = false,
            SourceKind::Sms => self.sms_in_flight = false,
        }
    }

    /// Replaces the displayed list. Only one list is ever populated.
    pub fn apply(&mut self, inbox: Inbox) {
        match inbox {
            Inbox::Sms(messages) => {
                self.messages = messages;
                self.emails.clear();
            }
            Inbox::Mail(emails) => {
                self.emails = emails;
                self.messages.clear();
            }
        }
        self.list_state
            .select(if self.visible_len() == 0 { None } else { Some(0) });
    }

    /// Number of cards in the list the current platform shows.
    pub fn visible_len(&self) -> usize {
        match self.platform {
            Platform::Android => self.messages.len(),
            Platform::Ios => self.emails.len(),
        }
    }

    pub fn show_prompt(&mut self, request: PromptRequest) {
        // A newer prompt replaces one nobody answered; dropping the old one
        // tells its requester there was no answer.
        self.permission_prompt = Some(request);
    }

    pub fn answer_prompt(&mut self, answer: PromptAnswer) -> bool {
        match self.permission_prompt.take() {
            Some(request) => {
                request.answer(answer);
                true
            }
            None => false,
        }
    }

    pub fn move_down(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn move_up(&mut self) {
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i.saturating_sub(1)));
        }
    }
}
