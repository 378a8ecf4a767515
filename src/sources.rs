use crate::error::FetchError;
use crate::gmail_api::{AuthSession, MailRetriever};
use crate::permissions::{Permission, PermissionGate, PermissionStatus, Rationale};
use crate::platform::SourceKind;
use crate::sms::{list_inbox_messages, SmsBridge};
use crate::types::MailMessage;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

/// Result of one retrieval, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbox {
    Sms(Vec<String>),
    Mail(Vec<MailMessage>),
}

/// One platform's way of getting messages. The shell picks the source whose
/// kind the active platform supports.
#[async_trait]
pub trait InboxSource: Send + Sync {
    fn kind(&self) -> SourceKind;
    async fn fetch(&self) -> Result<Inbox, FetchError>;
}

/// The two user-triggerable retrievals wired into the UI.
#[derive(Clone)]
pub struct Sources {
    pub sms: Arc<dyn InboxSource>,
    pub mail: Arc<dyn InboxSource>,
}

/// Permission prompt followed by an inbox listing.
pub struct SmsSource {
    gate: Arc<dyn PermissionGate>,
    bridge: Arc<dyn SmsBridge>,
    max_count: usize,
}

impl SmsSource {
    pub fn new(gate: Arc<dyn PermissionGate>, bridge: Arc<dyn SmsBridge>, max_count: usize) -> Self {
        Self {
            gate,
            bridge,
            max_count,
        }
    }
}

#[async_trait]
impl InboxSource for SmsSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Sms
    }

    async fn fetch(&self) -> Result<Inbox, FetchError> {
        let status = self
            .gate
            .request(Permission::ReadSms, &Rationale::read_sms())
            .await?;
        match status {
            PermissionStatus::Granted => {}
            PermissionStatus::Denied => return Err(FetchError::PermissionDenied),
            PermissionStatus::PlatformUnsupported => {
                return Err(FetchError::PlatformUnsupported(SourceKind::Sms))
            }
        }

        let messages = list_inbox_messages(self.bridge.as_ref(), self.max_count).await?;
        info!("loaded {} text messages", messages.len());
        Ok(Inbox::Sms(messages.iter().map(|m| m.display()).collect()))
    }
}

/// Full sign-in followed by a recent-mail listing. Nothing is reused between
/// fetches.
pub struct MailSource {
    session: AuthSession,
    retriever: MailRetriever,
    limit: usize,
}

impl MailSource {
    pub fn new(session: AuthSession, retriever: MailRetriever, limit: usize) -> Self {
        Self {
            session,
            retriever,
            limit,
        }
    }
}

#[async_trait]
impl InboxSource for MailSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Mail
    }

    async fn fetch(&self) -> Result<Inbox, FetchError> {
        let token = self.session.sign_in().await?;
        let emails = self.retriever.list_recent_mail(&token, self.limit).await?;
        info!("loaded {} mail messages", emails.len());
        Ok(Inbox::Mail(emails))
    }
}
