use crate::platform::{Platform, SourceKind};
use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashSet;
use std::sync::Mutex;
use tokio::sync::{mpsc, oneshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ReadSms,
}

impl Permission {
    fn source_kind(self) -> SourceKind {
        match self {
            Permission::ReadSms => SourceKind::Sms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    PlatformUnsupported,
}

/// Copy shown by the permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rationale {
    pub title: &'static str,
    pub message: &'static str,
    pub button_neutral: &'static str,
    pub button_negative: &'static str,
    pub button_positive: &'static str,
}

impl Rationale {
    pub const fn read_sms() -> Self {
        Self {
            title: "SMS Permission",
            message: "This app needs permission to read your SMS messages.",
            button_neutral: "Ask Me Later",
            button_negative: "Cancel",
            button_positive: "OK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Neutral,
    Negative,
    Positive,
}

impl PromptAnswer {
    pub fn status(self) -> PermissionStatus {
        match self {
            PromptAnswer::Positive => PermissionStatus::Granted,
            PromptAnswer::Negative | PromptAnswer::Neutral => PermissionStatus::Denied,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    #[error("no prompt surface is available")]
    PromptUnavailable,
    #[error("prompt closed without an answer")]
    NoAnswer,
}

/// A pending prompt waiting for the user, delivered to the UI loop.
#[derive(Debug)]
pub struct PromptRequest {
    pub permission: Permission,
    pub rationale: Rationale,
    reply: oneshot::Sender<PromptAnswer>,
}

impl PromptRequest {
    pub fn new(
        permission: Permission,
        rationale: Rationale,
    ) -> (Self, oneshot::Receiver<PromptAnswer>) {
        let (reply, rx) = oneshot::channel();
        (
            Self {
                permission,
                rationale,
                reply,
            },
            rx,
        )
    }

    pub fn answer(self, answer: PromptAnswer) {
        // The requester may have gone away; nothing to do then.
        let _ = self.reply.send(answer);
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionGate: Send + Sync {
    async fn request(
        &self,
        permission: Permission,
        rationale: &Rationale,
    ) -> Result<PermissionStatus, PermissionError>;
}

/// Gate that asks the user through the terminal UI. Grants are remembered for
/// the lifetime of the process.
pub struct InteractivePermissionGate {
    platform: Platform,
    prompt_tx: mpsc::Sender<PromptRequest>,
    granted: Mutex<HashSet<Permission>>,
}

impl InteractivePermissionGate {
    pub fn new(platform: Platform, prompt_tx: mpsc::Sender<PromptRequest>) -> Self {
        Self {
            platform,
            prompt_tx,
            granted: Mutex::new(HashSet::new()),
        }
    }

    fn is_granted(&self, permission: Permission) -> bool {
        self.granted
            .lock()
            .map(|granted| granted.contains(&permission))
            .unwrap_or(false)
    }

    fn remember_grant(&self, permission: Permission) {
        if let Ok(mut granted) = self.granted.lock() {
            granted.insert(permission);
        }
    }
}

#[async_trait]
impl PermissionGate for InteractivePermissionGate {
    async fn request(
        &self,
        permission: Permission,
        rationale: &Rationale,
    ) -> Result<PermissionStatus, PermissionError> {
        if !self.platform.supports(permission.source_kind()) {
            return Ok(PermissionStatus::PlatformUnsupported);
        }
        if self.is_granted(permission) {
            debug!("{:?} already granted, skipping prompt", permission);
            return Ok(PermissionStatus::Granted);
        }

        let (request, answer_rx) = PromptRequest::new(permission, *rationale);
        self.prompt_tx
            .send(request)
            .await
            .map_err(|_| PermissionError::PromptUnavailable)?;
        let answer = answer_rx.await.map_err(|_| PermissionError::NoAnswer)?;
        info!("{:?} prompt answered with {:?}", permission, answer);

        let status = answer.status();
        if status == PermissionStatus::Granted {
            self.remember_grant(permission);
        }
        Ok(status)
    }
}
