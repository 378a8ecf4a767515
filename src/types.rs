use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub messages: Option<Vec<MessageRef>>,
}

#[derive(Debug, Deserialize)]
pub struct MessageRef {
    pub id: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Message {
    pub snippet: Option<String>,
    pub payload: MessagePart,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MessagePart {
    pub headers: Vec<Header>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Header {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// A mail message as shown in the mail list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub id: String,
    pub subject: String,
    pub sender: String,
    pub snippet: String,
}

/// A text message decoded from the native listing payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextMessage {
    #[serde(rename = "address")]
    pub sender: String,
    pub body: String,
}

impl TextMessage {
    pub fn display(&self) -> String {
        format!("From: {}\nMessage: {}", self.sender, self.body)
    }
}

/// One row of the device message store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    pub address: String,
    pub body: String,
    /// Milliseconds since the epoch, as the store reports it.
    pub date: String,
    #[serde(default)]
    pub read: u8,
    #[serde(default)]
    pub status: i32,
    #[serde(rename = "type")]
    pub kind: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsBox {
    Inbox,
    Sent,
    Draft,
}

impl SmsBox {
    /// Store `type` column value for this box.
    pub fn store_kind(self) -> u8 {
        match self {
            SmsBox::Inbox => 1,
            SmsBox::Sent => 2,
            SmsBox::Draft => 3,
        }
    }
}

/// Filter document understood by the native listing call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsFilter {
    #[serde(rename = "box", default, skip_serializing_if = "Option::is_none")]
    pub sms_box: Option<SmsBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_from: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl SmsFilter {
    pub fn inbox(max_count: usize) -> Self {
        Self {
            sms_box: Some(SmsBox::Inbox),
            max_count: Some(max_count),
            ..Self::default()
        }
    }
}
