use super::auth::AuthToken;
use crate::types::{Header, MailMessage, Message, MessagesResponse};
use futures::future::try_join_all;
use log::debug;

pub const GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1";

/// How many recent messages are listed. No further pages are requested.
pub const DEFAULT_MAIL_LIMIT: usize = 10;

pub const NO_SUBJECT: &str = "No Subject";
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Reads recent mail for the signed-in user: one listing request, then one
/// detail request per listed id, all in flight at once.
#[derive(Clone)]
pub struct MailRetriever {
    client: reqwest::Client,
    base_url: String,
}

impl MailRetriever {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn gmail(client: reqwest::Client) -> Self {
        Self::new(client, GMAIL_API_BASE)
    }

    async fn list_message_ids(
        &self,
        token: &AuthToken,
        limit: usize,
    ) -> Result<Vec<String>, reqwest::Error> {
        let url = format!("{}/users/me/messages", self.base_url);
        let listing: MessagesResponse = self
            .client
            .get(&url)
            .bearer_auth(token.bearer())
            .query(&[("maxResults", limit)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(listing
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(|m| m.id)
            .collect())
    }

    async fn fetch_message(&self, token: &AuthToken, id: &str) -> Result<MailMessage, reqwest::Error> {
        let url = format!("{}/users/me/messages/{}", self.base_url, id);
        let detail: Message = self
            .client
            .get(&url)
            .bearer_auth(token.bearer())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(to_mail_message(id, detail))
    }

    /// Any failed request fails the whole call; no partial list is returned.
    /// The result keeps the order of the listing.
    pub async fn list_recent_mail(
        &self,
        token: &AuthToken,
        limit: usize,
    ) -> Result<Vec<MailMessage>, reqwest::Error> {
        let ids = self.list_message_ids(token, limit).await?;
        debug!("listing returned {} message ids", ids.len());

        let details = ids.iter().map(|id| self.fetch_message(token, id));
        try_join_all(details).await
    }
}

/// Value of the first header whose name matches exactly. Empty values count
/// as missing.
pub fn header_value<'a>(headers: &'a [Header], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name.as_deref() == Some(name))
        .and_then(|h| h.value.as_deref())
        .filter(|v| !v.is_empty())
}

pub fn to_mail_message(id: &str, detail: Message) -> MailMessage {
    let headers = detail.payload.headers;

    MailMessage {
        id: id.to_string(),
        subject: header_value(&headers, "Subject")
            .unwrap_or(NO_SUBJECT)
            .to_string(),
        sender: header_value(&headers, "From")
            .unwrap_or(UNKNOWN_SENDER)
            .to_string(),
        snippet: detail.snippet.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessagePart;

    fn header(name: &str, value: &str) -> Header {
        Header {
            name: Some(name.to_string()),
            value: Some(value.to_string()),
        }
    }

    fn detail(headers: Vec<Header>, snippet: Option<&str>) -> Message {
        Message {
            snippet: snippet.map(str::to_string),
            payload: MessagePart { headers },
        }
    }

    #[test]
    fn test_subject_without_from_defaults_sender() {
        let message = to_mail_message("a", detail(vec![header("Subject", "Hi")], Some("hey")));
        assert_eq!(message.subject, "Hi");
        assert_eq!(message.sender, "Unknown");
        assert_eq!(message.snippet, "hey");
    }

    #[test]
    fn test_header_names_are_case_sensitive() {
        let message = to_mail_message(
            "a",
            detail(vec![header("subject", "lower"), header("FROM", "x@y")], None),
        );
        assert_eq!(message.subject, NO_SUBJECT);
        assert_eq!(message.sender, UNKNOWN_SENDER);
    }

    #[test]
    fn test_empty_header_value_uses_default() {
        let message = to_mail_message("a", detail(vec![header("Subject", "")], None));
        assert_eq!(message.subject, NO_SUBJECT);
    }

    #[test]
    fn test_missing_snippet_is_empty() {
        let message = to_mail_message("id-1", detail(vec![header("From", "a@b")], None));
        assert_eq!(
            message,
            MailMessage {
                id: "id-1".to_string(),
                subject: NO_SUBJECT.to_string(),
                sender: "a@b".to_string(),
                snippet: String::new(),
            }
        );
    }

    #[test]
    fn test_first_matching_header_wins() {
        let headers = vec![header("From", "first@x"), header("From", "second@x")];
        assert_eq!(header_value(&headers, "From"), Some("first@x"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let retriever = MailRetriever::new(reqwest::Client::new(), "http://localhost:1234/");
        assert_eq!(retriever.base_url, "http://localhost:1234");
    }
}
