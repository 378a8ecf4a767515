use super::bridge::{invoke_list, SmsBridge};
use crate::error::FetchError;
use crate::types::{SmsFilter, TextMessage};
use log::{debug, warn};

/// Upper bound requested from the store. Anything beyond it is not shown.
pub const DEFAULT_MAX_COUNT: usize = 100;

/// Lists the newest inbox messages, at most `max_count` of them, in the order
/// the store returns them.
pub async fn list_inbox_messages(
    bridge: &dyn SmsBridge,
    max_count: usize,
) -> Result<Vec<TextMessage>, FetchError> {
    let (count, list_json) = invoke_list(bridge, &SmsFilter::inbox(max_count))
        .await
        .into_result()
        .map_err(FetchError::NativeCall)?;

    let mut messages: Vec<TextMessage> = serde_json::from_str(&list_json)?;
    if count != messages.len() {
        debug!(
            "store reported {} messages but sent {}",
            count,
            messages.len()
        );
    }
    if messages.len() > max_count {
        warn!(
            "store ignored maxCount {}, dropping {} messages",
            max_count,
            messages.len() - max_count
        );
        messages.truncate(max_count);
    }
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sms::bridge::{FailureCallback, SuccessCallback};

    struct FixedBridge(Result<String, String>);

    impl SmsBridge for FixedBridge {
        fn list(&self, _filter: String, on_failure: FailureCallback, on_success: SuccessCallback) {
            match self.0.clone() {
                Ok(json) => on_success(0, json),
                Err(reason) => on_failure(reason),
            }
        }
    }

    #[tokio::test]
    async fn test_failure_callback_maps_to_native_error() {
        let bridge = FixedBridge(Err("permission revoked".to_string()));
        let result = list_inbox_messages(&bridge, DEFAULT_MAX_COUNT).await;
        match result {
            Err(FetchError::NativeCall(reason)) => assert_eq!(reason, "permission revoked"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_payload_maps_to_parse_error() {
        let bridge = FixedBridge(Ok("[{\"address\": 5}]".to_string()));
        let result = list_inbox_messages(&bridge, DEFAULT_MAX_COUNT).await;
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[tokio::test]
    async fn test_oversized_answer_is_capped() {
        let payload: Vec<_> = (0..5)
            .map(|i| serde_json::json!({"address": format!("n{}", i), "body": "x"}))
            .collect();
        let bridge = FixedBridge(Ok(serde_json::to_string(&payload).unwrap()));
        let messages = list_inbox_messages(&bridge, 3).await.unwrap();
        let senders: Vec<_> = messages.iter().map(|m| m.sender.as_str()).collect();
        assert_eq!(senders, vec!["n0", "n1", "n2"]);
    }
}
