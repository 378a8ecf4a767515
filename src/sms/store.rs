use super::bridge::{FailureCallback, SmsBridge, SuccessCallback};
use crate::types::{SmsFilter, SmsRecord};
use log::{debug, error};
use std::path::{Path, PathBuf};

/// Message store backed by a JSON export of the device SMS database (an array
/// of [`SmsRecord`]s). Reads happen on the tokio runtime and answer through
/// the bridge callbacks.
#[derive(Debug, Clone)]
pub struct JsonFileSmsStore {
    path: PathBuf,
}

impl JsonFileSmsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

async fn read_listing(path: &Path, filter_json: &str) -> Result<(usize, String), String> {
    let filter: SmsFilter =
        serde_json::from_str(filter_json).map_err(|e| format!("invalid filter: {}", e))?;
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let records: Vec<SmsRecord> = serde_json::from_str(&contents)
        .map_err(|e| format!("corrupt store {}: {}", path.display(), e))?;

    let selected = select(records, &filter);
    let list_json = serde_json::to_string(&selected).map_err(|e| e.to_string())?;
    Ok((selected.len(), list_json))
}

fn date_key(record: &SmsRecord) -> i64 {
    record.date.trim().parse().unwrap_or(i64::MIN)
}

/// Applies a filter the way the platform content provider does: newest first,
/// then offset and limit.
pub fn select(mut records: Vec<SmsRecord>, filter: &SmsFilter) -> Vec<SmsRecord> {
    if let Some(sms_box) = filter.sms_box {
        records.retain(|r| r.kind == sms_box.store_kind());
    }
    if let Some(address) = &filter.address {
        records.retain(|r| &r.address == address);
    }
    if let Some(body) = &filter.body {
        records.retain(|r| r.body.contains(body.as_str()));
    }

    records.sort_by(|a, b| date_key(b).cmp(&date_key(a)));

    records
        .into_iter()
        .skip(filter.index_from.unwrap_or(0))
        .take(filter.max_count.unwrap_or(usize::MAX))
        .collect()
}

impl SmsBridge for JsonFileSmsStore {
    fn list(&self, filter: String, on_failure: FailureCallback, on_success: SuccessCallback) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                on_failure(format!("message store needs a runtime: {}", e));
                return;
            }
        };
        let path = self.path.clone();
        handle.spawn(async move {
            match read_listing(&path, &filter).await {
                Ok((count, list_json)) => {
                    debug!("message store returned {} records", count);
                    on_success(count, list_json);
                }
                Err(reason) => {
                    error!("message store listing failed: {}", reason);
                    on_failure(reason);
                }
            }
        });
    }
}
