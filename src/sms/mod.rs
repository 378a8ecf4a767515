//! SMS retrieval split into:
//! - bridge: the native callback-pair listing call and its boundary adapter
//! - store: a bridge over a JSON export of the device message store
//! - retriever: filter construction, payload parsing and display mapping

pub mod bridge;
pub mod retriever;
pub mod store;

pub use bridge::{invoke_list, FailureCallback, NativeOutcome, SmsBridge, SuccessCallback};
pub use retriever::{list_inbox_messages, DEFAULT_MAX_COUNT};
pub use store::JsonFileSmsStore;
