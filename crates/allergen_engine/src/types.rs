use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sender tag carried by every cross-context product data request.
pub const MESSAGE_SENDER: &str = "ocado-allergens";

/// Product description fragments pulled out of one page, bucketed by kind.
/// Sequence order follows tree traversal order and is deterministic for a
/// given page state. Both buckets empty means "fetched, no data found".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassifiedText {
    pub ingredients: Vec<String>,
    pub info: Vec<String>,
}

impl ClassifiedText {
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty() && self.info.is_empty()
    }
}

/// One request over the messaging channel, as sent by the content side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRequest {
    pub sender: String,
    pub url: String,
}

impl ProductRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            sender: MESSAGE_SENDER.to_string(),
            url: url.into(),
        }
    }
}

/// Failures surfaced by the pipeline. Cloneable because coalesced cache
/// waiters all receive the same result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("request timed out")]
    Timeout,
    #[error("messaging error: {0}")]
    Messaging(String),
}
