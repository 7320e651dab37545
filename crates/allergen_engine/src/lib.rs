//! Allergen engine: extraction pipeline, fetch cache, and messaging service.
mod cache;
mod canonical;
mod classify;
mod fetch;
mod matcher;
mod page_state;
mod service;
mod storage;
mod types;

pub use cache::ProductCache;
pub use canonical::{canonicalize_product_url, is_product_page};
pub use classify::classify_product_data;
pub use fetch::{FetchSettings, PageFetcher, ReqwestPageFetcher};
pub use matcher::{contains_whole_word, find_allergens, DEFAULT_ALLERGENS};
pub use page_state::extract_initial_state;
pub use service::{RequestId, ServiceConfig, ServiceEvent, ServiceHandle};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use types::{ClassifiedText, ProductError, ProductRequest, MESSAGE_SENDER};
