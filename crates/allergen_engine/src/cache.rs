use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;
use overlay_logging::{overlay_debug, overlay_warn};

use crate::classify::classify_product_data;
use crate::fetch::PageFetcher;
use crate::page_state::extract_initial_state;
use crate::storage::KeyValueStore;
use crate::{ClassifiedText, ProductError};

const STORAGE_KEY_PREFIX: &str = "product::";

type FetchResult = Result<ClassifiedText, ProductError>;
type PendingFetch = Shared<BoxFuture<'static, FetchResult>>;

enum Slot {
    Ready(ClassifiedText),
    Pending(PendingFetch),
}

/// Memoizes extraction results per canonical URL with at most one in-flight
/// fetch per key: the pending future is registered under the key before the
/// fetch starts, and concurrent callers await a shared clone of it.
///
/// Successful results (including "fetched, nothing found") live for the
/// process lifetime and are written through to storage when enabled; on a
/// later process lifetime storage is consulted before any live fetch.
/// Failures are not cached, so the next call for the key retries.
pub struct ProductCache {
    fetcher: Arc<dyn PageFetcher>,
    storage: Option<Arc<dyn KeyValueStore>>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl ProductCache {
    pub fn new(fetcher: Arc<dyn PageFetcher>, storage: Option<Arc<dyn KeyValueStore>>) -> Self {
        Self {
            fetcher,
            storage,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get(&self, canonical_url: &str) -> FetchResult {
        let pending = {
            let mut slots = self.slots.lock().expect("cache lock");
            match slots.get(canonical_url) {
                Some(Slot::Ready(text)) => return Ok(text.clone()),
                Some(Slot::Pending(fetch)) => fetch.clone(),
                None => {
                    let fetch = crawl(
                        self.fetcher.clone(),
                        self.storage.clone(),
                        canonical_url.to_string(),
                    )
                    .boxed()
                    .shared();
                    slots.insert(canonical_url.to_string(), Slot::Pending(fetch.clone()));
                    fetch
                }
            }
        };

        let result = pending.clone().await;

        let mut slots = self.slots.lock().expect("cache lock");
        match &result {
            Ok(text) => {
                slots.insert(canonical_url.to_string(), Slot::Ready(text.clone()));
            }
            Err(err) => {
                // Only the failed fetch itself may be evicted. A waiter can
                // resume after another caller already retried the key and
                // registered a fresh in-flight fetch; removing that one
                // would let a second concurrent fetch start for the key.
                if let Some(Slot::Pending(live)) = slots.get(canonical_url) {
                    if live.ptr_eq(&pending) {
                        slots.remove(canonical_url);
                    }
                }
                overlay_warn!("Fetch for {canonical_url} failed: {err}");
            }
        }
        result
    }
}

async fn crawl(
    fetcher: Arc<dyn PageFetcher>,
    storage: Option<Arc<dyn KeyValueStore>>,
    url: String,
) -> FetchResult {
    let key = format!("{STORAGE_KEY_PREFIX}{url}");

    if let Some(store) = &storage {
        match store.get(&key) {
            Ok(Some(serialized)) => match serde_json::from_str(&serialized) {
                Ok(text) => {
                    overlay_debug!("Fetched product data for {url} from storage");
                    return Ok(text);
                }
                Err(err) => {
                    overlay_warn!("Discarding unreadable stored entry for {url}: {err}");
                }
            },
            Ok(None) => {}
            Err(err) => overlay_warn!("Storage read for {url} failed: {err}"),
        }
    }

    overlay_debug!("Fetching {url}");
    let page_text = fetcher.fetch_page(&url).await?;
    let state = extract_initial_state(&page_text, &url);
    let text = classify_product_data(&state);
    if text.is_empty() {
        overlay_debug!("No product data found for {url}");
    }

    if let Some(store) = &storage {
        match serde_json::to_string(&text) {
            Ok(serialized) => {
                if let Err(err) = store.set(&key, &serialized) {
                    overlay_warn!("Storage write for {url} failed: {err}");
                }
            }
            Err(err) => overlay_warn!("Could not serialize product data for {url}: {err}"),
        }
    }

    Ok(text)
}
