use std::sync::{mpsc, Arc};
use std::thread;

use crate::cache::ProductCache;
use crate::canonical::canonicalize_product_url;
use crate::fetch::{FetchSettings, PageFetcher, ReqwestPageFetcher};
use crate::storage::KeyValueStore;
use crate::{ClassifiedText, ProductError, ProductRequest, MESSAGE_SENDER};

/// Correlates a request with its completion event; allocated by the caller.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEvent {
    pub request_id: RequestId,
    pub result: Result<ClassifiedText, ProductError>,
}

pub struct ServiceConfig {
    pub fetch: FetchSettings,
    /// Persistent backing for the cache; `None` degrades to fetch-only.
    pub storage: Option<Arc<dyn KeyValueStore>>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            storage: None,
        }
    }
}

enum ServiceCommand {
    Request {
        request_id: RequestId,
        request: ProductRequest,
    },
}

/// Background half of the messaging channel: owns the cache and a tokio
/// runtime on a worker thread, and answers product data requests by id.
/// Completion order is not request order; callers correlate by `RequestId`.
pub struct ServiceHandle {
    cmd_tx: mpsc::Sender<ServiceCommand>,
    event_rx: mpsc::Receiver<ServiceEvent>,
}

impl ServiceHandle {
    pub fn new(config: ServiceConfig) -> Self {
        let fetcher: Arc<dyn PageFetcher> = Arc::new(ReqwestPageFetcher::new(config.fetch));
        Self::with_fetcher(fetcher, config.storage)
    }

    /// Like `new` but with an injected transport; used by tests.
    pub fn with_fetcher(
        fetcher: Arc<dyn PageFetcher>,
        storage: Option<Arc<dyn KeyValueStore>>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cache = Arc::new(ProductCache::new(fetcher, storage));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let cache = cache.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(cache.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn send(&self, request_id: RequestId, request: ProductRequest) {
        let _ = self.cmd_tx.send(ServiceCommand::Request {
            request_id,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<ServiceEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    cache: &ProductCache,
    command: ServiceCommand,
    event_tx: mpsc::Sender<ServiceEvent>,
) {
    let ServiceCommand::Request {
        request_id,
        request,
    } = command;
    let result = handle_request(cache, &request).await;
    // Every request is answered, even a failed one; a pending flag that
    // never resolves would leave a link stuck on "loading".
    let _ = event_tx.send(ServiceEvent { request_id, result });
}

async fn handle_request(
    cache: &ProductCache,
    request: &ProductRequest,
) -> Result<ClassifiedText, ProductError> {
    if request.sender != MESSAGE_SENDER {
        return Err(ProductError::Messaging(format!(
            "unexpected sender {:?}",
            request.sender
        )));
    }
    let canonical = canonicalize_product_url(&request.url)?;
    cache.get(&canonical).await
}
