use allergen_engine::{ProductRequest, RequestId, ServiceEvent, ServiceHandle};

/// Content-side view of the cross-context messaging transport: fire a
/// request, poll for completions. Completion order is unrelated to request
/// order; events carry the id they answer.
pub trait ProductDataPort {
    fn send(&self, request_id: RequestId, request: ProductRequest);
    fn try_recv(&self) -> Option<ServiceEvent>;
}

impl ProductDataPort for ServiceHandle {
    fn send(&self, request_id: RequestId, request: ProductRequest) {
        ServiceHandle::send(self, request_id, request);
    }

    fn try_recv(&self) -> Option<ServiceEvent> {
        ServiceHandle::try_recv(self)
    }
}
