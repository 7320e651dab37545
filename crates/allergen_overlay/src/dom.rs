use std::cell::Cell;
use std::rc::Rc;

/// Stable identity for an anchor element, assigned by the embedder. Lives as
/// long as the element; a removed element's id is simply never seen again.
pub type AnchorId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRef {
    pub id: AnchorId,
    pub href: String,
}

/// What the overlay needs from the page. Implemented by the embedder over
/// the real document; tests use an in-memory fake.
pub trait DomSurface {
    fn document_url(&self) -> String;

    /// All anchor elements currently in the document.
    fn anchors(&self) -> Vec<AnchorRef>;

    /// Starts one-shot visibility tracking for an anchor. The embedder
    /// reports the first intersection via `Session::on_anchor_visible`.
    fn watch_visibility(&self, anchor: AnchorId);

    fn observe_mutations(&self);
    fn disconnect_mutations(&self);

    /// Creates or updates the banner element under the page's main content.
    /// Returns false when the mount point does not exist yet.
    fn apply_banner(&self, element_id: &str, text: &str, css_class: &str) -> bool;

    /// Sets `prefix + suffix` on the anchor's container and removes every
    /// other class sharing the prefix; a no-op when the class is already
    /// present, and skipped for containers the site styles itself.
    fn set_link_class(&self, anchor: AnchorId, prefix: &str, suffix: &str);
}

/// Depth-counted pause for mutation observation. Rendering happens inside a
/// pause so the overlay's own DOM writes cannot re-trigger the mutation
/// scan. Pauses nest: observation is physically re-attached only when the
/// outermost guard drops, and guards release on every exit path.
pub struct ObserverGate {
    dom: Rc<dyn DomSurface>,
    depth: Cell<usize>,
}

impl ObserverGate {
    pub fn new(dom: Rc<dyn DomSurface>) -> Self {
        Self {
            dom,
            depth: Cell::new(0),
        }
    }

    /// Attaches the observer; called once at session start.
    pub fn attach(&self) {
        if self.depth.get() == 0 {
            self.dom.observe_mutations();
        }
    }

    /// Detaches the observer for good; called at session teardown.
    pub fn detach(&self) {
        if self.depth.get() == 0 {
            self.dom.disconnect_mutations();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.depth.get() > 0
    }

    pub fn pause(&self) -> PauseGuard<'_> {
        if self.depth.get() == 0 {
            self.dom.disconnect_mutations();
        }
        self.depth.set(self.depth.get() + 1);
        PauseGuard { gate: self }
    }
}

pub struct PauseGuard<'a> {
    gate: &'a ObserverGate,
}

impl Drop for PauseGuard<'_> {
    fn drop(&mut self) {
        let depth = self.gate.depth.get() - 1;
        self.gate.depth.set(depth);
        if depth == 0 {
            self.gate.dom.observe_mutations();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingDom {
        observes: Cell<usize>,
        disconnects: Cell<usize>,
    }

    impl DomSurface for CountingDom {
        fn document_url(&self) -> String {
            String::new()
        }
        fn anchors(&self) -> Vec<AnchorRef> {
            Vec::new()
        }
        fn watch_visibility(&self, _anchor: AnchorId) {}
        fn observe_mutations(&self) {
            self.observes.set(self.observes.get() + 1);
        }
        fn disconnect_mutations(&self) {
            self.disconnects.set(self.disconnects.get() + 1);
        }
        fn apply_banner(&self, _element_id: &str, _text: &str, _css_class: &str) -> bool {
            true
        }
        fn set_link_class(&self, _anchor: AnchorId, _prefix: &str, _suffix: &str) {}
    }

    #[test]
    fn nested_pauses_reattach_exactly_once() {
        let dom = Rc::new(CountingDom::default());
        let gate = ObserverGate::new(dom.clone());
        gate.attach();
        assert_eq!(dom.observes.get(), 1);

        {
            let _outer = gate.pause();
            assert!(gate.is_paused());
            {
                let _inner = gate.pause();
                // The nested pause must not detach a second time.
                assert_eq!(dom.disconnects.get(), 1);
            }
            // Still paused: the inner guard must not have reattached.
            assert!(gate.is_paused());
            assert_eq!(dom.observes.get(), 1);
        }

        assert!(!gate.is_paused());
        assert_eq!(dom.observes.get(), 2);
        assert_eq!(dom.disconnects.get(), 1);
    }

    #[test]
    fn pause_releases_on_early_exit() {
        let dom = Rc::new(CountingDom::default());
        let gate = ObserverGate::new(dom.clone());
        gate.attach();

        let attempt = || -> Result<(), ()> {
            let _paused = gate.pause();
            Err(())
        };
        assert!(attempt().is_err());
        assert!(!gate.is_paused());
        assert_eq!(dom.observes.get(), 2);
    }
}
