use std::collections::HashMap;
use std::rc::Rc;

use allergen_core::{
    update, AllergenVerdict, Effect, LinkId, Msg, OverlayState, RenderPlan, BANNER_ELEMENT_ID,
    LINK_CLASS_PREFIX,
};
use allergen_engine::{
    find_allergens, is_product_page, ClassifiedText, ProductError, ProductRequest, RequestId,
    DEFAULT_ALLERGENS,
};
use overlay_logging::overlay_debug;

use crate::dom::{AnchorId, DomSurface, ObserverGate};
use crate::port::ProductDataPort;

/// Where a completed product data request lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestTarget {
    Banner,
    Link(LinkId),
}

pub struct SessionConfig {
    pub allergens: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            allergens: DEFAULT_ALLERGENS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// One page session: owns all overlay state, the observer gate, and the
/// request bookkeeping. Created on page load, torn down on navigation.
/// Everything runs on the single event-processing thread; the only
/// suspension points are inside the service, behind the port.
pub struct Session {
    state: OverlayState,
    dom: Rc<dyn DomSurface>,
    gate: ObserverGate,
    port: Box<dyn ProductDataPort>,
    allergens: Vec<String>,
    links_by_anchor: HashMap<AnchorId, LinkId>,
    anchors_by_link: HashMap<LinkId, AnchorId>,
    requests: HashMap<RequestId, RequestTarget>,
    next_link_id: LinkId,
    next_request_id: RequestId,
}

impl Session {
    pub fn new(dom: Rc<dyn DomSurface>, port: Box<dyn ProductDataPort>, config: SessionConfig) -> Self {
        let gate = ObserverGate::new(dom.clone());
        gate.attach();
        Self {
            state: OverlayState::new(),
            dom,
            gate,
            port,
            allergens: config.allergens,
            links_by_anchor: HashMap::new(),
            anchors_by_link: HashMap::new(),
            requests: HashMap::new(),
            next_link_id: 1,
            next_request_id: 1,
        }
    }

    /// Detaches observation; the embedder drops the session afterwards.
    pub fn teardown(&mut self) {
        self.gate.detach();
    }

    /// Handles one batched mutation notification.
    pub fn on_mutation(&mut self) {
        if self.gate.is_paused() {
            return;
        }
        let page_url = self.dom.document_url();
        let product_page_url = is_product_page(&page_url).then_some(page_url);
        self.dispatch(Msg::MutationTick { product_page_url });
        self.scan_links();
    }

    /// Handles the first intersection of a watched anchor.
    pub fn on_anchor_visible(&mut self, anchor: AnchorId) {
        if let Some(link_id) = self.links_by_anchor.get(&anchor).copied() {
            self.dispatch(Msg::LinkVisible { link_id });
        }
    }

    /// Fixed-period tick: fold in any completed requests, then let the core
    /// decide whether anything needs rendering.
    pub fn on_timer_tick(&mut self) {
        self.drain_service_events();
        self.dispatch(Msg::TimerTick);
    }

    fn scan_links(&mut self) {
        for anchor in self.dom.anchors() {
            if !is_product_page(&anchor.href) || self.links_by_anchor.contains_key(&anchor.id) {
                continue;
            }
            let link_id = self.next_link_id;
            self.next_link_id += 1;
            self.links_by_anchor.insert(anchor.id, link_id);
            self.anchors_by_link.insert(link_id, anchor.id);
            overlay_debug!("Found a link to a product: {}", anchor.href);
            self.dispatch(Msg::ProductLinkSeen {
                link_id,
                url: anchor.href,
            });
        }
    }

    fn drain_service_events(&mut self) {
        while let Some(event) = self.port.try_recv() {
            let Some(target) = self.requests.remove(&event.request_id) else {
                continue;
            };
            let verdict = self.verdict_for(event.result);
            match target {
                RequestTarget::Banner => self.dispatch(Msg::PageVerdict { verdict }),
                RequestTarget::Link(link_id) => {
                    self.dispatch(Msg::LinkVerdict { link_id, verdict })
                }
            }
        }
    }

    fn verdict_for(&self, result: Result<ClassifiedText, ProductError>) -> AllergenVerdict {
        match result {
            Ok(text) => match find_allergens(&text, &self.allergens) {
                Some(found) if !found.is_empty() => {
                    AllergenVerdict::Found(found.into_iter().collect())
                }
                Some(_) => AllergenVerdict::NoneFound,
                None => AllergenVerdict::NoData,
            },
            Err(err) => {
                overlay_debug!("Product data request failed: {err}");
                AllergenVerdict::Failed
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::RequestPageData { url } => self.request(RequestTarget::Banner, url),
            Effect::RequestLinkData { link_id, url } => {
                self.request(RequestTarget::Link(link_id), url)
            }
            Effect::WatchVisibility { link_id } => {
                if let Some(anchor) = self.anchors_by_link.get(&link_id).copied() {
                    self.dom.watch_visibility(anchor);
                }
            }
            Effect::Render(plan) => {
                let banner_applied = self.render(&plan);
                self.dispatch(Msg::RenderApplied { banner_applied });
            }
        }
    }

    fn request(&mut self, target: RequestTarget, url: String) {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.requests.insert(request_id, target);
        self.port.send(request_id, ProductRequest::new(url));
    }

    /// All DOM writes happen here, with mutation observation paused for the
    /// whole plan; the guard releases on every exit path.
    fn render(&mut self, plan: &RenderPlan) -> bool {
        let _paused = self.gate.pause();
        let banner_applied = match &plan.banner {
            Some(banner) => {
                self.dom
                    .apply_banner(BANNER_ELEMENT_ID, &banner.text, banner.css_class.css_class())
            }
            None => true,
        };
        for link in &plan.links {
            if let Some(anchor) = self.anchors_by_link.get(&link.link_id).copied() {
                self.dom
                    .set_link_class(anchor, LINK_CLASS_PREFIX, link.flag.css_suffix());
            }
        }
        banner_applied
    }
}
