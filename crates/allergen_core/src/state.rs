use std::collections::BTreeMap;

pub type LinkId = u64;

/// Visual classification of one tracked product link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFlag {
    /// Tracked, allergen data not yet resolved.
    Loading,
    /// Allergens found, or the product page carried no data (cautious case).
    Flag,
    /// Checked, no allergens found.
    Check,
    /// The fetch itself failed.
    Unknown,
}

impl LinkFlag {
    pub fn css_suffix(self) -> &'static str {
        match self {
            LinkFlag::Loading => "loading",
            LinkFlag::Flag => "flag",
            LinkFlag::Check => "check",
            LinkFlag::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BannerClass {
    Flag,
    Message,
    #[default]
    Hidden,
}

impl BannerClass {
    pub fn css_class(self) -> &'static str {
        match self {
            BannerClass::Flag => "flag",
            BannerClass::Message => "message",
            BannerClass::Hidden => "hidden",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BannerState {
    pub text: String,
    pub css_class: BannerClass,
    pub needs_update: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkState {
    pub url: String,
    pub flag: LinkFlag,
    /// True while the link waits for its first viewport intersection.
    pub watching: bool,
}

/// All mutable overlay state for one page session. Owned by the host
/// session; there is no module-level state anywhere in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlayState {
    banner: BannerState,
    links: BTreeMap<LinkId, LinkState>,
    dirty: bool,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn banner(&self) -> &BannerState {
        &self.banner
    }

    pub fn links(&self) -> impl Iterator<Item = (LinkId, &LinkState)> {
        self.links.iter().map(|(id, link)| (*id, link))
    }

    pub fn link(&self, id: LinkId) -> Option<&LinkState> {
        self.links.get(&id)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Sets the banner text and class; an empty text always hides the banner.
    /// State is only marked stale when the rendered output would change.
    pub(crate) fn set_banner(&mut self, text: &str, css_class: BannerClass) {
        let css_class = if text.is_empty() {
            BannerClass::Hidden
        } else {
            css_class
        };
        if self.banner.text == text && self.banner.css_class == css_class {
            return;
        }
        self.banner.text = text.to_string();
        self.banner.css_class = css_class;
        self.banner.needs_update = true;
        self.dirty = true;
    }

    /// Begins tracking a product link. Returns false if the id is already
    /// tracked (the host deduplicates by element identity, this is a guard).
    pub(crate) fn track_link(&mut self, id: LinkId, url: String) -> bool {
        if self.links.contains_key(&id) {
            return false;
        }
        self.links.insert(
            id,
            LinkState {
                url,
                flag: LinkFlag::Loading,
                watching: true,
            },
        );
        true
    }

    /// Ends visibility tracking for a link and returns its target URL, or
    /// `None` when the link is unknown or already woken (tracking is
    /// one-shot).
    pub(crate) fn wake_link(&mut self, id: LinkId) -> Option<String> {
        let link = self.links.get_mut(&id)?;
        if !link.watching {
            return None;
        }
        link.watching = false;
        let url = link.url.clone();
        self.dirty = true;
        Some(url)
    }

    pub(crate) fn resolve_link(&mut self, id: LinkId, flag: LinkFlag) {
        if let Some(link) = self.links.get_mut(&id) {
            link.flag = flag;
            self.dirty = true;
        }
    }

    pub(crate) fn apply_render_result(&mut self, banner_applied: bool) {
        if banner_applied {
            self.banner.needs_update = false;
        }
        // A missed banner write (no host element yet) keeps the state stale
        // so the next tick retries.
        self.dirty = self.banner.needs_update;
    }
}
