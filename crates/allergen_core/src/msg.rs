use crate::LinkId;

/// Outcome of matching one product's classified text against the allergen
/// vocabulary. Produced by the host from engine results; the core never
/// talks to the engine directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllergenVerdict {
    /// At least one allergen token matched.
    Found(Vec<String>),
    /// Data was present and no token matched.
    NoneFound,
    /// The page was fetched but carried no ingredient or info text.
    NoData,
    /// The fetch or message round-trip failed.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The DOM mutated. Carries the current page URL when it is a product
    /// page, `None` otherwise.
    MutationTick { product_page_url: Option<String> },
    /// The host found an untracked anchor pointing at a product page.
    ProductLinkSeen { link_id: LinkId, url: String },
    /// A tracked anchor scrolled into the viewport for the first time.
    LinkVisible { link_id: LinkId },
    /// Allergen result for the current page's banner.
    PageVerdict { verdict: AllergenVerdict },
    /// Allergen result for one tracked link.
    LinkVerdict {
        link_id: LinkId,
        verdict: AllergenVerdict,
    },
    /// Fixed-period render tick.
    TimerTick,
    /// The host finished applying a render plan. `banner_applied` is false
    /// when the banner element could not be created yet.
    RenderApplied { banner_applied: bool },
}
