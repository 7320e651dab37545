use crate::{LinkId, RenderPlan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Request allergen data for the current page (banner).
    RequestPageData { url: String },
    /// Start one-shot viewport visibility tracking for a link.
    WatchVisibility { link_id: LinkId },
    /// Request allergen data for one tracked link.
    RequestLinkData { link_id: LinkId, url: String },
    /// Apply DOM writes. The host must pause mutation observation around
    /// the whole plan and report back with `Msg::RenderApplied`.
    Render(RenderPlan),
}
