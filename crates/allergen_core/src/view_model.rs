use crate::{BannerClass, LinkFlag, LinkId, OverlayState};

/// Id of the banner element the host inserts under the page's main content.
pub const BANNER_ELEMENT_ID: &str = "ocado-allergen-banner";

/// Prefix shared by all link flag classes; exactly one class with this
/// prefix may be present on a link container at a time.
pub const LINK_CLASS_PREFIX: &str = "ocado-allergen-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerRender {
    pub text: String,
    pub css_class: BannerClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRender {
    pub link_id: LinkId,
    pub flag: LinkFlag,
}

/// Everything the host needs to write to the DOM in one observer-paused
/// section. Links still waiting for first visibility are excluded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderPlan {
    pub banner: Option<BannerRender>,
    pub links: Vec<LinkRender>,
}

pub(crate) fn render_plan(state: &OverlayState) -> RenderPlan {
    let banner = state.banner().needs_update.then(|| BannerRender {
        text: state.banner().text.clone(),
        css_class: state.banner().css_class,
    });
    let links = state
        .links()
        .filter(|(_, link)| !link.watching)
        .map(|(link_id, link)| LinkRender {
            link_id,
            flag: link.flag,
        })
        .collect();
    RenderPlan { banner, links }
}
