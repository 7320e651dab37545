//! Allergen overlay core: pure reconciler state machine and render plan.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{AllergenVerdict, Msg};
pub use state::{BannerClass, BannerState, LinkFlag, LinkId, LinkState, OverlayState};
pub use update::update;
pub use view_model::{BannerRender, LinkRender, RenderPlan, BANNER_ELEMENT_ID, LINK_CLASS_PREFIX};
