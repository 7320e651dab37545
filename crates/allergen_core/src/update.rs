use crate::view_model::render_plan;
use crate::{AllergenVerdict, BannerClass, Effect, LinkFlag, Msg, OverlayState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: OverlayState, msg: Msg) -> (OverlayState, Vec<Effect>) {
    let effects = match msg {
        Msg::MutationTick { product_page_url } => match product_page_url {
            Some(url) => {
                // Re-issued on every mutation; the engine cache makes the
                // repeat requests cheap.
                vec![Effect::RequestPageData { url }]
            }
            None => {
                state.set_banner("", BannerClass::Hidden);
                Vec::new()
            }
        },
        Msg::ProductLinkSeen { link_id, url } => {
            if state.track_link(link_id, url) {
                vec![Effect::WatchVisibility { link_id }]
            } else {
                Vec::new()
            }
        }
        Msg::LinkVisible { link_id } => {
            // Visibility tracking is one-shot; late notifications for an
            // already-woken or unknown link are dropped.
            match state.wake_link(link_id) {
                Some(url) => vec![Effect::RequestLinkData { link_id, url }],
                None => Vec::new(),
            }
        }
        Msg::PageVerdict { verdict } => {
            let (text, css_class) = banner_for_verdict(&verdict);
            state.set_banner(&text, css_class);
            Vec::new()
        }
        Msg::LinkVerdict { link_id, verdict } => {
            state.resolve_link(link_id, flag_for_verdict(&verdict));
            Vec::new()
        }
        Msg::TimerTick => {
            if state.is_dirty() {
                vec![Effect::Render(render_plan(&state))]
            } else {
                Vec::new()
            }
        }
        Msg::RenderApplied { banner_applied } => {
            state.apply_render_result(banner_applied);
            Vec::new()
        }
    };

    (state, effects)
}

fn banner_for_verdict(verdict: &AllergenVerdict) -> (String, BannerClass) {
    match verdict {
        AllergenVerdict::Found(allergens) => {
            let mut sorted = allergens.clone();
            sorted.sort();
            let list = sorted.join(", ");
            (
                format!(
                    "<b>CAUTION</b>: This product contains or may contain <b>{list}</b>."
                ),
                BannerClass::Flag,
            )
        }
        AllergenVerdict::NoneFound => (
            "No allergens found in ingredient list. Please double check!".to_string(),
            BannerClass::Message,
        ),
        AllergenVerdict::NoData | AllergenVerdict::Failed => (
            "No product data available for this product.".to_string(),
            BannerClass::Flag,
        ),
    }
}

fn flag_for_verdict(verdict: &AllergenVerdict) -> LinkFlag {
    match verdict {
        // Missing data is treated as cautiously as a positive match.
        AllergenVerdict::Found(_) | AllergenVerdict::NoData => LinkFlag::Flag,
        AllergenVerdict::NoneFound => LinkFlag::Check,
        AllergenVerdict::Failed => LinkFlag::Unknown,
    }
}
