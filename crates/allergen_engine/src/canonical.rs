use url::Url;

use crate::ProductError;

const PRODUCT_HOSTS: &[&str] = &["www.ocado.com", "ww2.ocado.com"];

/// Normalizes a product page address into the cache key form: query and
/// fragment stripped, legacy `/webshop/product/<name>/<id>` paths rewritten
/// to `/products/<id>-<name>` with the name lowercased. Idempotent.
pub fn canonicalize_product_url(raw: &str) -> Result<String, ProductError> {
    let mut parsed =
        Url::parse(raw).map_err(|err| ProductError::InvalidUrl(format!("{raw}: {err}")))?;
    parsed.set_query(None);
    parsed.set_fragment(None);
    if let Some(rewritten) = legacy_product_path(&parsed) {
        parsed.set_path(&rewritten);
    }
    Ok(parsed.to_string())
}

fn legacy_product_path(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["webshop", "product", rest @ ..] if rest.len() >= 2 => {
            let name = rest[rest.len() - 2];
            let id = rest[rest.len() - 1];
            Some(format!("/products/{}-{}", id, name.to_lowercase()))
        }
        _ => None,
    }
}

/// Whether an address points at a product detail page on the grocery site,
/// in either the canonical or the legacy path form.
pub fn is_product_page(raw: &str) -> bool {
    let Ok(parsed) = Url::parse(raw) else {
        return false;
    };
    let host_known = parsed
        .host_str()
        .is_some_and(|host| PRODUCT_HOSTS.contains(&host));
    host_known
        && (parsed.path().starts_with("/products/")
            || parsed.path().starts_with("/webshop/product/"))
}
