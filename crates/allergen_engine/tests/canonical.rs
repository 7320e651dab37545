use allergen_engine::{canonicalize_product_url, is_product_page, ProductError};

#[test]
fn legacy_product_path_is_rewritten() {
    let canonical =
        canonicalize_product_url("https://site/webshop/product/Cheddar-Cheese/12345?x=1").unwrap();
    assert_eq!(canonical, "https://site/products/12345-cheddar-cheese");
}

#[test]
fn query_and_fragment_are_stripped() {
    let canonical =
        canonicalize_product_url("https://site/products/12345-cheddar?ref=promo#reviews").unwrap();
    assert_eq!(canonical, "https://site/products/12345-cheddar");
}

#[test]
fn canonicalization_is_idempotent() {
    let inputs = [
        "https://site/webshop/product/Cheddar-Cheese/12345?x=1",
        "https://site/products/12345-cheddar-cheese",
        "https://site/trolley",
        "https://site/",
    ];
    for input in inputs {
        let once = canonicalize_product_url(input).unwrap();
        let twice = canonicalize_product_url(&once).unwrap();
        assert_eq!(once, twice, "not idempotent for {input}");
    }
}

#[test]
fn non_product_paths_pass_through() {
    let canonical = canonicalize_product_url("https://site/browse/dairy?page=2").unwrap();
    assert_eq!(canonical, "https://site/browse/dairy");
}

#[test]
fn trailing_slash_on_legacy_path_is_tolerated() {
    let canonical =
        canonicalize_product_url("https://site/webshop/product/Cheddar-Cheese/12345/").unwrap();
    assert_eq!(canonical, "https://site/products/12345-cheddar-cheese");
}

#[test]
fn malformed_url_is_rejected() {
    let err = canonicalize_product_url("not a url").unwrap_err();
    assert!(matches!(err, ProductError::InvalidUrl(_)));
}

#[test]
fn product_page_detection_covers_both_path_forms() {
    assert!(is_product_page(
        "https://www.ocado.com/products/12345-cheddar-cheese"
    ));
    assert!(is_product_page(
        "https://ww2.ocado.com/webshop/product/Cheddar-Cheese/12345"
    ));
    assert!(!is_product_page("https://www.ocado.com/trolley"));
    assert!(!is_product_page("https://elsewhere.example/products/1-x"));
    assert!(!is_product_page("not a url"));
}
