use std::time::Duration;

use allergen_engine::{FetchSettings, PageFetcher, ProductError, ReqwestPageFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetcher_returns_page_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/1-cheddar"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestPageFetcher::new(FetchSettings::default());
    let url = format!("{}/products/1-cheddar", server.uri());

    let text = fetcher.fetch_page(&url).await.expect("fetch ok");
    assert_eq!(text, "<html>ok</html>");
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestPageFetcher::new(FetchSettings::default());
    let url = format!("{}/missing", server.uri());

    let err = fetcher.fetch_page(&url).await.unwrap_err();
    assert_eq!(err, ProductError::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestPageFetcher::new(settings);
    let url = format!("{}/slow", server.uri());

    let err = fetcher.fetch_page(&url).await.unwrap_err();
    assert_eq!(err, ProductError::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_malformed_urls() {
    let fetcher = ReqwestPageFetcher::new(FetchSettings::default());
    let err = fetcher.fetch_page("not a url").await.unwrap_err();
    assert!(matches!(err, ProductError::InvalidUrl(_)));
}
