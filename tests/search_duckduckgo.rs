use askweb::error::AskWebError;
use askweb::search::{parse_results, DuckDuckGo, SearchAdapter, SearchProvider};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn result_block(index: usize) -> String {
    format!(
        r#"<div class="result results_links results_links_deep web-result ">
  <div class="links_main links_deep result__body">
    <h2 class="result__title">
      <a rel="nofollow" class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fweather{index}.example%2Ftokyo&amp;rut=abc{index}">Tokyo <b>Weather</b> {index}</a>
    </h2>
    <a class="result__snippet" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fweather{index}.example%2Ftokyo">Current <b>weather</b> in Tokyo &amp; forecast {index}</a>
  </div>
</div>"#
    )
}

fn results_page(count: usize) -> String {
    let ad = r#"<div class="result results_links results_links_deep result--ad ">
  <h2 class="result__title">
    <a rel="nofollow" class="result__a" href="https://duckduckgo.com/y.js?ad_domain=umbrellas.example&amp;u3=x">Buy umbrellas</a>
  </h2>
  <a class="result__snippet" href="https://duckduckgo.com/y.js?ad_domain=umbrellas.example">Best umbrellas in Tokyo</a>
</div>"#;

    let organic: String = (0..count).map(result_block).collect();
    format!("<html><body><div id=\"links\">{}{}</div></body></html>", ad, organic)
}

#[test]
fn parse_skips_ads_and_unwraps_links() {
    let records = parse_results(&results_page(2), 5);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["title"], "Tokyo Weather 0");
    assert_eq!(records[0]["href"], "https://weather0.example/tokyo");
    assert_eq!(records[0]["body"], "Current weather in Tokyo & forecast 0");
    assert_eq!(records[1]["title"], "Tokyo Weather 1");
}

#[test]
fn parse_respects_max_results() {
    let records = parse_results(&results_page(8), 5);
    assert_eq!(records.len(), 5);
    assert_eq!(records[4]["title"], "Tokyo Weather 4");
}

#[test]
fn parse_result_without_snippet_has_no_body() {
    let html = r#"<a rel="nofollow" class="result__a" href="https://plain.example/">Plain</a>"#;
    let records = parse_results(html, 5);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["href"], "https://plain.example/");
    assert!(records[0].get("body").is_none());
}

#[test]
fn parse_empty_page() {
    assert!(parse_results("<html><body>No results.</body></html>", 5).is_empty());
}

#[tokio::test]
async fn provider_posts_query_and_parses_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/html/"))
        .and(body_string_contains("q=Tokyo+weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(3)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = DuckDuckGo::new(reqwest::Client::new(), server.uri());
    let records = provider.text("Tokyo weather", 5).await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[2]["href"], "https://weather2.example/tokyo");
}

#[tokio::test]
async fn adapter_caps_and_normalizes_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(9)))
        .mount(&server)
        .await;

    let provider = Arc::new(DuckDuckGo::new(reqwest::Client::new(), server.uri()));
    let adapter = SearchAdapter::new(provider, 5);
    let results = adapter.search("Tokyo weather").await.unwrap();

    assert_eq!(results.len(), 5);
    assert_eq!(results[0].content, "Current weather in Tokyo & forecast 0");
    assert_eq!(results[0].title.as_deref(), Some("Tokyo Weather 0"));
    assert_eq!(results[0].url.as_deref(), Some("https://weather0.example/tokyo"));
}

#[tokio::test]
async fn rate_limit_is_a_search_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(202).set_body_string("anomaly"))
        .mount(&server)
        .await;

    let provider = DuckDuckGo::new(reqwest::Client::new(), server.uri());
    let err = provider.text("Tokyo weather", 5).await.unwrap_err();

    assert!(matches!(err, AskWebError::SearchError(ref msg) if msg.contains("rate limit")));
    assert!(err.is_provider_unavailable());
}

#[tokio::test]
async fn server_error_is_a_search_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = DuckDuckGo::new(reqwest::Client::new(), server.uri());
    let err = provider.text("Tokyo weather", 5).await.unwrap_err();

    assert!(matches!(err, AskWebError::SearchError(ref msg) if msg.contains("503")));
}
