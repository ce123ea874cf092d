use super::SearchProvider;
use crate::error::{AskWebError, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use serde_json::{json, Map, Value};
use std::sync::OnceLock;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Scrapes the DuckDuckGo HTML frontend. Records look like
/// `{"title", "href", "body"}`.
pub struct DuckDuckGo {
    http: reqwest::Client,
    endpoint: String,
}

impl DuckDuckGo {
    pub const DEFAULT_ENDPOINT: &'static str = "https://html.duckduckgo.com";

    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGo {
    async fn text(&self, query: &str, max_results: usize) -> Result<Vec<Value>> {
        let url = format!("{}/html/", self.endpoint.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .form(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        // DuckDuckGo answers 202 with a challenge page when it rate limits.
        if status == StatusCode::ACCEPTED {
            return Err(AskWebError::SearchError(
                "DuckDuckGo rate limit reached".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(AskWebError::SearchError(format!(
                "DuckDuckGo returned status {}",
                status.as_u16()
            )));
        }

        let html = response.text().await?;
        Ok(parse_results(&html, max_results))
    }
}

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#)
            .expect("title pattern is valid")
    })
}

fn snippet_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<a[^>]*class="result__snippet"[^>]*>(.*?)</a>"#)
            .expect("snippet pattern is valid")
    })
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
}

fn strip_markup(fragment: &str) -> String {
    let without_tags = tag_regex().replace_all(fragment, "");
    let decoded = html_escape::decode_html_entities(&without_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turn a result link into the target URL, unwrapping `/l/?uddg=` redirects.
fn resolve_href(raw: &str) -> String {
    let href = html_escape::decode_html_entities(raw).to_string();
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.clone()
    };

    match reqwest::Url::parse(&absolute) {
        Ok(url) if url.path() == "/l/" => url
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, target)| target.into_owned())
            .unwrap_or(absolute),
        Ok(_) => absolute,
        Err(_) => href,
    }
}

fn is_ad(href: &str) -> bool {
    href.contains("duckduckgo.com/y.js") || href.contains("ad_domain=")
}

/// Extract up to `max_results` organic results from a DuckDuckGo HTML page.
pub fn parse_results(html: &str, max_results: usize) -> Vec<Value> {
    let titles: Vec<(usize, usize, &str, &str)> = title_regex()
        .captures_iter(html)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            Some((whole.start(), whole.end(), cap.get(1)?.as_str(), cap.get(2)?.as_str()))
        })
        .collect();

    let mut records = Vec::new();
    for (index, (_, end, href, title)) in titles.iter().enumerate() {
        if records.len() >= max_results {
            break;
        }
        if is_ad(href) {
            continue;
        }

        // The snippet for this result sits before the next result's title.
        let section_end = titles
            .get(index + 1)
            .map(|(start, ..)| *start)
            .unwrap_or(html.len());
        let section = &html[*end..section_end];

        let mut record = Map::new();
        record.insert("title".to_string(), json!(strip_markup(title)));
        record.insert("href".to_string(), json!(resolve_href(href)));
        if let Some(snippet) = snippet_regex()
            .captures(section)
            .and_then(|cap| cap.get(1))
        {
            record.insert("body".to_string(), json!(strip_markup(snippet.as_str())));
        }
        records.push(Value::Object(record));
    }

    records
}
