//! DuckDuckGo HTML search
//!
//! Fetches the no-JavaScript results page and keeps the text of each
//! `.result__title` element, in page order.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use tracing::{debug, info};

use super::{SearchError, SearchOutcome, SearchProvider, MAX_SNIPPETS};
use crate::pipeline::Query;

pub const DUCKDUCKGO_HTML_URL: &str = "https://html.duckduckgo.com/html/";

pub struct DuckDuckGoHtml {
    client: Client,
    endpoint: String,
}

impl DuckDuckGoHtml {
    pub fn new(client: Client) -> Self {
        Self::with_endpoint(client, DUCKDUCKGO_HTML_URL)
    }

    pub fn with_endpoint(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoHtml {
    async fn search(&self, query: &Query) -> Result<SearchOutcome, SearchError> {
        info!(query = %query, "Searching DuckDuckGo (html)");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query.as_str())])
            .send()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SearchError::Status(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;

        let titles = extract_result_titles(&html)?;
        debug!(count = titles.len(), results = ?titles, "Search tool results");
        Ok(SearchOutcome::from_snippets(titles))
    }

    fn name(&self) -> &str {
        "duckduckgo-html"
    }
}

/// Text of every non-empty `.result__title`, first [`MAX_SNIPPETS`] only
pub fn extract_result_titles(html: &str) -> Result<Vec<String>, SearchError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse(".result__title").map_err(|e| SearchError::Parse(e.to_string()))?;

    let titles = document
        .select(&selector)
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .take(MAX_SNIPPETS)
        .collect();

    Ok(titles)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn results_page(titles: &[&str]) -> String {
        let body: String = titles
            .iter()
            .map(|t| {
                format!(
                    r#"<div class="result"><h2 class="result__title">
                         <a class="result__a" href="https://example.com">{}</a>
                       </h2><a class="result__snippet">snippet</a></div>"#,
                    t
                )
            })
            .collect();
        format!("<html><body><div id=\"links\">{}</div></body></html>", body)
    }

    #[test]
    fn test_extract_keeps_first_ten_in_order() {
        let titles: Vec<String> = (1..=15).map(|i| format!("Title {}", i)).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();

        let extracted = extract_result_titles(&results_page(&refs)).unwrap();

        assert_eq!(extracted.len(), 10);
        assert_eq!(extracted, titles[..10].to_vec());
    }

    #[test]
    fn test_extract_skips_blank_titles_and_collapses_whitespace() {
        let html = r#"<html><body>
            <h2 class="result__title">   </h2>
            <h2 class="result__title"><a>Rust   <b>async</b>
                book</a></h2>
        </body></html>"#;
        assert_eq!(extract_result_titles(html).unwrap(), vec!["Rust async book"]);
    }

    #[test]
    fn test_extract_no_results() {
        let html = "<html><body><div class=\"no-results\">No results.</div></body></html>";
        assert!(extract_result_titles(html).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_encodes_query_and_parses_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/html/")
            .match_query(Matcher::UrlEncoded("q".into(), "quantum computing".into()))
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(results_page(&["Article A", "Article B"]))
            .create_async()
            .await;

        let provider = DuckDuckGoHtml::with_endpoint(Client::new(), &format!("{}/html/", server.url()));
        let query = Query::parse("quantum computing").unwrap();
        let outcome = provider.search(&query).await.unwrap();

        mock.assert_async().await;
        match outcome {
            SearchOutcome::Found(results) => {
                assert_eq!(results.snippets(), &["Article A".to_string(), "Article B".to_string()]);
            }
            SearchOutcome::Empty => panic!("expected results"),
        }
    }

    #[tokio::test]
    async fn test_search_empty_page() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/html/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html><body></body></html>")
            .create_async()
            .await;

        let provider = DuckDuckGoHtml::with_endpoint(Client::new(), &format!("{}/html/", server.url()));
        let outcome = provider.search(&Query::parse("zzzz").unwrap()).await.unwrap();
        assert_eq!(outcome, SearchOutcome::Empty);
    }

    #[tokio::test]
    async fn test_search_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/html/")
            .match_query(Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let provider = DuckDuckGoHtml::with_endpoint(Client::new(), &format!("{}/html/", server.url()));
        let err = provider.search(&Query::parse("rust").unwrap()).await.unwrap_err();
        assert_eq!(err, SearchError::Status(403));
    }

    #[tokio::test]
    async fn test_search_accepted_status_is_not_a_listing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/html/")
            .match_query(Matcher::Any)
            .with_status(202)
            .with_body("<html><body></body></html>")
            .create_async()
            .await;

        let provider = DuckDuckGoHtml::with_endpoint(Client::new(), &format!("{}/html/", server.url()));
        let err = provider.search(&Query::parse("rust").unwrap()).await.unwrap_err();
        assert_eq!(err, SearchError::Status(202));
        assert_eq!(err.to_string(), "Error fetching data from DuckDuckGo. Status code: 202");
    }
}
