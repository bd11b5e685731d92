//! Document search service client
//!
//! Asks a semantic-web document index for documents mentioning a term and
//! returns the raw entries; only `link` is used downstream.

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::NetError;

/// Search endpoint queried when none is configured
pub const DEFAULT_ENDPOINT: &str = "http://api.sindice.com/v2/search";

/// One candidate document.
///
/// Entries also carry `title`, `updated` and `formats`, in whatever shape
/// the index chooses; they are not read, so they cannot fail a search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchEntry {
    /// Document URL
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    entries: Vec<SearchEntry>,
}

/// Client for the document search service
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    endpoint: String,
}

impl SearchClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the term query URL
    pub fn build_url(&self, term: &str) -> String {
        format!("{}?qt=term&q={}", self.endpoint, urlencoding::encode(term))
    }

    /// Query the service and return its entries in the order given
    pub async fn search(&self, term: &str) -> Result<Vec<SearchEntry>, NetError> {
        let url = self.build_url(term);

        info!("Querying search service for {}", term);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetError::Status { url, status });
        }

        let body = response.text().await?;
        let entries = parse_response(&body)?;

        debug!("Search returned {} entries", entries.len());
        Ok(entries)
    }
}

/// Decode a search response body
pub fn parse_response(body: &str) -> Result<Vec<SearchEntry>, NetError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SearchClient {
        SearchClient::new(Client::new(), DEFAULT_ENDPOINT)
    }

    #[test]
    fn test_build_url() {
        let url = client().build_url("d714b8a95bd857a37405a7b56db9108b60ae42bd");
        assert_eq!(
            url,
            "http://api.sindice.com/v2/search?qt=term&q=d714b8a95bd857a37405a7b56db9108b60ae42bd"
        );
    }

    #[test]
    fn test_build_url_encodes_term() {
        let url = client().build_url("ada lovelace&co");
        assert!(url.ends_with("q=ada%20lovelace%26co"));
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "author": "Sindice",
            "totalResults": 2,
            "entries": [
                {
                    "title": ["Ada's FOAF"],
                    "link": "http://example.org/ada.rdf",
                    "updated": "2011-03-02",
                    "formats": ["RDF"]
                },
                {
                    "title": "Mirror",
                    "link": "http://mirror.example.org/ada.rdf",
                    "extra": {"ignored": true}
                }
            ]
        }"#;

        let entries = parse_response(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].link, "http://example.org/ada.rdf");
        assert_eq!(entries[1].link, "http://mirror.example.org/ada.rdf");
    }

    #[test]
    fn test_parse_response_tolerates_odd_metadata() {
        let body = r#"{"entries": [
            {"link": "http://example.org/ada.rdf", "updated": 1299024000, "title": 42},
            {"link": "http://example.org/b.rdf", "formats": {"rdf": true}, "title": null}
        ]}"#;

        let links: Vec<String> = parse_response(body)
            .unwrap()
            .into_iter()
            .map(|e| e.link)
            .collect();
        assert_eq!(links, vec!["http://example.org/ada.rdf", "http://example.org/b.rdf"]);
    }

    #[test]
    fn test_parse_response_empty_entries() {
        assert!(parse_response(r#"{"totalResults": 0, "entries": []}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_parse_response_without_entries() {
        assert!(matches!(
            parse_response(r#"{"totalResults": 0}"#),
            Err(NetError::Json(_))
        ));
    }

    #[test]
    fn test_parse_response_malformed() {
        assert!(matches!(parse_response("<html>"), Err(NetError::Json(_))));
        assert!(parse_response(r#"{"entries": [{"title": "no link"}]}"#).is_err());
    }
}
