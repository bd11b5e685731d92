//! RDF document fetching
//!
//! Fetches every search hit and merges its statements into one graph.
//! Documents may be fetched concurrently but are always merged in search
//! order, so the resulting graph does not depend on timing.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, info, warn};

use foafname_core::{Graph, RdfFormat, Triple};

use crate::NetError;

/// Media types we can parse, most preferred first
const ACCEPT_RDF: &str = "application/rdf+xml, application/n-triples;q=0.9, */*;q=0.1";

/// What to do when a single document cannot be fetched or parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole lookup on the first failure
    #[default]
    Abort,
    /// Log a warning and continue with the remaining documents
    Skip,
}

/// Fetch settings
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Documents in flight at once (1 = one after another)
    pub concurrency: usize,
    pub policy: FailurePolicy,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            policy: FailurePolicy::Abort,
        }
    }
}

/// A fetched document body
#[derive(Debug, Clone)]
pub struct Document {
    /// URL as listed by the search service
    pub url: String,
    /// URL after redirects, used as the base IRI
    pub final_url: String,
    pub content_type: Option<String>,
    /// Raw body; the parser decides how it is encoded
    pub body: Vec<u8>,
}

impl Document {
    pub fn format(&self) -> RdfFormat {
        RdfFormat::detect(self.content_type.as_deref(), &self.final_url)
    }

    /// Parse the body into triples
    pub fn parse(&self) -> Result<Vec<Triple>, NetError> {
        self.format()
            .parse(&self.body, &self.final_url)
            .map_err(|source| NetError::Document {
                url: self.url.clone(),
                source,
            })
    }
}

/// Fetch a single document
pub async fn fetch_document(client: &Client, url: &str) -> Result<Document, NetError> {
    let response = client.get(url).header(ACCEPT, ACCEPT_RDF).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(NetError::Status {
            url: url.to_string(),
            status,
        });
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await?.to_vec();

    Ok(Document {
        url: url.to_string(),
        final_url,
        content_type,
        body,
    })
}

/// Drop repeated links, keeping first occurrence order
pub fn unique_links<'a>(links: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(*link))
        .map(str::to_string)
        .collect()
}

/// Fetch and parse every link, merging the results into one graph
pub async fn fetch_graph(
    client: &Client,
    links: &[String],
    options: &FetchOptions,
) -> Result<Graph, NetError> {
    let links = unique_links(links.iter().map(String::as_str));

    let results = stream::iter(links)
        .map(|url| {
            let client = client.clone();
            async move {
                info!("Fetching {}", url);
                let triples = match fetch_document(&client, &url).await {
                    Ok(document) => document.parse(),
                    Err(e) => Err(e),
                };
                (url, triples)
            }
        })
        .buffered(options.concurrency.max(1));
    let mut results = std::pin::pin!(results);

    let mut graph = Graph::new();
    let mut skipped = 0usize;

    while let Some((url, triples)) = results.next().await {
        match triples {
            Ok(triples) => {
                let parsed = triples.len();
                let added = graph.merge_document(triples);
                debug!("{}: {} statements, {} new", url, parsed, added);
            }
            Err(e) if options.policy == FailurePolicy::Skip => {
                warn!("Skipping {}: {}", url, e);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if skipped > 0 {
        warn!("{} document(s) skipped", skipped);
    }
    info!("Graph has {} statements", graph.len());

    Ok(graph)
}
