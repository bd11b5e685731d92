//! HTTP client construction
//!
//! One client is built per lookup and shared by the search call and every
//! document fetch.

use reqwest::{Client, Proxy};
use std::time::Duration;
use thiserror::Error;

use foafname_core::RdfError;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Per-request timeout in seconds (none by default)
    pub timeout_secs: Option<u64>,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Optional proxy URL, e.g. `socks5h://127.0.0.1:9050`
    pub proxy: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: format!("foafname/{}", env!("CARGO_PKG_VERSION")),
            proxy: None,
        }
    }
}

/// Errors from the search service or document fetches
#[derive(Debug, Error)]
pub enum NetError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed search response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse {url}: {source}")]
    Document {
        url: String,
        #[source]
        source: RdfError,
    },
}

/// Create the HTTP client used for a lookup
pub fn create_client(config: &HttpConfig) -> Result<Client, NetError> {
    let mut builder = Client::builder().user_agent(config.user_agent.as_str());

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    if let Some(proxy) = &config.proxy {
        let proxy = Proxy::all(proxy).map_err(|e| NetError::ClientBuild(e.to_string()))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| NetError::ClientBuild(e.to_string()))
}
