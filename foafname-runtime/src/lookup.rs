//! Lookup pipeline
//!
//! Strictly linear:
//! - hash the email into a mailbox identifier
//! - ask the search service for documents mentioning it
//! - fetch and merge those documents into one graph
//! - match persons carrying the identifier and collect their names
//! - resolve the names into unique / ambiguous / not found
//!
//! Each lookup runs inside a `lookup` tracing span carrying the email, so
//! every log line it produces is attributable to that lookup.

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error, info, info_span, Instrument};

use foafname_core::{find_candidates, Candidate, Graph, MailboxId, Resolution};
use foafname_net::{
    create_client, fetch_graph, FetchOptions, HttpConfig, NetError, SearchClient,
    DEFAULT_ENDPOINT,
};

/// Lookup configuration
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Search service endpoint
    pub endpoint: String,
    /// HTTP client settings shared by search and fetches
    pub http: HttpConfig,
    /// Document fetch settings
    pub fetch: FetchOptions,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            http: HttpConfig::default(),
            fetch: FetchOptions::default(),
        }
    }
}

/// Errors that abort a lookup
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Net(#[from] NetError),
}

/// Everything a lookup found, for reporting
#[derive(Debug, Clone)]
pub struct LookupReport {
    pub mailbox: MailboxId,
    /// Document links returned by the search service, in order
    pub links: Vec<String>,
    /// Statements in the merged graph
    pub statements: usize,
    pub candidates: Vec<Candidate>,
    pub resolution: Resolution,
}

/// Resolves email addresses to names
pub struct Resolver {
    client: Client,
    search: SearchClient,
    fetch: FetchOptions,
}

impl Resolver {
    /// Create a resolver with configuration
    pub fn new(config: LookupConfig) -> Result<Self, LookupError> {
        let client = create_client(&config.http)?;
        let search = SearchClient::new(client.clone(), config.endpoint);

        Ok(Self {
            client,
            search,
            fetch: config.fetch,
        })
    }

    /// Look up the person behind an email address.
    ///
    /// # Panics
    ///
    /// Panics if `email` already starts with `mailto:`.
    pub async fn lookup(&self, email: &str) -> Result<LookupReport, LookupError> {
        let mailbox = MailboxId::from_email(email);
        self.lookup_mailbox(email, mailbox).await
    }

    /// Look up a precomputed mailbox identifier; `label` names it in logs
    pub async fn lookup_mailbox(
        &self,
        label: &str,
        mailbox: MailboxId,
    ) -> Result<LookupReport, LookupError> {
        let span = info_span!("lookup", email = %label);
        self.run(label, mailbox).instrument(span).await
    }

    async fn run(&self, label: &str, mailbox: MailboxId) -> Result<LookupReport, LookupError> {
        debug!("Mailbox identifier {}", mailbox);

        let entries = self.search.search(mailbox.as_str()).await?;
        let links: Vec<String> = entries.into_iter().map(|e| e.link).collect();
        info!("Search found {} document(s)", links.len());

        let graph = fetch_graph(&self.client, &links, &self.fetch).await?;
        let report = resolve(label, mailbox, links, &graph);

        Ok(report)
    }
}

/// Match the merged graph and decide the outcome
pub fn resolve(label: &str, mailbox: MailboxId, links: Vec<String>, graph: &Graph) -> LookupReport {
    let candidates = find_candidates(graph, &mailbox);
    let names = candidates.iter().map(|c| c.name.clone()).collect();
    let resolution = Resolution::from_names(names);

    match &resolution {
        Resolution::NotFound => error!("No person found for {}", label),
        Resolution::Unique(name) => info!("Resolved {} to {}", label, name),
        Resolution::Ambiguous(names) => {
            info!("{} matches {} different names", label, names.len())
        }
    }

    LookupReport {
        mailbox,
        links,
        statements: graph.len(),
        candidates,
        resolution,
    }
}
