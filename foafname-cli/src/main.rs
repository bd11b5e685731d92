//! foafname CLI
//!
//! Prints the name published in FOAF profiles for an email address.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use foafname_core::{MailboxId, Resolution};
use foafname_net::{FailurePolicy, FetchOptions, HttpConfig, DEFAULT_ENDPOINT};
use foafname_runtime::{LookupConfig, Resolver};

#[derive(Parser)]
#[command(name = "foafname")]
#[command(author, version, about = "Look up a person's name from their email address via FOAF profiles", long_about = None)]
struct Cli {
    /// Email address to look up (without a mailto: prefix)
    email: String,

    /// Treat EMAIL as an existing foaf:mbox_sha1sum digest
    #[arg(long)]
    sha1sum: bool,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,

    /// Document search service endpoint
    #[arg(long, env = "FOAFNAME_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Number of documents fetched at once
    #[arg(long, default_value = "1")]
    concurrency: usize,

    /// Skip documents that fail to fetch or parse instead of aborting
    #[arg(long)]
    skip_failed: bool,

    /// Per-request timeout in seconds (default: none)
    #[arg(long)]
    timeout: Option<u64>,

    /// Proxy for all requests, e.g. socks5h://127.0.0.1:9050
    #[arg(long, env = "FOAFNAME_PROXY")]
    proxy: Option<String>,
}

impl Cli {
    fn lookup_config(&self) -> LookupConfig {
        LookupConfig {
            endpoint: self.endpoint.clone(),
            http: HttpConfig {
                timeout_secs: self.timeout,
                proxy: self.proxy.clone(),
                ..Default::default()
            },
            fetch: FetchOptions {
                concurrency: self.concurrency,
                policy: if self.skip_failed {
                    FailurePolicy::Skip
                } else {
                    FailurePolicy::Abort
                },
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    let resolver = Resolver::new(cli.lookup_config())?;

    let report = if cli.sha1sum {
        let Some(mailbox) = MailboxId::parse(&cli.email) else {
            bail!("{} is not a 40 digit hex SHA-1 digest", cli.email);
        };
        resolver.lookup_mailbox(&cli.email, mailbox).await?
    } else {
        resolver.lookup(&cli.email).await?
    };

    let mut stdout = io::stdout().lock();
    report.resolution.write_to(&cli.email, &mut stdout)?;
    stdout.flush()?;

    Ok(exit_status(&report.resolution))
}

fn exit_status(resolution: &Resolution) -> ExitCode {
    ExitCode::from(resolution.exit_code())
}
