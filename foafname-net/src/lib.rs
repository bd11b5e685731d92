//! foafname Network Layer
//!
//! Everything that talks HTTP:
//! - Client construction (timeouts, proxy, user agent)
//! - Document search service queries
//! - RDF document fetching and merging

pub mod client;
pub mod search;
pub mod fetch;

pub use client::*;
pub use search::*;
pub use fetch::*;
