//! foafname Core - mailbox hashing, statement graph and FOAF matching
//!
//! This crate holds everything in the lookup that does not touch the
//! network:
//! - Mailbox identifiers (`foaf:mbox_sha1sum`)
//! - The merged statement graph and the RDF readers that fill it
//! - Person/name matching against a mailbox identifier
//! - The final unique/ambiguous/not-found resolution

pub mod mailbox;
pub mod graph;
pub mod syntax;
pub mod rdfxml;
pub mod ntriples;
pub mod matcher;
pub mod resolution;

pub use mailbox::*;
pub use graph::*;
pub use syntax::*;
pub use matcher::*;
pub use resolution::*;

/// URI scheme prefix hashed in front of the email address
pub const MAILTO_PREFIX: &str = "mailto:";

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

pub const FOAF_NS: &str = "http://xmlns.com/foaf/0.1/";
pub const FOAF_PERSON: &str = "http://xmlns.com/foaf/0.1/Person";
pub const FOAF_NAME: &str = "http://xmlns.com/foaf/0.1/name";
pub const FOAF_MBOX_SHA1SUM: &str = "http://xmlns.com/foaf/0.1/mbox_sha1sum";

/// Non-standard spelling found in some published profiles
pub const FOAF_MBOX_SHA1: &str = "http://xmlns.com/foaf/0.1/mbox_sha1";
