//! FOAF name matching
//!
//! Equivalent to the graph pattern
//!
//! ```text
//! ?person a foaf:Person ;
//!         foaf:mbox_sha1sum ?mbox ;
//!         foaf:name ?name .
//! ```
//!
//! with `?mbox` bound to the mailbox identifier, evaluated as a join on
//! subject over the merged graph. `foaf:mbox_sha1` is accepted as an alias
//! of `foaf:mbox_sha1sum`.

use std::collections::BTreeSet;

use tracing::debug;

use crate::{
    Graph, MailboxId, Term, FOAF_MBOX_SHA1, FOAF_MBOX_SHA1SUM, FOAF_NAME, FOAF_PERSON,
};

/// A person node whose mailbox hash matched, with one of its names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub person: Term,
    pub name: String,
}

/// Every (person, name) pair matching the mailbox identifier
pub fn find_candidates(graph: &Graph, mailbox: &MailboxId) -> Vec<Candidate> {
    let mut persons: Vec<&Term> = Vec::new();

    for triple in graph {
        let is_mbox = triple.predicate.is_iri(FOAF_MBOX_SHA1SUM)
            || triple.predicate.is_iri(FOAF_MBOX_SHA1);
        if !is_mbox {
            continue;
        }
        let Some(value) = triple.object.as_literal() else {
            continue;
        };
        if mailbox.matches(value) && !persons.contains(&&triple.subject) {
            persons.push(&triple.subject);
        }
    }

    let mut candidates = Vec::new();
    for person in persons {
        if !graph.has_type(person, FOAF_PERSON) {
            debug!("{} carries the mailbox hash but is not a foaf:Person", person);
            continue;
        }
        for name in graph.objects(person, FOAF_NAME).filter_map(Term::as_literal) {
            let candidate = Candidate {
                person: person.clone(),
                name: name.to_string(),
            };
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    debug!("{} candidate name(s) for {}", candidates.len(), mailbox);
    candidates
}

/// Distinct names of the matching persons
pub fn find_names(graph: &Graph, mailbox: &MailboxId) -> BTreeSet<String> {
    find_candidates(graph, mailbox)
        .into_iter()
        .map(|c| c.name)
        .collect()
}
