//! Statement graph - the accumulator every fetched document merges into
//!
//! The graph is append-only. Identical triples are stored once, and blank
//! node labels are rewritten per merged document so that `_:a` in one
//! profile never aliases `_:a` in another.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

/// An RDF term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// Absolute IRI
    Iri(String),
    /// Blank node label (document scoped until merged)
    Blank(String),
    /// Literal with optional datatype IRI or language tag
    Literal {
        value: String,
        datatype: Option<String>,
        lang: Option<String>,
    },
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Term::Blank(label.into())
    }

    /// Plain literal
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Lexical value of a literal
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Term::Literal { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }

    pub fn is_iri(&self, iri: &str) -> bool {
        self.as_iri() == Some(iri)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Blank(label) => write!(f, "_:{label}"),
            Term::Literal {
                value,
                datatype,
                lang,
            } => {
                write!(f, "{value:?}")?;
                if let Some(lang) = lang {
                    write!(f, "@{lang}")?;
                } else if let Some(datatype) = datatype {
                    write!(f, "^^<{datatype}>")?;
                }
                Ok(())
            }
        }
    }
}

/// A subject-predicate-object statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Merged statements from every fetched document
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Insertion order is kept so output is stable across runs
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
    /// Number of documents merged so far, used to scope blank nodes
    documents: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single triple; returns false if it was already present
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.seen.contains(&triple) {
            return false;
        }
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    /// Merge the triples parsed from one document.
    ///
    /// Returns the number of statements that were new to the graph.
    pub fn merge_document(&mut self, triples: impl IntoIterator<Item = Triple>) -> usize {
        self.documents += 1;
        let scope = self.documents;

        let relabel = |term: Term| match term {
            Term::Blank(label) => Term::Blank(format!("d{scope}_{label}")),
            other => other,
        };

        let mut added = 0;
        for triple in triples {
            let triple = Triple::new(
                relabel(triple.subject),
                triple.predicate,
                relabel(triple.object),
            );
            if self.insert(triple) {
                added += 1;
            }
        }

        debug!("Merged document {} ({} new statements)", scope, added);
        added
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Number of documents merged
    pub fn document_count(&self) -> usize {
        self.documents
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.seen.contains(triple)
    }

    /// Triples matching a pattern; `None` is a wildcard
    pub fn matching<'a>(
        &'a self,
        subject: Option<&'a Term>,
        predicate: Option<&'a str>,
        object: Option<&'a Term>,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| {
            subject.is_none_or(|s| &t.subject == s)
                && predicate.is_none_or(|p| t.predicate.is_iri(p))
                && object.is_none_or(|o| &t.object == o)
        })
    }

    /// Objects of `subject predicate ?o`
    pub fn objects<'a>(
        &'a self,
        subject: &'a Term,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.matching(Some(subject), Some(predicate), None)
            .map(|t| &t.object)
    }

    /// Does `subject rdf:type class` hold?
    pub fn has_type(&self, subject: &Term, class: &str) -> bool {
        self.objects(subject, crate::RDF_TYPE)
            .any(|o| o.is_iri(class))
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
