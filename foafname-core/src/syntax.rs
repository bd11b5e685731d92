//! RDF serializations understood by the fetcher
//!
//! Profiles are overwhelmingly RDF/XML; N-Triples is accepted as well
//! since some indexes serve extracted triples in that form.

use thiserror::Error;

use crate::{ntriples, rdfxml, Triple};

/// Errors from parsing a fetched document
#[derive(Debug, Error)]
pub enum RdfError {
    #[error("Malformed XML: {0}")]
    Xml(String),

    #[error("Invalid RDF/XML: {0}")]
    Syntax(String),

    #[error("Undeclared namespace prefix: {0}")]
    UnknownPrefix(String),

    #[error("N-Triples line {line}: {message}")]
    NTriples { line: usize, message: String },
}

/// Serialization of a fetched document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RdfFormat {
    #[default]
    RdfXml,
    NTriples,
}

impl RdfFormat {
    /// Guess the format from a Content-Type header and the document URL.
    ///
    /// Anything unrecognised is treated as RDF/XML, which is what FOAF
    /// publishers serve under a zoo of media types.
    pub fn detect(content_type: Option<&str>, url: &str) -> Self {
        let media_type = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        match media_type.as_deref() {
            Some("application/n-triples") => return RdfFormat::NTriples,
            Some("application/rdf+xml") => return RdfFormat::RdfXml,
            _ => {}
        }

        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.ends_with(".nt") {
            RdfFormat::NTriples
        } else {
            RdfFormat::RdfXml
        }
    }

    /// Parse a raw document body.
    ///
    /// RDF/XML carries its own encoding; N-Triples is always UTF-8.
    pub fn parse(self, input: &[u8], base_iri: &str) -> Result<Vec<Triple>, RdfError> {
        match self {
            RdfFormat::RdfXml => rdfxml::parse(input, base_iri),
            RdfFormat::NTriples => {
                let input = std::str::from_utf8(input).map_err(|e| RdfError::NTriples {
                    line: 0,
                    message: format!("document is not UTF-8: {e}"),
                })?;
                ntriples::parse(input)
            }
        }
    }
}

/// Resolve a (possibly relative) IRI reference against a base IRI.
///
/// Covers the references found in practice in RDF/XML: absolute IRIs,
/// fragments, network-path, absolute-path and relative-path references
/// with dot segments.
pub fn resolve_iri(base: &str, reference: &str) -> String {
    if has_scheme(reference) || base.is_empty() {
        return reference.to_string();
    }

    let base_no_fragment = base.split('#').next().unwrap_or(base);

    if reference.is_empty() {
        return base_no_fragment.to_string();
    }
    if reference.starts_with('#') {
        return format!("{base_no_fragment}{reference}");
    }

    let scheme_end = base.find(':').map(|i| i + 1).unwrap_or(0);
    let scheme = &base[..scheme_end];

    if reference.starts_with("//") {
        return format!("{scheme}{reference}");
    }

    let rest = &base_no_fragment[scheme_end..];
    let (authority, base_path) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find(['/', '?']).unwrap_or(after.len());
            (format!("//{}", &after[..end]), &after[end..])
        }
        None => (String::new(), rest),
    };
    let base_path = base_path.split('?').next().unwrap_or(base_path);

    if reference.starts_with('?') {
        return format!("{scheme}{authority}{base_path}{reference}");
    }

    let (ref_path, suffix) = match reference.find(['?', '#']) {
        Some(i) => reference.split_at(i),
        None => (reference, ""),
    };

    let merged = if ref_path.starts_with('/') {
        ref_path.to_string()
    } else {
        match base_path.rfind('/') {
            Some(i) => format!("{}{}", &base_path[..=i], ref_path),
            None if !authority.is_empty() => format!("/{ref_path}"),
            None => ref_path.to_string(),
        }
    };

    format!("{scheme}{authority}{}{suffix}", remove_dot_segments(&merged))
}

fn has_scheme(reference: &str) -> bool {
    match reference.find(':') {
        Some(i) if i > 0 => {
            let scheme = &reference[..i];
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

fn remove_dot_segments(path: &str) -> String {
    let mut output: Vec<&str> = Vec::new();
    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len().saturating_sub(1);

    for (i, segment) in segments.iter().enumerate() {
        match *segment {
            "." => {
                if i == last {
                    output.push("");
                }
            }
            ".." => {
                if output.len() > 1 {
                    output.pop();
                }
                if i == last {
                    output.push("");
                }
            }
            s => output.push(s),
        }
    }

    output.join("/")
}
