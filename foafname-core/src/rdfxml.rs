//! RDF/XML reader
//!
//! A streaming reader over quick-xml events. It covers the grammar FOAF
//! documents use in practice:
//! - `rdf:Description` and typed node elements (`<foaf:Person>`)
//! - `rdf:about`, `rdf:ID`, `rdf:nodeID` and anonymous nodes
//! - property attributes on node and empty property elements
//! - `rdf:resource`, `rdf:nodeID`, `rdf:datatype` on property elements
//! - nested node elements as property values
//! - `rdf:parseType` `Resource`, `Literal` and `Collection`
//! - `rdf:li` container membership
//! - `xml:lang` and `xml:base` inheritance
//! - internal `<!ENTITY>` declarations from the DOCTYPE
//! - any encoding named in the XML declaration
//!
//! Reification via `rdf:ID` on property elements is not produced.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use quick_xml::encoding::Decoder;
use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use regex::Regex;

use crate::syntax::resolve_iri;
use crate::{RdfError, Term, Triple, RDF_NS, RDF_TYPE};

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
const XML_LANG: &str = "xml:lang";
const XML_BASE: &str = "xml:base";

const RDF_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#RDF";
const RDF_DESCRIPTION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Description";
const RDF_ABOUT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#about";
const RDF_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#ID";
const RDF_NODE_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nodeID";
const RDF_RESOURCE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#resource";
const RDF_DATATYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#datatype";
const RDF_PARSE_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#parseType";
const RDF_LI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#li";
const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
const RDF_XML_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";

/// Unprefixed attribute names older documents use in place of `rdf:` ones
const LEGACY_RDF_ATTRIBUTES: &[&str] = &["about", "ID", "nodeID", "resource", "parseType", "datatype"];

/// General entity declarations in a DOCTYPE internal subset
static ENTITY_DECL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!ENTITY\s+([A-Za-z_][\w.:-]*)\s+(?:"([^"]*)"|'([^']*)')\s*>"#).unwrap()
});

/// Parse an RDF/XML document, resolving relative IRIs against `base_iri`.
///
/// The input is raw bytes; the encoding comes from a byte order mark or
/// the XML declaration and defaults to UTF-8.
pub fn parse(input: impl AsRef<[u8]>, base_iri: &str) -> Result<Vec<Triple>, RdfError> {
    let mut reader = NsReader::from_reader(input.as_ref());
    let mut parser = Parser::new(base_iri);
    let mut entities = Entities::default();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| RdfError::Xml(format!("{} at byte {}", e, reader.buffer_position())))?;

        match event {
            Event::DocType(doctype) => {
                let doctype = decode(reader.decoder(), &doctype)?;
                entities = Entities::declared_in(&doctype);
            }
            Event::Start(start) => {
                let element = Element::read(&reader, &start, &entities)?;
                parser.start(element)?;
            }
            Event::Empty(start) => {
                let element = Element::read(&reader, &start, &entities)?;
                let raw_name = element.raw_name.clone();
                if parser.start(element.into_empty())? {
                    parser.end(&raw_name)?;
                }
            }
            Event::End(end) => {
                let raw_name = decode(reader.decoder(), end.name().into_inner())?;
                parser.end(&raw_name)?;
            }
            Event::Text(text) => {
                let raw = decode(reader.decoder(), &text)?;
                let value = text
                    .unescape_with(|name| entities.resolve(name))
                    .map_err(|e| RdfError::Xml(e.to_string()))?;
                parser.text(&value, &raw);
            }
            Event::CData(cdata) => {
                let value = decode(reader.decoder(), &cdata)?;
                parser.text(&value, &format!("<![CDATA[{value}]]>"));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    parser.finish()
}

fn utf8(bytes: &[u8]) -> Result<&str, RdfError> {
    std::str::from_utf8(bytes).map_err(|e| RdfError::Xml(e.to_string()))
}

/// Decode raw document bytes with the encoding the reader settled on
fn decode<'b>(decoder: Decoder, bytes: &'b [u8]) -> Result<Cow<'b, str>, RdfError> {
    decoder
        .decode(bytes)
        .map_err(|e| RdfError::Xml(e.to_string()))
}

/// Expand a resolved name to an IRI; namespace values may use entities
fn expand(
    ns: ResolveResult<'_>,
    local: &[u8],
    entities: &Entities,
) -> Result<Option<String>, RdfError> {
    let local = utf8(local)?;
    match ns {
        ResolveResult::Bound(ns) => {
            let ns = unescape_with(utf8(ns.as_ref())?, |name| entities.resolve(name))
                .map_err(|e| RdfError::Xml(e.to_string()))?;
            Ok(Some(format!("{ns}{local}")))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(RdfError::UnknownPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}

/// Entities usable in text and attribute values
#[derive(Debug, Default)]
struct Entities {
    declared: HashMap<String, String>,
}

impl Entities {
    /// Collect `<!ENTITY name "value">` declarations.
    ///
    /// Parameter entities and external entities are ignored.
    fn declared_in(doctype: &str) -> Self {
        let declared = ENTITY_DECL_REGEX
            .captures_iter(doctype)
            .filter_map(|caps| {
                let value = caps.get(2).or_else(|| caps.get(3))?;
                Some((caps[1].to_string(), value.as_str().to_string()))
            })
            .collect();
        Self { declared }
    }

    fn resolve(&self, name: &str) -> Option<&str> {
        resolve_predefined_entity(name).or_else(|| self.declared.get(name).map(String::as_str))
    }
}

/// Owned view of a start tag with namespaces expanded
struct Element {
    /// Empty when the element has no namespace
    iri: String,
    attrs: Vec<(String, String)>,
    /// Tag contents as written, for XML literals
    raw: String,
    raw_name: String,
    empty: bool,
}

impl Element {
    fn read(
        reader: &NsReader<&[u8]>,
        start: &BytesStart<'_>,
        entities: &Entities,
    ) -> Result<Self, RdfError> {
        let decoder = reader.decoder();
        let raw_name = decode(decoder, start.name().as_ref())?.into_owned();
        let (ns, local) = reader.resolve_element(start.name());
        // Unqualified elements are only legal inside XML literals
        let iri = expand(ns, local.as_ref(), entities)?.unwrap_or_default();

        let mut attrs = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| RdfError::Xml(e.to_string()))?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }

            let name = match key {
                b"xml:lang" => XML_LANG.to_string(),
                b"xml:base" => XML_BASE.to_string(),
                _ => {
                    let (ns, local) = reader.resolve_attribute(attr.key);
                    match expand(ns, local.as_ref(), entities)? {
                        Some(name) if name.starts_with(XML_NS) => continue,
                        Some(name) => name,
                        None => {
                            let local = utf8(local.as_ref())?;
                            if !LEGACY_RDF_ATTRIBUTES.contains(&local) {
                                continue;
                            }
                            format!("{RDF_NS}{local}")
                        }
                    }
                }
            };

            let value = attr
                .decode_and_unescape_value_with(decoder, |name| entities.resolve(name))
                .map_err(|e| RdfError::Xml(e.to_string()))?
                .into_owned();
            attrs.push((name, value));
        }

        Ok(Self {
            iri,
            attrs,
            raw: decode(decoder, start)?.into_owned(),
            raw_name,
            empty: false,
        })
    }

    fn into_empty(mut self) -> Self {
        self.empty = true;
        self
    }

    fn take_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|(n, _)| n == name)?;
        Some(self.attrs.remove(idx).1)
    }
}

/// Base IRI and language in effect for an element's children
#[derive(Debug, Clone)]
struct Scope {
    base: String,
    lang: Option<String>,
}

impl Scope {
    fn enter(&self, element: &mut Element) -> Scope {
        let base = match element.take_attr(XML_BASE) {
            Some(base) => resolve_iri(&self.base, &base),
            None => self.base.clone(),
        };
        let lang = match element.take_attr(XML_LANG) {
            Some(lang) if lang.is_empty() => None,
            Some(lang) => Some(lang),
            None => self.lang.clone(),
        };
        Scope { base, lang }
    }
}

enum PropertyKind {
    /// Text content or a single nested node element
    Value {
        datatype: Option<String>,
        text: String,
        object: Option<Term>,
    },
    /// Object already emitted from attributes
    Fixed,
    Literal {
        depth: usize,
        xml: String,
    },
    Collection(Vec<Term>),
}

enum Frame {
    /// Document root or inside `rdf:RDF`: children are node elements
    Nodes,
    /// Inside a node element: children are property elements
    Node { subject: Term, li: u32 },
    Property {
        subject: Term,
        predicate: String,
        kind: PropertyKind,
    },
}

/// What the next start tag means, given the enclosing frame
enum Expect {
    Root,
    Node,
    Property,
    Value,
}

struct Parser {
    stack: Vec<(Frame, Scope)>,
    root: Scope,
    triples: Vec<Triple>,
    next_blank: usize,
}

impl Parser {
    fn new(base_iri: &str) -> Self {
        Self {
            stack: Vec::new(),
            root: Scope {
                base: base_iri.to_string(),
                lang: None,
            },
            triples: Vec::new(),
            next_blank: 0,
        }
    }

    fn fresh_blank(&mut self) -> Term {
        self.next_blank += 1;
        Term::Blank(format!("g{}", self.next_blank))
    }

    /// Document node IDs live in their own label space
    fn named_blank(id: &str) -> Term {
        Term::Blank(format!("n{id}"))
    }

    fn emit(&mut self, subject: Term, predicate: &str, object: Term) {
        self.triples
            .push(Triple::new(subject, Term::iri(predicate), object));
    }

    fn scope(&self) -> &Scope {
        self.stack.last().map(|(_, scope)| scope).unwrap_or(&self.root)
    }

    /// Returns false when the tag was captured into an XML literal
    fn start(&mut self, mut element: Element) -> Result<bool, RdfError> {
        // Inside an XML literal everything is captured verbatim
        if let Some((Frame::Property { kind: PropertyKind::Literal { depth, xml }, .. }, _)) =
            self.stack.last_mut()
        {
            if element.empty {
                xml.push_str(&format!("<{}/>", element.raw));
            } else {
                xml.push_str(&format!("<{}>", element.raw));
                *depth += 1;
            }
            return Ok(false);
        }

        if element.iri.is_empty() {
            return Err(RdfError::Syntax(format!(
                "element <{}> has no namespace",
                element.raw_name
            )));
        }

        let scope = self.scope().clone().enter(&mut element);

        let expects = match self.stack.last() {
            None if element.iri == RDF_RDF => Expect::Root,
            None | Some((Frame::Nodes, _)) => Expect::Node,
            Some((Frame::Node { .. }, _)) => Expect::Property,
            Some((Frame::Property { .. }, _)) => Expect::Value,
        };

        match expects {
            Expect::Root => self.stack.push((Frame::Nodes, scope)),
            Expect::Node => {
                let subject = self.node_element(element, &scope)?;
                self.stack.push((Frame::Node { subject, li: 0 }, scope));
            }
            Expect::Property => self.property_element(element, scope)?,
            Expect::Value => self.nested_node(element, scope)?,
        }
        Ok(true)
    }

    /// Emit the triples of a node element and return its subject
    fn node_element(&mut self, mut element: Element, scope: &Scope) -> Result<Term, RdfError> {
        let about = element.take_attr(RDF_ABOUT);
        let id = element.take_attr(RDF_ID);
        let node_id = element.take_attr(RDF_NODE_ID);

        let subject = match (about, id, node_id) {
            (Some(about), None, None) => Term::Iri(resolve_iri(&scope.base, &about)),
            (None, Some(id), None) => Term::Iri(resolve_iri(&scope.base, &format!("#{id}"))),
            (None, None, Some(node_id)) => Self::named_blank(&node_id),
            (None, None, None) => self.fresh_blank(),
            _ => {
                return Err(RdfError::Syntax(format!(
                    "<{}> has more than one of rdf:about, rdf:ID, rdf:nodeID",
                    element.raw_name
                )))
            }
        };

        if element.iri != RDF_DESCRIPTION {
            self.emit(subject.clone(), RDF_TYPE, Term::Iri(element.iri.clone()));
        }

        self.property_attributes(&subject, element.attrs, scope);
        Ok(subject)
    }

    /// `rdf:type` attributes are IRIs; every other attribute is a literal
    fn property_attributes(&mut self, subject: &Term, attrs: Vec<(String, String)>, scope: &Scope) {
        for (predicate, value) in attrs {
            if predicate == RDF_TYPE {
                self.emit(
                    subject.clone(),
                    RDF_TYPE,
                    Term::Iri(resolve_iri(&scope.base, &value)),
                );
            } else if predicate.starts_with(RDF_NS) && is_syntax_term(&predicate) {
                continue;
            } else {
                self.emit(
                    subject.clone(),
                    &predicate,
                    Term::Literal {
                        value,
                        datatype: None,
                        lang: scope.lang.clone(),
                    },
                );
            }
        }
    }

    fn property_element(&mut self, mut element: Element, scope: Scope) -> Result<(), RdfError> {
        let Some((Frame::Node { subject, li }, _)) = self.stack.last_mut() else {
            unreachable!("property element outside node");
        };
        let subject = subject.clone();
        let predicate = if element.iri == RDF_LI {
            *li += 1;
            format!("{RDF_NS}_{li}")
        } else {
            element.iri.clone()
        };

        let parse_type = element.take_attr(RDF_PARSE_TYPE);
        let resource = element.take_attr(RDF_RESOURCE);
        let node_id = element.take_attr(RDF_NODE_ID);
        let datatype = element.take_attr(RDF_DATATYPE);
        element.take_attr(RDF_ID);

        let kind = match parse_type.as_deref() {
            Some("Resource") => {
                let node = self.fresh_blank();
                self.emit(subject, &predicate, node.clone());
                self.stack.push((Frame::Node { subject: node, li: 0 }, scope));
                return Ok(());
            }
            Some("Collection") => PropertyKind::Collection(Vec::new()),
            Some(_) => PropertyKind::Literal {
                depth: 0,
                xml: String::new(),
            },
            None if resource.is_some() || node_id.is_some() || !element.attrs.is_empty() => {
                let object = match (resource, node_id) {
                    (Some(resource), None) => Term::Iri(resolve_iri(&scope.base, &resource)),
                    (None, Some(node_id)) => Self::named_blank(&node_id),
                    (None, None) => self.fresh_blank(),
                    (Some(_), Some(_)) => {
                        return Err(RdfError::Syntax(format!(
                            "<{}> has both rdf:resource and rdf:nodeID",
                            element.raw_name
                        )))
                    }
                };
                self.emit(subject.clone(), &predicate, object.clone());
                self.property_attributes(&object, element.attrs, &scope);
                PropertyKind::Fixed
            }
            None => PropertyKind::Value {
                datatype: datatype.map(|dt| resolve_iri(&scope.base, &dt)),
                text: String::new(),
                object: None,
            },
        };

        self.stack.push((
            Frame::Property {
                subject,
                predicate,
                kind,
            },
            scope,
        ));
        Ok(())
    }

    /// A node element used as the value of the enclosing property
    fn nested_node(&mut self, element: Element, scope: Scope) -> Result<(), RdfError> {
        let raw_name = element.raw_name.clone();
        let node = self.node_element(element, &scope)?;

        let Some((Frame::Property { kind, .. }, _)) = self.stack.last_mut() else {
            unreachable!("nested node outside property");
        };
        match kind {
            PropertyKind::Value { object, .. } if object.is_none() => {
                *object = Some(node.clone());
            }
            PropertyKind::Collection(items) => items.push(node.clone()),
            _ => {
                return Err(RdfError::Syntax(format!(
                    "unexpected node element <{raw_name}> in property value"
                )))
            }
        }

        self.stack.push((Frame::Node { subject: node, li: 0 }, scope));
        Ok(())
    }

    fn text(&mut self, value: &str, raw: &str) {
        match self.stack.last_mut() {
            Some((Frame::Property { kind: PropertyKind::Value { text, .. }, .. }, _)) => {
                text.push_str(value);
            }
            Some((Frame::Property { kind: PropertyKind::Literal { xml, .. }, .. }, _)) => {
                xml.push_str(raw);
            }
            // Whitespace between elements
            _ => {}
        }
    }

    fn end(&mut self, raw_name: &str) -> Result<(), RdfError> {
        if let Some((Frame::Property { kind: PropertyKind::Literal { depth, xml }, .. }, _)) =
            self.stack.last_mut()
        {
            if *depth > 0 {
                *depth -= 1;
                xml.push_str(&format!("</{raw_name}>"));
                return Ok(());
            }
        }

        let Some((frame, scope)) = self.stack.pop() else {
            return Err(RdfError::Syntax(format!("unbalanced </{raw_name}>")));
        };

        if let Frame::Property {
            subject,
            predicate,
            kind,
        } = frame
        {
            match kind {
                PropertyKind::Value {
                    object: Some(object),
                    ..
                } => self.emit(subject, &predicate, object),
                PropertyKind::Value { datatype, text, .. } => {
                    let lang = if datatype.is_none() { scope.lang } else { None };
                    self.emit(
                        subject,
                        &predicate,
                        Term::Literal {
                            value: text,
                            datatype,
                            lang,
                        },
                    );
                }
                PropertyKind::Fixed => {}
                PropertyKind::Literal { xml, .. } => self.emit(
                    subject,
                    &predicate,
                    Term::Literal {
                        value: xml,
                        datatype: Some(RDF_XML_LITERAL.to_string()),
                        lang: None,
                    },
                ),
                PropertyKind::Collection(items) => {
                    let head = self.collection(items);
                    self.emit(subject, &predicate, head);
                }
            }
        }

        Ok(())
    }

    /// Build an `rdf:first`/`rdf:rest` list and return its head
    fn collection(&mut self, items: Vec<Term>) -> Term {
        let cells: Vec<Term> = items.iter().map(|_| self.fresh_blank()).collect();
        for (i, item) in items.into_iter().enumerate() {
            let rest = cells
                .get(i + 1)
                .cloned()
                .unwrap_or_else(|| Term::iri(RDF_NIL));
            self.emit(cells[i].clone(), RDF_FIRST, item);
            self.emit(cells[i].clone(), RDF_REST, rest);
        }
        cells.into_iter().next().unwrap_or_else(|| Term::iri(RDF_NIL))
    }

    fn finish(self) -> Result<Vec<Triple>, RdfError> {
        if !self.stack.is_empty() {
            return Err(RdfError::Syntax("unexpected end of document".to_string()));
        }
        Ok(self.triples)
    }
}

fn is_syntax_term(iri: &str) -> bool {
    matches!(
        &iri[RDF_NS.len()..],
        "RDF" | "Description" | "about" | "ID" | "nodeID" | "resource" | "datatype"
            | "parseType" | "li" | "aboutEach" | "aboutEachPrefix" | "bagID"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FOAF_MBOX_SHA1SUM, FOAF_NAME, FOAF_PERSON};

    const BASE: &str = "http://example.org/ada.rdf";

    fn find<'a>(triples: &'a [Triple], predicate: &str) -> Vec<&'a Triple> {
        triples.iter().filter(|t| t.predicate.is_iri(predicate)).collect()
    }

    #[test]
    fn test_typed_node_with_properties() {
        let doc = r##"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:foaf="http://xmlns.com/foaf/0.1/">
  <foaf:Person rdf:about="#me">
    <foaf:name>Ada Lovelace</foaf:name>
    <foaf:mbox_sha1sum>d714b8a95bd857a37405a7b56db9108b60ae42bd</foaf:mbox_sha1sum>
  </foaf:Person>
</rdf:RDF>"##;

        let triples = parse(doc, BASE).unwrap();
        let me = Term::iri("http://example.org/ada.rdf#me");

        assert_eq!(triples.len(), 3);
        assert!(triples.contains(&Triple::new(
            me.clone(),
            Term::iri(RDF_TYPE),
            Term::iri(FOAF_PERSON)
        )));
        assert!(triples.contains(&Triple::new(
            me.clone(),
            Term::iri(FOAF_NAME),
            Term::literal("Ada Lovelace")
        )));
        assert_eq!(
            find(&triples, FOAF_MBOX_SHA1SUM)[0].object.as_literal(),
            Some("d714b8a95bd857a37405a7b56db9108b60ae42bd")
        );
    }

    #[test]
    fn test_description_with_type_resource_and_attributes() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:foaf="http://xmlns.com/foaf/0.1/">
  <rdf:Description rdf:nodeID="ada" foaf:name="Ada">
    <rdf:type rdf:resource="http://xmlns.com/foaf/0.1/Person"/>
    <foaf:homepage rdf:resource="/home"/>
  </rdf:Description>
</rdf:RDF>"#;

        let triples = parse(doc, BASE).unwrap();
        assert_eq!(triples.len(), 3);

        let types = find(&triples, RDF_TYPE);
        assert_eq!(types.len(), 1);
        assert!(types[0].subject.is_blank());
        assert!(types[0].object.is_iri(FOAF_PERSON));

        let name = find(&triples, FOAF_NAME);
        assert_eq!(name[0].object.as_literal(), Some("Ada"));
        assert_eq!(name[0].subject, types[0].subject);

        let homepage = find(&triples, "http://xmlns.com/foaf/0.1/homepage");
        assert!(homepage[0].object.is_iri("http://example.org/home"));
    }

    #[test]
    fn test_nested_nodes_and_knows() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:foaf="http://xmlns.com/foaf/0.1/">
  <foaf:Person>
    <foaf:name>Ada</foaf:name>
    <foaf:knows>
      <foaf:Person>
        <foaf:name>Charles</foaf:name>
        <foaf:mbox_sha1sum>abc</foaf:mbox_sha1sum>
      </foaf:Person>
    </foaf:knows>
  </foaf:Person>
</rdf:RDF>"#;

        let triples = parse(doc, BASE).unwrap();
        let knows = find(&triples, "http://xmlns.com/foaf/0.1/knows");
        assert_eq!(knows.len(), 1);

        let charles = &knows[0].object;
        assert!(charles.is_blank());
        assert!(triples.contains(&Triple::new(
            charles.clone(),
            Term::iri(FOAF_NAME),
            Term::literal("Charles")
        )));
        assert_eq!(find(&triples, RDF_TYPE).len(), 2);
    }

    #[test]
    fn test_lang_datatype_and_base() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:foaf="http://xmlns.com/foaf/0.1/"
         xml:base="http://people.example.com/" xml:lang="en">
  <foaf:Person rdf:ID="ada">
    <foaf:name>Ada</foaf:name>
    <foaf:nick xml:lang="fr">Ada &amp; co</foaf:nick>
    <foaf:age rdf:datatype="http://www.w3.org/2001/XMLSchema#integer">36</foaf:age>
  </foaf:Person>
</rdf:RDF>"#;

        let triples = parse(doc, BASE).unwrap();
        let subject = Term::iri("http://people.example.com/#ada");
        assert!(triples.iter().all(|t| t.subject == subject));

        assert_eq!(
            find(&triples, FOAF_NAME)[0].object,
            Term::Literal {
                value: "Ada".to_string(),
                datatype: None,
                lang: Some("en".to_string()),
            }
        );
        assert_eq!(
            find(&triples, "http://xmlns.com/foaf/0.1/nick")[0].object,
            Term::Literal {
                value: "Ada & co".to_string(),
                datatype: None,
                lang: Some("fr".to_string()),
            }
        );
        assert_eq!(
            find(&triples, "http://xmlns.com/foaf/0.1/age")[0].object,
            Term::Literal {
                value: "36".to_string(),
                datatype: Some("http://www.w3.org/2001/XMLSchema#integer".to_string()),
                lang: None,
            }
        );
    }

    #[test]
    fn test_parse_type_resource_and_empty_property() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:foaf="http://xmlns.com/foaf/0.1/">
  <foaf:Person rdf:about="http://example.org/ada">
    <foaf:account rdf:parseType="Resource">
      <foaf:accountName>ada</foaf:accountName>
    </foaf:account>
    <foaf:holdsAccount foaf:accountName="lovelace"/>
    <foaf:title/>
  </foaf:Person>
</rdf:RDF>"#;

        let triples = parse(doc, BASE).unwrap();
        let account = find(&triples, "http://xmlns.com/foaf/0.1/account");
        assert!(account[0].object.is_blank());

        let names = find(&triples, "http://xmlns.com/foaf/0.1/accountName");
        assert_eq!(names.len(), 2);
        assert!(names.iter().any(|t| t.subject == account[0].object));

        let title = find(&triples, "http://xmlns.com/foaf/0.1/title");
        assert_eq!(title[0].object.as_literal(), Some(""));
    }

    #[test]
    fn test_li_and_collection() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:ex="http://example.org/ns#">
  <rdf:Seq rdf:about="http://example.org/list">
    <rdf:li>one</rdf:li>
    <rdf:li>two</rdf:li>
  </rdf:Seq>
  <rdf:Description rdf:about="http://example.org/s">
    <ex:items rdf:parseType="Collection">
      <rdf:Description rdf:about="http://example.org/a"/>
      <rdf:Description rdf:about="http://example.org/b"/>
    </ex:items>
  </rdf:Description>
</rdf:RDF>"#;

        let triples = parse(doc, BASE).unwrap();
        assert_eq!(find(&triples, &format!("{RDF_NS}_1"))[0].object.as_literal(), Some("one"));
        assert_eq!(find(&triples, &format!("{RDF_NS}_2"))[0].object.as_literal(), Some("two"));

        assert_eq!(find(&triples, RDF_FIRST).len(), 2);
        let rests = find(&triples, RDF_REST);
        assert_eq!(rests.len(), 2);
        assert!(rests.iter().any(|t| t.object.is_iri(RDF_NIL)));
    }

    #[test]
    fn test_xml_literal() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:ex="http://example.org/ns#">
  <rdf:Description rdf:about="http://example.org/s">
    <ex:bio rdf:parseType="Literal"><b>Ada</b> wrote notes</ex:bio>
  </rdf:Description>
</rdf:RDF>"#;

        let triples = parse(doc, BASE).unwrap();
        assert_eq!(
            triples[0].object,
            Term::Literal {
                value: "<b>Ada</b> wrote notes".to_string(),
                datatype: Some(RDF_XML_LITERAL.to_string()),
                lang: None,
            }
        );
    }

    #[test]
    fn test_empty_tag_inside_xml_literal() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:ex="http://example.org/ns#">
  <rdf:Description rdf:about="http://example.org/s">
    <ex:bio rdf:parseType="Literal">line<br/>two</ex:bio>
    <ex:nick>ada</ex:nick>
  </rdf:Description>
</rdf:RDF>"#;

        let triples = parse(doc, BASE).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].object.as_literal(), Some("line<br/>two"));
        assert_eq!(triples[1].object.as_literal(), Some("ada"));
    }

    #[test]
    fn test_root_node_without_rdf_wrapper() {
        let doc = r#"<foaf:Person xmlns:foaf="http://xmlns.com/foaf/0.1/"
            xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
            rdf:about="http://example.org/ada"><foaf:name>Ada</foaf:name></foaf:Person>"#;

        let triples = parse(doc, BASE).unwrap();
        assert_eq!(triples.len(), 2);
    }

    #[test]
    fn test_doctype_entities() {
        let doc = r#"<?xml version="1.0"?>
<!DOCTYPE rdf:RDF [
  <!ENTITY rdf "http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <!ENTITY foaf 'http://xmlns.com/foaf/0.1/'>
]>
<rdf:RDF xmlns:rdf="&rdf;" xmlns:foaf="&foaf;">
  <rdf:Description rdf:about="http://example.org/ada">
    <rdf:type rdf:resource="&foaf;Person"/>
    <foaf:name>Ada &amp; &foaf;</foaf:name>
  </rdf:Description>
</rdf:RDF>"#;

        let triples = parse(doc, BASE).unwrap();
        assert!(find(&triples, RDF_TYPE)[0].object.is_iri(FOAF_PERSON));
        assert_eq!(
            find(&triples, FOAF_NAME)[0].object.as_literal(),
            Some("Ada & http://xmlns.com/foaf/0.1/")
        );
    }

    #[test]
    fn test_undeclared_entity_is_an_error() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about="&nowhere;ada"/>
</rdf:RDF>"#;

        assert!(matches!(parse(doc, BASE), Err(RdfError::Xml(_))));
    }

    #[test]
    fn test_declared_latin1_encoding() {
        let mut doc = br#"<?xml version="1.0" encoding="ISO-8859-1"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:foaf="http://xmlns.com/foaf/0.1/">
  <foaf:Person rdf:about="http://example.org/rene">
    <foaf:name>Ren"#
            .to_vec();
        doc.push(0xE9);
        doc.extend_from_slice(
            br#" Descartes</foaf:name>
  </foaf:Person>
</rdf:RDF>"#,
        );

        let triples = parse(&doc, BASE).unwrap();
        assert_eq!(
            find(&triples, FOAF_NAME)[0].object.as_literal(),
            Some("Ren\u{e9} Descartes")
        );
    }

    #[test]
    fn test_malformed_documents() {
        assert!(parse("<html><body>not rdf", BASE).is_err());
        assert!(matches!(
            parse(r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"><bogus:Thing/></rdf:RDF>"#, BASE),
            Err(RdfError::UnknownPrefix(_))
        ));
    }
}
