//! Line-based N-Triples reader

use crate::{RdfError, Term, Triple};

/// Parse an N-Triples document
pub fn parse(input: &str) -> Result<Vec<Triple>, RdfError> {
    let mut triples = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let triple = parse_line(trimmed).map_err(|message| RdfError::NTriples {
            line: line_no,
            message,
        })?;
        triples.push(triple);
    }

    Ok(triples)
}

fn parse_line(line: &str) -> Result<Triple, String> {
    let mut cursor = Cursor { rest: line };

    let subject = cursor.term()?;
    if matches!(subject, Term::Literal { .. }) {
        return Err("literal in subject position".to_string());
    }
    let predicate = cursor.term()?;
    if predicate.as_iri().is_none() {
        return Err("predicate must be an IRI".to_string());
    }
    let object = cursor.term()?;

    cursor.skip_ws();
    if !cursor.eat('.') {
        return Err("expected '.' at end of statement".to_string());
    }
    cursor.skip_ws();
    if !cursor.rest.is_empty() && !cursor.rest.starts_with('#') {
        return Err(format!("trailing content: {}", cursor.rest));
    }

    Ok(Triple::new(subject, predicate, object))
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn take_until(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let end = self.rest.find(pred).unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        head
    }

    fn term(&mut self) -> Result<Term, String> {
        self.skip_ws();
        if self.eat('<') {
            let iri = self.take_until(|c| c == '>');
            if !self.eat('>') {
                return Err("unterminated IRI".to_string());
            }
            return Ok(Term::Iri(unescape(iri)?));
        }
        if self.rest.starts_with("_:") {
            let start = &self.rest[2..];
            // Labels may contain '.', but not as their last character
            let end = start.find(char::is_whitespace).unwrap_or(start.len());
            let label = start[..end].trim_end_matches('.');
            self.rest = &start[label.len()..];
            if label.is_empty() {
                return Err("empty blank node label".to_string());
            }
            return Ok(Term::Blank(label.to_string()));
        }
        if self.eat('"') {
            return self.literal();
        }
        Err(format!("unexpected input: {}", self.rest))
    }

    fn literal(&mut self) -> Result<Term, String> {
        let mut raw_end = None;
        let mut escaped = false;
        for (i, c) in self.rest.char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => {
                    raw_end = Some(i);
                    break;
                }
                _ => {}
            }
        }
        let end = raw_end.ok_or_else(|| "unterminated literal".to_string())?;
        let value = unescape(&self.rest[..end])?;
        self.rest = &self.rest[end + 1..];

        let mut lang = None;
        let mut datatype = None;
        if self.eat('@') {
            let tag = self.take_until(|c| c.is_whitespace() || c == '.');
            if tag.is_empty() {
                return Err("empty language tag".to_string());
            }
            lang = Some(tag.to_string());
        } else if self.rest.starts_with("^^") {
            self.rest = &self.rest[2..];
            match self.term()? {
                Term::Iri(iri) => datatype = Some(iri),
                _ => return Err("datatype must be an IRI".to_string()),
            }
        }

        Ok(Term::Literal {
            value,
            datatype,
            lang,
        })
    }
}

/// Decode `\t \n \" \\ \uXXXX \UXXXXXXXX` escapes
fn unescape(raw: &str) -> Result<String, String> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{8}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some(u @ ('u' | 'U')) => {
                let width = if u == 'u' { 4 } else { 8 };
                let hex: String = chars.by_ref().take(width).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == width)
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("invalid escape \\{u}{hex}"))?;
                out.push(decoded);
            }
            Some(other) => return Err(format!("invalid escape \\{other}")),
            None => return Err("dangling backslash".to_string()),
        }
    }
    Ok(out)
}
