//! Disambiguation of candidate names and how each outcome is reported

use std::collections::BTreeSet;
use std::io::{self, Write};

/// Outcome of a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No person carries the mailbox hash
    NotFound,
    /// Exactly one name
    Unique(String),
    /// Several distinct names, sorted
    Ambiguous(Vec<String>),
}

impl Resolution {
    pub fn from_names(names: BTreeSet<String>) -> Self {
        let mut names: Vec<String> = names.into_iter().collect();
        match names.len() {
            0 => Resolution::NotFound,
            1 => Resolution::Unique(names.remove(0)),
            _ => Resolution::Ambiguous(names),
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, Resolution::NotFound)
    }

    /// Process exit status; ambiguity is still a successful lookup
    pub fn exit_code(&self) -> u8 {
        match self {
            Resolution::NotFound => 1,
            Resolution::Unique(_) | Resolution::Ambiguous(_) => 0,
        }
    }

    /// Write the standard output form of the result.
    ///
    /// `NotFound` writes nothing; it is reported through the log.
    pub fn write_to(&self, email: &str, out: &mut impl Write) -> io::Result<()> {
        match self {
            Resolution::NotFound => Ok(()),
            Resolution::Unique(name) => writeln!(out, "{name}"),
            Resolution::Ambiguous(names) => {
                writeln!(out, "{email} is ambiguous, candidates:")?;
                for name in names {
                    writeln!(out, "{name}")?;
                }
                Ok(())
            }
        }
    }
}
