//! Structured violation types for the validation pipeline
//!
//! Violations carry the raw context of a failed check (field path, machine
//! id, offending literals). The user-facing message is synthesized separately
//! by [`crate::validation::format`], keeping formatting a pure function over
//! this data.
//!
//! Copyright (c) 2025 Talospec Team
//! Licensed under the Apache-2.0 license

use crate::net::AddrParseError;
use crate::schema::ValueKind;
use crate::validation::format::format_violation;
use std::fmt;

/// Path to a field inside the document, e.g. `machines[0].privateIP`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

impl FieldPath {
    /// The document root; renders as an empty string.
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend the path with a named field.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(key.into()));
        Self { segments }
    }

    /// Extend the path with an array index.
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Name of the innermost field, ignoring trailing indices.
    pub fn last_key(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|segment| match segment {
            Segment::Key(key) => Some(key.as_str()),
            Segment::Index(_) => None,
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if position == 0 => write!(f, "{key}")?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// One failed schema check. Only the first violation found is ever reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralViolation {
    /// A required field is absent
    MissingField { path: FieldPath },
    /// A field not declared in the schema was found
    UnknownField { path: FieldPath },
    /// A required array is missing or has no elements
    EmptyArray { path: FieldPath },
    /// A declared field holds a value of the wrong kind
    InvalidType { path: FieldPath, expected: ValueKind },
    /// A string field holds a value outside its enumeration
    InvalidEnum {
        path: FieldPath,
        allowed: &'static [&'static str],
    },
}

/// One failed cross-field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticViolation {
    /// `usePrivateNetwork` without both network ranges
    MissingNetworkPair,
    /// A machine without a private address while private networking is on
    MissingPrivateIp { machine: String },
    /// A machine address outside the private subnetwork
    IpOutsideRange {
        machine: String,
        ip: String,
        cidr: String,
    },
    /// Malformed address or CIDR literal found while checking containment
    Address(AddrParseError),
}

impl From<AddrParseError> for SemanticViolation {
    fn from(error: AddrParseError) -> Self {
        Self::Address(error)
    }
}

/// A validation failure: either the document shape or its cross-field
/// semantics. Renders as the single-line user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Structural(StructuralViolation),
    Semantic(SemanticViolation),
}

impl From<StructuralViolation> for ValidationError {
    fn from(violation: StructuralViolation) -> Self {
        Self::Structural(violation)
    }
}

impl From<SemanticViolation> for ValidationError {
    fn from(violation: SemanticViolation) -> Self {
        Self::Semantic(violation)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_violation(self))
    }
}

impl std::error::Error for ValidationError {}
