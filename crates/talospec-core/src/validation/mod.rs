//! Validation pipeline for raw cluster documents
//!
//! Two passes run in a fixed order: structural validation checks the document
//! shape against the schema (required fields, types, enumerations, closed
//! field set), then semantic validation checks the cross-field rules a schema
//! cannot express (network-pair presence, address containment). Both are
//! fail-fast: the first violation is reported and nothing else is collected.
//!
//! Copyright (c) 2025 Talospec Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod format;
pub mod semantic;
pub mod structural;

pub use error::{FieldPath, SemanticViolation, StructuralViolation, ValidationError};
pub use format::{format_violation, MESSAGE_PREFIX};
pub use semantic::validate_semantics;
pub use structural::validate_structure;
