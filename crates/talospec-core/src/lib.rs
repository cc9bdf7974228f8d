//! Talospec Core - Validation and normalization for Talos cluster specs
//!
//! This crate turns a declarative cluster specification (cluster metadata,
//! network ranges, and a list of machines) into a fully-defaulted, canonical
//! [`Cluster`] value, rejecting malformed or semantically inconsistent input
//! with precise, stable error messages.
//!
//! ## Pipeline
//!
//! - **Schema**: an explicit, immutable description of the document's fields,
//!   types, enumerations, and defaults ([`Schema::cluster`])
//! - **Structural validation**: required fields, types, enumerations, and a
//!   closed field set, fail-fast with a deterministic first violation
//! - **Semantic validation**: private-network pair presence and per-machine
//!   address containment, using integer CIDR arithmetic ([`net`])
//! - **Normalization**: schema defaults, canonical key mapping, zero values
//!   for structural options
//!
//! ## Quick Start
//!
//! ```rust
//! use talospec_core::ClusterLoader;
//!
//! let loader = ClusterLoader::new();
//! let cluster = loader
//!     .load_str(
//!         r#"
//! name: demo
//! machines:
//!   - id: control-1
//!     type: controlplane
//!     platform: hcloud
//! "#,
//!     )
//!     .unwrap();
//!
//! assert_eq!(cluster.machines[0].variant.as_str(), "metal");
//! assert!(cluster.machines[0].config_patches.is_empty());
//! ```
//!
//! Validation failures render as one fixed-format line:
//!
//! ```rust
//! use talospec_core::ClusterLoader;
//!
//! let loader = ClusterLoader::new();
//! let error = loader.load_str("machines: []").unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "Invalid cluster spec: 'name' is a required string"
//! );
//! ```
//!
//! Copyright (c) 2025 Talospec Team
//! Licensed under the Apache-2.0 license

pub mod cluster;
pub mod error;
pub mod net;
pub mod normalize;
pub mod schema;
pub mod spec;
pub mod validation;

// Re-export the main types for convenience
pub use cluster::{Cluster, HcloudMachine, Machine, MachineVariant};
pub use error::{Error, Result};
pub use net::{format_ipv4, parse_ipv4, AddrParseError, Cidr};
pub use schema::Schema;
pub use spec::{load, ClusterLoader};
pub use validation::{
    format_violation, validate_semantics, validate_structure, FieldPath, SemanticViolation,
    StructuralViolation, ValidationError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
