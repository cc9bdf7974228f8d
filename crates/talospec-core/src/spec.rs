//! Cluster specification loading
//!
//! [`ClusterLoader`] owns the compiled [`Schema`] and drives the pipeline:
//! read → parse → structural validation → semantic validation →
//! normalization. The loader is immutable after construction; build it once
//! and share it freely across threads.
//!
//! Copyright (c) 2025 Talospec Team
//! Licensed under the Apache-2.0 license

use crate::cluster::Cluster;
use crate::error::{Error, Result};
use crate::normalize::normalize;
use crate::schema::Schema;
use crate::validation::{validate_semantics, validate_structure, ValidationError};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads and validates cluster specification documents.
#[derive(Debug, Clone)]
pub struct ClusterLoader {
    schema: Schema,
}

impl ClusterLoader {
    /// Create a loader with the cluster schema.
    pub fn new() -> Self {
        Self {
            schema: Schema::cluster(),
        }
    }

    /// The schema this loader validates against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Load a cluster specification from a YAML file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Cluster> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading cluster spec");
        let content = fs::read_to_string(path)
            .map_err(|source| Error::io_error(path.to_path_buf(), source))?;
        self.parse(&content, path)
    }

    /// Load a cluster specification from YAML text.
    pub fn load_str(&self, content: &str) -> Result<Cluster> {
        self.parse(content, Path::new("<inline>"))
    }

    fn parse(&self, content: &str, path: &Path) -> Result<Cluster> {
        // YAML is parsed first, then converted to JSON values so validation
        // and normalization traverse a single representation.
        let parsed: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|source| Error::yaml_error(path.to_path_buf(), source))?;
        let doc: Value = serde_json::to_value(parsed)
            .map_err(|source| Error::json_error(path.to_path_buf(), source))?;

        // An empty document behaves like an empty mapping, so the reported
        // violation is the first missing required field.
        let doc = if doc.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            doc
        };

        validate_structure(&doc, &self.schema).map_err(ValidationError::from)?;

        let use_private_network = doc
            .get("usePrivateNetwork")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        validate_semantics(&doc, use_private_network).map_err(ValidationError::from)?;

        let cluster = normalize(&doc, &self.schema);
        debug!(
            cluster = %cluster.name,
            machines = cluster.machines.len(),
            "cluster spec validated"
        );
        Ok(cluster)
    }
}

impl Default for ClusterLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a cluster specification from a YAML file with a freshly built
/// schema. Construct a [`ClusterLoader`] instead when loading repeatedly.
pub fn load(path: impl AsRef<Path>) -> Result<Cluster> {
    ClusterLoader::new().load(path)
}
