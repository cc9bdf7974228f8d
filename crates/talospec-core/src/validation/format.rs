//! User-facing rendering of validation failures
//!
//! Messages are stable output: downstream tooling and the original fixtures
//! match on them verbatim, so every shape lives here in one place.
//!
//! Copyright (c) 2025 Talospec Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{SemanticViolation, StructuralViolation, ValidationError};

/// Prefix carried by every validation message.
pub const MESSAGE_PREFIX: &str = "Invalid cluster spec: ";

/// Render a violation into its single-line user-facing message.
pub fn format_violation(error: &ValidationError) -> String {
    format!("{MESSAGE_PREFIX}{}", describe(error))
}

fn describe(error: &ValidationError) -> String {
    match error {
        ValidationError::Structural(violation) => describe_structural(violation),
        ValidationError::Semantic(violation) => describe_semantic(violation),
    }
}

fn describe_structural(violation: &StructuralViolation) -> String {
    match violation {
        StructuralViolation::MissingField { path } => {
            format!("'{path}' is a required string")
        }
        StructuralViolation::UnknownField { path } => {
            format!("unknown field '{path}' is not allowed")
        }
        StructuralViolation::EmptyArray { path } => {
            format!("'{path}' must be a non-empty array")
        }
        StructuralViolation::InvalidType { path, expected } if path.is_root() => {
            format!("must be {}", expected.name())
        }
        StructuralViolation::InvalidType { path, expected } => {
            format!("'{path}' must be {}", expected.name())
        }
        StructuralViolation::InvalidEnum { path, .. } if path.last_key() == Some("platform") => {
            format!("'{path}' must be 'hcloud'")
        }
        StructuralViolation::InvalidEnum { path, allowed } => {
            let values: Vec<&str> = allowed
                .iter()
                .copied()
                .filter(|value| !value.is_empty())
                .collect();
            format!("'{path}' must be one of: {}", values.join(", "))
        }
    }
}

fn describe_semantic(violation: &SemanticViolation) -> String {
    match violation {
        SemanticViolation::MissingNetworkPair => {
            "When 'usePrivateNetwork' is true, both 'privateNetwork' and 'privateSubnetwork' \
             are required"
                .to_string()
        }
        SemanticViolation::MissingPrivateIp { machine } => {
            format!("machine '{machine}' must define privateIP when usePrivateNetwork is true")
        }
        SemanticViolation::IpOutsideRange { machine, ip, cidr } => {
            format!("machine '{machine}' privateIP '{ip}' must be inside '{cidr}'")
        }
        SemanticViolation::Address(error) => error.to_string(),
    }
}
