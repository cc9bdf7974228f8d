//! Cross-field semantic rules for private networking
//!
//! Runs after structural validation, so machine entries are known to be
//! well-shaped mappings. Machines are checked in declaration order and the
//! first violation aborts the pass.
//!
//! Copyright (c) 2025 Talospec Team
//! Licensed under the Apache-2.0 license

use crate::net::{parse_ipv4, Cidr};
use crate::validation::error::SemanticViolation;
use serde_json::Value;

/// Validate the private-network rules of a structurally valid document.
///
/// With `use_private_network` off there is nothing to check: machines may
/// freely omit `privateIP`. With it on, both network ranges must be present
/// and every machine's `privateIP` must fall inside the private subnetwork.
pub fn validate_semantics(
    doc: &Value,
    use_private_network: bool,
) -> Result<(), SemanticViolation> {
    if !use_private_network {
        return Ok(());
    }

    let private_network = trimmed(doc, "privateNetwork");
    let private_subnetwork = trimmed(doc, "privateSubnetwork");
    if private_network.is_empty() || private_subnetwork.is_empty() {
        return Err(SemanticViolation::MissingNetworkPair);
    }

    let range = Cidr::parse(private_subnetwork)?;
    for machine in doc
        .get("machines")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        validate_machine(machine, &range, private_subnetwork)?;
    }

    Ok(())
}

fn validate_machine(
    machine: &Value,
    range: &Cidr,
    cidr_text: &str,
) -> Result<(), SemanticViolation> {
    let id = machine.get("id").and_then(Value::as_str).unwrap_or_default();

    let private_ip = trimmed(machine, "privateIP");
    if private_ip.is_empty() {
        return Err(SemanticViolation::MissingPrivateIp {
            machine: id.to_string(),
        });
    }

    let address = parse_ipv4(private_ip)?;
    if !range.contains(address) {
        return Err(SemanticViolation::IpOutsideRange {
            machine: id.to_string(),
            ip: private_ip.to_string(),
            cidr: cidr_text.to_string(),
        });
    }

    Ok(())
}

fn trimmed<'a>(value: &'a Value, key: &str) -> &'a str {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
}
