//! Default application and canonical field mapping
//!
//! Runs only after both validation passes succeed, so every lookup here is
//! total: absent optional fields resolve to their schema defaults or zero
//! values, and the result is the immutable [`Cluster`] handed to callers.
//!
//! Copyright (c) 2025 Talospec Team
//! Licensed under the Apache-2.0 license

use crate::cluster::{Cluster, HcloudMachine, Machine, MachineVariant};
use crate::schema::Schema;
use serde_json::Value;

/// Build the canonical cluster value from a validated document.
pub fn normalize(doc: &Value, schema: &Schema) -> Cluster {
    let hcloud_defaults = hcloud_defaults(doc, schema);

    let machines = doc
        .get("machines")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(|raw| normalize_machine(raw, schema, &hcloud_defaults))
        .collect();

    Cluster {
        name: owned_str(doc, "name").unwrap_or_default(),
        kubernetes_version: owned_str(doc, "kubernetesVersion")
            .unwrap_or_else(|| default_str(schema, &["kubernetesVersion"])),
        private_network: owned_str(doc, "privateNetwork").unwrap_or_default(),
        private_subnetwork: owned_str(doc, "privateSubnetwork").unwrap_or_default(),
        use_private_network: bool_or_default(doc, schema, "usePrivateNetwork"),
        skip_init_apply: bool_or_default(doc, schema, "skipInitApply"),
        machines,
    }
}

fn normalize_machine(raw: &Value, schema: &Schema, hcloud_defaults: &HcloudMachine) -> Machine {
    // Absent and empty both fall back to the metal variant.
    let variant = match raw.get("variant").and_then(Value::as_str) {
        Some("cloud") => MachineVariant::Cloud,
        _ => MachineVariant::Metal,
    };

    let config_patches = raw
        .get("configPatches")
        .and_then(Value::as_array)
        .map(|patches| {
            patches
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    // The hyphenated input key maps onto the canonical boolean field.
    let apply_config_via_userdata = raw
        .get("apply-config-via-userdata")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let hcloud = Some(match raw.get("hcloud") {
        Some(block) if block.is_object() => HcloudMachine {
            server_type: block
                .get("serverType")
                .and_then(Value::as_str)
                .unwrap_or(&hcloud_defaults.server_type)
                .to_string(),
            datacenter: block
                .get("datacenter")
                .and_then(Value::as_str)
                .unwrap_or(&hcloud_defaults.datacenter)
                .to_string(),
        },
        _ => hcloud_defaults.clone(),
    });

    Machine {
        id: owned_str(raw, "id").unwrap_or_default(),
        machine_type: owned_str(raw, "type").unwrap_or_default(),
        platform: owned_str(raw, "platform").unwrap_or_default(),
        variant,
        talos_initial_version: owned_str(raw, "talosInitialVersion")
            .unwrap_or_else(|| default_str(schema, &["machines", "talosInitialVersion"])),
        talos_image: owned_str(raw, "talosImage")
            .unwrap_or_else(|| default_str(schema, &["machines", "talosImage"])),
        private_ip: owned_str(raw, "privateIP"),
        config_patches,
        userdata: owned_str(raw, "userdata"),
        apply_config_via_userdata,
        hcloud,
    }
}

/// Effective hcloud placement defaults: the document's `machineDefaults`
/// block overrides the schema-declared values.
fn hcloud_defaults(doc: &Value, schema: &Schema) -> HcloudMachine {
    let block = doc
        .get("machineDefaults")
        .and_then(|defaults| defaults.get("hcloud"));

    let pick = |key: &str, path: &[&str]| {
        block
            .and_then(|block| block.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| default_str(schema, path))
    };

    HcloudMachine {
        server_type: pick("serverType", &["machineDefaults", "hcloud", "serverType"]),
        datacenter: pick("datacenter", &["machineDefaults", "hcloud", "datacenter"]),
    }
}

fn owned_str(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn bool_or_default(doc: &Value, schema: &Schema, key: &str) -> bool {
    doc.get(key).and_then(Value::as_bool).unwrap_or_else(|| {
        schema
            .default_value(&[key])
            .and_then(Value::as_bool)
            .unwrap_or(false)
    })
}

fn default_str(schema: &Schema, path: &[&str]) -> String {
    schema
        .default_value(path)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
