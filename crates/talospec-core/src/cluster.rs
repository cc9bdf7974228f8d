//! Canonical cluster and machine types
//!
//! These are the fully-defaulted values handed to the provisioning pipeline.
//! A [`Cluster`] is produced exactly once per load and never mutated
//! afterwards; downstream consumers may rely on `machines` being non-empty
//! and on every schema default having been applied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine deployment variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineVariant {
    /// Cloud server provisioned through the platform API
    Cloud,
    /// Dedicated or bare-metal machine
    #[default]
    Metal,
}

impl MachineVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineVariant::Cloud => "cloud",
            MachineVariant::Metal => "metal",
        }
    }
}

impl fmt::Display for MachineVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hetzner Cloud placement for one machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HcloudMachine {
    pub server_type: String,
    pub datacenter: String,
}

/// One machine entry of a cluster specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    /// Identifier used to match the machine to its provisioned resource
    pub id: String,

    /// Logical machine role (e.g. `controlplane`, `worker`)
    #[serde(rename = "type")]
    pub machine_type: String,

    /// Platform identifier; `hcloud` is the only supported value
    pub platform: String,

    pub variant: MachineVariant,

    pub talos_initial_version: String,

    pub talos_image: String,

    /// Address inside the cluster's private subnetwork; present whenever
    /// `usePrivateNetwork` is enabled
    #[serde(rename = "privateIP", skip_serializing_if = "Option::is_none")]
    pub private_ip: Option<String>,

    pub config_patches: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub userdata: Option<String>,

    pub apply_config_via_userdata: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hcloud: Option<HcloudMachine>,
}

/// A validated, normalized cluster specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub name: String,

    pub kubernetes_version: String,

    /// Private network CIDR; empty when private networking is unused
    pub private_network: String,

    /// Private subnetwork CIDR; empty when private networking is unused
    pub private_subnetwork: String,

    pub use_private_network: bool,

    pub skip_init_apply: bool,

    /// Machines in declaration order; never empty
    pub machines: Vec<Machine>,
}

impl Cluster {
    /// Look up a machine by id. Ids are not checked for uniqueness; the
    /// first declaration wins.
    pub fn machine(&self, id: &str) -> Option<&Machine> {
        self.machines.iter().find(|machine| machine.id == id)
    }
}
