//! Schema definition for cluster specification documents
//!
//! The schema is an explicit, immutable value: [`Schema::cluster`] builds it
//! once and callers thread it by reference through the validation and
//! normalization stages. There is no runtime schema compilation and no
//! process-global state.
//!
//! Copyright (c) 2025 Talospec Team
//! Licensed under the Apache-2.0 license

use serde_json::{json, Value};

/// Kubernetes version deployed when the document does not pin one.
pub const DEFAULT_KUBERNETES_VERSION: &str = "v1.31.0";

/// Talos version installed on machines that do not pin one.
pub const DEFAULT_TALOS_VERSION: &str = "v1.8.2";

/// Talos factory installer image matching [`DEFAULT_TALOS_VERSION`].
pub const DEFAULT_TALOS_IMAGE: &str =
    "factory.talos.dev/installer/9bf23bf8cf3fc88b4eacdd5370d613237508ca5627ce3b70900ffb15e26c9e70:v1.8.2";

/// Hetzner Cloud server type used when a machine does not request one.
pub const DEFAULT_HCLOUD_SERVER_TYPE: &str = "cx22";

/// Hetzner Cloud datacenter used when a machine does not request one.
pub const DEFAULT_HCLOUD_DATACENTER: &str = "nbg1-dc3";

/// Platform identifiers accepted for `machines[].platform`.
pub const SUPPORTED_PLATFORMS: &[&str] = &["hcloud"];

/// Values accepted for `machines[].variant`. The empty string falls back to
/// the metal variant during normalization.
pub const MACHINE_VARIANTS: &[&str] = &["cloud", "metal", ""];

/// Primitive value kinds checked by the structural validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Bool,
    Array,
    Object,
}

impl ValueKind {
    /// Lowercase name used in type-mismatch messages.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Bool => "boolean",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

/// Schema for the elements of an array-valued field.
#[derive(Debug, Clone)]
pub enum ItemSchema {
    /// Every element must have this primitive kind.
    Value(ValueKind),
    /// Every element is an object validated against this schema.
    Object(ObjectSchema),
}

/// Schema for one named field inside an object.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: ValueKind,
    pub required: bool,
    /// Allowed values for string fields; empty means unrestricted.
    pub allowed: &'static [&'static str],
    /// Default applied by the normalizer when the field is absent.
    pub default: Option<Value>,
    /// Nested schema for object-valued fields. `None` on an object field
    /// accepts any mapping.
    pub object: Option<ObjectSchema>,
    /// Element schema for array-valued fields.
    pub items: Option<ItemSchema>,
    /// Arrays that must contain at least one element.
    pub non_empty: bool,
}

impl FieldSchema {
    fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            allowed: &[],
            default: None,
            object: None,
            items: None,
            non_empty: false,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = allowed;
        self
    }

    fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    fn with_object(mut self, object: ObjectSchema) -> Self {
        self.object = Some(object);
        self
    }

    fn with_items(mut self, items: ItemSchema) -> Self {
        self.items = Some(items);
        self
    }

    fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }
}

/// Schema for a mapping: declared fields in validation order, plus the
/// closed-world flag. Closed objects reject undeclared keys.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    pub fields: Vec<FieldSchema>,
    pub closed: bool,
}

impl ObjectSchema {
    fn closed(fields: Vec<FieldSchema>) -> Self {
        Self { fields, closed: true }
    }

    /// An object accepting arbitrary keys; used for anchor templates.
    fn open() -> Self {
        Self {
            fields: Vec::new(),
            closed: false,
        }
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// The cluster specification schema.
#[derive(Debug, Clone)]
pub struct Schema {
    root: ObjectSchema,
}

impl Schema {
    /// Build the schema for cluster documents.
    pub fn cluster() -> Self {
        let machine_hcloud = ObjectSchema::closed(vec![
            FieldSchema::new("serverType", ValueKind::String),
            FieldSchema::new("datacenter", ValueKind::String),
        ]);

        let machine = ObjectSchema::closed(vec![
            FieldSchema::new("id", ValueKind::String).required(),
            FieldSchema::new("type", ValueKind::String).required(),
            FieldSchema::new("platform", ValueKind::String)
                .required()
                .one_of(SUPPORTED_PLATFORMS),
            FieldSchema::new("variant", ValueKind::String).one_of(MACHINE_VARIANTS),
            FieldSchema::new("talosInitialVersion", ValueKind::String)
                .with_default(json!(DEFAULT_TALOS_VERSION)),
            FieldSchema::new("talosImage", ValueKind::String)
                .with_default(json!(DEFAULT_TALOS_IMAGE)),
            FieldSchema::new("privateIP", ValueKind::String),
            FieldSchema::new("configPatches", ValueKind::Array)
                .with_items(ItemSchema::Value(ValueKind::String)),
            FieldSchema::new("userdata", ValueKind::String),
            FieldSchema::new("apply-config-via-userdata", ValueKind::Bool),
            FieldSchema::new("hcloud", ValueKind::Object).with_object(machine_hcloud),
        ]);

        let machine_defaults = ObjectSchema::closed(vec![FieldSchema::new(
            "hcloud",
            ValueKind::Object,
        )
        .with_object(ObjectSchema::closed(vec![
            FieldSchema::new("serverType", ValueKind::String)
                .with_default(json!(DEFAULT_HCLOUD_SERVER_TYPE)),
            FieldSchema::new("datacenter", ValueKind::String)
                .with_default(json!(DEFAULT_HCLOUD_DATACENTER)),
        ]))]);

        let root = ObjectSchema::closed(vec![
            FieldSchema::new("name", ValueKind::String).required(),
            FieldSchema::new("kubernetesVersion", ValueKind::String)
                .with_default(json!(DEFAULT_KUBERNETES_VERSION)),
            FieldSchema::new("privateNetwork", ValueKind::String),
            FieldSchema::new("privateSubnetwork", ValueKind::String),
            FieldSchema::new("usePrivateNetwork", ValueKind::Bool).with_default(json!(false)),
            FieldSchema::new("skipInitApply", ValueKind::Bool).with_default(json!(false)),
            FieldSchema::new("anchors", ValueKind::Object).with_object(ObjectSchema::open()),
            FieldSchema::new("machineDefaults", ValueKind::Object).with_object(machine_defaults),
            FieldSchema::new("machines", ValueKind::Array)
                .required()
                .non_empty()
                .with_items(ItemSchema::Object(machine)),
        ]);

        Self { root }
    }

    /// Root object schema of the document.
    pub fn root(&self) -> &ObjectSchema {
        &self.root
    }

    /// Look up the declared default for a field path. Array fields with an
    /// object item schema are traversed into their items, so
    /// `["machines", "talosImage"]` resolves the per-machine default.
    pub fn default_value(&self, path: &[&str]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut object = &self.root;
        for segment in parents {
            let field = object.field(segment)?;
            object = match (&field.object, &field.items) {
                (Some(nested), _) => nested,
                (None, Some(ItemSchema::Object(items))) => items,
                _ => return None,
            };
        }
        object.field(last).and_then(|field| field.default.as_ref())
    }
}
