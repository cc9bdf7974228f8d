//! Schema-driven structural validation of raw cluster documents
//!
//! The walk is deterministic so the reported violation is stable: at every
//! object, required fields are checked in schema order, then undeclared keys
//! are rejected, then each declared field is checked for type and enumeration
//! conformance, recursing into nested objects and array elements in order.
//! The first violation aborts the walk.
//!
//! Copyright (c) 2025 Talospec Team
//! Licensed under the Apache-2.0 license

use crate::schema::{FieldSchema, ItemSchema, ObjectSchema, Schema, ValueKind};
use crate::validation::error::{FieldPath, StructuralViolation};
use serde_json::{Map, Value};

/// Validate a raw document against the schema.
pub fn validate_structure(doc: &Value, schema: &Schema) -> Result<(), StructuralViolation> {
    match doc.as_object() {
        Some(object) => validate_object(object, schema.root(), &FieldPath::root()),
        None => Err(StructuralViolation::InvalidType {
            path: FieldPath::root(),
            expected: ValueKind::Object,
        }),
    }
}

fn validate_object(
    object: &Map<String, Value>,
    schema: &ObjectSchema,
    path: &FieldPath,
) -> Result<(), StructuralViolation> {
    for field in &schema.fields {
        if field.required && !object.contains_key(field.name) {
            let field_path = path.child(field.name);
            // A missing required array reads the same as an empty one.
            return Err(if field.non_empty {
                StructuralViolation::EmptyArray { path: field_path }
            } else {
                StructuralViolation::MissingField { path: field_path }
            });
        }
    }

    if schema.closed {
        for key in object.keys() {
            if schema.field(key).is_none() {
                return Err(StructuralViolation::UnknownField {
                    path: path.child(key),
                });
            }
        }
    }

    for field in &schema.fields {
        if let Some(value) = object.get(field.name) {
            validate_field(value, field, &path.child(field.name))?;
        }
    }

    Ok(())
}

fn validate_field(
    value: &Value,
    field: &FieldSchema,
    path: &FieldPath,
) -> Result<(), StructuralViolation> {
    match field.kind {
        ValueKind::String => {
            let Some(text) = value.as_str() else {
                return Err(invalid_type(path, ValueKind::String));
            };
            if !field.allowed.is_empty() && !field.allowed.contains(&text) {
                return Err(StructuralViolation::InvalidEnum {
                    path: path.clone(),
                    allowed: field.allowed,
                });
            }
        }
        ValueKind::Bool => {
            if !value.is_boolean() {
                return Err(invalid_type(path, ValueKind::Bool));
            }
        }
        ValueKind::Object => {
            let Some(object) = value.as_object() else {
                return Err(invalid_type(path, ValueKind::Object));
            };
            if let Some(schema) = &field.object {
                validate_object(object, schema, path)?;
            }
        }
        ValueKind::Array => {
            let Some(elements) = value.as_array() else {
                return Err(invalid_type(path, ValueKind::Array));
            };
            if field.non_empty && elements.is_empty() {
                return Err(StructuralViolation::EmptyArray { path: path.clone() });
            }
            if let Some(items) = &field.items {
                for (index, element) in elements.iter().enumerate() {
                    validate_item(element, items, &path.child_index(index))?;
                }
            }
        }
    }
    Ok(())
}

fn validate_item(
    element: &Value,
    items: &ItemSchema,
    path: &FieldPath,
) -> Result<(), StructuralViolation> {
    match items {
        ItemSchema::Value(kind) => match kind {
            ValueKind::String if !element.is_string() => Err(invalid_type(path, ValueKind::String)),
            ValueKind::Bool if !element.is_boolean() => Err(invalid_type(path, ValueKind::Bool)),
            ValueKind::Array if !element.is_array() => Err(invalid_type(path, ValueKind::Array)),
            ValueKind::Object if !element.is_object() => Err(invalid_type(path, ValueKind::Object)),
            _ => Ok(()),
        },
        ItemSchema::Object(schema) => match element.as_object() {
            Some(object) => validate_object(object, schema, path),
            None => Err(invalid_type(path, ValueKind::Object)),
        },
    }
}

fn invalid_type(path: &FieldPath, expected: ValueKind) -> StructuralViolation {
    StructuralViolation::InvalidType {
        path: path.clone(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_doc() -> Value {
        json!({
            "name": "test-cluster",
            "machines": [
                {"id": "control-1", "type": "controlplane", "platform": "hcloud"}
            ]
        })
    }

    #[test]
    fn test_accepts_valid_document() {
        let schema = Schema::cluster();
        assert!(validate_structure(&valid_doc(), &schema).is_ok());
    }

    #[test]
    fn test_rejects_non_mapping_document() {
        let schema = Schema::cluster();
        let violation = validate_structure(&json!(["not", "a", "mapping"]), &schema).unwrap_err();
        assert_eq!(
            violation,
            StructuralViolation::InvalidType {
                path: FieldPath::root(),
                expected: ValueKind::Object,
            }
        );
    }

    #[test]
    fn test_required_fields_report_in_schema_order() {
        let schema = Schema::cluster();
        // Both name and machines are missing; name is declared first.
        let violation = validate_structure(&json!({}), &schema).unwrap_err();
        assert_eq!(
            violation,
            StructuralViolation::MissingField {
                path: FieldPath::root().child("name"),
            }
        );
    }

    #[test]
    fn test_missing_and_empty_machines_are_the_same_violation() {
        let schema = Schema::cluster();
        let missing = validate_structure(&json!({"name": "c"}), &schema).unwrap_err();
        let empty =
            validate_structure(&json!({"name": "c", "machines": []}), &schema).unwrap_err();
        assert_eq!(missing, empty);
        assert_eq!(
            missing,
            StructuralViolation::EmptyArray {
                path: FieldPath::root().child("machines"),
            }
        );
    }

    #[test]
    fn test_nested_required_field() {
        let schema = Schema::cluster();
        let mut doc = valid_doc();
        doc["machines"][0].as_object_mut().unwrap().remove("type");
        let violation = validate_structure(&doc, &schema).unwrap_err();
        assert_eq!(
            violation,
            StructuralViolation::MissingField {
                path: FieldPath::root()
                    .child("machines")
                    .child_index(0)
                    .child("type"),
            }
        );
    }

    #[test]
    fn test_unknown_field_at_top_level() {
        let schema = Schema::cluster();
        let mut doc = valid_doc();
        doc["extra"] = json!("value");
        let violation = validate_structure(&doc, &schema).unwrap_err();
        assert_eq!(
            violation,
            StructuralViolation::UnknownField {
                path: FieldPath::root().child("extra"),
            }
        );
    }

    #[test]
    fn test_unknown_field_inside_machine() {
        let schema = Schema::cluster();
        let mut doc = valid_doc();
        doc["machines"][0]["unknown"] = json!(true);
        let violation = validate_structure(&doc, &schema).unwrap_err();
        assert_eq!(
            violation,
            StructuralViolation::UnknownField {
                path: FieldPath::root()
                    .child("machines")
                    .child_index(0)
                    .child("unknown"),
            }
        );
    }

    #[test]
    fn test_platform_enumeration() {
        let schema = Schema::cluster();
        let mut doc = valid_doc();
        doc["machines"][0]["platform"] = json!("aws");
        let violation = validate_structure(&doc, &schema).unwrap_err();
        assert!(matches!(
            violation,
            StructuralViolation::InvalidEnum { ref path, .. }
                if path.to_string() == "machines[0].platform"
        ));
    }

    #[test]
    fn test_variant_accepts_declared_values() {
        let schema = Schema::cluster();
        for variant in ["cloud", "metal", ""] {
            let mut doc = valid_doc();
            doc["machines"][0]["variant"] = json!(variant);
            assert!(
                validate_structure(&doc, &schema).is_ok(),
                "variant: {variant:?}"
            );
        }

        let mut doc = valid_doc();
        doc["machines"][0]["variant"] = json!("edge");
        assert!(validate_structure(&doc, &schema).is_err());
    }

    #[test]
    fn test_config_patches_must_hold_strings() {
        let schema = Schema::cluster();
        let mut doc = valid_doc();
        doc["machines"][0]["configPatches"] = json!(["ok", 42]);
        let violation = validate_structure(&doc, &schema).unwrap_err();
        assert_eq!(
            violation,
            StructuralViolation::InvalidType {
                path: FieldPath::root()
                    .child("machines")
                    .child_index(0)
                    .child("configPatches")
                    .child_index(1),
                expected: ValueKind::String,
            }
        );
    }

    #[test]
    fn test_type_mismatch_on_declared_field() {
        let schema = Schema::cluster();
        let mut doc = valid_doc();
        doc["skipInitApply"] = json!("yes");
        let violation = validate_structure(&doc, &schema).unwrap_err();
        assert_eq!(
            violation,
            StructuralViolation::InvalidType {
                path: FieldPath::root().child("skipInitApply"),
                expected: ValueKind::Bool,
            }
        );
    }

    #[test]
    fn test_anchors_mapping_is_free_form() {
        let schema = Schema::cluster();
        let mut doc = valid_doc();
        doc["anchors"] = json!({
            "base-patch": "machine:\n  network: {}\n",
            "labels": {"role": "worker"}
        });
        assert!(validate_structure(&doc, &schema).is_ok());
    }

    #[test]
    fn test_machine_defaults_block_is_closed() {
        let schema = Schema::cluster();
        let mut doc = valid_doc();
        doc["machineDefaults"] = json!({"hcloud": {"serverType": "cx32"}});
        assert!(validate_structure(&doc, &schema).is_ok());

        doc["machineDefaults"] = json!({"hcloud": {"region": "fsn1"}});
        let violation = validate_structure(&doc, &schema).unwrap_err();
        assert_eq!(
            violation,
            StructuralViolation::UnknownField {
                path: FieldPath::root()
                    .child("machineDefaults")
                    .child("hcloud")
                    .child("region"),
            }
        );
    }
}
