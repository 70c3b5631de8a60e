//! Schemas derived from tagged struct fields.

use super::schema::{convert_example, InlineProperty, Schema, SchemaProperty, SchemaType};
use crate::config::GeneratorConfig;
use crate::diagnostics::Diagnostics;
use crate::extractor::structs::{FieldDescriptor, StructDescriptor};
use crate::reference::ComponentCategory;
use crate::tag::Tags;
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;

const COMPONENT: &str = "schema";

/// Schema membership sub-tag: `oas:"A*;B"`.
pub const MEMBERSHIP_TAG: &str = "oas";
pub const DESCRIPTION_TAG: &str = "oas_desc";
pub const EXAMPLE_TAG: &str = "oas_ex";
pub const REFERENCE_TAG: &str = "oas_ref";

/// Builds object schemas from the tagged fields of every descriptor.
///
/// A field lands in each schema its membership tag names, and is required only in
/// those names carrying a trailing `*`.
pub fn build_struct_schemas(
    structs: &[StructDescriptor],
    config: &GeneratorConfig,
    diagnostics: &mut Diagnostics,
) -> BTreeMap<String, Schema> {
    let mut schemas: BTreeMap<String, Schema> = BTreeMap::new();
    for descriptor in structs {
        debug!("Deriving schemas from struct {}", descriptor.name);
        for field in &descriptor.fields {
            apply_field(field, config, &mut schemas, diagnostics);
        }
    }
    schemas
}

fn apply_field(
    field: &FieldDescriptor,
    config: &GeneratorConfig,
    schemas: &mut BTreeMap<String, Schema>,
    diagnostics: &mut Diagnostics,
) {
    let tags = match Tags::parse(&field.tag) {
        Ok(tags) => tags,
        Err(err) => {
            diagnostics.warn(COMPONENT, format!("unable to parse tag of field {}: {}", field.name, err));
            return;
        }
    };
    let Some(membership) = tags.get(MEMBERSHIP_TAG) else {
        return;
    };

    let property_name = match tags.get(&config.output_tag) {
        Some(tag) if !tag.name().is_empty() => tag.name().to_string(),
        _ => config.field_case.apply(&field.name),
    };
    if property_name == "-" {
        debug!("Field {} is skipped by its output tag", field.name);
        return;
    }

    let property = field_property(field, &tags, diagnostics);
    for target in membership.value.split(';').map(str::trim).filter(|name| !name.is_empty()) {
        let (schema_name, required) = match target.strip_suffix('*') {
            Some(name) => (name.trim(), true),
            None => (target, false),
        };
        let schema = schemas.entry(schema_name.to_string()).or_insert_with(Schema::object);
        if required {
            schema.require(&property_name);
        }
        schema.properties.insert(property_name.clone(), property.clone());
    }
}

fn field_property(field: &FieldDescriptor, tags: &Tags, diagnostics: &mut Diagnostics) -> SchemaProperty {
    if let Some(reference) = tags.get(REFERENCE_TAG).filter(|tag| !tag.value.trim().is_empty()) {
        return SchemaProperty::Reference(ComponentCategory::Schemas.reference(&reference.value));
    }

    let property_type = SchemaType::from_type_name(&field.type_name);
    let fallback = field.name.to_lowercase();
    let description = tags
        .get(DESCRIPTION_TAG)
        .map(|tag| tag.value.clone())
        .unwrap_or_else(|| fallback.clone());
    let example = match tags.get(EXAMPLE_TAG) {
        Some(tag) if property_type == SchemaType::String => Value::String(tag.value.clone()),
        Some(tag) => convert_example(Some(property_type), tag.name(), COMPONENT, diagnostics),
        None => Value::String(fallback),
    };

    SchemaProperty::Inline(InlineProperty {
        property_type: Some(property_type),
        description: Some(description),
        example: Some(example),
        enum_values: Vec::new(),
    })
}
