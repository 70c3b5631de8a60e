use super::{split_list, ComponentGroups};
use crate::diagnostics::Diagnostics;
use crate::directive::{parse_lines, GroupCursor};
use crate::reference::{ComponentCategory, Reference};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

const COMPONENT: &str = "schema";

/// Value of a `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
}

impl FromStr for SchemaType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "object" => Ok(SchemaType::Object),
            "array" => Ok(SchemaType::Array),
            "string" => Ok(SchemaType::String),
            "number" => Ok(SchemaType::Number),
            "integer" => Ok(SchemaType::Integer),
            "boolean" => Ok(SchemaType::Boolean),
            other => Err(format!("invalid type: {}", other)),
        }
    }
}

impl SchemaType {
    /// Parses a type directive; an unknown type is an error and falls back to `string`.
    pub fn parse_or_string(value: &str, component: &str, diagnostics: &mut Diagnostics) -> Self {
        value.parse().unwrap_or_else(|message: String| {
            diagnostics.error(component, message);
            SchemaType::String
        })
    }

    /// Maps a declared Rust type name onto an inline schema type.
    pub fn from_type_name(type_name: &str) -> Self {
        match type_name {
            "f32" | "f64" => SchemaType::Number,
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" => SchemaType::Integer,
            "bool" => SchemaType::Boolean,
            _ => SchemaType::String,
        }
    }
}

/// Converts example text into a value matching `schema_type`.
///
/// Unparseable numbers become `0`; booleans that are neither `true` nor `false`
/// become the placeholder `"true | false"`.
pub fn convert_example(
    schema_type: Option<SchemaType>,
    raw: &str,
    component: &str,
    diagnostics: &mut Diagnostics,
) -> Value {
    match schema_type {
        Some(SchemaType::Number) => match raw.trim().parse::<f64>() {
            Ok(number) => Value::from(number),
            Err(_) => {
                diagnostics.warn(component, format!("unable to cast example: {} to float", raw));
                Value::from(0.0)
            }
        },
        Some(SchemaType::Integer) => match raw.trim().parse::<i64>() {
            Ok(number) => Value::from(number),
            Err(_) => {
                diagnostics.warn(component, format!("unable to cast example: {} to int", raw));
                Value::from(0)
            }
        },
        Some(SchemaType::Boolean) => match raw.trim().parse::<bool>() {
            Ok(flag) => Value::Bool(flag),
            Err(_) => {
                diagnostics.warn(component, format!("unable to cast example: {} to bool", raw));
                Value::String("true | false".to_string())
            }
        },
        _ => Value::String(raw.to_string()),
    }
}

/// Inline part of a schema property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineProperty {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<SchemaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

/// A property is either a reference or inline data, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaProperty {
    Reference(Reference),
    Inline(InlineProperty),
}

impl SchemaProperty {
    pub fn is_reference(&self) -> bool {
        matches!(self, SchemaProperty::Reference(_))
    }

    pub fn reference(&self) -> Option<&Reference> {
        match self {
            SchemaProperty::Reference(reference) => Some(reference),
            SchemaProperty::Inline(_) => None,
        }
    }

    pub fn inline(&self) -> Option<&InlineProperty> {
        match self {
            SchemaProperty::Reference(_) => None,
            SchemaProperty::Inline(inline) => Some(inline),
        }
    }
}

/// Directive values collected for a property before it is finalised.
#[derive(Debug, Clone, Default)]
pub(crate) struct PropertyDraft {
    pub(crate) reference: Option<Reference>,
    pub(crate) property_type: Option<SchemaType>,
    pub(crate) description: Option<String>,
    pub(crate) example: Option<String>,
    pub(crate) enum_values: Vec<String>,
}

impl PropertyDraft {
    /// A reference wins over any inline field that was also written.
    pub(crate) fn finish(self, component: &str, diagnostics: &mut Diagnostics) -> SchemaProperty {
        if let Some(reference) = self.reference {
            return SchemaProperty::Reference(reference);
        }
        let example = self
            .example
            .map(|raw| convert_example(self.property_type, &raw, component, diagnostics));
        SchemaProperty::Inline(InlineProperty {
            property_type: self.property_type,
            description: self.description,
            example,
            enum_values: self.enum_values,
        })
    }
}

/// `additionalProperties` of a map-like schema whose values are arrays of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalProperties {
    #[serde(rename = "type")]
    pub property_type: SchemaType,
    pub items: Reference,
}

/// OpenAPI Schema definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Required property names, in the order they were declared
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, SchemaProperty>,
    #[serde(rename = "additionalProperties", skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,
    /// Item definition when the schema is an array
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaProperty>,
}

impl Schema {
    pub fn object() -> Self {
        Self {
            schema_type: Some(SchemaType::Object),
            ..Self::default()
        }
    }

    /// Marks a property as required once.
    pub fn require(&mut self, property: &str) {
        if !self.required.iter().any(|name| name == property) {
            self.required.push(property.to_string());
        }
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|name| name == property)
    }
}

/// Builds one schema per name; a later group for the same name replaces an earlier one.
pub fn build_schemas(groups: &ComponentGroups, diagnostics: &mut Diagnostics) -> BTreeMap<String, Schema> {
    let mut schemas = BTreeMap::new();
    for (name, line_groups) in groups {
        for lines in line_groups {
            debug!("Building schema: {}", name);
            schemas.insert(name.clone(), parse_schema_lines(lines, diagnostics));
        }
    }
    schemas
}

/// Parses the directives of one schema line group.
pub fn parse_schema_lines(lines: &[String], diagnostics: &mut Diagnostics) -> Schema {
    let mut schema = Schema::default();
    let mut properties: GroupCursor<PropertyDraft> = GroupCursor::new();
    let mut items: Option<PropertyDraft> = None;

    for directive in parse_lines(lines, COMPONENT, diagnostics) {
        let is_array = schema.schema_type == Some(SchemaType::Array);
        let value = directive.value;
        match directive.key {
            "type" => schema.schema_type = Some(SchemaType::parse_or_string(value, COMPONENT, diagnostics)),
            "desc" => schema.description = Some(value.to_string()),
            "ex" => schema.example = Some(value.to_string()),
            "addl_prop_ref" => {
                schema.additional_properties = Some(AdditionalProperties {
                    property_type: SchemaType::Array,
                    items: ComponentCategory::Schemas.reference(value),
                })
            }
            "prop_ref" | "prop_type" if is_array => {
                let draft = items.get_or_insert_with(PropertyDraft::default);
                if directive.key == "prop_ref" {
                    draft.reference = Some(ComponentCategory::Schemas.reference(value));
                } else {
                    draft.property_type = Some(SchemaType::parse_or_string(value, COMPONENT, diagnostics));
                }
            }
            "prop_name" | "prop_req" | "prop_desc" | "prop_ex" | "prop_enum" if is_array => {
                debug!("Ignoring {} on array schema", directive.key);
            }
            "prop_name" => {
                properties.enter(value);
            }
            "prop_req" => {
                if directive.is_true() {
                    match properties.current_key() {
                        Some(property) => schema.require(property),
                        None => diagnostics.warn(COMPONENT, format!("prop_req before any prop_name: {}", directive.line)),
                    }
                }
            }
            "prop_ref" | "prop_type" | "prop_desc" | "prop_ex" | "prop_enum" => {
                let Some(draft) = properties.current() else {
                    diagnostics.warn(COMPONENT, format!("{} before any prop_name: {}", directive.key, directive.line));
                    continue;
                };
                match directive.key {
                    "prop_ref" => draft.reference = Some(ComponentCategory::Schemas.reference(value)),
                    "prop_type" => {
                        draft.property_type = Some(SchemaType::parse_or_string(value, COMPONENT, diagnostics))
                    }
                    "prop_desc" => draft.description = Some(value.to_string()),
                    "prop_ex" => draft.example = Some(value.to_string()),
                    _ => draft.enum_values = split_list(value),
                }
            }
            _ => diagnostics.warn(COMPONENT, format!("invalid name option: {}", directive.line)),
        }
    }

    for (name, draft) in properties.finish() {
        let property = draft.finish(COMPONENT, diagnostics);
        schema.properties.insert(name, property);
    }

    if schema.schema_type == Some(SchemaType::Array) {
        match items {
            Some(draft) => schema.items = Some(draft.finish(COMPONENT, diagnostics)),
            None => diagnostics.warn(COMPONENT, "array schema has no prop_ref or prop_type for its items"),
        }
    }

    schema
}
