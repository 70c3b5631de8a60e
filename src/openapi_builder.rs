use crate::annotation::{AnnotationParser, AnnotationSet};
use crate::builder::info::{build_info, Info, InfoBlock};
use crate::builder::operation::build_operations;
use crate::builder::parameter::{build_parameters, Parameter};
use crate::builder::path::{build_paths, PathItem};
use crate::builder::request_body::{build_request_bodies, RequestBody};
use crate::builder::response::{build_responses, Response};
use crate::builder::schema::{build_schemas, Schema};
use crate::builder::security::{build_security, build_security_schemes, SecurityRequirement, SecurityScheme};
use crate::builder::server::{build_servers, Server};
use crate::builder::struct_schema::build_struct_schemas;
use crate::builder::ComponentGroups;
use crate::config::GeneratorConfig;
use crate::diagnostics::Diagnostics;
use crate::extractor::{CommentExtractor, StructExtractor};
use crate::parser::ParsedFile;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Component types the assembler knows how to build.
pub const KNOWN_COMPONENT_TYPES: [&str; 11] = [
    "openapi",
    "server",
    "security",
    "securityScheme",
    "path",
    "operation",
    "parameter",
    "schema",
    "requestBody",
    "response",
    "struct",
];

/// Assembles annotation groups and struct derived schemas into one document
pub struct OpenApiBuilder {
    info: InfoBlock,
    servers: Vec<Server>,
    paths: BTreeMap<String, PathItem>,
    security: Vec<SecurityRequirement>,
    components: Components,
    /// Schemas derived from struct tags, merged in [`OpenApiBuilder::build`]
    struct_schemas: BTreeMap<String, Schema>,
}

/// OpenAPI Components object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, Parameter>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, Response>,
    #[serde(rename = "requestBodies", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub request_bodies: BTreeMap<String, RequestBody>,
    #[serde(rename = "securitySchemes", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub security_schemes: BTreeMap<String, SecurityScheme>,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
            && self.parameters.is_empty()
            && self.responses.is_empty()
            && self.request_bodies.is_empty()
            && self.security_schemes.is_empty()
    }
}

/// Complete OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
}

impl OpenApiBuilder {
    pub fn new() -> Self {
        Self {
            info: InfoBlock::default(),
            servers: Vec::new(),
            paths: BTreeMap::new(),
            security: Vec::new(),
            components: Components::default(),
            struct_schemas: BTreeMap::new(),
        }
    }

    /// Sets the info used when no `openapi` block overrides it.
    pub fn with_info(mut self, info: InfoBlock) -> Self {
        self.info = info;
        self
    }

    /// Builds every component type found in `set` and merges the results.
    ///
    /// Named components replace earlier ones of the same name; servers and
    /// security requirements are appended in group-name order.
    pub fn add_annotations(&mut self, set: &AnnotationSet, diagnostics: &mut Diagnostics) {
        for component_type in set.component_types() {
            if !KNOWN_COMPONENT_TYPES.contains(&component_type) {
                diagnostics.warn(component_type, "unknown component type; groups ignored");
            }
        }

        let empty = ComponentGroups::new();
        let groups = |component_type: &str| set.component(component_type).unwrap_or(&empty);

        self.info = build_info(groups("openapi"), self.info.clone(), diagnostics);

        for (_, servers) in build_servers(groups("server"), diagnostics) {
            self.servers.extend(servers);
        }
        for (_, requirements) in build_security(groups("security"), diagnostics) {
            self.security.extend(requirements);
        }

        let components = &mut self.components;
        components
            .security_schemes
            .extend(build_security_schemes(groups("securityScheme"), diagnostics));
        components.parameters.extend(build_parameters(groups("parameter"), diagnostics));
        components.schemas.extend(build_schemas(groups("schema"), diagnostics));
        components
            .request_bodies
            .extend(build_request_bodies(groups("requestBody"), diagnostics));
        components.responses.extend(build_responses(groups("response"), diagnostics));

        let operations = build_operations(groups("operation"), diagnostics);
        self.paths.extend(build_paths(groups("path"), &operations, diagnostics));

        for name in set.names("struct") {
            if !set.groups("struct", name).iter().all(Vec::is_empty) {
                debug!("Directives under struct header {} are ignored", name);
            }
        }
    }

    pub fn add_struct_schemas(&mut self, schemas: BTreeMap<String, Schema>) {
        self.struct_schemas.extend(schemas);
    }

    /// Merges struct derived schemas and produces the document.
    ///
    /// An annotation schema and a struct schema with the same name keep the
    /// annotation one.
    pub fn build(mut self, diagnostics: &mut Diagnostics) -> OpenApiDocument {
        for (name, schema) in std::mem::take(&mut self.struct_schemas) {
            if self.components.schemas.contains_key(&name) {
                diagnostics.warn(
                    "schema",
                    format!("{} is defined by an annotation and by struct tags; keeping the annotation", name),
                );
                continue;
            }
            self.components.schemas.insert(name, schema);
        }

        debug!(
            "Building document with {} paths and {} schemas",
            self.paths.len(),
            self.components.schemas.len()
        );

        OpenApiDocument {
            openapi: self.info.openapi,
            info: self.info.info,
            servers: self.servers,
            paths: self.paths,
            components: if self.components.is_empty() {
                None
            } else {
                Some(self.components)
            },
            security: self.security,
        }
    }
}

impl Default for OpenApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A document together with everything noticed while building it.
#[derive(Debug, Clone)]
pub struct Generated {
    pub document: OpenApiDocument,
    pub diagnostics: Diagnostics,
}

/// Runs the annotation pipeline over already parsed files.
pub fn generate(parsed_files: &[ParsedFile], config: &GeneratorConfig) -> Generated {
    let mut diagnostics = Diagnostics::new();

    let comments = CommentExtractor::new(config.marker.as_str()).extract_from_files(parsed_files);
    let parser = AnnotationParser::new(config.marker.as_str());
    let set = parser.parse_blocks(&comments, &mut diagnostics);
    info!("Read {} comments, {} component types annotated", comments.len(), set.component_types().count());

    let wanted: BTreeSet<String> = set.names("struct").map(String::from).collect();
    let structs = StructExtractor::extract(parsed_files, &wanted);
    for name in &wanted {
        if !structs.iter().any(|descriptor| &descriptor.name == name) {
            diagnostics.warn("struct", format!("no struct named {} was found", name));
        }
    }

    let mut builder = OpenApiBuilder::new();
    builder.add_annotations(&set, &mut diagnostics);
    builder.add_struct_schemas(build_struct_schemas(&structs, config, &mut diagnostics));
    let document = builder.build(&mut diagnostics);

    Generated { document, diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::operation::HttpMethod;
    use crate::builder::schema::SchemaType;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn parse(blocks: &[&str], diagnostics: &mut Diagnostics) -> AnnotationSet {
        AnnotationParser::new("openapi-doc").parse_blocks(blocks.iter().copied(), diagnostics)
    }

    fn parse_code(code: &str) -> ParsedFile {
        let syntax_tree = syn::parse_file(code).expect("Failed to parse test code");
        ParsedFile {
            path: PathBuf::from("test.rs"),
            source: code.to_string(),
            syntax_tree,
        }
    }

    #[test]
    fn test_new_builder_defaults() {
        let mut diagnostics = Diagnostics::new();
        let document = OpenApiBuilder::new().build(&mut diagnostics);

        assert_eq!(document.openapi, "3.0.0");
        assert_eq!(document.info.title, "Generated API");
        assert_eq!(document.info.version, "1.0.0");
        assert!(document.paths.is_empty());
        assert!(document.components.is_none());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_with_info_is_overridden_by_annotation() {
        let mut diagnostics = Diagnostics::new();
        let set = parse(&["/* openapi-doc\n@@openapi: 3.0.3\n@@info.title: Widget API\n@@\n*/"], &mut diagnostics);

        let mut base = InfoBlock::default();
        base.info.version = "0.9.0".to_string();
        let mut builder = OpenApiBuilder::new().with_info(base);
        builder.add_annotations(&set, &mut diagnostics);
        let document = builder.build(&mut diagnostics);

        assert_eq!(document.openapi, "3.0.3");
        assert_eq!(document.info.title, "Widget API");
        assert_eq!(document.info.version, "0.9.0");
    }

    #[test]
    fn test_assembles_all_component_types() {
        let mut diagnostics = Diagnostics::new();
        let set = parse(
            &[
                "/* openapi-doc\n@@server: prod\n@@url: https://api.example.com\n@@description: production\n@@\n@@security: global\n@@name: bearerAuth\n@@\n@@securityScheme: bearerAuth\n@@type: http\n@@scheme: bearer\n@@\n*/",
                "/* openapi-doc\n@@schema: Widget\n@@type: object\n@@prop_name: id\n@@prop_type: integer\n@@prop_req: true\n@@\n@@parameter: id\n@@name: id\n@@in: path\n@@required: true\n@@schema_type: integer\n@@\n*/",
                "/* openapi-doc @@response: WidgetFound @@desc: ok @@content_name: application/json @@content_ref: Widget */",
                "/* openapi-doc @@requestBody: NewWidget @@desc: new @@content_name: application/json @@content_ref: Widget */",
                "/* openapi-doc\n@@path: /widgets/{id}\n@@parameters.ref: id\n@@\n@@operation: /widgets/{id}\n@@method: get\n@@resp_name: 200\n@@resp_ref: WidgetFound\n@@\n@@operation: /widgets/{id}\n@@method: put\n@@req_ref: NewWidget\n@@resp_name: 204\n@@resp_desc: updated\n@@\n*/",
            ],
            &mut diagnostics,
        );

        let mut builder = OpenApiBuilder::new();
        builder.add_annotations(&set, &mut diagnostics);
        let document = builder.build(&mut diagnostics);

        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert_eq!(document.servers.len(), 1);
        assert_eq!(document.security.len(), 1);

        let item = &document.paths["/widgets/{id}"];
        assert!(item.operation(HttpMethod::Get).is_some());
        assert_eq!(
            item.put.as_ref().unwrap().request_body.as_ref().unwrap().as_str(),
            "#/components/requestBodies/NewWidget"
        );

        let components = document.components.unwrap();
        assert_eq!(components.schemas["Widget"].required, vec!["id"]);
        assert!(components.parameters.contains_key("id"));
        assert!(components.responses.contains_key("WidgetFound"));
        assert!(components.request_bodies.contains_key("NewWidget"));
        assert_eq!(components.security_schemes["bearerAuth"].scheme_type, "http");
    }

    #[test]
    fn test_unknown_component_type_warns() {
        let mut diagnostics = Diagnostics::new();
        let set = parse(&["/* openapi-doc\n@@widget: thing\n@@colour: blue\n@@\n*/"], &mut diagnostics);

        let mut builder = OpenApiBuilder::new();
        builder.add_annotations(&set, &mut diagnostics);

        let warning = diagnostics.warnings().next().unwrap();
        assert_eq!(warning.component, "widget");
    }

    #[test]
    fn test_annotation_schema_wins_over_struct_schema() {
        let mut diagnostics = Diagnostics::new();
        let set = parse(&["/* openapi-doc\n@@schema: Widget\n@@type: string\n@@\n*/"], &mut diagnostics);

        let mut builder = OpenApiBuilder::new();
        builder.add_annotations(&set, &mut diagnostics);
        let mut struct_schemas = BTreeMap::new();
        struct_schemas.insert("Widget".to_string(), Schema::object());
        struct_schemas.insert("Gadget".to_string(), Schema::object());
        builder.add_struct_schemas(struct_schemas);
        let document = builder.build(&mut diagnostics);

        let schemas = document.components.unwrap().schemas;
        assert_eq!(schemas["Widget"].schema_type, Some(SchemaType::String));
        assert_eq!(schemas["Gadget"].schema_type, Some(SchemaType::Object));
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_generate_from_source() {
        let parsed = parse_code(
            r#"
            /* openapi-doc
            @@struct: Widget
            */
            pub struct Widget {
                /// oas:"Widget*"
                pub id: u64,
                /// oas:"Widget" oas_desc:"display name"
                pub name: String,
            }

            // openapi-doc
            // @@path: /widgets
            // @@summary: Widgets
            // @@
            // @@operation: /widgets
            // @@method: get
            // @@resp_name: 200
            // @@resp_desc: all widgets
            // @@
            fn list() {}
            "#,
        );

        let generated = generate(&[parsed], &GeneratorConfig::default());

        assert!(generated.diagnostics.is_empty(), "{:?}", generated.diagnostics);
        let document = generated.document;
        let widget = &document.components.as_ref().unwrap().schemas["Widget"];
        assert_eq!(widget.required, vec!["id"]);
        assert_eq!(
            widget.properties["name"].inline().unwrap().description.as_deref(),
            Some("display name")
        );
        assert_eq!(document.paths["/widgets"].summary.as_deref(), Some("Widgets"));
        assert!(document.paths["/widgets"].get.is_some());
    }

    #[test]
    fn test_generate_marker_below_prose_comment() {
        let parsed = parse_code(
            "// Widget endpoints.\n// openapi-doc\n// @@path: /widgets\n// @@summary: Widgets\nfn widgets() {}",
        );
        let generated = generate(&[parsed], &GeneratorConfig::default());

        assert!(generated.diagnostics.is_empty(), "{:?}", generated.diagnostics);
        assert_eq!(
            generated.document.paths["/widgets"].summary.as_deref(),
            Some("Widgets")
        );
    }

    #[test]
    fn test_generate_reports_missing_struct() {
        let parsed = parse_code("/* openapi-doc\n@@struct: Ghost\n*/\nfn main() {}");
        let generated = generate(&[parsed], &GeneratorConfig::default());

        let warning = generated.diagnostics.warnings().next().unwrap();
        assert!(warning.message.contains("Ghost"));
    }
}
