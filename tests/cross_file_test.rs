// Annotations that reference each other across files
use openapi_from_comments::builder::operation::HttpMethod;
use openapi_from_comments::config::GeneratorConfig;
use openapi_from_comments::openapi_builder::generate;
use openapi_from_comments::parser::{AstParser, ParsedFile};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;

fn parsed(path: &str, code: &str) -> ParsedFile {
    AstParser::parse_source(Path::new(path), code.to_string()).expect("Failed to parse test code")
}

#[test]
fn test_struct_annotated_in_another_file() {
    let handlers_code = r#"
        /* openapi-doc
        @@struct: Order
        @@
        @@struct: Customer
        @@
        @@path: /orders
        @@
        @@operation: /orders
        @@method: post
        @@req_ref: CreateOrder
        @@resp_name: 201
        @@resp_desc: created
        @@
        */
        pub async fn create_order() {}

        /* openapi-doc @@requestBody: CreateOrder @@content_name: application/json @@content_ref: OrderRequest */
    "#;

    let parsed_files = vec![
        parsed("handlers.rs", handlers_code),
        parsed("models.rs", include_str!("fixtures/models.rs")),
    ];

    let generated = generate(&parsed_files, &GeneratorConfig::default());
    assert!(generated.diagnostics.is_empty(), "{:?}", generated.diagnostics);

    let document = &generated.document;
    let create = document.paths["/orders"].operation(HttpMethod::Post).expect("POST /orders");
    assert_eq!(
        create.request_body.as_ref().map(|r| r.as_str()),
        Some("#/components/requestBodies/CreateOrder")
    );

    let schemas = &document.components.as_ref().expect("components").schemas;
    assert_eq!(
        schemas.keys().collect::<Vec<_>>(),
        vec!["Customer", "OrderRequest", "OrderResponse"]
    );

    let request = &schemas["OrderRequest"];
    assert_eq!(request.required, vec!["quantity"]);
    assert_eq!(request.properties.keys().collect::<Vec<_>>(), vec!["orderId", "quantity"]);

    let response = &schemas["OrderResponse"];
    assert_eq!(response.required, vec!["orderId", "quantity"]);
    let total = response.properties["total"].inline().unwrap();
    assert_eq!(total.example, Some(json!(12.5)));
    assert_eq!(
        response.properties["quantity"].inline().unwrap().description.as_deref(),
        Some("number of items")
    );
    assert!(schemas["Customer"].is_required("email"));
}

#[test]
fn test_struct_that_is_not_annotated_is_ignored() {
    let parsed_files = vec![
        parsed("handlers.rs", "/* openapi-doc @@struct: Customer */\nfn handler() {}"),
        parsed("models.rs", include_str!("fixtures/models.rs")),
    ];

    let generated = generate(&parsed_files, &GeneratorConfig::default());
    let schemas = &generated.document.components.as_ref().expect("components").schemas;

    assert_eq!(schemas.keys().collect::<Vec<_>>(), vec!["Customer"]);
}

#[test]
fn test_malformed_field_tag_is_reported() {
    let models = r#"
        pub struct Widget {
            /// oas:"Widget*"
            pub id: u64,
            /// oas:"Widget*
            pub name: String,
        }
    "#;
    let parsed_files = vec![
        parsed("handlers.rs", "/* openapi-doc @@struct: Widget */\nfn handler() {}"),
        parsed("models.rs", models),
    ];

    let generated = generate(&parsed_files, &GeneratorConfig::default());
    let schemas = &generated.document.components.as_ref().expect("components").schemas;

    assert_eq!(schemas["Widget"].properties.keys().collect::<Vec<_>>(), vec!["id"]);
    let warnings: Vec<String> = generated.diagnostics.warnings().map(ToString::to_string).collect();
    assert_eq!(warnings.len(), 1, "{:?}", warnings);
    assert!(warnings[0].starts_with("[Warning] @@schema: unable to parse tag of field name"));
}

#[test]
fn test_missing_struct_is_reported() {
    let parsed_files = vec![parsed("handlers.rs", "/* openapi-doc @@struct: Invoice */\nfn handler() {}")];

    let generated = generate(&parsed_files, &GeneratorConfig::default());

    let warning = generated.diagnostics.warnings().next().expect("warning");
    assert_eq!(warning.to_string(), "[Warning] @@struct: no struct named Invoice was found");
    assert!(generated.document.components.is_none());
}

#[test]
fn test_annotation_schema_shadows_struct_schema() {
    let parsed_files = vec![
        parsed(
            "handlers.rs",
            "/* openapi-doc\n@@struct: Customer\n@@\n@@schema: Customer\n@@type: string\n@@\n*/\nfn handler() {}",
        ),
        parsed("models.rs", include_str!("fixtures/models.rs")),
    ];

    let generated = generate(&parsed_files, &GeneratorConfig::default());
    let schemas = &generated.document.components.as_ref().expect("components").schemas;

    assert!(schemas["Customer"].properties.is_empty());
    assert_eq!(generated.diagnostics.warnings().count(), 1);
}

#[test]
fn test_later_file_wins_for_duplicate_component() {
    let parsed_files = vec![
        parsed("a.rs", "/* openapi-doc @@response: Gone @@desc: first */"),
        parsed("b.rs", "/* openapi-doc @@response: Gone @@desc: second */"),
    ];

    let generated = generate(&parsed_files, &GeneratorConfig::default());
    let responses = &generated.document.components.as_ref().expect("components").responses;

    assert_eq!(responses["Gone"].inline().unwrap().description, "second");
}
