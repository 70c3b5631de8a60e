use crate::parser::ParsedFile;
use crate::tag::looks_like_tag;
use log::debug;
use std::collections::BTreeSet;
use syn::visit::Visit;

/// A named-field struct selected for schema derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDescriptor {
    pub name: String,
    /// Fields that carry tag text, in declaration order
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    /// Last path segment of the declared type, with `Option<T>` unwrapped to `T`
    pub type_name: String,
    /// Tag text gathered from the field's doc comment lines
    pub tag: String,
}

/// Finds the structs named in `wanted` across all parsed files.
pub struct StructExtractor;

impl StructExtractor {
    pub fn extract(parsed_files: &[ParsedFile], wanted: &BTreeSet<String>) -> Vec<StructDescriptor> {
        if wanted.is_empty() {
            return Vec::new();
        }
        let mut visitor = StructVisitor {
            wanted,
            found: Vec::new(),
        };
        for parsed_file in parsed_files {
            visitor.visit_file(&parsed_file.syntax_tree);
        }
        for name in wanted {
            if !visitor.found.iter().any(|descriptor| &descriptor.name == name) {
                debug!("Struct {} was annotated but not found", name);
            }
        }
        visitor.found
    }
}

struct StructVisitor<'w> {
    wanted: &'w BTreeSet<String>,
    found: Vec<StructDescriptor>,
}

impl<'ast, 'w> Visit<'ast> for StructVisitor<'w> {
    fn visit_item_struct(&mut self, node: &'ast syn::ItemStruct) {
        let name = node.ident.to_string();
        if self.wanted.contains(&name) {
            if let syn::Fields::Named(named) = &node.fields {
                let fields: Vec<FieldDescriptor> = named.named.iter().filter_map(field_descriptor).collect();
                debug!("Found struct {} with {} tagged fields", name, fields.len());
                self.found.push(StructDescriptor { name, fields });
            }
        }

        syn::visit::visit_item_struct(self, node);
    }
}

fn field_descriptor(field: &syn::Field) -> Option<FieldDescriptor> {
    let name = field.ident.as_ref()?.to_string();
    let tag = doc_lines(&field.attrs)
        .into_iter()
        .filter(|line| looks_like_tag(line))
        .map(|line| line.trim().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    if tag.is_empty() {
        return None;
    }
    Some(FieldDescriptor {
        name: name.trim_start_matches("r#").to_string(),
        type_name: type_name(&field.ty),
        tag,
    })
}

/// The text of every `#[doc = "..."]` attribute, which is what `///` lines become.
fn doc_lines(attrs: &[syn::Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(syn::MetaNameValue {
                value:
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(text),
                        ..
                    }),
                ..
            }) => Some(text.value()),
            _ => None,
        })
        .collect()
}

fn type_name(ty: &syn::Type) -> String {
    match ty {
        syn::Type::Path(type_path) => {
            let Some(segment) = type_path.path.segments.last() else {
                return "unknown".to_string();
            };
            if segment.ident == "Option" {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                        return type_name(inner);
                    }
                }
            }
            segment.ident.to_string()
        }
        syn::Type::Reference(reference) => type_name(&reference.elem),
        syn::Type::Paren(paren) => type_name(&paren.elem),
        syn::Type::Group(group) => type_name(&group.elem),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn parse_code(code: &str) -> ParsedFile {
        let syntax_tree = syn::parse_file(code).expect("Failed to parse test code");
        ParsedFile {
            path: PathBuf::from("test.rs"),
            source: code.to_string(),
            syntax_tree,
        }
    }

    fn wanted(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_extracts_tagged_fields_of_wanted_structs() {
        let parsed = parse_code(
            r#"
            pub struct Address {
                /// The street line.
                /// oas:"AddressRequest*;AddressResponse" oas_ex:"1 Main St"
                pub street: String,
                /// Not documented for the API
                pub internal: u64,
                /// oas:"AddressResponse" json:"zip"
                pub zip: Option<u32>,
            }

            pub struct Ignored {
                /// oas:"Ignored"
                pub value: String,
            }
            "#,
        );

        let structs = StructExtractor::extract(&[parsed], &wanted(&["Address"]));

        assert_eq!(
            structs,
            vec![StructDescriptor {
                name: "Address".to_string(),
                fields: vec![
                    FieldDescriptor {
                        name: "street".to_string(),
                        type_name: "String".to_string(),
                        tag: r#"oas:"AddressRequest*;AddressResponse" oas_ex:"1 Main St""#.to_string(),
                    },
                    FieldDescriptor {
                        name: "zip".to_string(),
                        type_name: "u32".to_string(),
                        tag: r#"oas:"AddressResponse" json:"zip""#.to_string(),
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_finds_structs_in_inline_modules() {
        let parsed = parse_code(
            r#"
            mod models {
                pub struct Widget {
                    /// oas:"Widget"
                    pub price: std::option::Option<f64>,
                    /// oas:"Widget"
                    pub owner: &'static str,
                }
            }
            "#,
        );

        let structs = StructExtractor::extract(&[parsed], &wanted(&["Widget"]));

        assert_eq!(structs.len(), 1);
        let types: Vec<&str> = structs[0].fields.iter().map(|f| f.type_name.as_str()).collect();
        assert_eq!(types, vec!["f64", "str"]);
    }

    #[test]
    fn test_malformed_tag_lines_are_kept() {
        let parsed = parse_code(
            r#"
            pub struct Widget {
                /// oas:"Widget*
                pub name: String,
            }
            "#,
        );

        let structs = StructExtractor::extract(&[parsed], &wanted(&["Widget"]));

        assert_eq!(structs[0].fields[0].tag, r#"oas:"Widget*"#);
    }

    #[test]
    fn test_tuple_structs_and_empty_wanted_set() {
        let parsed = parse_code("pub struct Id(u64);");

        assert!(StructExtractor::extract(std::slice::from_ref(&parsed), &wanted(&["Id"])).is_empty());
        assert!(StructExtractor::extract(&[parsed], &BTreeSet::new()).is_empty());
    }
}
