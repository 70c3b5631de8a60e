//! Field name case conventions for struct derived properties.

use clap::ValueEnum;
use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

/// Casing applied to a field name when no output-name tag exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FieldCase {
    #[value(name = "snakeCase")]
    Snake,
    #[value(name = "kebabCase")]
    Kebab,
    #[value(name = "camelCase")]
    Camel,
    #[value(name = "pascalCase")]
    Pascal,
    #[value(name = "upperCase")]
    Upper,
    #[default]
    #[value(name = "lowerCase")]
    Lower,
}

impl FieldCase {
    pub fn apply(&self, name: &str) -> String {
        match self {
            FieldCase::Snake => name.to_snake_case(),
            FieldCase::Kebab => name.to_kebab_case(),
            FieldCase::Camel => name.to_lower_camel_case(),
            FieldCase::Pascal => name.to_upper_camel_case(),
            FieldCase::Upper => name.to_uppercase(),
            FieldCase::Lower => name.to_lowercase(),
        }
    }
}
