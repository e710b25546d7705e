//! Parsing utilities for `#[table]` and `#[primary_key]` attributes
//!
//! Names are validated with the same rules the row store applies at runtime,
//! so an invalid table or key column fails at compile time.

use syn::meta::ParseNestedMeta;
use syn::{
    Attribute, Data, DeriveInput, Error, Expr, Fields, GenericArgument, Ident, LitStr,
    PathArguments, Result, Token, Type,
};

/// Validate table name and return syn::Error for better proc macro error handling
pub fn validate_table_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid table name '{}': {}", name, e)))
}

/// Validate field name and return syn::Error for better proc macro error handling
pub fn validate_field_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid field name '{}': {}", name, e)))
}

/// Mirrors `row_store::validation`
fn validate_identifier(name: &str) -> std::result::Result<(), String> {
    let first_char = name
        .chars()
        .next()
        .ok_or_else(|| "Name cannot be empty".to_string())?;

    if name.len() > 63 {
        return Err(format!(
            "Name '{}' is too long: {} characters (max 63)",
            name,
            name.len()
        ));
    }

    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(format!(
            "Name '{}' must start with a letter or underscore",
            name
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("Name '{}' contains invalid characters: only alphanumeric characters and underscores are allowed", name));
    }

    Ok(())
}

#[derive(Debug)]
pub struct TableInfo {
    pub name: Option<String>,
}

#[derive(Debug)]
pub struct FieldInfo {
    pub primary_key_field: Ident,
    /// Column name of the primary key
    pub primary_key_column: String,
    /// `T` for both `T` and `Option<T>` fields
    pub id_type: Type,
    pub optional: bool,
}

/// Parse `#[table(name = "...")]`; the attribute is optional
pub fn parse_table_attributes(attrs: &[Attribute]) -> Result<TableInfo> {
    let mut name = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("table")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                validate_table_name_syn(&value.value(), value.span())?;
                name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported table attribute, expected `name = \"...\"`"))
            }
        })?;
    }

    Ok(TableInfo { name })
}

/// Find the single field marked `#[primary_key]`.
///
/// The key column is the name serde writes for the field, so a field-level
/// `#[serde(rename = "...")]` or a container `#[serde(rename_all = "...")]`
/// is applied the way serde applies it.
pub fn parse_field_attributes(input: &DeriveInput) -> Result<FieldInfo> {
    let rename_all = parse_serde_attribute(&input.attrs, "rename_all")?;

    let fields_named = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields_named) => fields_named,
            _ => {
                return Err(Error::new(
                    proc_macro2::Span::call_site(),
                    "Entity can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                proc_macro2::Span::call_site(),
                "Entity can only be derived for structs with named fields",
            ))
        }
    };

    let mut primary_key = None;

    for field in &fields_named.named {
        if !has_attribute(&field.attrs, "primary_key") {
            continue;
        }

        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "Field must have a name"))?;

        if primary_key.is_some() {
            return Err(Error::new_spanned(
                field,
                "only one field can be marked #[primary_key]",
            ));
        }

        let rust_name = field_name.to_string();
        let rust_name = rust_name.strip_prefix("r#").unwrap_or(&rust_name);
        let column = match (parse_serde_attribute(&field.attrs, "rename")?, &rename_all) {
            (Some(renamed), _) => renamed.value(),
            (None, Some(rule)) => apply_rename_rule(rule, rust_name)?,
            (None, None) => rust_name.to_string(),
        };
        validate_field_name_syn(&column, field_name.span())?;

        let (id_type, optional) = match option_inner_type(&field.ty) {
            Some(inner) => (inner.clone(), true),
            None => (field.ty.clone(), false),
        };

        primary_key = Some(FieldInfo {
            primary_key_field: field_name.clone(),
            primary_key_column: column,
            id_type,
            optional,
        });
    }

    primary_key.ok_or_else(|| {
        Error::new(
            proc_macro2::Span::call_site(),
            "primary key is required: mark one field with #[primary_key]",
        )
    })
}

/// The string value of `key = "..."` inside `#[serde(...)]`, if present.
/// The split `key(serialize = .., deserialize = ..)` form is rejected.
fn parse_serde_attribute(attrs: &[Attribute], key: &str) -> Result<Option<LitStr>> {
    let mut found = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident(key) {
                return skip_meta(&meta);
            }
            if meta.input.peek(Token![=]) {
                found = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else {
                Err(meta.error(format!(
                    "primary key naming supports only `{} = \"...\"`",
                    key
                )))
            }
        })?;
    }

    Ok(found)
}

/// Consume a serde option this crate does not interpret
fn skip_meta(meta: &ParseNestedMeta) -> Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.input.parse::<proc_macro2::Group>()?;
    }
    Ok(())
}

/// Apply a serde `rename_all` rule to a snake_case field name
fn apply_rename_rule(rule: &LitStr, field: &str) -> Result<String> {
    let capitalize = |word: &str| {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    };

    let renamed = match rule.value().as_str() {
        "lowercase" => field.to_ascii_lowercase(),
        "UPPERCASE" => field.to_ascii_uppercase(),
        "snake_case" => field.to_string(),
        "SCREAMING_SNAKE_CASE" => field.to_ascii_uppercase(),
        "kebab-case" => field.replace('_', "-"),
        "SCREAMING-KEBAB-CASE" => field.to_ascii_uppercase().replace('_', "-"),
        "PascalCase" => field.split('_').map(capitalize).collect(),
        "camelCase" => {
            let pascal: String = field.split('_').map(capitalize).collect();
            let mut chars = pascal.chars();
            match chars.next() {
                Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        }
        other => {
            return Err(Error::new(
                rule.span(),
                format!("unknown serde rename_all rule '{}'", other),
            ))
        }
    };

    Ok(renamed)
}

pub fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// `Some(T)` when `ty` is `Option<T>`
fn option_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    match arguments.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;
    use syn::{parse_quote, DeriveInput};

    // Helper functions for tests - these call the _syn versions but panic on error
    fn validate_table_name(name: &str) {
        if let Err(e) = validate_table_name_syn(name, proc_macro2::Span::call_site()) {
            panic!("Invalid table name: {}", e);
        }
    }

    #[test]
    fn test_valid_table_names() {
        validate_table_name("users");
        validate_table_name("user_profiles");
        validate_table_name("_private");
        validate_table_name("table123");
    }

    #[test]
    #[should_panic(expected = "Invalid table name")]
    fn test_invalid_start() {
        validate_table_name("123table");
    }

    #[test]
    #[should_panic(expected = "Invalid table name")]
    fn test_empty_name() {
        validate_table_name("");
    }

    #[test]
    fn test_sql_injection_prevention() {
        let malicious_names = [
            "users; DROP TABLE users; --",
            "users' OR '1'='1",
            "users\"; DELETE FROM users; --",
        ];

        for name in malicious_names {
            let result = std::panic::catch_unwind(|| {
                validate_table_name(name);
            });
            assert!(result.is_err(), "Should panic for malicious name: {}", name);
        }
    }

    #[test]
    fn test_optional_primary_key() {
        let input: DeriveInput = parse_quote! {
            #[table(name = "users")]
            struct User {
                #[primary_key]
                id: Option<i64>,
                name: String,
            }
        };

        let table = parse_table_attributes(&input.attrs).unwrap();
        let field = parse_field_attributes(&input).unwrap();

        assert_eq!(table.name.as_deref(), Some("users"));
        assert_eq!(field.primary_key_column, "id");
        assert!(field.optional);
        let expected: Type = parse_quote!(i64);
        assert_eq!(field.id_type, expected);
    }

    #[test]
    fn test_plain_primary_key_without_table() {
        let input: DeriveInput = parse_quote! {
            struct Tag {
                #[primary_key]
                slug: String,
            }
        };

        let table = parse_table_attributes(&input.attrs).unwrap();
        let field = parse_field_attributes(&input).unwrap();

        assert!(table.name.is_none());
        assert_eq!(field.primary_key_column, "slug");
        assert!(!field.optional);
    }

    #[test]
    fn test_primary_key_is_required_and_unique() {
        let missing: DeriveInput = parse_quote! {
            struct Note { body: String }
        };
        assert!(parse_field_attributes(&missing).is_err());

        let duplicated: DeriveInput = parse_quote! {
            struct Pair {
                #[primary_key]
                left: i64,
                #[primary_key]
                right: i64,
            }
        };
        assert!(parse_field_attributes(&duplicated).is_err());
    }

    #[test]
    fn test_serde_rename_sets_key_column() {
        let input: DeriveInput = parse_quote! {
            #[derive(Serialize)]
            struct Invoice {
                #[primary_key]
                #[serde(rename = "invoice_no", default)]
                number: Option<i64>,
                #[serde(skip_serializing_if = "Option::is_none")]
                note: Option<String>,
            }
        };

        let field = parse_field_attributes(&input).unwrap();
        assert_eq!(field.primary_key_field, "number");
        assert_eq!(field.primary_key_column, "invoice_no");
    }

    #[test]
    fn test_serde_rename_all_applies_to_key_column() {
        let input: DeriveInput = parse_quote! {
            #[serde(rename_all = "camelCase", deny_unknown_fields)]
            struct Event {
                #[primary_key]
                event_id: Option<i64>,
                start_date: String,
            }
        };
        assert_eq!(parse_field_attributes(&input).unwrap().primary_key_column, "eventId");

        let overridden: DeriveInput = parse_quote! {
            #[serde(rename_all = "camelCase")]
            struct Event {
                #[primary_key]
                #[serde(rename = "event_id")]
                event_id: Option<i64>,
            }
        };
        assert_eq!(
            parse_field_attributes(&overridden).unwrap().primary_key_column,
            "event_id"
        );
    }

    #[test]
    fn test_unusable_serde_key_names_are_rejected() {
        let split: DeriveInput = parse_quote! {
            struct Invoice {
                #[primary_key]
                #[serde(rename(serialize = "a", deserialize = "b"))]
                id: i64,
            }
        };
        assert!(parse_field_attributes(&split).is_err());

        let kebab: DeriveInput = parse_quote! {
            #[serde(rename_all = "kebab-case")]
            struct Invoice {
                #[primary_key]
                invoice_id: i64,
            }
        };
        assert!(parse_field_attributes(&kebab).is_err());

        let unknown_rule: DeriveInput = parse_quote! {
            #[serde(rename_all = "Title Case")]
            struct Invoice {
                #[primary_key]
                id: i64,
            }
        };
        assert!(parse_field_attributes(&unknown_rule).is_err());
    }
}
