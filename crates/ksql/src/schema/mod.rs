//! Record type → schema field reflection.
//!
//! `#[derive(KsqlSchema)]` writes a static table of [`FieldDecl`]s for a struct: the
//! field identifier, its `#[ksql(...)]` tag, a normalized spelling of its Rust type and
//! an optional kind override. [`parse_fields`] turns that table into
//! [`SearchField`]s. The Rust type → [`Kind`] mapping is the data table in
//! [`kind_for_type`]; anything it does not know is a [`SchemaError`], never a silent
//! fallback.

pub mod errors;

pub use errors::SchemaError;

use common::types::ksql::{Kind, SearchField};
use std::collections::HashSet;

/// One struct field as seen by the derive macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    pub ident: &'static str,
    /// Wire name from `#[ksql("NAME")]` / `#[ksql(name = "NAME")]`.
    pub tag: Option<&'static str>,
    /// Normalized type: last path segment plus generic arguments, no references or
    /// whitespace (`Vec<u8>`, `HashMap<String,i64>`, `str`).
    pub rust_type: &'static str,
    /// Wire spelling from `#[ksql(kind = "...")]`.
    pub kind: Option<&'static str>,
}

impl FieldDecl {
    pub const fn new(ident: &'static str, rust_type: &'static str) -> Self {
        Self {
            ident,
            tag: None,
            rust_type,
            kind: None,
        }
    }

    pub const fn tagged(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub const fn with_kind(mut self, kind: &'static str) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Untagged fields fall back to the upper-cased identifier, which is how the
    /// engine stores unquoted column names.
    pub fn wire_name(&self) -> String {
        match self.tag {
            Some(tag) => tag.to_string(),
            None => self.ident.to_ascii_uppercase(),
        }
    }
}

/// A record type that can describe its own schema.
///
/// Usually derived:
///
/// ```ignore
/// #[derive(KsqlSchema)]
/// struct ExampleStream {
///     #[ksql("ID")]
///     id: i64,
///     #[ksql("TOKEN")]
///     token: Vec<u8>,
/// }
/// ```
pub trait KsqlSchema {
    /// Default relation qualifier for the derived fields; the type name unless
    /// overridden with `#[ksql(relation = "...")]`. Empty means unqualified.
    const RELATION: &'static str;

    fn field_decls() -> &'static [FieldDecl];

    fn search_fields() -> Result<Vec<SearchField>, SchemaError> {
        parse_fields(Self::RELATION, Self::field_decls())
    }
}

/// Turn a declaration table into schema fields, in declaration order.
pub fn parse_fields(type_name: &str, decls: &[FieldDecl]) -> Result<Vec<SearchField>, SchemaError> {
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(decls.len());

    for decl in decls {
        let name = decl.wire_name();
        if name.trim().is_empty() {
            return Err(SchemaError::empty_name(type_name, decl.ident));
        }
        if !seen.insert(name.clone()) {
            return Err(SchemaError::duplicate_field(type_name, &name));
        }

        let kind = match decl.kind {
            Some(raw) => raw
                .parse::<Kind>()
                .map_err(|err| SchemaError::invalid_kind(type_name, decl.ident, err))?,
            None => kind_for_type(decl.rust_type).ok_or_else(|| {
                SchemaError::unsupported_type(type_name, decl.ident, decl.rust_type)
            })?,
        };

        fields.push(SearchField::new(name, kind).with_relation(type_name));
    }

    Ok(fields)
}

fn scalar_kind(name: &str) -> Option<Kind> {
    let kind = match name {
        "i8" | "i16" | "i32" | "u8" | "u16" => Kind::Int,
        // u64/usize/i128 do not fit a signed 64-bit BIGINT
        "i64" | "u32" | "isize" => Kind::BigInt,
        "f32" | "f64" => Kind::Double,
        "bool" => Kind::Boolean,
        "String" | "str" | "char" => Kind::Varchar,
        "Bytes" | "BytesMut" => Kind::Bytes,
        "NaiveDate" => Kind::Date,
        "NaiveTime" => Kind::Time,
        "NaiveDateTime" | "SystemTime" => Kind::Timestamp,
        _ => return None,
    };
    Some(kind)
}

/// `Head<A,B>` → (`Head`, [`A`, `B`]), splitting only on top-level commas.
fn split_generic(name: &str) -> Option<(&str, Vec<&str>)> {
    let open = name.find('<')?;
    let body = name.strip_suffix('>')?.get(open + 1..)?;

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in body.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(&body[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    args.push(&body[start..]);
    Some((&name[..open], args))
}

fn is_text(name: &str) -> bool {
    matches!(kind_for_type(name), Some(Kind::Varchar))
}

/// Map a normalized Rust type spelling to its kind.
pub fn kind_for_type(rust_type: &str) -> Option<Kind> {
    let name: String = rust_type.chars().filter(|c| !c.is_whitespace()).collect();
    let name = name.trim_start_matches('&');

    if let Some(kind) = scalar_kind(name) {
        return Some(kind);
    }

    if let Some(inner) = name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
        // fixed-size arrays are normalized to slices by the derive, tolerate `[T;N]` anyway
        let element = inner.split(';').next().unwrap_or(inner);
        return if element == "u8" {
            Some(Kind::Bytes)
        } else {
            kind_for_type(element).map(Kind::array)
        };
    }

    let (head, args) = split_generic(name)?;
    match (head, args.as_slice()) {
        ("Option" | "Box" | "Arc" | "Rc", [inner]) => kind_for_type(inner),
        ("Cow", [.., inner]) => kind_for_type(inner),
        ("Vec" | "VecDeque", ["u8"]) => Some(Kind::Bytes),
        ("Vec" | "VecDeque" | "HashSet" | "BTreeSet", [inner]) => {
            kind_for_type(inner).map(Kind::array)
        }
        ("HashMap" | "BTreeMap", [key, value]) if is_text(key) => {
            kind_for_type(value).map(Kind::map)
        }
        ("DateTime", [_]) => Some(Kind::Timestamp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalar_mapping() {
        assert_eq!(kind_for_type("i32"), Some(Kind::Int));
        assert_eq!(kind_for_type("i64"), Some(Kind::BigInt));
        assert_eq!(kind_for_type("str"), Some(Kind::Varchar));
        assert_eq!(kind_for_type("&str"), Some(Kind::Varchar));
        assert_eq!(kind_for_type("u64"), None);
    }

    #[test]
    fn byte_sequences_are_bytes_not_arrays() {
        assert_eq!(kind_for_type("Vec<u8>"), Some(Kind::Bytes));
        assert_eq!(kind_for_type("[u8]"), Some(Kind::Bytes));
        assert_eq!(kind_for_type("Vec<u16>"), Some(Kind::array(Kind::Int)));
    }

    #[test]
    fn nested_generics() {
        assert_eq!(kind_for_type("Option<Vec<String>>"), Some(Kind::array(Kind::Varchar)));
        assert_eq!(
            kind_for_type("HashMap<String, Vec<f64>>"),
            Some(Kind::map(Kind::array(Kind::Double)))
        );
        assert_eq!(kind_for_type("HashMap<i64,String>"), None);
        assert_eq!(kind_for_type("DateTime<Utc>"), Some(Kind::Timestamp));
    }

    #[test]
    fn tags_names_and_relation() {
        let decls = [
            FieldDecl::new("id", "i64").tagged("ID"),
            FieldDecl::new("token", "Vec<u8>"),
        ];
        let fields = parse_fields("ExampleStream", &decls).unwrap();
        assert_eq!(
            fields,
            vec![
                SearchField::new("ID", Kind::BigInt).with_relation("ExampleStream"),
                SearchField::new("TOKEN", Kind::Bytes).with_relation("ExampleStream"),
            ]
        );
    }

    #[test]
    fn empty_relation_leaves_fields_unqualified() {
        let decls = [FieldDecl::new("id", "i32")];
        let fields = parse_fields("", &decls).unwrap();
        assert_eq!(fields[0].relation, None);
    }

    #[test]
    fn kind_override_wins_over_rust_type() {
        let decls = [FieldDecl::new("id", "Uuid").with_kind("VARCHAR")];
        let fields = parse_fields("Users", &decls).unwrap();
        assert_eq!(fields[0].kind, Kind::Varchar);
    }

    #[test]
    fn unsupported_type_is_typed_error() {
        let decls = [FieldDecl::new("offset", "u64")];
        let err = parse_fields("Offsets", &decls).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedType { .. }));
        assert!(err.to_string().contains("`offset` has type `u64`"));
    }

    #[test]
    fn bad_override_and_duplicates_are_rejected() {
        let bad_kind = [FieldDecl::new("id", "Uuid").with_kind("UUID")];
        assert!(matches!(
            parse_fields("Users", &bad_kind),
            Err(SchemaError::InvalidKind { .. })
        ));

        let duplicate = [
            FieldDecl::new("id", "i64").tagged("ID"),
            FieldDecl::new("other_id", "i64").tagged("ID"),
        ];
        assert!(matches!(
            parse_fields("Users", &duplicate),
            Err(SchemaError::DuplicateField { .. })
        ));

        let empty = [FieldDecl::new("id", "i64").tagged("")];
        assert!(matches!(
            parse_fields("Users", &empty),
            Err(SchemaError::EmptyName { .. })
        ));
    }
}
