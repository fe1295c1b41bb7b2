use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Fields, GenericArgument, LitStr,
    PathArguments, Type,
};

struct FieldMeta {
    ident: String,
    tag: Option<String>,
    rust_type: String,
    kind: Option<String>,
}

#[derive(Default)]
struct FieldAttrs {
    tag: Option<String>,
    kind: Option<String>,
    skip: bool,
}

/// Derives `ksql::schema::KsqlSchema` for a struct with named fields.
///
/// Field attributes: `#[ksql("NAME")]` or `#[ksql(name = "NAME")]` for the column name,
/// `#[ksql(kind = "ARRAY<VARCHAR>")]` to override the inferred kind, `#[ksql(skip)]`
/// to leave the field out. Struct attribute: `#[ksql(relation = "...")]`.
#[proc_macro_derive(KsqlSchema, attributes(ksql))]
pub fn derive_ksql_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let relation = parse_relation(&input.attrs)?.unwrap_or_else(|| ident.unraw().to_string());

    let Data::Struct(ds) = &input.data else {
        return Err(syn::Error::new_spanned(
            ident,
            "KsqlSchema only supports structs",
        ));
    };
    let Fields::Named(named) = &ds.fields else {
        return Err(syn::Error::new_spanned(
            ident,
            "KsqlSchema requires named fields",
        ));
    };

    let mut field_meta = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let Some(field_ident) = &field.ident else {
            return Err(syn::Error::new(field.span(), "expected a named field"));
        };
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let rust_type = match normalize_type(&field.ty) {
            Some(name) => name,
            // the override makes the type irrelevant
            None if attrs.kind.is_some() => String::new(),
            None => {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    "unsupported type syntax for KsqlSchema; add #[ksql(kind = \"...\")]",
                ))
            }
        };

        field_meta.push(FieldMeta {
            ident: field_ident.unraw().to_string(),
            tag: attrs.tag,
            rust_type,
            kind: attrs.kind,
        });
    }

    let decls = field_meta.iter().map(|meta| {
        let ident_lit = LitStr::new(&meta.ident, Span::call_site());
        let type_lit = LitStr::new(&meta.rust_type, Span::call_site());
        let mut decl = quote! { ::ksql::schema::FieldDecl::new(#ident_lit, #type_lit) };
        if let Some(tag) = &meta.tag {
            let tag_lit = LitStr::new(tag, Span::call_site());
            decl = quote! { #decl.tagged(#tag_lit) };
        }
        if let Some(kind) = &meta.kind {
            let kind_lit = LitStr::new(kind, Span::call_site());
            decl = quote! { #decl.with_kind(#kind_lit) };
        }
        decl
    });

    let relation_lit = LitStr::new(&relation, Span::call_site());

    Ok(quote! {
        impl #impl_generics ::ksql::schema::KsqlSchema for #ident #ty_generics #where_clause {
            const RELATION: &'static str = #relation_lit;

            fn field_decls() -> &'static [::ksql::schema::FieldDecl] {
                static DECLS: &[::ksql::schema::FieldDecl] = &[
                    #(#decls),*
                ];
                DECLS
            }
        }
    })
}

fn parse_relation(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut relation = None;
    for attr in attrs {
        if !attr.path().is_ident("ksql") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("relation") {
                let lit: LitStr = meta.value()?.parse()?;
                relation = Some(lit.value());
                return Ok(());
            }
            Err(meta.error("unknown ksql key on struct; expected `relation`"))
        })?;
    }
    Ok(relation)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("ksql") {
            continue;
        }

        // shorthand: #[ksql("NAME")]
        if let Ok(lit) = attr.parse_args::<LitStr>() {
            set_once(&mut out.tag, lit.value(), &lit, "name")?;
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                return set_once(&mut out.tag, lit.value(), &lit, "name");
            }
            if meta.path.is_ident("kind") {
                let lit: LitStr = meta.value()?.parse()?;
                return set_once(&mut out.kind, lit.value(), &lit, "kind");
            }
            if meta.path.is_ident("skip") {
                out.skip = true;
                return Ok(());
            }
            Err(meta.error("unknown ksql key; expected `name`, `kind`, or `skip`"))
        })?;
    }
    Ok(out)
}

fn set_once(slot: &mut Option<String>, value: String, lit: &LitStr, key: &str) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new(lit.span(), format!("ksql `{key}` given more than once")));
    }
    *slot = Some(value);
    Ok(())
}

/// Spelling understood by `ksql::schema::kind_for_type`: the last path segment with
/// its type arguments, references dropped, arrays as slices. `None` for syntax with
/// no such spelling (tuples, trait objects, qualified paths).
fn normalize_type(ty: &Type) -> Option<String> {
    match ty {
        Type::Reference(reference) => normalize_type(&reference.elem),
        Type::Paren(paren) => normalize_type(&paren.elem),
        Type::Group(group) => normalize_type(&group.elem),
        Type::Slice(slice) => Some(format!("[{}]", normalize_type(&slice.elem)?)),
        Type::Array(array) => Some(format!("[{}]", normalize_type(&array.elem)?)),
        Type::Path(path) if path.qself.is_none() => {
            let segment = path.path.segments.last()?;
            let head = segment.ident.unraw().to_string();
            let args = match &segment.arguments {
                PathArguments::None => Vec::new(),
                PathArguments::AngleBracketed(generic) => generic
                    .args
                    .iter()
                    .filter_map(|arg| match arg {
                        GenericArgument::Lifetime(_) => None,
                        GenericArgument::Type(inner) => Some(normalize_type(inner)),
                        _ => Some(None),
                    })
                    .collect::<Option<Vec<_>>>()?,
                PathArguments::Parenthesized(_) => return None,
            };
            if args.is_empty() {
                Some(head)
            } else {
                Some(format!("{}<{}>", head, args.join(",")))
            }
        }
        _ => None,
    }
}
