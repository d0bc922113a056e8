use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Lit, Meta, Type};

/// Derive macro describing the CSV columns a row struct deserializes from.
///
/// For each named field it records:
/// - the column header (respects `#[serde(rename = "...")]`)
/// - whether the column must be present (not `Option<T>` and not `#[serde(default)]`)
/// - a description taken from the field's doc comments
///
/// Generates `csv_columns() -> &'static [CsvColumn]`. `CsvColumn` must be in
/// scope at the derive site.
#[proc_macro_derive(CsvColumns, attributes(serde))]
pub fn derive_csv_columns(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(name, "CsvColumns needs named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "CsvColumns only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let columns = fields.iter().filter_map(|field| {
        let ident = field.ident.as_ref()?;
        if serde_flag(&field.attrs, "skip") {
            return None;
        }
        let header = serde_rename(&field.attrs).unwrap_or_else(|| ident.to_string());
        let required = !is_option(&field.ty) && !serde_flag(&field.attrs, "default");
        let description = doc_comment(&field.attrs);

        Some(quote! {
            CsvColumn {
                name: #header,
                required: #required,
                description: #description,
            }
        })
    });

    let expanded = quote! {
        impl #name {
            pub fn csv_columns() -> &'static [CsvColumn] {
                static COLUMNS: &[CsvColumn] = &[
                    #(#columns),*
                ];
                COLUMNS
            }
        }
    };

    TokenStream::from(expanded)
}

fn serde_tokens(attrs: &[Attribute]) -> impl Iterator<Item = String> + '_ {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("serde"))
        .filter_map(|attr| match &attr.meta {
            Meta::List(list) => Some(list.tokens.to_string()),
            _ => None,
        })
}

fn serde_rename(attrs: &[Attribute]) -> Option<String> {
    for tokens in serde_tokens(attrs) {
        // `rename = "..."`, but not `rename_all`
        let Some(start) = tokens.find("rename =") else {
            continue;
        };
        let after_eq = tokens[start + "rename =".len()..].trim_start();
        if let Some(stripped) = after_eq.strip_prefix('"') {
            if let Some(end) = stripped.find('"') {
                return Some(stripped[..end].to_string());
            }
        }
    }
    None
}

fn serde_flag(attrs: &[Attribute], flag: &str) -> bool {
    serde_tokens(attrs).any(|tokens| {
        tokens
            .split(',')
            .map(str::trim)
            .any(|part| part == flag || part.starts_with(&format!("{flag} =")))
    })
}

fn doc_comment(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(meta) => match &meta.value {
                syn::Expr::Lit(expr_lit) => match &expr_lit.lit {
                    Lit::Str(s) => Some(s.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}
