//! # Accessor Derive
//!
//! Derive macros for immutable configuration records. Board tables are built
//! once, in `const` context, and only read afterwards, so the generated code
//! consists of `const fn` builders and `const fn` getters; there are no
//! `&mut self` setters.
//!
//! Fields can opt out with `#[accessors(skip)]` (or `#[accessors(skip = true)]`).

use proc_macro::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{
    Data, DeriveInput, Field, Fields, LitBool, parse_macro_input, punctuated::Punctuated,
    spanned::Spanned, token::Comma,
};

/// Derive to generate `const .with_<field>(mut self, value: Ty) -> Self` for
/// each **named** field.
///
/// # Example
///
/// ```
/// use utils_accessors_derive::Setters;
///
/// #[derive(Setters)]
/// struct Timing {
///     pixclock: u32,
///     #[accessors(skip)]
///     bits_per_pixel: u8,
/// }
///
/// const T: Timing = Timing { pixclock: 0, bits_per_pixel: 16 }.with_pixclock(100_000);
/// assert_eq!(T.pixclock, 100_000);
/// ```
#[proc_macro_derive(Setters, attributes(accessors))]
pub fn derive_setters(input: TokenStream) -> TokenStream {
    expand(input, "Setters", |field| {
        let fname = field.ident.as_ref()?;
        let ty = &field.ty;
        let with_name = format_ident!("with_{}", fname);
        let doc = format!("Returns a copy with `{fname}` replaced.");
        Some(quote! {
            #[doc = #doc]
            #[inline]
            #[must_use]
            pub const fn #with_name(mut self, value: #ty) -> Self {
                self.#fname = value;
                self
            }
        })
    })
}

/// Derive to generate `const .<field>(&self) -> Ty` for each **named** field.
///
/// Fields must be `Copy`; skip the ones that are not.
///
/// # Example
///
/// ```
/// use utils_accessors_derive::Getters;
///
/// #[derive(Getters)]
/// struct Eeprom {
///     byte_len: u32,
///     page_size: u16,
/// }
///
/// let e = Eeprom { byte_len: 256, page_size: 8 };
/// assert_eq!(e.byte_len() / u32::from(e.page_size()), 32);
/// ```
#[proc_macro_derive(Getters, attributes(accessors))]
pub fn derive_getters(input: TokenStream) -> TokenStream {
    expand(input, "Getters", |field| {
        let fname = field.ident.as_ref()?;
        let ty = &field.ty;
        Some(quote! {
            #[inline]
            #[must_use]
            pub const fn #fname(&self) -> #ty {
                self.#fname
            }
        })
    })
}

fn expand<T: ToTokens>(
    input: TokenStream,
    derive: &str,
    method: impl Fn(&Field) -> Option<T>,
) -> TokenStream {
    let DeriveInput {
        ident,
        generics,
        data,
        ..
    } = parse_macro_input!(input as DeriveInput);

    let fields = match named_fields(&ident, data, derive) {
        Ok(fields) => fields,
        Err(e) => return e.to_compile_error().into(),
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let methods: Vec<_> = fields
        .iter()
        .filter(|field| !should_skip(&field.attrs))
        .filter_map(&method)
        .collect();

    let expanded = quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#methods)*
        }
    };

    TokenStream::from(expanded)
}

fn named_fields(
    ident: &syn::Ident,
    data: Data,
    derive: &str,
) -> syn::Result<Punctuated<Field, Comma>> {
    match data {
        Data::Struct(s) => match s.fields {
            Fields::Named(n) => Ok(n.named),
            Fields::Unnamed(u) => Err(syn::Error::new(
                u.span(),
                format!("{derive} only supports named fields"),
            )),
            Fields::Unit => Err(syn::Error::new(
                ident.span(),
                format!("{derive} does not apply to unit structs"),
            )),
        },
        _ => Err(syn::Error::new(
            ident.span(),
            format!("{derive} can only be derived for structs"),
        )),
    }
}

fn should_skip(attrs: &[syn::Attribute]) -> bool {
    let mut skip = false;
    for attr in attrs {
        if !attr.path().is_ident("accessors") {
            continue;
        }

        // Accept #[accessors(skip)] and #[accessors(skip = true)]
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                if meta.input.is_empty() {
                    skip = true;
                } else if let Ok(v) = meta.value()?.parse::<LitBool>()
                    && v.value
                {
                    skip = true;
                }
            }
            Ok(())
        });
    }
    skip
}
