use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute,
    Expr,
    Fields,
    Ident,
    ItemStruct,
    Result,
    Token,
};

/// One `tag = value` pair of the `error` attribute.
struct Tag {
    name: Ident,
    value: TagValue,
}

enum TagValue {
    Expr(Expr),
    Category(Ident),
}

impl Parse for Tag {
    fn parse(input: ParseStream) -> Result<Self> {
        let name: Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        let value = if name == "category" {
            TagValue::Category(input.parse()?)
        } else {
            TagValue::Expr(input.parse()?)
        };
        Ok(Tag { name, value })
    }
}

/// The contents of the `error` attribute.
#[derive(Default)]
pub struct ErrorArgs {
    pub message: Option<Expr>,
    pub labels: Option<Expr>,
    pub help: Option<Expr>,
    pub category: Option<Ident>,
}

impl Parse for ErrorArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = ErrorArgs::default();
        for tag in Punctuated::<Tag, Token![,]>::parse_terminated(input)? {
            match (tag.name.to_string().as_str(), tag.value) {
                ("message", TagValue::Expr(expr)) => args.message = Some(expr),
                ("labels", TagValue::Expr(expr)) => args.labels = Some(expr),
                ("help", TagValue::Expr(expr)) => args.help = Some(expr),
                ("category", TagValue::Category(variant)) => args.category = Some(variant),
                (other, _) => {
                    return Err(syn::Error::new_spanned(&tag.name, format!("unknown tag `{}`", other)));
                },
            }
        }
        Ok(args)
    }
}

/// Brings the named fields of the struct into scope as references, so the tag expressions can
/// use them.
fn bind_fields(name: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(named) => {
            let idents = named.named.iter().filter_map(|field| field.ident.as_ref());
            quote! {
                #[allow(unused_variables)]
                let #name { #(#idents),* } = self;
            }
        },
        Fields::Unnamed(_) => quote_spanned! { name.span() =>
            compile_error!("`ErrorKind` can only be derived for structs with named fields or unit structs");
        },
        Fields::Unit => TokenStream2::new(),
    }
}

/// A struct deriving `ErrorKind`, with its `error` attribute.
pub struct ErrorKindTarget {
    pub name: Ident,
    pub fields: Fields,
    pub error_args: ErrorArgs,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        let attributes = input.call(Attribute::parse_outer)?;
        let item = input.parse::<ItemStruct>()?;

        let error_args = match attributes.iter().find(|attr| attr.path().is_ident("error")) {
            Some(attr) => attr.parse_args::<ErrorArgs>()?,
            None => ErrorArgs::default(),
        };

        Ok(ErrorKindTarget {
            name: item.ident,
            fields: item.fields,
            error_args,
        })
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let args = &self.error_args;
        let bindings = bind_fields(&self.name, &self.fields);

        let message = match &args.message {
            Some(expr) => quote! { #expr },
            None => quote! { "" },
        };
        let labels = match &args.labels {
            Some(expr) => quote! { #expr },
            None => quote! { [""] },
        };
        let help = args.help.as_ref().map(|expr| quote! { builder.set_help(#expr); });
        let category = match &args.category {
            Some(variant) => quote! { asvg_error::Category::#variant },
            None => quote_spanned! { self.name.span() =>
                compile_error!("the `error` attribute needs a `category` tag")
            },
        };

        tokens.extend(quote! {
            fn category(&self) -> asvg_error::Category {
                #category
            }

            fn message(&self) -> String {
                #bindings
                (#message).to_string()
            }

            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #bindings

                // labels pair up with spans in order; spans past the last label are not shown
                let labels = #labels
                    .into_iter()
                    .zip(spans)
                    .map(|(text, span)| {
                        let text = text.to_string();
                        let label = ariadne::Label::new((src_id, span.clone()))
                            .with_color(asvg_error::EXPR);
                        if text.is_empty() {
                            label
                        } else {
                            label.with_message(text)
                        }
                    })
                    .collect::<Vec<_>>();

                let offset = spans.first().map_or(0, |span| span.start);
                #[allow(unused_mut)]
                let mut builder = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                    .with_message(#message)
                    .with_labels(labels);
                #help
                builder.finish()
            }
        });
    }
}
