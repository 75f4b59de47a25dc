mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use asvg_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = "unexpected end of file",
///     labels = ["add something here"],
///     category = Syntax,
/// )]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | The labels that point to each span of the error, in order.                   |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
/// | `category`  | The `Category` variant the error belongs to. Required.                       |
///
/// `message`, `labels` and `help` accept expressions. For structs with named fields, the
/// expressions are evaluated with the members of the struct in scope, so they can be used in the
/// expression (tuple structs are not supported).
///
/// [`ErrorKind`]: https://docs.rs/asvg-error
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl asvg_error::ErrorKind for #name {
            #target
        }
    }.into()
}
