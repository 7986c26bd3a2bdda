mod codegen;
mod fields;
mod input_receiver;
mod util;

use darling::FromDeriveInput;
use syn::{parse_macro_input, DeriveInput};

use crate::{codegen::PSReflectGen, input_receiver::PSInputReceiver};

/// Implement `propset::Reflect` for a struct with named fields.
///
/// Every field is registered under its own name with a visibility matching its Rust one. Setter methods are not
/// visible to a derive macro and have to be listed on the struct:
///
/// ```ignore
/// #[derive(Reflect)]
/// #[propset(name = "Widget", extends = "base", method(call = "set_title", vis = "private"))]
/// struct Widget {
///     base:  Base,
///     title: String,
///     #[propset(skip)]
///     lock:  bool,
///     #[propset(rename = "displayName")]
///     display_name: String,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(propset))]
pub fn derive_reflect(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input_ast = parse_macro_input!(input as DeriveInput);
    let ps = match PSInputReceiver::from_derive_input(&input_ast) {
        Ok(v) => v,
        Err(e) => return e.write_errors().into(),
    };

    match PSReflectGen::new(ps).generate() {
        Ok(tokens) => tokens.into(),
        Err(e) => e.write_errors().into(),
    }
}
