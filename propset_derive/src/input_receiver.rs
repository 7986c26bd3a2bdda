use crate::{fields::PSField, util::PSVisibility};
use darling::{ast, FromDeriveInput, FromMeta};
use getset::Getters;

#[derive(Debug, FromDeriveInput, Getters)]
#[darling(attributes(propset), supports(struct_named))]
#[getset(get = "pub(crate)")]
pub(crate) struct PSInputReceiver {
    ident:                syn::Ident,
    generics:             syn::Generics,
    #[getset(skip)]
    data:                 ast::Data<(), PSField>,
    // Type name to report in diagnostics, the struct identifier by default.
    #[darling(rename = "name")]
    #[getset(skip)]
    type_name:            Option<String>,
    // Field holding the embedded ancestor.
    extends:              Option<syn::Ident>,
    #[darling(default)]
    deny_access_override: bool,
    #[darling(multiple, rename = "method")]
    methods:              Vec<PSMethod>,
}

impl PSInputReceiver {
    pub(crate) fn fields(&self) -> Vec<&PSField> {
        self.data.as_ref().take_struct().map_or_else(|| vec![], |s| s.fields)
    }

    pub(crate) fn reported_name(&self) -> String {
        self.type_name.clone().unwrap_or_else(|| self.ident.to_string())
    }
}

#[derive(Debug, FromMeta, Getters)]
#[getset(get = "pub(crate)")]
pub(crate) struct PSMethod {
    call: syn::Ident,
    name: Option<String>,
    vis:  Option<PSVisibility>,
}
