use crate::util::{unraw, PSVisibility};
use darling::FromField;
use getset::Getters;

#[derive(Debug, FromField, Getters)]
#[darling(attributes(propset))]
#[getset(get = "pub(crate)")]
pub(crate) struct PSField {
    ident:  Option<syn::Ident>,
    #[getset(skip)]
    vis:    syn::Visibility,
    ty:     syn::Type,
    #[darling(default)]
    skip:   bool,
    #[getset(skip)]
    rename: Option<String>,
}

impl PSField {
    pub(crate) fn property_name(&self) -> Option<String> {
        self.rename
            .clone()
            .or_else(|| self.ident.as_ref().map(unraw))
    }

    pub(crate) fn visibility(&self) -> PSVisibility {
        PSVisibility::from(&self.vis)
    }

    pub(crate) fn is_named(&self, name: &syn::Ident) -> bool {
        self.ident.as_ref().is_some_and(|i| i == name)
    }
}
