use darling::FromMeta;
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::ext::IdentExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PSVisibility {
    Public,
    Protected,
    Package,
    Private,
}

impl FromMeta for PSVisibility {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value {
            "public" => Ok(PSVisibility::Public),
            "protected" => Ok(PSVisibility::Protected),
            "package" => Ok(PSVisibility::Package),
            "private" => Ok(PSVisibility::Private),
            _ => Err(darling::Error::unknown_value(value)),
        }
    }
}

impl From<&syn::Visibility> for PSVisibility {
    fn from(vis: &syn::Visibility) -> Self {
        match vis {
            syn::Visibility::Public(_) => PSVisibility::Public,
            syn::Visibility::Restricted(_) => PSVisibility::Package,
            syn::Visibility::Inherited => PSVisibility::Private,
        }
    }
}

impl ToTokens for PSVisibility {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(match self {
            PSVisibility::Public => quote![::propset::Visibility::Public],
            PSVisibility::Protected => quote![::propset::Visibility::Protected],
            PSVisibility::Package => quote![::propset::Visibility::Package],
            PSVisibility::Private => quote![::propset::Visibility::Private],
        })
    }
}

pub(crate) fn unraw(ident: &syn::Ident) -> String {
    ident.unraw().to_string()
}

// set_full_name -> setFullName
pub(crate) fn bean_name(method: &str) -> String {
    let mut segments = method.split('_').filter(|s| !s.is_empty());
    let mut bean = segments.next().unwrap_or_default().to_string();
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            bean.extend(first.to_uppercase());
            bean.push_str(chars.as_str());
        }
    }
    bean
}
