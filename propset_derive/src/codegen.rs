use crate::{
    fields::PSField,
    input_receiver::{PSInputReceiver, PSMethod},
    util::{bean_name, unraw, PSVisibility},
};
use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{parse_quote, spanned::Spanned};

pub(crate) struct PSReflectGen {
    input: PSInputReceiver,
}

impl PSReflectGen {
    pub(crate) fn new(input: PSInputReceiver) -> Self {
        Self { input }
    }

    pub(crate) fn generate(&self) -> darling::Result<TokenStream> {
        let mut errors = darling::Error::accumulator();
        let input = &self.input;
        let ident = input.ident();

        if let Some(lifetime) = input.generics().lifetimes().next() {
            errors.push(
                darling::Error::custom("Reflect cannot be derived for a struct with lifetime parameters")
                    .with_span(&lifetime.lifetime),
            );
        }

        let base = errors.handle(self.base_field()).flatten();
        let methods = input.methods().iter().map(|m| self.method_registration(m)).collect::<Vec<_>>();
        // The ancestor itself is not a property, its members are.
        let fields = input
            .fields()
            .into_iter()
            .filter(|f| !*f.skip() && base.map_or(true, |b| b.ident() != f.ident()))
            .filter_map(|f| self.field_registration(f))
            .collect::<Vec<_>>();

        errors.finish()?;

        let mut generics = input.generics().clone();
        for param in generics.type_params_mut() {
            param.bounds.push(parse_quote!('static));
            param.bounds.push(parse_quote!(::core::marker::Send));
        }
        let extends = base.map(|b| self.extends_registration(b));
        if let Some(base) = base {
            let base_ty = base.ty();
            generics
                .make_where_clause()
                .predicates
                .push(parse_quote!(#base_ty: ::propset::Reflect));
        }
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        let type_name = input.reported_name();
        let deny = if *input.deny_access_override() {
            quote![.deny_access_override()]
        }
        else {
            quote![]
        };

        Ok(quote! {
            impl #impl_generics ::propset::Reflect for #ident #ty_generics #where_clause {
                fn type_descriptor() -> ::propset::TypeDescriptor<Self> {
                    ::propset::TypeDescriptor::<Self>::builder(#type_name)
                        #deny
                        #( #methods )*
                        #( #fields )*
                        #extends
                        .build()
                }
            }
        })
    }

    // The field named by `extends`, if any.
    fn base_field(&self) -> darling::Result<Option<&PSField>> {
        let base_name = match self.input.extends() {
            Some(name) => name,
            None => return Ok(None),
        };
        self.input
            .fields()
            .into_iter()
            .find(|f| f.is_named(base_name))
            .map(Some)
            .ok_or_else(|| {
                darling::Error::custom(format!("No field '{}' to extend from", unraw(base_name))).with_span(base_name)
            })
    }

    fn method_registration(&self, method: &PSMethod) -> TokenStream {
        let call = method.call();
        let name = method.name().clone().unwrap_or_else(|| bean_name(&unraw(call)));
        let vis = method.vis().unwrap_or(PSVisibility::Public);
        quote_spanned! {call.span()=>
            .method(#name, #vis, Self::#call)
        }
    }

    fn field_registration(&self, field: &PSField) -> Option<TokenStream> {
        let ident = field.ident().as_ref()?;
        let name = field.property_name()?;
        let vis = field.visibility();
        Some(quote_spanned! {field.ty().span()=>
            .field(#name, #vis, |this: &mut Self| &mut this.#ident)
        })
    }

    fn extends_registration(&self, base: &PSField) -> TokenStream {
        let ident = base.ident();
        let ty = base.ty();
        quote_spanned! {ty.span()=>
            .extends(<#ty as ::propset::Reflect>::type_descriptor(), |this: &mut Self| &mut this.#ident)
        }
    }
}
