extern crate proc_macro;
use proc_macro::TokenStream;

use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Ident, parse_macro_input};

fn make_error(ident: &Ident, msg: &str) -> TokenStream {
    syn::Error::new_spanned(ident, msg)
        .to_compile_error()
        .into()
}

/// Reads every named field in declaration order, each one starting where the
/// previous one ended. The record size is the sum of the field sizes.
#[proc_macro_derive(DiskDe)]
pub fn derive_disk_deserialize(input: TokenStream) -> TokenStream {
    let DeriveInput {
        ident,
        generics,
        data,
        ..
    } = parse_macro_input!(input as DeriveInput);

    let data_struct = if let Data::Struct(data_struct) = data {
        data_struct
    } else {
        return make_error(&ident, "Only structs are supported");
    };

    let fields = match data_struct.fields {
        Fields::Named(named) => named.named,
        _ => return make_error(&ident, "Only structs with named fields are supported"),
    };

    let mut names = vec![];
    let mut locals = vec![];
    let mut types = vec![];

    for field in fields.iter() {
        match &field.ident {
            Some(name) => {
                locals.push(format_ident!("__field_{}", name));
                names.push(name.clone());
                types.push(field.ty.clone());
            }
            None => continue,
        }
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics ::disk_serialize::DiskDeserialize for #ident #ty_generics #where_clause {
            fn deserialize(
                __endianness: ::disk_serialize::Endianness,
                __input: &[u8],
            ) -> ::core::result::Result<(Self, usize), ::disk_serialize::DiskDeErr>
            where
                Self: Sized,
            {
                let mut __acc: usize = 0;

                #(
                    let (#locals, __size) =
                        <#types as ::disk_serialize::DiskDeserialize>::deserialize(
                            __endianness,
                            &__input[__acc..],
                        )
                        .map_err(|e| e.at_offset(__acc))?;
                    __acc += __size;
                )*

                Ok((Self { #(#names: #locals),* }, __acc))
            }
        }
    }
    .into()
}
