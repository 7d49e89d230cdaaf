//! Derive macros for the todos reducer architecture
//!
//! This crate provides procedural macros to reduce boilerplate in action
//! enums and view-bound state structs.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Classifies action variants as intents or follow-ups
//! - `#[derive(BindableState)]` - Generates a typed field-update enum for view bindings
//!
//! # Example
//!
//! ```ignore
//! use todos_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodosAction {
//!     #[intent]
//!     SaveTodoButtonTapped,
//!
//!     #[follow_up]
//!     ReceiveTodo(TodoState),
//! }
//!
//! // Generated methods:
//! assert!(TodosAction::SaveTodoButtonTapped.is_intent());
//! assert_eq!(TodosAction::SaveTodoButtonTapped.action_name(), "SaveTodoButtonTapped");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Variant};

/// Derive macro for Action enums
///
/// Generates helper methods for action enums:
/// - `is_intent()` - Returns true if this variant is a user-originated intent
/// - `is_follow_up()` - Returns true if this variant is produced by an effect
/// - `action_name()` - Returns the variant name, for logging
///
/// # Attributes
///
/// - `#[intent]` - Mark a variant as an intent
/// - `#[follow_up]` - Mark a variant as a follow-up
///
/// A variant may carry either attribute, or neither (for actions that are
/// both, such as a resort that users and timers can trigger).
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - A variant has both `#[intent]` and `#[follow_up]` attributes
///
/// # Example
///
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// enum TodosAction {
///     #[intent]
///     Delete(IndexSet),
///
///     #[follow_up]
///     ReceiveTodo(TodoState),
///
///     SortCompletedTodos,
/// }
///
/// let action = TodosAction::ReceiveTodo(todo);
/// assert!(action.is_follow_up());
/// assert!(!action.is_intent());
/// ```
#[proc_macro_derive(Action, attributes(intent, follow_up))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut intent_arms = Vec::new();
    let mut follow_up_arms = Vec::new();
    let mut name_arms = Vec::new();

    for variant in &data_enum.variants {
        let is_intent = has_attribute(&variant.attrs, "intent");
        let is_follow_up = has_attribute(&variant.attrs, "follow_up");

        if is_intent && is_follow_up {
            return syn::Error::new_spanned(
                variant,
                "Variant cannot be both #[intent] and #[follow_up]",
            )
            .to_compile_error()
            .into();
        }

        let pattern = variant_pattern(variant);
        if is_intent {
            intent_arms.push(quote! { #pattern => true, });
        }
        if is_follow_up {
            follow_up_arms.push(quote! { #pattern => true, });
        }

        let variant_name = variant.ident.to_string();
        name_arms.push(quote! { #pattern => #variant_name, });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns true if this action is a user-originated intent
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_intent(&self) -> bool {
                match self {
                    #(#intent_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is produced by an effect
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_follow_up(&self) -> bool {
                match self {
                    #(#follow_up_arms)*
                    _ => false,
                }
            }

            /// Returns the variant name
            #[must_use]
            pub const fn action_name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derive macro for view-bound state structs
///
/// For every field marked `#[binding]`, generates a variant of a
/// `<Struct>Binding` enum carrying the field's new value, plus:
/// - `apply_binding(&mut self, binding)` - Replaces the field's value
/// - `<Struct>Binding::field_name(&self)` - The field the binding targets
///
/// Variant names are the field names in `CamelCase`.
///
/// # Attributes
///
/// - `#[binding]` - Expose the field to view bindings
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to anything but a non-generic struct with named fields
/// - No field is marked `#[binding]`
///
/// # Example
///
/// ```ignore
/// use todos_macros::BindableState;
///
/// #[derive(BindableState, Clone, Debug)]
/// pub struct TodoState {
///     id: TodoId,
///     #[binding]
///     pub description: String,
///     #[binding]
///     pub is_complete: bool,
/// }
///
/// // Generates:
/// // pub enum TodoStateBinding { Description(String), IsComplete(bool) }
/// todo.apply_binding(TodoStateBinding::IsComplete(true));
/// ```
#[proc_macro_derive(BindableState, attributes(binding))]
pub fn derive_bindable_state(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let vis = &input.vis;

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "#[derive(BindableState)] does not support generic structs",
        )
        .to_compile_error()
        .into();
    }

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new_spanned(
            input,
            "#[derive(BindableState)] can only be used on structs",
        )
        .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new_spanned(
            input,
            "#[derive(BindableState)] requires a struct with named fields",
        )
        .to_compile_error()
        .into();
    };

    let binding_name = format_ident!("{}Binding", name);

    let mut variants = Vec::new();
    let mut apply_arms = Vec::new();
    let mut field_name_arms = Vec::new();

    for field in fields.named.iter().filter(|f| has_attribute(&f.attrs, "binding")) {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let field_ty = &field.ty;
        let field_name = field_ident.to_string();
        let field_name = field_name.trim_start_matches("r#");
        let variant = format_ident!("{}", camel_case(field_name));
        let doc = format!("New value for `{field_name}`");

        variants.push(quote! {
            #[doc = #doc]
            #variant(#field_ty),
        });
        apply_arms.push(quote! {
            #binding_name::#variant(value) => self.#field_ident = value,
        });
        field_name_arms.push(quote! {
            Self::#variant(_) => #field_name,
        });
    }

    if variants.is_empty() {
        return syn::Error::new_spanned(
            name,
            "#[derive(BindableState)] needs at least one #[binding] field",
        )
        .to_compile_error()
        .into();
    }

    let enum_doc = format!("A view-originated update to one bindable field of [`{name}`]");

    let expanded = quote! {
        #[doc = #enum_doc]
        #[derive(Debug, Clone, PartialEq)]
        #vis enum #binding_name {
            #(#variants)*
        }

        impl #binding_name {
            /// Name of the field this binding updates
            #[must_use]
            pub const fn field_name(&self) -> &'static str {
                match self {
                    #(#field_name_arms)*
                }
            }
        }

        impl #name {
            /// Replace the bound field's value
            pub fn apply_binding(&mut self, binding: #binding_name) {
                match binding {
                    #(#apply_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Match pattern for a variant regardless of its field shape
fn variant_pattern(variant: &Variant) -> TokenStream2 {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

/// `is_complete` -> `IsComplete`
fn camel_case(snake: &str) -> String {
    snake
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect()
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

#[cfg(test)]
mod tests {
    use super::camel_case;

    #[test]
    fn camel_case_joins_snake_parts() {
        assert_eq!(camel_case("is_complete"), "IsComplete");
        assert_eq!(camel_case("description"), "Description");
        assert_eq!(camel_case("_leading__double"), "LeadingDouble");
    }
}
