//! Procedural macros for transcribe

mod attrs;
mod expand;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Implements `Reflect`, `Typed` and `Struct` for a struct, so values of it
/// can be copied from and into.
///
/// `pub` fields are exported: they are matched by name against the other
/// side of a copy. Other fields are only carried along when both sides are
/// the same type. The struct must also implement `Clone`.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone, Reflect)]
/// #[reflect(getter(double_age: i32), setter(role: String))]
/// pub struct User {
///     pub name: String,
///     pub age: i32,
///     #[reflect(rename = "NickName")]
///     pub nickname: Option<String>,
///     #[reflect(flatten)]
///     pub base: Base,
///     #[reflect(skip)]
///     cache: Vec<u8>,
///     super_role: String,
/// }
///
/// impl User {
///     fn double_age(&self) -> i32 {
///         self.age * 2
///     }
///
///     fn role(&mut self, role: String) {
///         self.super_role = format!("Super {role}");
///     }
/// }
/// ```
///
/// Container attributes:
/// - `transparent`: a newtype that stands for its single field.
/// - `scanner`, `valuer`, `copy_valuer`: the type implements the hook trait
///   of that name.
/// - `getter(name: Type)`: `fn name(&self) -> Type` can stand in for a field
///   called `name`.
/// - `setter(name: Type)`: `fn name(&mut self, value: Type)` receives the
///   source field called `name`.
///
/// Field attributes:
/// - `flatten`: the field's own fields are promoted into this struct.
/// - `rename = "..."`: match the field under another name.
/// - `skip`: leave the field out of reflection entirely. Its zero value is
///   `Default::default()`.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::derive_reflect(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
