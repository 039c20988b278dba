use crate::Shape;

crate::bitflags! {
    /// Flags describing how a field takes part in copying.
    pub struct FieldFlags: u8 {
        /// The field is `pub` and can be matched by name.
        const EXPORTED = 1 << 0;
        /// The field's own fields are promoted into the enclosing struct
        /// (`#[reflect(flatten)]`).
        const FLATTEN = 1 << 1;
    }
}

/// Describes a field in a struct or tuple struct.
#[derive(Clone, Copy, Debug)]
pub struct Field {
    /// Name of the field as declared (for tuple structs, the 0-based index).
    pub name: &'static str,

    /// Name the field is matched under, when set with `#[reflect(rename = "...")]`.
    pub rename: Option<&'static str>,

    /// Shape of the field's type.
    ///
    /// The layer of indirection allows for cyclic type definitions.
    pub shape: fn() -> &'static Shape,

    /// Field flags.
    pub flags: FieldFlags,
}

impl Field {
    /// Returns the shape of the field's type.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }

    /// Returns the name the field is matched under.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.rename.unwrap_or(self.name)
    }

    /// Returns true if the field is visible outside its module.
    #[inline]
    pub fn is_exported(&self) -> bool {
        self.flags.contains(FieldFlags::EXPORTED)
    }

    /// Returns true if this field is flattened.
    #[inline]
    pub fn is_flattened(&self) -> bool {
        self.flags.contains(FieldFlags::FLATTEN)
    }
}

/// A getter or setter exposed through `#[reflect(getter(..))]` or
/// `#[reflect(setter(..))]`.
#[derive(Clone, Copy, Debug)]
pub struct Method {
    /// Name of the method, which is also the field name it corresponds to.
    pub name: &'static str,

    /// For getters, the return type. For setters, the argument type.
    pub shape: fn() -> &'static Shape,
}

impl Method {
    /// Returns the shape of the value the method produces or consumes.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }
}
