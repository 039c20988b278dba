use crate::{Reflect, ReflectRef};

/// Returns true if `value` holds the zero value of its type.
///
/// Scalars are zero when they equal their default, strings, lists and maps
/// when empty, options and dynamics when `None`, nullables when invalid.
/// A struct is zero when every reflected field is. Pointers and transparent
/// newtypes are zero when what they hold is. Arrays are zero when all their
/// elements are. Opaque values are never zero.
pub fn is_zero(value: &dyn Reflect) -> bool {
    match value.reflect_ref() {
        ReflectRef::Scalar(s) => s.scalar().is_zero(),
        ReflectRef::Struct(s) => (0..s.field_count()).all(|i| s.field(i).is_none_or(is_zero)),
        ReflectRef::List(l) if l.is_fixed_size() => {
            (0..l.len()).all(|i| l.get(i).is_none_or(is_zero))
        }
        ReflectRef::List(l) => l.is_empty(),
        ReflectRef::Map(m) => m.is_empty(),
        ReflectRef::Option(o) => o.get().is_none(),
        ReflectRef::Pointer(p) => is_zero(p.pointee()),
        ReflectRef::Dynamic(d) => d.get().is_none(),
        ReflectRef::Nullable(n) => !n.is_valid(),
        ReflectRef::Transparent(inner) => is_zero(inner),
        ReflectRef::Opaque => false,
    }
}
