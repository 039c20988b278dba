//! Looking through indirection: `Option`, pointers, [`Dynamic`], [`Nullable`]
//! and transparent newtypes.
//!
//! [`Dynamic`]: transcribe_core::Dynamic
//! [`Nullable`]: transcribe_core::Nullable

use transcribe_core::{Reflect, ReflectMut, ReflectRef};
use transcribe_reflect::Poke;

/// Why there is no value behind an indirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Absence {
    /// A missing link: `None` or an empty `Dynamic`. Destinations that cannot
    /// be absent themselves keep their value.
    Nil,
    /// An invalid `Nullable`, or a `Valuer` that produced nothing.
    /// Destinations that cannot be absent themselves are reset to zero.
    Invalid,
}

/// A value seen one level of indirection down.
pub(crate) enum Unwrapped<'a> {
    /// The value is not an indirection.
    Direct,
    /// What the indirection leads to.
    Inner(&'a dyn Reflect),
    /// The indirection leads nowhere.
    Absent(Absence),
}

/// Steps through one level of indirection of a source value.
pub(crate) fn unwrap(src: &dyn Reflect) -> Unwrapped<'_> {
    match src.reflect_ref() {
        ReflectRef::Option(o) => o
            .get()
            .map_or(Unwrapped::Absent(Absence::Nil), Unwrapped::Inner),
        ReflectRef::Pointer(p) => Unwrapped::Inner(p.pointee()),
        ReflectRef::Dynamic(d) => d
            .get()
            .map_or(Unwrapped::Absent(Absence::Nil), Unwrapped::Inner),
        ReflectRef::Nullable(n) if n.is_valid() => Unwrapped::Inner(n.payload()),
        ReflectRef::Nullable(_) => Unwrapped::Absent(Absence::Invalid),
        ReflectRef::Transparent(inner) => Unwrapped::Inner(inner),
        _ => Unwrapped::Direct,
    }
}

/// Writes an absent source into `dst`: the nearest wrapper that can express
/// absence becomes absent. Without one, an invalid source resets `dst` to zero
/// and a nil source leaves it alone.
pub(crate) fn apply_absence(dst: &mut dyn Reflect, absence: Absence) {
    let reset = match dst.reflect_mut() {
        ReflectMut::Option(o) => {
            o.set_none();
            false
        }
        ReflectMut::Dynamic(d) => {
            d.set(None);
            false
        }
        ReflectMut::Nullable(n) => {
            n.set_valid(false);
            Poke::from_dyn(n.payload_mut()).set_zero();
            false
        }
        ReflectMut::Pointer(p) => {
            apply_absence(p.pointee_mut(), absence);
            false
        }
        ReflectMut::Transparent(inner) => {
            apply_absence(inner, absence);
            false
        }
        _ => absence == Absence::Invalid,
    };
    if reset {
        Poke::from_dyn(dst).set_zero();
    }
}
