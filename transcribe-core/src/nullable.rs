use crate::{Def, NullableDef, NullableLike, Reflect, ReflectMut, ReflectRef, Shape, Typed, shape_of};

/// A value paired with a validity flag, the way database drivers model
/// nullable columns.
///
/// An invalid `Nullable` reads as absent: copying out of it resets the
/// destination to zero. Copying into it stores the payload and marks it
/// valid only when the source is present and non-zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Nullable<T> {
    /// The payload. Meaningless when `valid` is false.
    pub value: T,
    /// Whether `value` is meaningful.
    pub valid: bool,
}

impl<T> Nullable<T> {
    /// A valid value.
    pub const fn new(value: T) -> Self {
        Nullable { value, valid: true }
    }

    /// Returns the payload if valid.
    pub fn as_option(&self) -> Option<&T> {
        self.valid.then_some(&self.value)
    }

    /// Converts into `Some(payload)` if valid.
    pub fn into_option(self) -> Option<T> {
        self.valid.then_some(self.value)
    }
}

impl<T: Typed> Nullable<T> {
    /// An invalid value with a zero payload.
    pub fn null() -> Self {
        Nullable {
            value: T::zero(),
            valid: false,
        }
    }
}

impl<T: Typed> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Nullable::new(value),
            None => Nullable::null(),
        }
    }
}

impl<T: Typed> NullableLike for Nullable<T> {
    fn is_valid(&self) -> bool {
        self.valid
    }

    fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    fn payload(&self) -> &dyn Reflect {
        &self.value
    }

    fn payload_mut(&mut self) -> &mut dyn Reflect {
        &mut self.value
    }
}

impl<T: Typed> Reflect for Nullable<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Nullable(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Nullable(self)
    }
}

impl<T: Typed> Typed for Nullable<T> {
    const SHAPE: &'static Shape = &const {
        Shape::of::<Nullable<T>>("Nullable", Def::Nullable(NullableDef { t: shape_of::<T> }))
    };

    fn zero() -> Self {
        Nullable::null()
    }
}
