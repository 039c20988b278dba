use core::fmt;

use crate::{Def, Reflect, ReflectMut, ReflectRef, Shape, Typed};

/// A slot holding a value of any reflected type, or nothing.
///
/// This is the reflected counterpart of an "any" value: the copier looks
/// through it at the concrete value inside, and writing into a `Dynamic`
/// replaces its content with a copy of the source, whatever its type.
#[derive(Default)]
pub struct Dynamic(Option<Box<dyn Reflect>>);

impl Dynamic {
    /// Wraps a value.
    pub fn new<T: Typed>(value: T) -> Self {
        Dynamic(Some(Box::new(value)))
    }

    /// An empty slot.
    pub const fn none() -> Self {
        Dynamic(None)
    }

    /// Wraps an already boxed value.
    pub fn from_boxed(value: Box<dyn Reflect>) -> Self {
        Dynamic(Some(value))
    }

    /// Returns the held value.
    pub fn get(&self) -> Option<&dyn Reflect> {
        self.0.as_deref()
    }

    /// Returns the held value mutably.
    pub fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.0.as_deref_mut()
    }

    /// Replaces the held value.
    pub fn set(&mut self, value: Option<Box<dyn Reflect>>) {
        self.0 = value;
    }

    /// Takes the held value out, leaving the slot empty.
    pub fn take(&mut self) -> Option<Box<dyn Reflect>> {
        self.0.take()
    }

    /// Returns true if the slot is empty.
    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the held value if it is a `T`.
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.get()?.downcast_ref::<T>()
    }

    /// Returns the held value mutably if it is a `T`.
    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.get_mut()?.downcast_mut::<T>()
    }

    /// Returns the shape of the held value.
    pub fn held_shape(&self) -> Option<&'static Shape> {
        self.get().map(|v| v.shape())
    }
}

impl Clone for Dynamic {
    fn clone(&self) -> Self {
        Dynamic(self.get().map(|v| v.clone_boxed()))
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(v) => f.debug_tuple("Dynamic").field(&v).finish(),
            None => f.write_str("Dynamic(None)"),
        }
    }
}

impl Reflect for Dynamic {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Dynamic(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Dynamic(self)
    }
}

impl Typed for Dynamic {
    const SHAPE: &'static Shape = &const { Shape::of::<Dynamic>("Dynamic", Def::Dynamic) };

    fn zero() -> Self {
        Dynamic(None)
    }
}
