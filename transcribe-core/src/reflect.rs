use core::any::Any;

use crate::{CopyValuer, Dynamic, PointerFlavor, ScalarValue, Scanner, Shape, Valuer};

/// A value whose structure can be inspected and modified at runtime.
///
/// Implemented for the standard library types in this crate and for user
/// structs through `#[derive(Reflect)]`. Every implementor is also [`Typed`],
/// which is what provides the object-safe helpers in [`DynReflect`].
pub trait Reflect: Any + DynReflect {
    /// Returns a read-only structural view of this value.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable structural view of this value.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Returns this value as a [`Scanner`], if the type implements it.
    fn as_scanner(&mut self) -> Option<&mut dyn Scanner> {
        None
    }

    /// Returns this value as a [`Valuer`], if the type implements it.
    fn as_valuer(&self) -> Option<&dyn Valuer> {
        None
    }

    /// Returns this value as a [`CopyValuer`], if the type implements it.
    fn as_copy_valuer(&self) -> Option<&dyn CopyValuer> {
        None
    }
}

/// Statically known reflected types.
pub trait Typed: Reflect + Clone + Sized {
    /// The shape of this type.
    const SHAPE: &'static Shape;

    /// Returns the zero value of this type: the value a freshly declared
    /// variable of the type holds before anything is copied into it.
    fn zero() -> Self;
}

/// Object-safe helpers available on every `dyn Reflect`.
///
/// This trait is implemented for every [`Typed`] type and should not be
/// implemented by hand.
pub trait DynReflect {
    /// Returns the shape of the concrete type.
    fn shape(&self) -> &'static Shape;

    /// Upcasts to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Upcasts to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Upcasts a box to `Box<dyn Any>`.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Upcasts to `&dyn Reflect`.
    fn as_reflect(&self) -> &dyn Reflect;

    /// Upcasts to `&mut dyn Reflect`.
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    /// Clones the value into a new box. Shared pointers inside the value are
    /// shared with the clone, exactly as [`Clone`] does.
    fn clone_boxed(&self) -> Box<dyn Reflect>;

    /// Overwrites `self` with a clone of `other`. Returns `false`, leaving
    /// `self` untouched, when `other` is a different type.
    fn assign_from(&mut self, other: &dyn Reflect) -> bool;

    /// Moves `other` into `self`. Hands `other` back when it is a different
    /// type.
    fn assign_boxed(&mut self, other: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;
}

impl<T: Typed> DynReflect for T {
    #[inline]
    fn shape(&self) -> &'static Shape {
        T::SHAPE
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    #[inline]
    fn as_reflect(&self) -> &dyn Reflect {
        self
    }

    #[inline]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        self
    }

    fn clone_boxed(&self) -> Box<dyn Reflect> {
        Box::new(self.clone())
    }

    fn assign_from(&mut self, other: &dyn Reflect) -> bool {
        match other.as_any().downcast_ref::<T>() {
            Some(other) => {
                *self = other.clone();
                true
            }
            None => false,
        }
    }

    fn assign_boxed(&mut self, other: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        if !other.as_any().is::<T>() {
            return Err(other);
        }
        if let Ok(other) = other.into_any().downcast::<T>() {
            *self = *other;
        }
        Ok(())
    }
}

impl dyn Reflect {
    /// Returns `true` if the concrete type is `T`.
    #[inline]
    pub fn is<T: Reflect>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcasts to a reference of the concrete type.
    #[inline]
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcasts to a mutable reference of the concrete type.
    #[inline]
    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl core::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.reflect_ref() {
            ReflectRef::Scalar(s) => write!(f, "{:?}", s.scalar()),
            _ => write!(f, "<{}>", self.shape()),
        }
    }
}

/// A read-only structural view of a reflected value.
pub enum ReflectRef<'a> {
    /// A leaf value.
    Scalar(&'a dyn Scalar),
    /// A struct.
    Struct(&'a dyn Struct),
    /// A list or array.
    List(&'a dyn List),
    /// A map.
    Map(&'a dyn Map),
    /// `Option<T>`.
    Option(&'a dyn OptionLike),
    /// `Box<T>`, `Rc<T>` or `Arc<T>`.
    Pointer(&'a dyn Pointer),
    /// A [`Dynamic`] value.
    Dynamic(&'a Dynamic),
    /// A [`Nullable`](crate::Nullable) value.
    Nullable(&'a dyn NullableLike),
    /// A transparent newtype; holds the wrapped value.
    Transparent(&'a dyn Reflect),
    /// A value without visible structure.
    Opaque,
}

/// A mutable structural view of a reflected value.
pub enum ReflectMut<'a> {
    /// A leaf value.
    Scalar(&'a mut dyn Scalar),
    /// A struct.
    Struct(&'a mut dyn Struct),
    /// A list or array.
    List(&'a mut dyn List),
    /// A map.
    Map(&'a mut dyn Map),
    /// `Option<T>`.
    Option(&'a mut dyn OptionLike),
    /// `Box<T>`, `Rc<T>` or `Arc<T>`.
    Pointer(&'a mut dyn Pointer),
    /// A [`Dynamic`] value.
    Dynamic(&'a mut Dynamic),
    /// A [`Nullable`](crate::Nullable) value.
    Nullable(&'a mut dyn NullableLike),
    /// A transparent newtype; holds the wrapped value.
    Transparent(&'a mut dyn Reflect),
    /// A value without visible structure.
    Opaque,
}

/// Access to a leaf value.
pub trait Scalar {
    /// Reads the value.
    fn scalar(&self) -> ScalarValue;

    /// Writes the value. Numeric values convert between all numeric types
    /// with `as` semantics; other values only into their own type. Returns
    /// `false` when the value cannot be stored.
    fn set_scalar(&mut self, value: ScalarValue) -> bool;
}

/// Access to the fields and methods of a struct.
///
/// Field indices are those of [`StructType::fields`](crate::StructType::fields).
pub trait Struct {
    /// Number of reflected fields.
    fn field_count(&self) -> usize;

    /// Returns the field at `index`.
    fn field(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the field at `index`, mutably.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Calls the getter named `name`.
    fn call_getter(&self, name: &str) -> Option<Box<dyn Reflect>> {
        let _ = name;
        None
    }

    /// Calls the setter named `name` with `value`. Returns `None` when there
    /// is no such setter, `Some(false)` when `value` has the wrong type.
    fn call_setter(&mut self, name: &str, value: &dyn Reflect) -> Option<bool> {
        let _ = (name, value);
        None
    }
}

/// Access to the elements of a list or array.
pub trait List {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Returns true if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index`.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the element at `index`, mutably.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns true for arrays, whose length cannot change.
    fn is_fixed_size(&self) -> bool {
        false
    }

    /// Replaces the contents with `len` zero elements. Fixed-size sequences
    /// return `false` (and stay untouched) when `len` is not their length.
    fn reset(&mut self, len: usize) -> bool;
}

/// Access to the entries of a map.
pub trait Map {
    /// Number of entries.
    fn len(&self) -> usize;

    /// Returns true if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the entries.
    fn entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    /// Looks up an entry. Returns `None` if the key is absent or of the
    /// wrong type.
    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect>;

    /// Inserts an entry, replacing any previous value for the key. Returns
    /// `false` if key or value is of the wrong type.
    fn insert_boxed(&mut self, key: Box<dyn Reflect>, value: Box<dyn Reflect>) -> bool;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Access to `Option<T>`.
pub trait OptionLike {
    /// Returns the payload, if present.
    fn get(&self) -> Option<&dyn Reflect>;

    /// Returns the payload mutably, if present.
    fn get_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns the payload, inserting the zero value first if absent.
    fn get_or_insert_zero(&mut self) -> &mut dyn Reflect;

    /// Sets the option to `None`.
    fn set_none(&mut self);
}

/// Access to the pointee of a pointer.
pub trait Pointer {
    /// How the pointee is held.
    fn flavor(&self) -> PointerFlavor;

    /// Returns the pointee.
    fn pointee(&self) -> &dyn Reflect;

    /// Returns the pointee mutably. Shared pointers are made unique first,
    /// cloning the pointee if other pointers refer to it.
    fn pointee_mut(&mut self) -> &mut dyn Reflect;

    /// Returns true if `self` and `other` point at the same allocation.
    fn ptr_eq(&self, other: &dyn Reflect) -> bool;
}

/// Access to a [`Nullable`](crate::Nullable) value.
pub trait NullableLike {
    /// Returns true if the payload is meaningful.
    fn is_valid(&self) -> bool;

    /// Marks the payload as meaningful or not.
    fn set_valid(&mut self, valid: bool);

    /// Returns the payload, whether or not it is valid.
    fn payload(&self) -> &dyn Reflect;

    /// Returns the payload mutably.
    fn payload_mut(&mut self) -> &mut dyn Reflect;
}
