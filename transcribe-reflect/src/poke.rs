use transcribe_core::{
    Def, List, Map, MapDef, Reflect, ReflectMut, ScalarValue, Shape, Struct, StructType, Typed,
};

use crate::{Peek, ReflectError};

/// A mutable view of a reflected value.
///
/// `Poke` is the mutable counterpart to [`Peek`]. Replacing the value
/// wholesale through [`Poke::set`] works for any type. Structs, lists and
/// maps can also be edited in place through the views returned by
/// [`Poke::into_struct`], [`Poke::into_list`] and [`Poke::into_map`].
pub struct Poke<'mem> {
    value: &'mem mut dyn Reflect,
}

impl<'mem> Poke<'mem> {
    /// Creates a mutable view over a `T` value.
    #[inline]
    pub fn new<T: Reflect>(value: &'mem mut T) -> Self {
        Poke { value }
    }

    /// Creates a mutable view over a type-erased value.
    #[inline]
    pub fn from_dyn(value: &'mem mut dyn Reflect) -> Self {
        Poke { value }
    }

    /// Returns the shape of the value.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        self.value.shape()
    }

    /// Borrows this as a read-only view.
    #[inline]
    pub fn as_peek(&self) -> Peek<'_> {
        Peek::from_dyn(&*self.value)
    }

    /// Gives back the underlying value.
    #[inline]
    pub fn into_inner(self) -> &'mem mut dyn Reflect {
        self.value
    }

    /// Replaces the value with `value`.
    pub fn set<T: Typed>(&mut self, value: T) -> Result<(), ReflectError> {
        match self.value.downcast_mut::<T>() {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(self.wrong_shape(T::SHAPE)),
        }
    }

    /// Moves a boxed value of the same type in.
    pub fn set_boxed(&mut self, value: Box<dyn Reflect>) -> Result<(), ReflectError> {
        self.value
            .assign_boxed(value)
            .map_err(|value| self.wrong_shape(value.shape()))
    }

    /// Replaces the value with a clone of `other`, which must be the same type.
    pub fn set_from(&mut self, other: &dyn Reflect) -> Result<(), ReflectError> {
        if self.value.assign_from(other) {
            Ok(())
        } else {
            Err(self.wrong_shape(other.shape()))
        }
    }

    /// Resets the value to the zero value of its type.
    pub fn set_zero(&mut self) {
        let zero = self.shape().zero();
        // the zero is built from our own shape, so the types always agree
        let _ = self.value.assign_boxed(zero);
    }

    /// Stores a scalar, converting between numeric types.
    pub fn set_scalar(&mut self, scalar: ScalarValue) -> Result<(), ReflectError> {
        let shape = self.shape();
        match self.value.reflect_mut() {
            ReflectMut::Scalar(s) => {
                if s.set_scalar(scalar) {
                    Ok(())
                } else {
                    Err(ReflectError::IncompatibleScalar { shape })
                }
            }
            _ => Err(ReflectError::WasNotA {
                expected: "scalar",
                actual: shape,
            }),
        }
    }

    /// Tries to identify this value as a struct.
    pub fn into_struct(self) -> Result<PokeStruct<'mem>, ReflectError> {
        let shape = self.shape();
        match (shape.def, self.value.reflect_mut()) {
            (Def::Struct(ty), ReflectMut::Struct(value)) => Ok(PokeStruct { value, ty, shape }),
            _ => Err(ReflectError::WasNotA {
                expected: "struct",
                actual: shape,
            }),
        }
    }

    /// Tries to identify this value as a list or array.
    pub fn into_list(self) -> Result<PokeList<'mem>, ReflectError> {
        let shape = self.shape();
        match self.value.reflect_mut() {
            ReflectMut::List(list) => Ok(PokeList { list, shape }),
            _ => Err(ReflectError::WasNotA {
                expected: "list",
                actual: shape,
            }),
        }
    }

    /// Tries to identify this value as a map.
    pub fn into_map(self) -> Result<PokeMap<'mem>, ReflectError> {
        let shape = self.shape();
        match (shape.def, self.value.reflect_mut()) {
            (Def::Map(def), ReflectMut::Map(map)) => Ok(PokeMap { map, def }),
            _ => Err(ReflectError::WasNotA {
                expected: "map",
                actual: shape,
            }),
        }
    }

    fn wrong_shape(&self, actual: &'static Shape) -> ReflectError {
        ReflectError::WrongShape {
            expected: self.shape(),
            actual,
        }
    }
}

/// Lets you write the fields of a struct and call its setters.
pub struct PokeStruct<'mem> {
    value: &'mem mut dyn Struct,
    ty: StructType,
    shape: &'static Shape,
}

impl<'mem> PokeStruct<'mem> {
    /// Returns the struct definition.
    #[inline]
    pub fn ty(&self) -> &StructType {
        &self.ty
    }

    /// Returns the shape of the struct.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Returns a mutable view of the field at `index`.
    pub fn field(&mut self, index: usize) -> Result<Poke<'_>, ReflectError> {
        let shape = self.shape;
        self.value
            .field_mut(index)
            .map(Poke::from_dyn)
            .ok_or(ReflectError::FieldOutOfBounds { index, shape })
    }

    /// Consumes the view, returning the field at `index` for the full
    /// lifetime of the struct borrow.
    pub fn into_field(self, index: usize) -> Result<Poke<'mem>, ReflectError> {
        let shape = self.shape;
        self.value
            .field_mut(index)
            .map(Poke::from_dyn)
            .ok_or(ReflectError::FieldOutOfBounds { index, shape })
    }

    /// Returns a mutable view of the field with this (matching) name.
    pub fn field_by_name(&mut self, name: &str) -> Option<Poke<'_>> {
        let (index, _) = self.ty.field_by_name(name)?;
        self.field(index).ok()
    }

    /// Calls the setter named `name`. Returns `None` if there is no such
    /// setter, and an error if `value` is not of the setter's argument type.
    pub fn call_setter(
        &mut self,
        name: &str,
        value: &dyn Reflect,
    ) -> Option<Result<(), ReflectError>> {
        let method = self.ty.setter(name)?;
        match self.value.call_setter(name, value)? {
            true => Some(Ok(())),
            false => Some(Err(ReflectError::WrongShape {
                expected: method.shape(),
                actual: value.shape(),
            })),
        }
    }
}

/// Lets you write the elements of a list or array.
pub struct PokeList<'mem> {
    list: &'mem mut dyn List,
    shape: &'static Shape,
}

impl<'mem> PokeList<'mem> {
    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if there are no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns true for arrays.
    #[inline]
    pub fn is_fixed_size(&self) -> bool {
        self.list.is_fixed_size()
    }

    /// Returns the shape of the list.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Returns a mutable view of the element at `index`.
    pub fn get(&mut self, index: usize) -> Option<Poke<'_>> {
        self.list.get_mut(index).map(Poke::from_dyn)
    }

    /// Replaces the contents with `len` zero elements. Fails for arrays of
    /// a different length.
    pub fn reset(&mut self, len: usize) -> Result<(), ReflectError> {
        if self.list.reset(len) {
            Ok(())
        } else {
            Err(ReflectError::WasNotA {
                expected: "list of matching length",
                actual: self.shape,
            })
        }
    }
}

/// Lets you insert into a map.
pub struct PokeMap<'mem> {
    map: &'mem mut dyn Map,
    def: MapDef,
}

impl<'mem> PokeMap<'mem> {
    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the map definition.
    #[inline]
    pub fn def(&self) -> MapDef {
        self.def
    }

    /// Inserts an entry, replacing any previous value for the key.
    pub fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), ReflectError> {
        let (expected_key, expected_value) = (self.def.k(), self.def.v());
        let (key_shape, value_shape) = (key.shape(), value.shape());
        if self.map.insert_boxed(key, value) {
            return Ok(());
        }
        if key_shape != expected_key {
            Err(ReflectError::WrongShape {
                expected: expected_key,
                actual: key_shape,
            })
        } else {
            Err(ReflectError::WrongShape {
                expected: expected_value,
                actual: value_shape,
            })
        }
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}
