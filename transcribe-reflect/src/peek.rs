use transcribe_core::{
    Def, Dynamic, Field, List, Map, MapDef, OptionLike, Pointer, Reflect, ReflectRef,
    ScalarValue, Shape, Struct, StructType, is_zero,
};

use crate::ReflectError;

/// A read-only view of a reflected value.
#[derive(Clone, Copy)]
pub struct Peek<'mem> {
    value: &'mem dyn Reflect,
}

impl core::fmt::Debug for Peek<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Peek").field(&self.value).finish()
    }
}

impl<'mem> Peek<'mem> {
    /// Creates a view of a concrete value.
    #[inline]
    pub fn new<T: Reflect>(value: &'mem T) -> Self {
        Peek { value }
    }

    /// Creates a view of a type-erased value.
    #[inline]
    pub fn from_dyn(value: &'mem dyn Reflect) -> Self {
        Peek { value }
    }

    /// Returns the shape of the value.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        self.value.shape()
    }

    /// Returns the underlying value.
    #[inline]
    pub fn value(&self) -> &'mem dyn Reflect {
        self.value
    }

    /// Returns true if the value is the zero value of its type.
    #[inline]
    pub fn is_zero(&self) -> bool {
        is_zero(self.value)
    }

    /// Returns true if `self` and `other` are the same type.
    #[inline]
    pub fn same_type(&self, other: &Shape) -> bool {
        self.shape() == other
    }

    /// Gets the value as a concrete type.
    pub fn get<T: Reflect>(&self) -> Result<&'mem T, ReflectError> {
        self.value
            .downcast_ref::<T>()
            .ok_or_else(|| ReflectError::WasNotA {
                expected: core::any::type_name::<T>(),
                actual: self.shape(),
            })
    }

    /// Reads a scalar.
    pub fn scalar(&self) -> Result<ScalarValue, ReflectError> {
        match self.value.reflect_ref() {
            ReflectRef::Scalar(s) => Ok(s.scalar()),
            _ => Err(self.was_not_a("scalar")),
        }
    }

    /// Tries to identify this value as a struct.
    pub fn into_struct(self) -> Result<PeekStruct<'mem>, ReflectError> {
        match (self.value.reflect_ref(), self.shape().def) {
            (ReflectRef::Struct(value), Def::Struct(ty)) => Ok(PeekStruct {
                value,
                ty,
                shape: self.shape(),
            }),
            _ => Err(self.was_not_a("struct")),
        }
    }

    /// Tries to identify this value as a list or array.
    pub fn into_list(self) -> Result<PeekList<'mem>, ReflectError> {
        match self.value.reflect_ref() {
            ReflectRef::List(list) => Ok(PeekList {
                list,
                shape: self.shape(),
            }),
            _ => Err(self.was_not_a("list")),
        }
    }

    /// Tries to identify this value as a map.
    pub fn into_map(self) -> Result<PeekMap<'mem>, ReflectError> {
        match (self.value.reflect_ref(), self.shape().def) {
            (ReflectRef::Map(map), Def::Map(def)) => Ok(PeekMap { map, def }),
            _ => Err(self.was_not_a("map")),
        }
    }

    /// Tries to identify this value as an option, returning its payload.
    pub fn into_option(self) -> Result<Option<Peek<'mem>>, ReflectError> {
        match self.value.reflect_ref() {
            ReflectRef::Option(o) => Ok(OptionLike::get(o).map(Peek::from_dyn)),
            _ => Err(self.was_not_a("option")),
        }
    }

    /// Tries to identify this value as a pointer, returning its pointee.
    pub fn into_pointer(self) -> Result<Peek<'mem>, ReflectError> {
        match self.value.reflect_ref() {
            ReflectRef::Pointer(p) => Ok(Peek::from_dyn(p.pointee())),
            _ => Err(self.was_not_a("pointer")),
        }
    }

    /// Returns the underlying pointer view, if this value is a pointer.
    pub fn as_pointer(&self) -> Option<&'mem dyn Pointer> {
        match self.value.reflect_ref() {
            ReflectRef::Pointer(p) => Some(p),
            _ => None,
        }
    }

    /// Tries to identify this value as a [`Dynamic`], returning what it holds.
    pub fn into_dynamic(self) -> Result<Option<Peek<'mem>>, ReflectError> {
        match self.value.reflect_ref() {
            ReflectRef::Dynamic(d) => Ok(Dynamic::get(d).map(Peek::from_dyn)),
            _ => Err(self.was_not_a("dynamic")),
        }
    }

    /// Tries to identify this value as a nullable wrapper, returning its
    /// payload if valid.
    pub fn into_nullable(self) -> Result<Option<Peek<'mem>>, ReflectError> {
        match self.value.reflect_ref() {
            ReflectRef::Nullable(n) => Ok(n.is_valid().then(|| Peek::from_dyn(n.payload()))),
            _ => Err(self.was_not_a("nullable")),
        }
    }

    /// Tries to identify this value as a transparent newtype, returning the
    /// wrapped value.
    pub fn into_transparent(self) -> Result<Peek<'mem>, ReflectError> {
        match self.value.reflect_ref() {
            ReflectRef::Transparent(inner) => Ok(Peek::from_dyn(inner)),
            _ => Err(self.was_not_a("transparent newtype")),
        }
    }

    fn was_not_a(&self, expected: &'static str) -> ReflectError {
        ReflectError::WasNotA {
            expected,
            actual: self.shape(),
        }
    }
}

/// Lets you read the fields and getters of a struct.
#[derive(Clone, Copy)]
pub struct PeekStruct<'mem> {
    value: &'mem dyn Struct,
    ty: StructType,
    shape: &'static Shape,
}

impl<'mem> PeekStruct<'mem> {
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

    /// Returns the number of reflected fields.
    #[inline]
    pub fn field_count(&self) -> usize {
        self.ty.fields.len()
    }

    /// Returns the value of the field at the given index.
    pub fn field(&self, index: usize) -> Result<Peek<'mem>, ReflectError> {
        self.value
            .field(index)
            .map(Peek::from_dyn)
            .ok_or(ReflectError::FieldOutOfBounds {
                index,
                shape: self.shape,
            })
    }

    /// Gets the value of the field with the given (matching) name.
    pub fn field_by_name(&self, name: &str) -> Option<Peek<'mem>> {
        let (index, _) = self.ty.field_by_name(name)?;
        self.field(index).ok()
    }

    /// Iterates over all fields, providing both field metadata and value.
    pub fn fields(&self) -> impl Iterator<Item = (&'static Field, Peek<'mem>)> + '_ {
        self.ty
            .fields
            .iter()
            .enumerate()
            .filter_map(move |(i, field)| Some((field, self.field(i).ok()?)))
    }

    /// Calls the getter named `name`.
    pub fn call_getter(&self, name: &str) -> Option<Box<dyn Reflect>> {
        self.ty.getter(name)?;
        self.value.call_getter(name)
    }
}

/// Lets you read the elements of a list or array.
#[derive(Clone, Copy)]
pub struct PeekList<'mem> {
    list: &'mem dyn List,
    shape: &'static Shape,
}

impl<'mem> PeekList<'mem> {
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

    /// Returns the shape of the list.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Option<Peek<'mem>> {
        self.list.get(index).map(Peek::from_dyn)
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> impl Iterator<Item = Peek<'mem>> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

/// Lets you read the entries of a map.
#[derive(Clone, Copy)]
pub struct PeekMap<'mem> {
    map: &'mem dyn Map,
    def: MapDef,
}

impl<'mem> PeekMap<'mem> {
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

    /// Returns true if the keys are `String`s.
    pub fn has_string_keys(&self) -> bool {
        self.def.k().is_type::<String>()
    }

    /// Looks up an entry by a concrete key.
    pub fn get<K: Reflect>(&self, key: &K) -> Option<Peek<'mem>> {
        self.get_peek(Peek::new(key))
    }

    /// Looks up an entry by a reflected key.
    pub fn get_peek(&self, key: Peek<'_>) -> Option<Peek<'mem>> {
        self.map.get(key.value()).map(Peek::from_dyn)
    }

    /// Looks up a string-keyed entry, first by exact key, then ignoring ASCII
    /// case. Returns `None` for maps whose keys are not strings.
    pub fn get_by_name(&self, name: &str) -> Option<Peek<'mem>> {
        if !self.has_string_keys() {
            return None;
        }
        if let Some(value) = self.get(&name.to_string()) {
            return Some(value);
        }
        self.iter().find_map(|(k, v)| {
            let key = k.get::<String>().ok()?;
            key.eq_ignore_ascii_case(name).then_some(v)
        })
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> impl Iterator<Item = (Peek<'mem>, Peek<'mem>)> + 'mem {
        self.map
            .entries()
            .map(|(k, v)| (Peek::from_dyn(k), Peek::from_dyn(v)))
    }
}
