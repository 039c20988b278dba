use core::any::TypeId;
use core::fmt;

use crate::{Field, Method, Reflect, ScalarType, Typed};

/// Schema for a reflected type: its identity, its structural definition and
/// how to build a zero value of it.
///
/// Shapes are always `'static` and are obtained through [`Typed::SHAPE`].
/// Two shapes describe the same type exactly when their [`TypeId`]s agree.
pub struct Shape {
    /// Returns the [`TypeId`] of the described type.
    pub id: fn() -> TypeId,

    /// Short identifier, without generic parameters (`Vec`, `Employee`).
    pub type_identifier: &'static str,

    /// Returns the full type name, as given by [`core::any::type_name`].
    pub type_name: fn() -> &'static str,

    /// Structural definition of the type.
    pub def: Def,

    /// Builds the zero value of the type.
    pub zero: fn() -> Box<dyn Reflect>,

    /// Hooks the type implements.
    pub capabilities: Capabilities,
}

impl Shape {
    /// Creates a shape for `T` with no capabilities.
    pub const fn of<T: Typed>(type_identifier: &'static str, def: Def) -> Self {
        Shape {
            id: TypeId::of::<T>,
            type_identifier,
            type_name: core::any::type_name::<T>,
            def,
            zero: zero_boxed::<T>,
            capabilities: Capabilities::empty(),
        }
    }

    /// Returns this shape with the given capabilities.
    pub const fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub fn id(&self) -> TypeId {
        (self.id)()
    }

    /// Returns `true` if this shape describes `T`.
    #[inline]
    pub fn is_type<T: 'static>(&self) -> bool {
        self.id() == TypeId::of::<T>()
    }

    /// Returns the full type name.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Builds a fresh zero value of this shape.
    #[inline]
    pub fn zero(&self) -> Box<dyn Reflect> {
        (self.zero)()
    }

    /// Returns `true` if the type implements every hook in `capabilities`.
    #[inline]
    pub fn has(&self, capabilities: Capabilities) -> bool {
        self.capabilities.contains(capabilities)
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Shape {}

impl core::hash::Hash for Shape {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("type_identifier", &self.type_identifier)
            .field("def", &self.def)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

/// Returns the shape of `T`. Handy where a `fn() -> &'static Shape` is needed.
pub fn shape_of<T: Typed>() -> &'static Shape {
    T::SHAPE
}

/// Returns the zero value of `T`, boxed.
pub fn zero_boxed<T: Typed>() -> Box<dyn Reflect> {
    Box::new(T::zero())
}

crate::bitflags! {
    /// Optional hooks a type exposes to the copier.
    pub struct Capabilities: u8 {
        /// The type can populate itself from an arbitrary value ([`Scanner`](crate::Scanner)).
        const SCANNER = 1 << 0;
        /// The type yields a driver value standing in for itself ([`Valuer`](crate::Valuer)).
        const VALUER = 1 << 1;
        /// The type yields a payload to be copied in its place ([`CopyValuer`](crate::CopyValuer)).
        const COPY_VALUER = 1 << 2;
    }
}

/// The structural definition of a shape.
#[derive(Clone, Copy, Debug)]
pub enum Def {
    /// A leaf value: numbers, booleans, strings, time stamps.
    Scalar(ScalarType),

    /// A struct with named or positional fields.
    Struct(StructType),

    /// A growable sequence (`Vec<T>`).
    List(ListDef),

    /// A fixed-size sequence (`[T; N]`).
    Array(ArrayDef),

    /// A keyed collection (`HashMap<K, V>`, `BTreeMap<K, V>`).
    Map(MapDef),

    /// `Option<T>`; `None` is the absent value.
    Option(OptionDef),

    /// An owning or shared pointer (`Box<T>`, `Rc<T>`, `Arc<T>`).
    Pointer(PointerDef),

    /// A value of any reflected type, decided at runtime ([`Dynamic`](crate::Dynamic)).
    Dynamic,

    /// A payload with a validity flag ([`Nullable`](crate::Nullable)).
    Nullable(NullableDef),

    /// A newtype that stands for its single inner value.
    Transparent(TransparentDef),

    /// A value with no structure visible to reflection. It can only be cloned.
    Opaque,
}

impl Def {
    /// Returns the struct definition, if any.
    pub fn into_struct(self) -> Option<StructType> {
        match self {
            Def::Struct(st) => Some(st),
            _ => None,
        }
    }

    /// Returns the scalar type, if any.
    pub fn into_scalar(self) -> Option<ScalarType> {
        match self {
            Def::Scalar(st) => Some(st),
            _ => None,
        }
    }

    /// Returns the map definition, if any.
    pub fn into_map(self) -> Option<MapDef> {
        match self {
            Def::Map(md) => Some(md),
            _ => None,
        }
    }

    /// Returns the element shape of a list or array.
    pub fn element(self) -> Option<&'static Shape> {
        match self {
            Def::List(ld) => Some(ld.t()),
            Def::Array(ad) => Some(ad.t()),
            _ => None,
        }
    }

    /// Returns the shape one level of indirection down, for `Option`,
    /// pointers, nullable wrappers and transparent newtypes.
    pub fn inner(self) -> Option<&'static Shape> {
        match self {
            Def::Option(od) => Some(od.t()),
            Def::Pointer(pd) => Some(pd.pointee()),
            Def::Nullable(nd) => Some(nd.t()),
            Def::Transparent(td) => Some(td.inner()),
            _ => None,
        }
    }
}

/// The kind of struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructKind {
    /// `struct S { a: T }`
    Struct,
    /// `struct S(T);`
    TupleStruct,
    /// `struct S;`
    Unit,
}

/// Fields and methods of a struct.
#[derive(Clone, Copy, Debug)]
pub struct StructType {
    /// The kind of struct.
    pub kind: StructKind,

    /// Reflected fields, in declaration order. Skipped fields are absent.
    pub fields: &'static [Field],

    /// Zero-argument methods whose return value can stand in for a field.
    pub getters: &'static [Method],

    /// Single-argument methods that can receive a value named like a field.
    pub setters: &'static [Method],
}

impl StructType {
    /// Returns the index and field with exactly this name.
    pub fn field_by_name(&self, name: &str) -> Option<(usize, &'static Field)> {
        self.fields.iter().enumerate().find(|(_, f)| f.name() == name)
    }

    /// Returns the getter with exactly this name.
    pub fn getter(&self, name: &str) -> Option<&'static Method> {
        self.getters.iter().find(|m| m.name == name)
    }

    /// Returns the setter with exactly this name.
    pub fn setter(&self, name: &str) -> Option<&'static Method> {
        self.setters.iter().find(|m| m.name == name)
    }
}

/// Definition of a growable sequence.
#[derive(Clone, Copy, Debug)]
pub struct ListDef {
    /// Shape of the elements.
    pub t: fn() -> &'static Shape,
}

impl ListDef {
    /// Returns the element shape.
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// Definition of a fixed-size sequence.
#[derive(Clone, Copy, Debug)]
pub struct ArrayDef {
    /// Shape of the elements.
    pub t: fn() -> &'static Shape,
    /// Number of elements.
    pub n: usize,
}

impl ArrayDef {
    /// Returns the element shape.
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// Definition of a keyed collection.
#[derive(Clone, Copy, Debug)]
pub struct MapDef {
    /// Shape of the keys.
    pub k: fn() -> &'static Shape,
    /// Shape of the values.
    pub v: fn() -> &'static Shape,
}

impl MapDef {
    /// Returns the key shape.
    pub fn k(&self) -> &'static Shape {
        (self.k)()
    }

    /// Returns the value shape.
    pub fn v(&self) -> &'static Shape {
        (self.v)()
    }
}

/// Definition of `Option<T>`.
#[derive(Clone, Copy, Debug)]
pub struct OptionDef {
    /// Shape of the payload.
    pub t: fn() -> &'static Shape,
}

impl OptionDef {
    /// Returns the payload shape.
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// How a pointer holds its pointee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerFlavor {
    /// Exclusively owned (`Box<T>`).
    Box,
    /// Shared, single-threaded (`Rc<T>`).
    Rc,
    /// Shared, thread-safe (`Arc<T>`).
    Arc,
}

impl PointerFlavor {
    /// Returns `true` for pointers whose storage can be aliased.
    pub fn is_shared(self) -> bool {
        matches!(self, PointerFlavor::Rc | PointerFlavor::Arc)
    }
}

/// Definition of a pointer.
#[derive(Clone, Copy, Debug)]
pub struct PointerDef {
    /// Shape of the pointee.
    pub pointee: fn() -> &'static Shape,
    /// How the pointee is held.
    pub flavor: PointerFlavor,
}

impl PointerDef {
    /// Returns the pointee shape.
    pub fn pointee(&self) -> &'static Shape {
        (self.pointee)()
    }
}

/// Definition of [`Nullable<T>`](crate::Nullable).
#[derive(Clone, Copy, Debug)]
pub struct NullableDef {
    /// Shape of the payload.
    pub t: fn() -> &'static Shape,
}

impl NullableDef {
    /// Returns the payload shape.
    pub fn t(&self) -> &'static Shape {
        (self.t)()
    }
}

/// Definition of a transparent newtype.
#[derive(Clone, Copy, Debug)]
pub struct TransparentDef {
    /// Shape of the wrapped value.
    pub inner: fn() -> &'static Shape,
}

impl TransparentDef {
    /// Returns the wrapped shape.
    pub fn inner(&self) -> &'static Shape {
        (self.inner)()
    }
}
