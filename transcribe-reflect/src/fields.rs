//! Struct fields as the copier sees them: exported fields of the struct itself
//! followed by those promoted out of `#[reflect(flatten)]` members.

use transcribe_core::{Def, Field, Method, Reflect, ReflectMut, ReflectRef, Shape};

use crate::{Peek, Poke, trace};

/// One step from a struct to one of its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    /// Index into [`StructType::fields`](transcribe_core::StructType::fields).
    pub index: usize,
    /// Whether the field stepped through is exported.
    pub exported: bool,
}

/// An exported field reachable from a struct, possibly through flattened
/// members.
#[derive(Debug, Clone)]
pub struct LogicalField {
    /// Name the field is matched under.
    pub name: &'static str,
    /// The field definition, on the struct that declares it.
    pub field: &'static Field,
    /// Steps from the root struct; the last one is the field itself.
    pub path: Vec<Hop>,
}

impl LogicalField {
    /// Shape of the field's type.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        self.field.shape()
    }

    /// Number of flattened members between the root struct and this field.
    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Returns true if the field was promoted out of a flattened member.
    #[inline]
    pub fn is_promoted(&self) -> bool {
        self.depth() > 0
    }

    /// Reads the field out of `root`. Yields `None` when a flattened member on
    /// the way is an absent `Option`.
    pub fn resolve<'mem>(&self, root: Peek<'mem>) -> Option<Peek<'mem>> {
        let (last, owners) = self.path.split_last()?;
        let owner = walk(root.value(), owners)?;
        struct_field(owner, last.index).map(Peek::from_dyn)
    }

    /// Reaches the field inside `root` for writing. Absent flattened members
    /// on the way are filled with their zero value when `allocate` is set and
    /// the member is exported; otherwise they yield `None`.
    pub fn resolve_mut<'mem>(&self, root: Poke<'mem>, allocate: bool) -> Option<Poke<'mem>> {
        let (last, owners) = self.path.split_last()?;
        let owner = walk_mut(root.into_inner(), owners, allocate)?;
        struct_field_mut(owner, last.index).map(Poke::from_dyn)
    }
}

/// A getter or setter reachable from a struct, possibly declared on a
/// flattened member.
#[derive(Debug, Clone)]
pub struct LogicalMethod {
    /// The method definition.
    pub method: &'static Method,
    /// Steps from the root struct to the struct declaring the method.
    pub owner: Vec<Hop>,
}

impl LogicalMethod {
    /// Name of the method.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.method.name
    }

    /// Shape of the getter's return value or the setter's argument.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        self.method.shape()
    }

    /// Calls the getter on `root`.
    pub fn call_getter(&self, root: Peek<'_>) -> Option<Box<dyn Reflect>> {
        let owner = walk(root.value(), &self.owner)?;
        match owner.reflect_ref() {
            ReflectRef::Struct(s) => s.call_getter(self.name()),
            _ => None,
        }
    }

    /// Calls the setter on `root` with `value`. Returns `None` when the
    /// declaring struct cannot be reached, `Some(false)` when `value` is not
    /// of the argument type.
    pub fn call_setter(&self, root: Poke<'_>, value: &dyn Reflect, allocate: bool) -> Option<bool> {
        let owner = walk_mut(root.into_inner(), &self.owner, allocate)?;
        match owner.reflect_mut() {
            ReflectMut::Struct(s) => s.call_setter(self.name(), value),
            _ => None,
        }
    }
}

/// The flattened view of a struct shape.
///
/// Fields of the struct come first, then fields promoted out of flattened
/// members, shallowest first. A name declared closer to the root shadows the
/// same name further down. Only exported fields are listed, but promotion
/// goes through unexported flattened members too.
#[derive(Debug, Clone)]
pub struct LogicalFields {
    shape: &'static Shape,
    fields: Vec<LogicalField>,
    getters: Vec<LogicalMethod>,
    setters: Vec<LogicalMethod>,
}

impl LogicalFields {
    /// Flattens `shape`. Shapes that are not structs have no fields.
    pub fn of(shape: &'static Shape) -> Self {
        let mut builder = Builder::default();
        builder.collect(shape, &[]);

        let fields = shadow(builder.fields, |f| f.name, |f| f.depth());
        let getters = shadow(builder.getters, LogicalMethod::name, |m| m.owner.len());
        let setters = shadow(builder.setters, LogicalMethod::name, |m| m.owner.len());

        trace!(
            "Flattened {shape}: {} fields, {} getters, {} setters",
            fields.len(),
            getters.len(),
            setters.len()
        );

        LogicalFields {
            shape,
            fields,
            getters,
            setters,
        }
    }

    /// The struct shape these fields belong to.
    #[inline]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// All logical fields, in matching order.
    #[inline]
    pub fn fields(&self) -> &[LogicalField] {
        &self.fields
    }

    /// All getters.
    #[inline]
    pub fn getters(&self) -> &[LogicalMethod] {
        &self.getters
    }

    /// All setters.
    #[inline]
    pub fn setters(&self) -> &[LogicalMethod] {
        &self.setters
    }

    /// Finds a field by name: exact match first, then ignoring ASCII case.
    pub fn lookup(&self, name: &str) -> Option<&LogicalField> {
        find_by_name(&self.fields, name, |f| f.name)
    }

    /// Finds a getter by name: exact match first, then ignoring ASCII case.
    pub fn getter(&self, name: &str) -> Option<&LogicalMethod> {
        find_by_name(&self.getters, name, LogicalMethod::name)
    }

    /// Finds a setter by exact name.
    pub fn setter(&self, name: &str) -> Option<&LogicalMethod> {
        self.setters.iter().find(|m| m.name() == name)
    }
}

#[derive(Default)]
struct Builder {
    fields: Vec<LogicalField>,
    getters: Vec<LogicalMethod>,
    setters: Vec<LogicalMethod>,
    // structs currently being flattened, innermost last
    chain: Vec<&'static Shape>,
}

impl Builder {
    fn collect(&mut self, shape: &'static Shape, prefix: &[Hop]) {
        let Def::Struct(ty) = shape.def else {
            return;
        };
        if self.chain.contains(&shape) {
            trace!("Not flattening {shape} again inside itself");
            return;
        }
        self.chain.push(shape);

        for method in ty.getters {
            self.getters.push(LogicalMethod {
                method,
                owner: prefix.to_vec(),
            });
        }
        for method in ty.setters {
            self.setters.push(LogicalMethod {
                method,
                owner: prefix.to_vec(),
            });
        }

        for (index, field) in ty.fields.iter().enumerate() {
            let mut path = prefix.to_vec();
            path.push(Hop {
                index,
                exported: field.is_exported(),
            });

            if field.is_exported() {
                self.fields.push(LogicalField {
                    name: field.name(),
                    field,
                    path: path.clone(),
                });
            }

            if field.is_flattened() {
                match flatten_target(field.shape()) {
                    Some(inner) => self.collect(inner, &path),
                    None => {
                        trace!(
                            "Flattened field {} of {shape} is not a struct, keeping it as is",
                            field.name
                        );
                    }
                }
            }
        }

        self.chain.pop();
    }
}

/// The struct a flattened member leads to, through `Option` and pointers.
fn flatten_target(mut shape: &'static Shape) -> Option<&'static Shape> {
    loop {
        shape = match shape.def {
            Def::Struct(_) => return Some(shape),
            Def::Option(od) => od.t(),
            Def::Pointer(pd) => pd.pointee(),
            _ => return None,
        };
    }
}

/// Keeps the shallowest entry for every name, ordered by depth.
fn shadow<T>(
    mut items: Vec<T>,
    name: impl Fn(&T) -> &'static str,
    depth: impl Fn(&T) -> usize,
) -> Vec<T> {
    items.sort_by_key(|item| depth(item));
    let mut seen = Vec::with_capacity(items.len());
    items.retain(|item| {
        let n = name(item);
        if seen.contains(&n) {
            false
        } else {
            seen.push(n);
            true
        }
    });
    items
}

fn find_by_name<'a, T>(items: &'a [T], name: &str, key: impl Fn(&T) -> &'static str) -> Option<&'a T> {
    items
        .iter()
        .find(|item| key(item) == name)
        .or_else(|| items.iter().find(|item| key(item).eq_ignore_ascii_case(name)))
}

/// Follows `hops` from `root`, entering each flattened member.
fn walk<'a>(root: &'a dyn Reflect, hops: &[Hop]) -> Option<&'a dyn Reflect> {
    let mut current = enter(root)?;
    for hop in hops {
        current = enter(struct_field(current, hop.index)?)?;
    }
    Some(current)
}

fn walk_mut<'a>(root: &'a mut dyn Reflect, hops: &[Hop], allocate: bool) -> Option<&'a mut dyn Reflect> {
    let mut current = enter_mut(root, false)?;
    for hop in hops {
        let member = struct_field_mut(current, hop.index)?;
        current = enter_mut(member, allocate && hop.exported)?;
    }
    Some(current)
}

fn enter(mut current: &dyn Reflect) -> Option<&dyn Reflect> {
    loop {
        current = match current.reflect_ref() {
            ReflectRef::Struct(_) => return Some(current),
            ReflectRef::Option(o) => o.get()?,
            ReflectRef::Pointer(p) => p.pointee(),
            _ => return None,
        };
    }
}

fn enter_mut(mut current: &mut dyn Reflect, allocate: bool) -> Option<&mut dyn Reflect> {
    loop {
        if matches!(current.shape().def, Def::Struct(_)) {
            return Some(current);
        }
        current = match current.reflect_mut() {
            ReflectMut::Option(o) if allocate => o.get_or_insert_zero(),
            ReflectMut::Option(o) => o.get_mut()?,
            ReflectMut::Pointer(p) => p.pointee_mut(),
            _ => return None,
        };
    }
}

fn struct_field(value: &dyn Reflect, index: usize) -> Option<&dyn Reflect> {
    match value.reflect_ref() {
        ReflectRef::Struct(s) => s.field(index),
        _ => None,
    }
}

fn struct_field_mut(value: &mut dyn Reflect, index: usize) -> Option<&mut dyn Reflect> {
    match value.reflect_mut() {
        ReflectMut::Struct(s) => s.field_mut(index),
        _ => None,
    }
}
