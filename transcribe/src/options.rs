//! Configuration of a copy.

use core::any::TypeId;
use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

use transcribe_core::{HookError, Reflect, Shape, Typed};

/// The signature of a user conversion function.
pub type ConvertFn = dyn Fn(&dyn Reflect) -> Result<Box<dyn Reflect>, HookError> + Send + Sync;

/// Settings for [`copy_with_options`](crate::copy_with_options).
///
/// ```
/// use transcribe::{Options, TypeConverter};
///
/// let options = Options::new()
///     .ignore_empty(true)
///     .deep_copy(true)
///     .converter(TypeConverter::new::<String, i64>(|s| Ok(s.parse()?)));
/// # let _ = options;
/// ```
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Zero-valued source values do not overwrite the destination.
    pub ignore_empty: bool,

    /// Nothing in the destination shares storage with the source.
    pub deep_copy: bool,

    /// Field renames, per pair of source and destination types.
    pub field_name_mapping: Vec<FieldNameMapping>,

    /// Conversion functions, per pair of source and destination types.
    /// These take priority over every built-in rule.
    pub converters: Vec<TypeConverter>,
}

impl Options {
    /// Default options: overwrite with zero values, share `Rc`/`Arc` storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets [`Options::ignore_empty`].
    pub fn ignore_empty(mut self, ignore_empty: bool) -> Self {
        self.ignore_empty = ignore_empty;
        self
    }

    /// Sets [`Options::deep_copy`].
    pub fn deep_copy(mut self, deep_copy: bool) -> Self {
        self.deep_copy = deep_copy;
        self
    }

    /// Adds a field name mapping.
    pub fn field_name_mapping(mut self, mapping: FieldNameMapping) -> Self {
        self.field_name_mapping.push(mapping);
        self
    }

    /// Adds a type converter.
    pub fn converter(mut self, converter: TypeConverter) -> Self {
        self.converters.push(converter);
        self
    }
}

/// Renames source fields onto destination fields when copying from `Src`
/// into `Dst`.
#[derive(Clone, Debug)]
pub struct FieldNameMapping {
    source: &'static Shape,
    destination: &'static Shape,
    mapping: Vec<(String, String)>,
}

impl FieldNameMapping {
    /// Creates a mapping from `(source field, destination field)` pairs.
    pub fn new<Src: Typed, Dst: Typed>(
        pairs: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        FieldNameMapping {
            source: Src::SHAPE,
            destination: Dst::SHAPE,
            mapping: pairs
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        }
    }
}

/// A user function converting `Src` values into `Dst` values.
#[derive(Clone)]
pub struct TypeConverter {
    source: &'static Shape,
    destination: &'static Shape,
    convert: Arc<ConvertFn>,
}

impl TypeConverter {
    /// Wraps a typed conversion function.
    pub fn new<Src: Typed, Dst: Typed>(
        convert: impl Fn(&Src) -> Result<Dst, HookError> + Send + Sync + 'static,
    ) -> Self {
        TypeConverter {
            source: Src::SHAPE,
            destination: Dst::SHAPE,
            convert: Arc::new(move |src: &dyn Reflect| -> Result<Box<dyn Reflect>, HookError> {
                let src = src.downcast_ref::<Src>().ok_or_else(|| {
                    HookError::from(format!("converter expected {}, got {}", Src::SHAPE, src.shape()))
                })?;
                Ok(Box::new(convert(src)?) as Box<dyn Reflect>)
            }),
        }
    }

    /// Wraps an untyped conversion function. It must return a value of the
    /// destination type.
    pub fn from_dyn(
        source: &'static Shape,
        destination: &'static Shape,
        convert: impl Fn(&dyn Reflect) -> Result<Box<dyn Reflect>, HookError> + Send + Sync + 'static,
    ) -> Self {
        TypeConverter {
            source,
            destination,
            convert: Arc::new(convert),
        }
    }

    /// The source type.
    pub fn source(&self) -> &'static Shape {
        self.source
    }

    /// The destination type.
    pub fn destination(&self) -> &'static Shape {
        self.destination
    }

    pub(crate) fn call(&self, src: &dyn Reflect) -> Result<Box<dyn Reflect>, HookError> {
        (self.convert)(src)
    }
}

impl fmt::Debug for TypeConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeConverter")
            .field("source", &self.source.type_name())
            .field("destination", &self.destination.type_name())
            .finish_non_exhaustive()
    }
}

type PairKey = (TypeId, TypeId);

/// Options indexed for lookup during one call.
pub(crate) struct ResolvedOptions<'o> {
    pub ignore_empty: bool,
    pub deep_copy: bool,
    // destination field name -> source field name
    mappings: HashMap<PairKey, HashMap<&'o str, &'o str>>,
    // source field name -> destination field name
    renames: HashMap<PairKey, HashMap<&'o str, &'o str>>,
    converters: HashMap<PairKey, &'o TypeConverter>,
}

impl<'o> ResolvedOptions<'o> {
    pub fn new(options: &'o Options) -> Self {
        let mut mappings: HashMap<PairKey, HashMap<&str, &str>> = HashMap::new();
        let mut renames: HashMap<PairKey, HashMap<&str, &str>> = HashMap::new();
        for mapping in &options.field_name_mapping {
            let key = (mapping.source.id(), mapping.destination.id());
            for (from, to) in &mapping.mapping {
                mappings
                    .entry(key)
                    .or_default()
                    .insert(to.as_str(), from.as_str());
                renames
                    .entry(key)
                    .or_default()
                    .insert(from.as_str(), to.as_str());
            }
        }

        // later converters for the same pair win
        let converters = options
            .converters
            .iter()
            .map(|c| ((c.source.id(), c.destination.id()), c))
            .collect();

        ResolvedOptions {
            ignore_empty: options.ignore_empty,
            deep_copy: options.deep_copy,
            mappings,
            renames,
            converters,
        }
    }

    /// The source field feeding destination field `dst_field`, if renamed.
    pub fn source_name(&self, src: &Shape, dst: &Shape, dst_field: &str) -> Option<&'o str> {
        self.mappings
            .get(&(src.id(), dst.id()))?
            .get(dst_field)
            .copied()
    }

    /// The destination name of source field `src_field`, if renamed.
    pub fn destination_name(&self, src: &Shape, dst: &Shape, src_field: &str) -> Option<&'o str> {
        self.renames
            .get(&(src.id(), dst.id()))?
            .get(src_field)
            .copied()
    }

    pub fn converter(&self, src: &Shape, dst: &Shape) -> Option<&'o TypeConverter> {
        self.converters.get(&(src.id(), dst.id())).copied()
    }
}
