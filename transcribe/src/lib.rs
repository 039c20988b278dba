#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

// lets `#[derive(Reflect)]` refer to `::transcribe` from inside this crate
extern crate self as transcribe;

pub use transcribe_core::*;
pub use transcribe_macros::Reflect;
pub use transcribe_reflect::{
    Hop, LogicalField, LogicalFields, LogicalMethod, Path, PathStep, Peek, PeekList, PeekMap,
    PeekStruct, Poke, PokeList, PokeMap, PokeStruct, ReflectError,
};

mod error;
pub use error::*;

mod options;
pub use options::*;

mod copier;
mod resolve;
mod convert;
mod fields;
mod methods;
mod collections;
mod deep;

use copier::Copier;

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
#[macro_export]
/// Forwards to tracing::trace when the tracing feature is enabled
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
#[macro_export]
/// Forwards to tracing::debug when the tracing feature is enabled
macro_rules! debug {
    ($($tt:tt)*) => {};
}

/// Copies `src` into `dst` with the default [`Options`].
///
/// Fields are matched by name, scalars converted, options and pointers
/// unwrapped and rebuilt, collections copied element by element. See the
/// crate documentation for the full set of rules.
pub fn copy<D: Reflect, S: Reflect>(dst: &mut D, src: &S) -> Result<(), CopyError> {
    copy_dyn(dst, src, &Options::default())
}

/// Copies `src` into `dst` with the given options.
pub fn copy_with_options<D: Reflect, S: Reflect>(
    dst: &mut D,
    src: &S,
    options: &Options,
) -> Result<(), CopyError> {
    copy_dyn(dst, src, options)
}

/// Copies between type-erased values.
///
/// On error the destination may have been partially written.
pub fn copy_dyn(dst: &mut dyn Reflect, src: &dyn Reflect, options: &Options) -> Result<(), CopyError> {
    debug!(
        "Copying {} into {} (ignore_empty: {}, deep_copy: {})",
        src.shape(),
        dst.shape(),
        options.ignore_empty,
        options.deep_copy
    );
    Copier::new(options).run(dst, src)
}

/// Returns a copy of `src` that shares no storage with it, `Rc` and `Arc`
/// contents included.
///
/// ```
/// use std::sync::Arc;
///
/// let original = vec![Arc::new(String::from("shared"))];
/// let copy = transcribe::deep_clone(&original)?;
/// let copy = copy.downcast_ref::<Vec<Arc<String>>>().unwrap();
///
/// assert_eq!(copy, &original);
/// assert!(!Arc::ptr_eq(&copy[0], &original[0]));
/// # Ok::<(), transcribe::CopyError>(())
/// ```
pub fn deep_clone(src: &dyn Reflect) -> Result<Box<dyn Reflect>, CopyError> {
    let options = Options::new().deep_copy(true);
    Copier::new(&options).deep_clone(src, &mut Path::new())
}
