//! Copies between values of the same type, and how much storage they share.
//!
//! Without `deep_copy`, a value is copied by cloning it, so `Rc`/`Arc`
//! contents end up shared between source and destination. With it, every
//! pointer, list, map and dynamic payload is rebuilt into fresh storage.

use transcribe_core::{Def, Reflect, ReflectMut, ReflectRef};
use transcribe_reflect::{Path, PathStep, Peek, Poke};

use crate::copier::Copier;
use crate::{CopyError, trace};

impl Copier<'_> {
    /// Copies `src` into `dst`, both of the same type.
    ///
    /// Structs are copied field by field, so `ignore_empty`, setters and the
    /// storage policy apply to their fields. A top-level map is merged into.
    pub(crate) fn copy_same(
        &mut self,
        dst: &mut dyn Reflect,
        src: &dyn Reflect,
        path: &mut Path,
        top: bool,
    ) -> Result<(), CopyError> {
        match src.shape().def {
            Def::Struct(_) => return self.copy_struct_same(dst, src, path),
            Def::Map(_) if top => return self.copy_map(dst, src, path, true),
            Def::Scalar(_) | Def::Opaque => {}
            _ if self.options.deep_copy => return self.rebuild(dst, src, path),
            _ => {}
        }
        assign(dst, src, path)
    }

    /// Returns a copy of `src` that shares nothing with it, or a plain clone
    /// when deep copies are off.
    pub(crate) fn duplicate(
        &mut self,
        src: &dyn Reflect,
        path: &mut Path,
    ) -> Result<Box<dyn Reflect>, CopyError> {
        if self.options.deep_copy {
            self.deep_clone(src, path)
        } else {
            Ok(src.clone_boxed())
        }
    }

    /// Builds a zero value of the source's type and copies `src` into it.
    /// Only shares nothing with `src` when deep copies are on.
    pub(crate) fn deep_clone(
        &mut self,
        src: &dyn Reflect,
        path: &mut Path,
    ) -> Result<Box<dyn Reflect>, CopyError> {
        let mut fresh = src.shape().zero();
        self.copy_same(&mut *fresh, src, path, false)?;
        Ok(fresh)
    }

    /// Copies a struct onto another of the same type: unexported fields as a
    /// whole, exported ones through the field matcher.
    fn copy_struct_same(
        &mut self,
        dst: &mut dyn Reflect,
        src: &dyn Reflect,
        path: &mut Path,
    ) -> Result<(), CopyError> {
        let shape = src.shape();
        let from = Peek::from_dyn(src)
            .into_struct()
            .map_err(|e| CopyError::reflect(e, path, shape, shape))?;

        for (index, field) in from.ty().fields.iter().enumerate() {
            if field.is_exported() {
                continue;
            }
            let value = from
                .field(index)
                .map_err(|e| CopyError::reflect(e, path, shape, shape))?;

            path.push(PathStep::Field(field.name));
            let fresh = if self.options.deep_copy {
                Some(self.deep_clone(value.value(), path)?)
            } else {
                None
            };

            let mut to = Poke::from_dyn(&mut *dst)
                .into_struct()
                .map_err(|e| CopyError::reflect(e, path, shape, shape))?;
            let mut slot = to
                .field(index)
                .map_err(|e| CopyError::reflect(e, path, shape, shape))?;
            match fresh {
                Some(fresh) => slot.set_boxed(fresh),
                None => slot.set_from(value.value()),
            }
            .map_err(|e| CopyError::reflect(e, path, value.shape(), field.shape()))?;
            path.pop();
        }

        self.copy_struct(dst, src, path)
    }

    /// Rebuilds `dst` from `src` level by level, allocating fresh storage for
    /// every indirection and collection.
    fn rebuild(&mut self, dst: &mut dyn Reflect, src: &dyn Reflect, path: &mut Path) -> Result<(), CopyError> {
        trace!("{path}: rebuilding {}", src.shape());
        match src.shape().def {
            Def::List(_) | Def::Array(_) => return self.copy_list(dst, src, path),
            Def::Map(_) => return self.copy_map(dst, src, path, false),
            _ => {}
        }

        match (dst.reflect_mut(), src.reflect_ref()) {
            (ReflectMut::Option(to), ReflectRef::Option(from)) => {
                return match from.get() {
                    Some(inner) => self.copy_same(to.get_or_insert_zero(), inner, path, false),
                    None => {
                        to.set_none();
                        Ok(())
                    }
                };
            }
            (ReflectMut::Pointer(to), ReflectRef::Pointer(from)) => {
                // unshares `to` if it aliases anything
                return self.copy_same(to.pointee_mut(), from.pointee(), path, false);
            }
            (ReflectMut::Dynamic(to), ReflectRef::Dynamic(from)) => {
                let value = match from.get() {
                    Some(value) => Some(self.deep_clone(value, path)?),
                    None => None,
                };
                to.set(value);
                return Ok(());
            }
            (ReflectMut::Nullable(to), ReflectRef::Nullable(from)) => {
                self.copy_same(to.payload_mut(), from.payload(), path, false)?;
                to.set_valid(from.is_valid());
                return Ok(());
            }
            (ReflectMut::Transparent(to), ReflectRef::Transparent(from)) => {
                return self.copy_same(to, from, path, false);
            }
            _ => {}
        }
        assign(dst, src, path)
    }
}

fn assign(dst: &mut dyn Reflect, src: &dyn Reflect, path: &Path) -> Result<(), CopyError> {
    let (src_shape, dst_shape) = (src.shape(), dst.shape());
    Poke::from_dyn(dst)
        .set_from(src)
        .map_err(|e| CopyError::reflect(e, path, src_shape, dst_shape))
}
