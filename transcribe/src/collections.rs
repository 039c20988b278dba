//! Lists, arrays and maps.

use transcribe_core::{Def, Reflect, ScalarValue, Shape};
use transcribe_reflect::{Path, PathStep, Peek, Poke};

use crate::copier::Copier;
use crate::{CopyError, ErrorKind, trace};

impl Copier<'_> {
    /// Replaces the contents of list `dst` with the elements of list `src`,
    /// converted one by one. Arrays only accept a source of their own length.
    pub(crate) fn copy_list(
        &mut self,
        dst: &mut dyn Reflect,
        src: &dyn Reflect,
        path: &mut Path,
    ) -> Result<(), CopyError> {
        let (src_shape, dst_shape) = (src.shape(), dst.shape());
        let from = Peek::from_dyn(src)
            .into_list()
            .map_err(|e| CopyError::reflect(e, path, src_shape, dst_shape))?;
        let mut to = Poke::from_dyn(dst)
            .into_list()
            .map_err(|e| CopyError::reflect(e, path, src_shape, dst_shape))?;

        to.reset(from.len()).map_err(|e| {
            CopyError::new(ErrorKind::NotSettable, path, src_shape, dst_shape).with_cause(e)
        })?;
        trace!("{path}: {} elements", from.len());

        for (index, item) in from.iter().enumerate() {
            let Some(slot) = to.get(index) else {
                break;
            };
            path.push(PathStep::Index(index));
            self.convert(slot.into_inner(), item.value(), path, false)?;
            path.pop();
        }
        Ok(())
    }

    /// Copies a struct into a list as its only element.
    pub(crate) fn copy_struct_into_list(
        &mut self,
        dst: &mut dyn Reflect,
        src: &dyn Reflect,
        path: &mut Path,
    ) -> Result<(), CopyError> {
        let (src_shape, dst_shape) = (src.shape(), dst.shape());
        let mut to = Poke::from_dyn(dst)
            .into_list()
            .map_err(|e| CopyError::reflect(e, path, src_shape, dst_shape))?;
        to.reset(1).map_err(|e| {
            CopyError::new(ErrorKind::NotSettable, path, src_shape, dst_shape).with_cause(e)
        })?;

        if let Some(slot) = to.get(0) {
            path.push(PathStep::Index(0));
            self.convert(slot.into_inner(), src, path, false)?;
            path.pop();
        }
        Ok(())
    }

    /// Copies the entries of map `src` into map `dst`, converting keys and
    /// values. The destination is emptied first unless `top` is set, in which
    /// case entries are merged into it.
    pub(crate) fn copy_map(
        &mut self,
        dst: &mut dyn Reflect,
        src: &dyn Reflect,
        path: &mut Path,
        top: bool,
    ) -> Result<(), CopyError> {
        let (src_shape, dst_shape) = (src.shape(), dst.shape());
        let from = Peek::from_dyn(src)
            .into_map()
            .map_err(|e| CopyError::reflect(e, path, src_shape, dst_shape))?;
        let mut to = Poke::from_dyn(dst)
            .into_map()
            .map_err(|e| CopyError::reflect(e, path, src_shape, dst_shape))?;

        let (key_shape, value_shape) = (to.def().k(), to.def().v());
        if !keys_compatible(from.def().k(), key_shape) {
            return Err(CopyError::new(
                ErrorKind::MapKeyTypeMismatch,
                path,
                from.def().k(),
                key_shape,
            ));
        }

        if !top {
            to.clear();
        }

        for (key, value) in from.iter() {
            if self.options.ignore_empty && value.is_zero() {
                continue;
            }
            path.push(PathStep::Key(key_label(key)));

            let mut new_key = key_shape.zero();
            self.convert(&mut *new_key, key.value(), path, false)?;
            let mut new_value = value_shape.zero();
            self.convert(&mut *new_value, value.value(), path, false)?;

            to.insert(new_key, new_value)
                .map_err(|e| CopyError::reflect(e, path, src_shape, dst_shape))?;
            path.pop();
        }
        Ok(())
    }
}

/// Keys convert when they are the same type or both scalars of compatible
/// classes. Transparent newtypes count as the type they wrap.
fn keys_compatible(from: &'static Shape, to: &'static Shape) -> bool {
    let (from, to) = (peel_transparent(from), peel_transparent(to));
    if from == to {
        return true;
    }
    match (from.def, to.def) {
        (Def::Scalar(a), Def::Scalar(b)) => a.converts_to(b),
        _ => false,
    }
}

fn peel_transparent(mut shape: &'static Shape) -> &'static Shape {
    while let Def::Transparent(td) = shape.def {
        shape = td.inner();
    }
    shape
}

fn key_label(key: Peek<'_>) -> String {
    if let Ok(inner) = key.into_transparent() {
        return key_label(inner);
    }
    match key.scalar() {
        Ok(ScalarValue::Str(s)) => format!("{s:?}"),
        Ok(value) => value.to_string(),
        Err(_) => format!("{:?}", key.value()),
    }
}
