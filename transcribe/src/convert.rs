//! Converting one value into another, whatever their types.

use transcribe_core::{Def, Reflect, ReflectMut, Shape, is_zero};
use transcribe_reflect::{Path, Peek, Poke};

use crate::copier::Copier;
use crate::resolve::{Absence, Unwrapped, apply_absence, unwrap};
use crate::{CopyError, ErrorKind, TypeConverter, trace};

impl Copier<'_> {
    /// Copies `src` into `dst`. `top` is set only for the value the copy was
    /// called on.
    ///
    /// Rules are tried in order: user converter, identical types, source
    /// hooks, source indirection, destination hook, destination indirection,
    /// then the structural rules.
    pub(crate) fn convert(
        &mut self,
        dst: &mut dyn Reflect,
        src: &dyn Reflect,
        path: &mut Path,
        top: bool,
    ) -> Result<(), CopyError> {
        let src_shape = src.shape();
        let dst_shape = dst.shape();
        trace!("{path}: {src_shape} -> {dst_shape}");

        if let Some(converter) = self.options.converter(src_shape, dst_shape) {
            return run_converter(converter, dst, src, path);
        }

        if src_shape == dst_shape {
            return self.copy_same(dst, src, path, top);
        }

        if let Some(valuer) = src.as_valuer() {
            let value = valuer.value().map_err(|cause| {
                CopyError::new(ErrorKind::ValueAccessFailed, path, src_shape, dst_shape)
                    .with_cause(cause)
            })?;
            return match value {
                Some(value) => self.convert(dst, &*value, path, top),
                None => {
                    trace!("{path}: {src_shape} has no value");
                    apply_absence(dst, Absence::Invalid);
                    Ok(())
                }
            };
        }

        if let Some(copy_valuer) = src.as_copy_valuer() {
            return match copy_valuer.copy_value() {
                Some(payload) => self.convert(dst, &*payload, path, top),
                None => Ok(()),
            };
        }

        match unwrap(src) {
            Unwrapped::Inner(inner) => {
                // a present `Some` or valid nullable keeps its validity, zero payload or not
                if matches!(src_shape.def, Def::Option(_) | Def::Nullable(_)) {
                    if let ReflectMut::Nullable(n) = dst.reflect_mut() {
                        self.convert(n.payload_mut(), inner, path, top)?;
                        n.set_valid(true);
                        return Ok(());
                    }
                }
                return self.convert(dst, inner, path, top);
            }
            Unwrapped::Absent(absence) => {
                trace!("{path}: {src_shape} is absent ({absence:?})");
                apply_absence(dst, absence);
                return Ok(());
            }
            Unwrapped::Direct => {}
        }

        if let Some(scanner) = dst.as_scanner() {
            return scanner.scan(src).map_err(|cause| {
                CopyError::new(ErrorKind::ScanFailed, path, src_shape, dst_shape).with_cause(cause)
            });
        }

        match dst.reflect_mut() {
            ReflectMut::Option(o) => return self.convert(o.get_or_insert_zero(), src, path, top),
            ReflectMut::Pointer(p) => return self.convert(p.pointee_mut(), src, path, top),
            ReflectMut::Transparent(inner) => return self.convert(inner, src, path, top),
            ReflectMut::Dynamic(d) => {
                let value = self.duplicate(src, path)?;
                d.set(Some(value));
                return Ok(());
            }
            ReflectMut::Nullable(n) => {
                self.convert(n.payload_mut(), src, path, top)?;
                n.set_valid(!is_zero(src));
                return Ok(());
            }
            _ => {}
        }

        match (dst_shape.def, src_shape.def) {
            (Def::Scalar(to), Def::Scalar(from)) if from.converts_to(to) => {
                copy_scalar(dst, src, path)
            }
            (Def::Struct(_), Def::Struct(_)) => self.copy_struct(dst, src, path),
            (Def::Struct(_), Def::Map(md)) if md.k().is_type::<String>() => {
                self.copy_struct(dst, src, path)
            }
            (Def::List(_) | Def::Array(_), Def::Struct(_)) => self.copy_struct_into_list(dst, src, path),
            (Def::List(_) | Def::Array(_), Def::List(_) | Def::Array(_)) => {
                self.copy_list(dst, src, path)
            }
            (Def::Map(_), Def::Map(_)) => self.copy_map(dst, src, path, top),
            _ => Err(mismatch(path, src_shape, dst_shape)),
        }
    }
}

fn run_converter(
    converter: &TypeConverter,
    dst: &mut dyn Reflect,
    src: &dyn Reflect,
    path: &Path,
) -> Result<(), CopyError> {
    let (src_shape, dst_shape) = (src.shape(), dst.shape());
    trace!("{path}: converting {src_shape} -> {dst_shape} with a user converter");

    let converted = converter.call(src).map_err(|cause| {
        CopyError::new(ErrorKind::ConversionFailed, path, src_shape, dst_shape).with_cause(cause)
    })?;
    dst.assign_boxed(converted).map_err(|wrong| {
        CopyError::new(ErrorKind::ConversionFailed, path, src_shape, dst_shape)
            .with_cause(format!("converter returned a {}", wrong.shape()))
    })
}

fn copy_scalar(dst: &mut dyn Reflect, src: &dyn Reflect, path: &Path) -> Result<(), CopyError> {
    let (src_shape, dst_shape) = (src.shape(), dst.shape());
    let value = Peek::from_dyn(src)
        .scalar()
        .map_err(|e| CopyError::reflect(e, path, src_shape, dst_shape))?;
    Poke::from_dyn(dst)
        .set_scalar(value)
        .map_err(|e| CopyError::reflect(e, path, src_shape, dst_shape))
}

pub(crate) fn mismatch(path: &Path, src_shape: &'static Shape, dst_shape: &'static Shape) -> CopyError {
    CopyError::new(ErrorKind::TypeMismatch, path, src_shape, dst_shape)
}
