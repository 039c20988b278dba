//! Destination setters fed from source fields.

use transcribe_core::{Reflect, is_zero};
use transcribe_reflect::{LogicalFields, Path, PathStep, Peek, Poke};

use crate::copier::Copier;
use crate::{CopyError, ErrorKind, trace};

impl Copier<'_> {
    /// Calls every setter of `dst` named like an exported field of `src`
    /// (after renaming), with the field's value converted into the setter's
    /// argument type.
    pub(crate) fn call_setters(
        &mut self,
        dst: &mut dyn Reflect,
        src: &dyn Reflect,
        dst_fields: &LogicalFields,
        src_fields: &LogicalFields,
        path: &mut Path,
    ) -> Result<(), CopyError> {
        if dst_fields.setters().is_empty() {
            return Ok(());
        }
        let (src_shape, dst_shape) = (src.shape(), dst.shape());
        let root = Peek::from_dyn(src);

        for field in src_fields.fields() {
            let name = self
                .options
                .destination_name(src_shape, dst_shape, field.name)
                .unwrap_or(field.name);
            let Some(setter) = dst_fields.setter(name) else {
                continue;
            };
            let Some(value) = field.resolve(root) else {
                continue;
            };
            if self.options.ignore_empty && is_zero(value.value()) {
                continue;
            }

            path.push(PathStep::Setter(setter.name()));
            let mut argument = setter.shape().zero();
            self.convert(&mut *argument, value.value(), path, false)?;

            match setter.call_setter(Poke::from_dyn(&mut *dst), &*argument, true) {
                Some(true) => {
                    trace!("{path}: called with {}", field.name);
                }
                Some(false) => {
                    return Err(CopyError::new(
                        ErrorKind::NotSettable,
                        path,
                        argument.shape(),
                        setter.shape(),
                    ));
                }
                None => {
                    trace!("{path}: declaring member is absent");
                }
            }
            path.pop();
        }

        Ok(())
    }
}
