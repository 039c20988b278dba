//! Matching destination struct fields to their source values.

use transcribe_core::{Reflect, Shape, is_zero};
use transcribe_reflect::{LogicalFields, Path, PathStep, Peek, Poke};

use crate::copier::Copier;
use crate::{CopyError, trace};

/// Where a destination field's value comes from.
enum Source<'a> {
    /// A field of the source struct, or an entry of a source map.
    Stored(Peek<'a>),
    /// The return value of a source getter.
    Computed(Box<dyn Reflect>),
}

impl Source<'_> {
    fn value(&self) -> &dyn Reflect {
        match self {
            Source::Stored(peek) => peek.value(),
            Source::Computed(value) => &**value,
        }
    }
}

impl Copier<'_> {
    /// Copies every matched field of `src` into the struct `dst`, then feeds
    /// source fields to destination setters. `src` is a struct or a map with
    /// `String` keys.
    pub(crate) fn copy_struct(
        &mut self,
        dst: &mut dyn Reflect,
        src: &dyn Reflect,
        path: &mut Path,
    ) -> Result<(), CopyError> {
        let (src_shape, dst_shape) = (src.shape(), dst.shape());
        let dst_fields = self.fields_of(dst_shape);
        let src_fields = self.fields_of(src_shape);

        for field in dst_fields.fields() {
            let Some(source) = self.find_source(&src_fields, field.name, src, dst_shape) else {
                trace!("{path}: nothing in {src_shape} for {}", field.name);
                continue;
            };
            let value = source.value();
            if self.options.ignore_empty && is_zero(value) {
                trace!("{path}: skipping empty {}", field.name);
                continue;
            }
            let Some(slot) = field.resolve_mut(Poke::from_dyn(&mut *dst), true) else {
                trace!("{path}: {} is behind an absent member", field.name);
                continue;
            };

            path.push(PathStep::Field(field.name));
            self.convert(slot.into_inner(), value, path, false)?;
            path.pop();
        }

        self.call_setters(dst, src, &dst_fields, &src_fields, path)
    }

    /// Finds the source of destination field `name`: mapped or same-named
    /// field, then getter, then map entry.
    fn find_source<'s>(
        &self,
        src_fields: &LogicalFields,
        name: &'static str,
        src: &'s dyn Reflect,
        dst_shape: &'static Shape,
    ) -> Option<Source<'s>> {
        let name = self
            .options
            .source_name(src.shape(), dst_shape, name)
            .unwrap_or(name);
        let root = Peek::from_dyn(src);

        if let Some(field) = src_fields.lookup(name) {
            // a field behind an absent flattened member has no value, and
            // does not fall back to a getter
            return field.resolve(root).map(Source::Stored);
        }
        if let Some(getter) = src_fields.getter(name) {
            return getter.call_getter(root).map(Source::Computed);
        }
        match root.into_map() {
            Ok(map) => map.get_by_name(name).map(Source::Stored),
            Err(_) => None,
        }
    }
}
