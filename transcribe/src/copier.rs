use core::any::TypeId;
use std::collections::HashMap;
use std::rc::Rc;

use transcribe_core::{Reflect, Shape};
use transcribe_reflect::{LogicalFields, Path};

use crate::{CopyError, Options, ResolvedOptions, trace};

/// State for one copy call: the indexed options and the flattened fields of
/// every struct shape met so far.
pub(crate) struct Copier<'o> {
    pub(crate) options: ResolvedOptions<'o>,
    fields: HashMap<TypeId, Rc<LogicalFields>>,
}

impl<'o> Copier<'o> {
    pub(crate) fn new(options: &'o Options) -> Self {
        Copier {
            options: ResolvedOptions::new(options),
            fields: HashMap::new(),
        }
    }

    /// Copies `src` into `dst`, starting from the root.
    pub(crate) fn run(&mut self, dst: &mut dyn Reflect, src: &dyn Reflect) -> Result<(), CopyError> {
        let mut path = Path::new();
        self.convert(dst, src, &mut path, true)
    }

    /// The flattened fields of `shape`, computed once per call.
    pub(crate) fn fields_of(&mut self, shape: &'static Shape) -> Rc<LogicalFields> {
        self.fields
            .entry(shape.id())
            .or_insert_with(|| {
                trace!("Flattening {shape}");
                Rc::new(LogicalFields::of(shape))
            })
            .clone()
    }
}
