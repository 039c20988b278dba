use crate::{Def, OptionDef, OptionLike, Reflect, ReflectMut, ReflectRef, Shape, Typed, shape_of};

impl<T: Typed> OptionLike for Option<T> {
    fn get(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|v| v as &dyn Reflect)
    }

    fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|v| v as &mut dyn Reflect)
    }

    fn get_or_insert_zero(&mut self) -> &mut dyn Reflect {
        self.get_or_insert_with(T::zero)
    }

    fn set_none(&mut self) {
        *self = None;
    }
}

impl<T: Typed> Reflect for Option<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Option(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Option(self)
    }
}

impl<T: Typed> Typed for Option<T> {
    const SHAPE: &'static Shape =
        &const { Shape::of::<Option<T>>("Option", Def::Option(OptionDef { t: shape_of::<T> })) };

    fn zero() -> Self {
        None
    }
}
