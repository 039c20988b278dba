use crate::{Def, List, ListDef, Reflect, ReflectMut, ReflectRef, Shape, Typed, shape_of};

impl<T: Typed> List for Vec<T> {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|v| v as &dyn Reflect)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|v| v as &mut dyn Reflect)
    }

    fn reset(&mut self, len: usize) -> bool {
        self.clear();
        self.resize_with(len, T::zero);
        true
    }
}

impl<T: Typed> Reflect for Vec<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }
}

impl<T: Typed> Typed for Vec<T> {
    const SHAPE: &'static Shape =
        &const { Shape::of::<Vec<T>>("Vec", Def::List(ListDef { t: shape_of::<T> })) };

    fn zero() -> Self {
        Vec::new()
    }
}
