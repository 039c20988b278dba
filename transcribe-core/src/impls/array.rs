use crate::{ArrayDef, Def, List, Reflect, ReflectMut, ReflectRef, Shape, Typed, shape_of};

impl<T: Typed, const N: usize> List for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|v| v as &dyn Reflect)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice().get_mut(index).map(|v| v as &mut dyn Reflect)
    }

    fn is_fixed_size(&self) -> bool {
        true
    }

    fn reset(&mut self, len: usize) -> bool {
        if len != N {
            return false;
        }
        self.iter_mut().for_each(|v| *v = T::zero());
        true
    }
}

impl<T: Typed, const N: usize> Reflect for [T; N] {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }
}

impl<T: Typed, const N: usize> Typed for [T; N] {
    const SHAPE: &'static Shape =
        &const { Shape::of::<[T; N]>("Array", Def::Array(ArrayDef { t: shape_of::<T>, n: N })) };

    fn zero() -> Self {
        core::array::from_fn(|_| T::zero())
    }
}
