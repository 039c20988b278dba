//! `Box<T>`, `Rc<T>` and `Arc<T>`.

use std::rc::Rc;
use std::sync::Arc;

use crate::{
    Def, Pointer, PointerDef, PointerFlavor, Reflect, ReflectMut, ReflectRef, Shape, Typed,
    shape_of,
};

impl<T: Typed> Pointer for Box<T> {
    fn flavor(&self) -> PointerFlavor {
        PointerFlavor::Box
    }

    fn pointee(&self) -> &dyn Reflect {
        &**self
    }

    fn pointee_mut(&mut self) -> &mut dyn Reflect {
        &mut **self
    }

    fn ptr_eq(&self, other: &dyn Reflect) -> bool {
        other
            .downcast_ref::<Box<T>>()
            .is_some_and(|other| core::ptr::eq::<T>(&**self, &**other))
    }
}

macro_rules! impl_pointer_for_shared {
    ($ptr:ident, $flavor:ident) => {
        impl<T: Typed> Pointer for $ptr<T> {
            fn flavor(&self) -> PointerFlavor {
                PointerFlavor::$flavor
            }

            fn pointee(&self) -> &dyn Reflect {
                &**self
            }

            fn pointee_mut(&mut self) -> &mut dyn Reflect {
                $ptr::<T>::make_mut(self)
            }

            fn ptr_eq(&self, other: &dyn Reflect) -> bool {
                other
                    .downcast_ref::<$ptr<T>>()
                    .is_some_and(|other| $ptr::ptr_eq(self, other))
            }
        }
    };
}

impl_pointer_for_shared!(Rc, Rc);
impl_pointer_for_shared!(Arc, Arc);

macro_rules! impl_reflect_for_pointer {
    ($ptr:ident, $flavor:ident) => {
        impl<T: Typed> Reflect for $ptr<T> {
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Pointer(self)
            }

            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Pointer(self)
            }
        }

        impl<T: Typed> Typed for $ptr<T> {
            const SHAPE: &'static Shape = &const {
                Shape::of::<$ptr<T>>(
                    stringify!($ptr),
                    Def::Pointer(PointerDef {
                        pointee: shape_of::<T>,
                        flavor: PointerFlavor::$flavor,
                    }),
                )
            };

            fn zero() -> Self {
                $ptr::new(T::zero())
            }
        }
    };
}

impl_reflect_for_pointer!(Box, Box);
impl_reflect_for_pointer!(Rc, Rc);
impl_reflect_for_pointer!(Arc, Arc);
