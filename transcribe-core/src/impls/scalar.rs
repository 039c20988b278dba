//! Scalar implementations: unit, bool, char, integers, floats, `String`,
//! `SystemTime` and `Duration`.

use core::time::Duration;
use std::time::SystemTime;

use crate::{Def, Reflect, ReflectMut, ReflectRef, Scalar, ScalarType, ScalarValue, Shape, Typed};

macro_rules! impl_reflect_for_scalar {
    ($type:ty, $scalar:ident, $zero:expr) => {
        impl Reflect for $type {
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Scalar(self)
            }

            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Scalar(self)
            }
        }

        impl Typed for $type {
            const SHAPE: &'static Shape = &const {
                Shape::of::<$type>(stringify!($type), Def::Scalar(ScalarType::$scalar))
            };

            fn zero() -> Self {
                $zero
            }
        }
    };
}

macro_rules! impl_scalar_for_integer {
    ($type:ty, $scalar:ident, $variant:ident, $wide:ty) => {
        impl_reflect_for_scalar!($type, $scalar, 0);

        impl Scalar for $type {
            fn scalar(&self) -> ScalarValue {
                ScalarValue::$variant(*self as $wide)
            }

            fn set_scalar(&mut self, value: ScalarValue) -> bool {
                match crate::numeric_cast!(value, $type) {
                    Some(v) => {
                        *self = v;
                        true
                    }
                    None => false,
                }
            }
        }
    };
}

impl_scalar_for_integer!(i8, I8, I64, i64);
impl_scalar_for_integer!(i16, I16, I64, i64);
impl_scalar_for_integer!(i32, I32, I64, i64);
impl_scalar_for_integer!(i64, I64, I64, i64);
impl_scalar_for_integer!(isize, ISize, I64, i64);
impl_scalar_for_integer!(i128, I128, I128, i128);
impl_scalar_for_integer!(u8, U8, U64, u64);
impl_scalar_for_integer!(u16, U16, U64, u64);
impl_scalar_for_integer!(u32, U32, U64, u64);
impl_scalar_for_integer!(u64, U64, U64, u64);
impl_scalar_for_integer!(usize, USize, U64, u64);
impl_scalar_for_integer!(u128, U128, U128, u128);

macro_rules! impl_scalar_for_float {
    ($type:ty, $scalar:ident) => {
        impl_reflect_for_scalar!($type, $scalar, 0.0);

        impl Scalar for $type {
            fn scalar(&self) -> ScalarValue {
                ScalarValue::F64(*self as f64)
            }

            fn set_scalar(&mut self, value: ScalarValue) -> bool {
                match crate::numeric_cast!(value, $type) {
                    Some(v) => {
                        *self = v;
                        true
                    }
                    None => false,
                }
            }
        }
    };
}

impl_scalar_for_float!(f32, F32);
impl_scalar_for_float!(f64, F64);

/// Scalars that only accept a value of their own kind.
macro_rules! impl_scalar_exact {
    ($type:ty, $scalar:ident, $zero:expr, |$this:ident| $get:expr, $variant:ident) => {
        impl_reflect_for_scalar!($type, $scalar, $zero);

        impl Scalar for $type {
            fn scalar(&self) -> ScalarValue {
                let $this = self;
                $get
            }

            fn set_scalar(&mut self, value: ScalarValue) -> bool {
                match value {
                    ScalarValue::$variant(v) => {
                        *self = v;
                        true
                    }
                    _ => false,
                }
            }
        }
    };
}

impl_scalar_exact!(bool, Bool, false, |this| ScalarValue::Bool(*this), Bool);
impl_scalar_exact!(char, Char, '\0', |this| ScalarValue::Char(*this), Char);
impl_scalar_exact!(
    String,
    String,
    String::new(),
    |this| ScalarValue::Str(this.clone()),
    Str
);
impl_scalar_exact!(
    SystemTime,
    SystemTime,
    SystemTime::UNIX_EPOCH,
    |this| ScalarValue::Time(*this),
    Time
);
impl_scalar_exact!(
    Duration,
    Duration,
    Duration::ZERO,
    |this| ScalarValue::Duration(*this),
    Duration
);

impl_reflect_for_scalar!((), Unit, ());

impl Scalar for () {
    fn scalar(&self) -> ScalarValue {
        ScalarValue::Unit
    }

    fn set_scalar(&mut self, value: ScalarValue) -> bool {
        matches!(value, ScalarValue::Unit)
    }
}
