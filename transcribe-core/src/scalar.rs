use core::time::Duration;
use std::time::SystemTime;

/// All scalar types known to the reflection model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ScalarType {
    /// `()`
    Unit,
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `String`
    String,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `i128`
    I128,
    /// `isize`
    ISize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `u128`
    U128,
    /// `usize`
    USize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `std::time::SystemTime`
    SystemTime,
    /// `std::time::Duration`
    Duration,
}

impl ScalarType {
    /// Returns true for integer types.
    pub fn is_integer(self) -> bool {
        use ScalarType::*;
        matches!(
            self,
            I8 | I16 | I32 | I64 | I128 | ISize | U8 | U16 | U32 | U64 | U128 | USize
        )
    }

    /// Returns true for floating-point types.
    pub fn is_float(self) -> bool {
        matches!(self, ScalarType::F32 | ScalarType::F64)
    }

    /// Returns true for integer and floating-point types.
    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Returns true if a value of type `self` can be stored into `other`:
    /// either both are the same type, or both are numeric.
    pub fn converts_to(self, other: ScalarType) -> bool {
        self == other || (self.is_numeric() && other.is_numeric())
    }
}

/// A scalar read out of (or written into) a reflected value.
///
/// Integers are widened to 64 bits (128 for the 128-bit types) and floats to
/// `f64`, so conversions between numeric types go through a single value.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    /// `()`
    Unit,
    /// A boolean.
    Bool(bool),
    /// A character.
    Char(char),
    /// A signed integer of at most 64 bits.
    I64(i64),
    /// An unsigned integer of at most 64 bits.
    U64(u64),
    /// An `i128`.
    I128(i128),
    /// A `u128`.
    U128(u128),
    /// A float.
    F64(f64),
    /// An owned string.
    Str(String),
    /// A point in time.
    Time(SystemTime),
    /// A span of time.
    Duration(Duration),
}

impl ScalarValue {
    /// Returns true if this is the zero value of its type.
    pub fn is_zero(&self) -> bool {
        match self {
            ScalarValue::Unit => true,
            ScalarValue::Bool(b) => !b,
            ScalarValue::Char(c) => *c == '\0',
            ScalarValue::I64(v) => *v == 0,
            ScalarValue::U64(v) => *v == 0,
            ScalarValue::I128(v) => *v == 0,
            ScalarValue::U128(v) => *v == 0,
            ScalarValue::F64(v) => *v == 0.0,
            ScalarValue::Str(s) => s.is_empty(),
            ScalarValue::Time(t) => *t == SystemTime::UNIX_EPOCH,
            ScalarValue::Duration(d) => d.is_zero(),
        }
    }

    /// Returns true for integers and floats.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ScalarValue::I64(_)
                | ScalarValue::U64(_)
                | ScalarValue::I128(_)
                | ScalarValue::U128(_)
                | ScalarValue::F64(_)
        )
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl core::fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ScalarValue::Unit => f.write_str("()"),
            ScalarValue::Bool(v) => write!(f, "{v}"),
            ScalarValue::Char(v) => write!(f, "{v:?}"),
            ScalarValue::I64(v) => write!(f, "{v}"),
            ScalarValue::U64(v) => write!(f, "{v}"),
            ScalarValue::I128(v) => write!(f, "{v}"),
            ScalarValue::U128(v) => write!(f, "{v}"),
            ScalarValue::F64(v) => write!(f, "{v}"),
            ScalarValue::Str(v) => write!(f, "{v:?}"),
            ScalarValue::Time(v) => write!(f, "{v:?}"),
            ScalarValue::Duration(v) => write!(f, "{v:?}"),
        }
    }
}

/// Casts a numeric [`ScalarValue`] with `as` semantics: integers wrap,
/// floats truncate toward zero and saturate. Evaluates to `None` for
/// non-numeric values.
#[doc(hidden)]
#[macro_export]
macro_rules! numeric_cast {
    ($value:expr, $ty:ty) => {
        match $value {
            $crate::ScalarValue::I64(v) => Some(v as $ty),
            $crate::ScalarValue::U64(v) => Some(v as $ty),
            $crate::ScalarValue::I128(v) => Some(v as $ty),
            $crate::ScalarValue::U128(v) => Some(v as $ty),
            $crate::ScalarValue::F64(v) => Some(v as $ty),
            _ => None,
        }
    };
}
