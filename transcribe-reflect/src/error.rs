use transcribe_core::Shape;

/// Errors that can occur when reflecting on values.
#[derive(Debug, Clone)]
pub enum ReflectError {
    /// Tried to view a value as a kind it is not, e.g. `into_struct` on a
    /// `Vec<T>`.
    WasNotA {
        /// The kind that was expected.
        expected: &'static str,
        /// The shape of the value.
        actual: &'static Shape,
    },

    /// Tried to get or set a value of a concrete type that does not match
    /// the shape, e.g. `.get::<u64>()` on a `String`.
    WrongShape {
        /// The expected shape of the value.
        expected: &'static Shape,
        /// The actual shape of the value.
        actual: &'static Shape,
    },

    /// A field index past the end of the struct.
    FieldOutOfBounds {
        /// The index that was asked for.
        index: usize,
        /// The struct shape.
        shape: &'static Shape,
    },

    /// A scalar value could not be stored into the target scalar type.
    IncompatibleScalar {
        /// The scalar shape that refused the value.
        shape: &'static Shape,
    },
}

impl core::fmt::Display for ReflectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReflectError::WasNotA { expected, actual } => {
                write!(f, "Was not a {expected}: {actual}")
            }
            ReflectError::WrongShape { expected, actual } => {
                write!(f, "Wrong shape: expected {expected}, but got {actual}")
            }
            ReflectError::FieldOutOfBounds { index, shape } => {
                write!(f, "Field index {index} is out of bounds for {shape}")
            }
            ReflectError::IncompatibleScalar { shape } => {
                write!(f, "Scalar value cannot be stored into {shape}")
            }
        }
    }
}

impl core::error::Error for ReflectError {}
