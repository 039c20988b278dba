use core::fmt;

use transcribe_core::{HookError, Shape};
use transcribe_reflect::{Path, ReflectError};

/// What went wrong during a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The destination cannot receive the value: a fixed-size array of a
    /// different length than the source, or a setter that refused its
    /// argument.
    NotSettable,

    /// No rule converts the source type into the destination type.
    TypeMismatch,

    /// Copying between maps whose key types are neither identical nor both
    /// convertible scalars. Raised even when the source map is empty.
    MapKeyTypeMismatch,

    /// A destination [`Scanner`](transcribe_core::Scanner) returned an error.
    ScanFailed,

    /// A source [`Valuer`](transcribe_core::Valuer) returned an error.
    ValueAccessFailed,

    /// A user [`TypeConverter`](crate::TypeConverter) returned an error, or
    /// a value of the wrong type.
    ConversionFailed,
}

impl ErrorKind {
    fn describe(self) -> &'static str {
        match self {
            ErrorKind::NotSettable => "destination cannot be set",
            ErrorKind::TypeMismatch => "no conversion",
            ErrorKind::MapKeyTypeMismatch => "map key types do not match",
            ErrorKind::ScanFailed => "scanner failed",
            ErrorKind::ValueAccessFailed => "valuer failed",
            ErrorKind::ConversionFailed => "converter failed",
        }
    }
}

/// An error that aborted a copy.
///
/// The destination may have been partially written when this is returned.
#[derive(Debug)]
pub struct CopyError {
    kind: ErrorKind,
    path: Path,
    source_shape: &'static Shape,
    destination_shape: &'static Shape,
    cause: Option<HookError>,
}

impl CopyError {
    pub(crate) fn new(
        kind: ErrorKind,
        path: &Path,
        source_shape: &'static Shape,
        destination_shape: &'static Shape,
    ) -> Self {
        CopyError {
            kind,
            path: path.clone(),
            source_shape,
            destination_shape,
            cause: None,
        }
    }

    pub(crate) fn with_cause(mut self, cause: impl Into<HookError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// What went wrong.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Where in the destination it went wrong.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The type being copied from at that point.
    #[inline]
    pub fn source_shape(&self) -> &'static Shape {
        self.source_shape
    }

    /// The type being copied into at that point.
    #[inline]
    pub fn destination_shape(&self) -> &'static Shape {
        self.destination_shape
    }

    /// The error reported by a hook or converter, if that is what failed.
    pub fn cause(&self) -> Option<&(dyn core::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Returns true for [`ErrorKind::MapKeyTypeMismatch`].
    #[inline]
    pub fn is_map_key_mismatch(&self) -> bool {
        self.kind == ErrorKind::MapKeyTypeMismatch
    }

    /// Returns true for [`ErrorKind::NotSettable`].
    #[inline]
    pub fn is_not_settable(&self) -> bool {
        self.kind == ErrorKind::NotSettable
    }

    /// Wraps a reflection failure at `path`.
    pub(crate) fn reflect(
        err: ReflectError,
        path: &Path,
        source_shape: &'static Shape,
        destination_shape: &'static Shape,
    ) -> Self {
        CopyError::new(ErrorKind::TypeMismatch, path, source_shape, destination_shape)
            .with_cause(err)
    }
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}: {} -> {}",
            self.kind.describe(),
            self.path,
            self.source_shape,
            self.destination_shape
        )?;
        if let Some(cause) = &self.cause {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

impl core::error::Error for CopyError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn core::error::Error + 'static))
    }
}
