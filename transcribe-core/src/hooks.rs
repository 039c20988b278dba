//! Hooks a type can implement to take over how it is copied.
//!
//! A type opts in with `#[reflect(scanner)]`, `#[reflect(valuer)]` or
//! `#[reflect(copy_valuer)]` next to `#[derive(Reflect)]`, and implements the
//! matching trait by hand.

use crate::Reflect;

/// Error type returned by hooks and user converters.
pub type HookError = Box<dyn core::error::Error + Send + Sync>;

/// A destination that populates itself from an arbitrary source value,
/// in the manner of a database driver's `Scan`.
///
/// When the copier reaches a destination whose type is a `Scanner`, it hands
/// over the source value (after unwrapping options and pointers) instead of
/// converting it itself. An error aborts the whole copy.
pub trait Scanner {
    /// Populates `self` from `src`.
    fn scan(&mut self, src: &dyn Reflect) -> Result<(), HookError>;
}

/// A source that stands in for itself with a driver value.
///
/// Returning `Ok(None)` means the value is null: the destination is reset to
/// its zero value.
pub trait Valuer {
    /// Produces the driver value.
    fn value(&self) -> Result<Option<Box<dyn Reflect>>, HookError>;
}

/// A source that supplies an arbitrary payload to be copied in its place.
///
/// The payload is copied as if it had been the source all along, hooks
/// included. Returning `None` leaves the destination untouched.
pub trait CopyValuer {
    /// Produces the payload.
    fn copy_value(&self) -> Option<Box<dyn Reflect>>;
}
