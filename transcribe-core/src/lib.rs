#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod bitflags;

mod shape;
pub use shape::*;

mod field;
pub use field::*;

mod scalar;
pub use scalar::*;

mod reflect;
pub use reflect::*;

mod hooks;
pub use hooks::*;

mod zero;
pub use zero::*;

mod dynamic;
pub use dynamic::*;

mod nullable;
pub use nullable::*;

mod impls;
