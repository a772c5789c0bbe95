//! Immutable conversion engine.
//!
//! Converts plain nested collections into persistent, structurally-shared
//! values and back, and walks those values by path:
//! - [`from_plain`] / [`to_plain`] for deep conversion
//! - [`dig`] for keyed and indexed lookup that short-circuits on misses
//!
//! Behavior is chosen by matching on the closed set of value kinds, so every
//! operation handles maps, sequences, sets and sorted sets explicitly.

mod convert;
mod dig;
mod error;
mod plain;
mod value;

pub use convert::{from_plain, to_plain};
pub use dig::{dig, PathSegment};
pub use error::{ConversionError, DigError};
pub use plain::Plain;
pub use value::{Float, SetValue, Symbol, Value, ValueKind};
