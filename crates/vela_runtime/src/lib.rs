//! Vela runtime value layer.
//!
//! Tagged values, the numeric tower, the class/mixin object model, hash
//! collections and the two thread-safe primitives every higher layer (compiler,
//! interpreter, standard library) is built on.

#![allow(clippy::new_without_default)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::too_many_arguments)]

pub mod collections;
pub mod core;
pub mod errors;
pub mod numeric;
pub mod object;
pub mod runtime;
pub mod sync;

pub use crate::core::{Heap, ManagedObject, ObjectId, Symbol, Text, Value};
pub use errors::{ErrorKind, VResult, ValueError};
pub use numeric::{BigFloat, Int, Number, NumKind};
pub use object::{Class, ClassFlags, ClassKind, Method, MethodKind};
pub use runtime::{Runtime, RuntimeConfig, StdClasses};
