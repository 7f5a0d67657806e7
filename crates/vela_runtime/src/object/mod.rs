//! Classes, mixins, modules and their instances.

mod class;
mod instance;
mod method;
mod model;

pub use class::{Class, ClassFlags, ClassKind};
pub use instance::Object;
pub use method::{Method, MethodKind, NativeFn, check_arity};
pub use model::Ancestors;
