//! Core value representation.
//!
//! - `Value` - the tagged runtime value
//! - `Heap` - arena of reference objects
//! - `Symbol` - interned names
//! - `Text` - string storage with a small inline form

pub mod heap;
pub mod symbol;
pub mod text;
pub mod value;

pub use heap::{Heap, ManagedObject, ObjectId};
pub use symbol::{Symbol, SymbolTable};
pub use text::Text;
pub use value::Value;
