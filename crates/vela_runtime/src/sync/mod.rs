//! The only thread-safe building blocks of the value layer.
//!
//! Both primitives are shared through `Arc`, so a value can hand them to
//! other threads while the runtime itself stays single-threaded.

mod once;
mod wait_group;

pub use once::Once;
pub use wait_group::WaitGroup;

use crate::core::{ManagedObject, Value};
use crate::errors::{VResult, ValueError};
use crate::runtime::Runtime;
use std::sync::Arc;

impl Runtime {
    pub fn new_once(&mut self) -> Value {
        self.alloc(ManagedObject::Once(Arc::new(Once::new())))
    }

    pub fn new_wait_group(&mut self) -> Value {
        self.alloc(ManagedObject::WaitGroup(Arc::new(WaitGroup::new())))
    }

    /// A shareable handle to the gate behind a `Std::Sync::Once` value.
    pub fn once(&self, v: Value) -> VResult<Arc<Once>> {
        if let Value::Ref(id) = v {
            if let ManagedObject::Once(once) = self.heap.get(id) {
                return Ok(Arc::clone(once));
            }
        }
        Err(ValueError::coercion(self.class_name_of(v), "Std::Sync::Once"))
    }

    pub fn wait_group(&self, v: Value) -> VResult<Arc<WaitGroup>> {
        if let Value::Ref(id) = v {
            if let ManagedObject::WaitGroup(wg) = self.heap.get(id) {
                return Ok(Arc::clone(wg));
            }
        }
        Err(ValueError::coercion(self.class_name_of(v), "Std::Sync::WaitGroup"))
    }
}
