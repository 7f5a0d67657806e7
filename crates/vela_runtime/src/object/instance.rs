use crate::collections::KeyedTable;
use crate::core::{ObjectId, Symbol, Value};

/// An instance of a user-defined (or otherwise instantiable) class.
#[derive(Debug, Clone)]
pub struct Object {
    /// The direct class; replaced by the singleton class once one is opened.
    pub class: ObjectId,
    pub ivars: KeyedTable<Symbol, Value>,
}

impl Object {
    pub fn new(class: ObjectId) -> Self {
        Self {
            class,
            ivars: KeyedTable::new(),
        }
    }
}
