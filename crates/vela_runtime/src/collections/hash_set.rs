//! `Std::HashSet`.

use super::table::OpenTable;
use crate::core::{ManagedObject, Value};
use crate::errors::{VResult, ValueError};
use crate::runtime::Runtime;

#[derive(Clone, Debug, Default)]
pub struct HashSet {
    table: OpenTable<Value, ()>,
}

impl HashSet {
    pub fn with_capacity(elements: usize) -> Self {
        Self {
            table: OpenTable::with_capacity(elements),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn table(&self) -> &OpenTable<Value, ()> {
        &self.table
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.table.keys()
    }
}

impl Runtime {
    pub fn new_hash_set(&mut self) -> Value {
        let capacity = self.config.initial_table_capacity;
        self.alloc(ManagedObject::HashSet(HashSet::with_capacity(capacity)))
    }

    pub fn hash_set_from(&mut self, elements: &[Value]) -> VResult<Value> {
        let set = self.alloc(ManagedObject::HashSet(HashSet::with_capacity(elements.len())));
        for &e in elements {
            self.hash_set_add(set, e)?;
        }
        Ok(set)
    }

    pub(crate) fn hash_set_ref(&self, set: Value) -> VResult<&HashSet> {
        if let Value::Ref(id) = set {
            if let ManagedObject::HashSet(s) = self.heap.get(id) {
                return Ok(s);
            }
        }
        Err(ValueError::coercion(self.class_name_of(set), "Std::HashSet"))
    }

    fn hash_set_mut(&mut self, set: Value) -> VResult<&mut HashSet> {
        self.hash_set_ref(set)?;
        match self.heap.get_mut(set.as_reference()) {
            ManagedObject::HashSet(s) => Ok(s),
            _ => unreachable!("checked by hash_set_ref"),
        }
    }

    /// Adds `element`; `false` if it was already present.
    pub fn hash_set_add(&mut self, set: Value, element: Value) -> VResult<bool> {
        let hash = self.hash_value(element);
        if self.table_find(self.hash_set_ref(set)?.table(), hash, element).is_some() {
            return Ok(false);
        }
        self.hash_set_mut(set)?.table.insert_new(hash, element, ());
        Ok(true)
    }

    pub fn hash_set_contains(&self, set: Value, element: Value) -> VResult<bool> {
        Ok(self.table_lookup(self.hash_set_ref(set)?.table(), element).is_some())
    }

    pub fn hash_set_delete(&mut self, set: Value, element: Value) -> VResult<bool> {
        let hash = self.hash_value(element);
        let Some(idx) = self.table_find(self.hash_set_ref(set)?.table(), hash, element) else {
            return Ok(false);
        };
        Ok(self.hash_set_mut(set)?.table.remove_at(idx).is_some())
    }

    pub fn hash_set_length(&self, set: Value) -> VResult<usize> {
        Ok(self.hash_set_ref(set)?.len())
    }

    pub fn hash_set_capacity(&self, set: Value) -> VResult<usize> {
        Ok(self.hash_set_ref(set)?.capacity())
    }

    pub fn hash_set_elements(&self, set: Value) -> VResult<Vec<Value>> {
        Ok(self.hash_set_ref(set)?.iter().copied().collect())
    }
}
