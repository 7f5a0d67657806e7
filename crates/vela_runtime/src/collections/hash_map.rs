//! `Std::HashMap`: a mutable open-addressed map from values to values.

use super::table::OpenTable;
use crate::core::{ManagedObject, Value};
use crate::errors::{VResult, ValueError};
use crate::runtime::Runtime;

#[derive(Clone, Debug, Default)]
pub struct HashMap {
    table: OpenTable<Value, Value>,
}

impl HashMap {
    pub fn new() -> Self {
        Self::default()
    }

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

    pub fn table(&self) -> &OpenTable<Value, Value> {
        &self.table
    }

    /// Entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.table.iter()
    }
}

impl Runtime {
    pub fn new_hash_map(&mut self) -> Value {
        let capacity = self.config.initial_table_capacity;
        self.alloc(ManagedObject::HashMap(HashMap::with_capacity(capacity)))
    }

    pub fn hash_map_from_pairs(&mut self, pairs: &[(Value, Value)]) -> VResult<Value> {
        let map = self.alloc(ManagedObject::HashMap(HashMap::with_capacity(pairs.len())));
        for &(k, v) in pairs {
            self.hash_map_set(map, k, v)?;
        }
        Ok(map)
    }

    pub(crate) fn hash_map_ref(&self, map: Value) -> VResult<&HashMap> {
        if let Value::Ref(id) = map {
            if let ManagedObject::HashMap(m) = self.heap.get(id) {
                return Ok(m);
            }
        }
        Err(ValueError::coercion(self.class_name_of(map), "Std::HashMap"))
    }

    fn hash_map_mut(&mut self, map: Value) -> VResult<&mut HashMap> {
        self.hash_map_ref(map)?;
        match self.heap.get_mut(map.as_reference()) {
            ManagedObject::HashMap(m) => Ok(m),
            _ => unreachable!("checked by hash_map_ref"),
        }
    }

    /// Inserts or replaces the value under `key`.
    pub fn hash_map_set(&mut self, map: Value, key: Value, value: Value) -> VResult<()> {
        let hash = self.hash_value(key);
        let found = self.table_find(self.hash_map_ref(map)?.table(), hash, key);
        let m = self.hash_map_mut(map)?;
        match found {
            Some(idx) => {
                m.table.replace_at(idx, value);
            }
            None => m.table.insert_new(hash, key, value),
        }
        Ok(())
    }

    pub fn hash_map_get(&self, map: Value, key: Value) -> VResult<Option<Value>> {
        Ok(self.table_lookup(self.hash_map_ref(map)?.table(), key))
    }

    pub fn hash_map_contains_key(&self, map: Value, key: Value) -> VResult<bool> {
        Ok(self.hash_map_get(map, key)?.is_some())
    }

    /// Removes `key` and returns its value.
    pub fn hash_map_delete(&mut self, map: Value, key: Value) -> VResult<Option<Value>> {
        let hash = self.hash_value(key);
        let Some(idx) = self.table_find(self.hash_map_ref(map)?.table(), hash, key) else {
            return Ok(None);
        };
        Ok(self.hash_map_mut(map)?.table.remove_at(idx).map(|(_, v)| v))
    }

    pub fn hash_map_length(&self, map: Value) -> VResult<usize> {
        Ok(self.hash_map_ref(map)?.len())
    }

    pub fn hash_map_capacity(&self, map: Value) -> VResult<usize> {
        Ok(self.hash_map_ref(map)?.capacity())
    }

    pub fn hash_map_entries(&self, map: Value) -> VResult<Vec<(Value, Value)>> {
        Ok(self.hash_map_ref(map)?.iter().map(|(k, v)| (*k, *v)).collect())
    }

    pub fn hash_map_keys(&self, map: Value) -> VResult<Vec<Value>> {
        Ok(self.hash_map_ref(map)?.iter().map(|(k, _)| *k).collect())
    }

    pub fn hash_map_values(&self, map: Value) -> VResult<Vec<Value>> {
        Ok(self.hash_map_ref(map)?.iter().map(|(_, v)| *v).collect())
    }
}
