//! `Std::HashRecord`: an immutable map, built once from its pairs.

use super::table::OpenTable;
use crate::core::{ManagedObject, Value};
use crate::errors::{VResult, ValueError};
use crate::runtime::Runtime;

#[derive(Clone, Debug, Default)]
pub struct HashRecord {
    table: OpenTable<Value, Value>,
}

impl HashRecord {
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

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.table.iter()
    }
}

impl Runtime {
    /// Builds a record; a repeated key keeps its last value.
    pub fn hash_record_from_pairs(&mut self, pairs: &[(Value, Value)]) -> Value {
        let mut table = OpenTable::with_capacity(pairs.len());
        for &(key, value) in pairs {
            let hash = self.hash_value(key);
            match self.table_find(&table, hash, key) {
                Some(idx) => {
                    table.replace_at(idx, value);
                }
                None => table.insert_new(hash, key, value),
            }
        }
        self.alloc(ManagedObject::HashRecord(HashRecord { table }))
    }

    pub(crate) fn hash_record_ref(&self, record: Value) -> VResult<&HashRecord> {
        if let Value::Ref(id) = record {
            if let ManagedObject::HashRecord(r) = self.heap.get(id) {
                return Ok(r);
            }
        }
        Err(ValueError::coercion(self.class_name_of(record), "Std::HashRecord"))
    }

    pub fn hash_record_get(&self, record: Value, key: Value) -> VResult<Option<Value>> {
        Ok(self.table_lookup(self.hash_record_ref(record)?.table(), key))
    }

    pub fn hash_record_length(&self, record: Value) -> VResult<usize> {
        Ok(self.hash_record_ref(record)?.len())
    }

    pub fn hash_record_entries(&self, record: Value) -> VResult<Vec<(Value, Value)>> {
        Ok(self.hash_record_ref(record)?.iter().map(|(k, v)| (*k, *v)).collect())
    }

    /// Records are immutable; this always fails.
    pub fn hash_record_set(&mut self, record: Value, _key: Value, _value: Value) -> VResult<()> {
        self.hash_record_ref(record)?;
        Err(ValueError::Frozen("Std::HashRecord".to_string()))
    }

    pub fn hash_record_delete(&mut self, record: Value, _key: Value) -> VResult<Option<Value>> {
        self.hash_record_ref(record)?;
        Err(ValueError::Frozen("Std::HashRecord".to_string()))
    }
}
