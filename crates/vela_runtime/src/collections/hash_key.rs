//! Hashing of values used as hash collection keys.
//!
//! Keys hash consistently with strict equality: strings, numbers, symbols,
//! ranges and collections by content, every other reference by identity.

use super::table::{OpenTable, table_hasher};
use crate::core::{ManagedObject, Value};
use crate::runtime::Runtime;
use std::hash::{BuildHasher, Hash, Hasher};

/// Nested collections below this depth contribute only their length.
const MAX_DEPTH: usize = 8;

#[derive(Hash)]
enum Tag {
    Nil,
    Bool,
    Int,
    Float,
    BigFloat,
    Fixed(u8),
    Symbol,
    Str,
    List,
    Tuple,
    Map,
    Record,
    Set,
    Range,
    Identity,
}

impl Runtime {
    pub fn hash_value(&self, v: Value) -> u64 {
        let mut h = table_hasher().build_hasher();
        self.feed(&mut h, v, 0);
        h.finish()
    }

    fn feed<H: Hasher>(&self, h: &mut H, v: Value, depth: usize) {
        match v {
            Value::Undefined | Value::Nil => Tag::Nil.hash(h),
            Value::Bool(b) => (Tag::Bool, b).hash(h),
            Value::SmallInt(i) => (Tag::Int, i).hash(h),
            Value::Float(f) => (Tag::Float, canonical_bits(f)).hash(h),
            Value::Int8(i) => (Tag::Fixed(0), i).hash(h),
            Value::Int16(i) => (Tag::Fixed(1), i).hash(h),
            Value::Int32(i) => (Tag::Fixed(2), i).hash(h),
            Value::Int64(i) => (Tag::Fixed(3), i).hash(h),
            Value::UInt8(i) => (Tag::Fixed(4), i).hash(h),
            Value::UInt16(i) => (Tag::Fixed(5), i).hash(h),
            Value::UInt32(i) => (Tag::Fixed(6), i).hash(h),
            Value::UInt64(i) => (Tag::Fixed(7), i).hash(h),
            Value::Float32(f) => (Tag::Fixed(8), canonical_bits(f as f64)).hash(h),
            Value::Float64(f) => (Tag::Fixed(9), canonical_bits(f)).hash(h),
            Value::Symbol(s) => (Tag::Symbol, s).hash(h),
            Value::Ref(id) => match self.heap.get(id) {
                ManagedObject::Str(s) => (Tag::Str, s.as_str()).hash(h),
                ManagedObject::BigInt(b) => (Tag::Int, b).hash(h),
                ManagedObject::BigFloat(f) => (Tag::BigFloat, canonical_bits(f.to_f64())).hash(h),
                ManagedObject::ArrayList(items) => self.feed_elements(h, Tag::List, items, depth),
                ManagedObject::ArrayTuple(items) => self.feed_elements(h, Tag::Tuple, items, depth),
                ManagedObject::HashMap(map) => {
                    (Tag::Map, map.len()).hash(h);
                    if depth < MAX_DEPTH {
                        self.unordered_sum(map.iter().map(|(k, v)| [*k, *v]), depth).hash(h);
                    }
                }
                ManagedObject::HashRecord(record) => {
                    (Tag::Record, record.len()).hash(h);
                    if depth < MAX_DEPTH {
                        self.unordered_sum(record.iter().map(|(k, v)| [*k, *v]), depth).hash(h);
                    }
                }
                ManagedObject::HashSet(set) => {
                    (Tag::Set, set.len()).hash(h);
                    if depth < MAX_DEPTH {
                        self.unordered_sum(set.iter().map(|k| [*k, Value::Nil]), depth).hash(h);
                    }
                }
                ManagedObject::Range(range) => {
                    (Tag::Range, range.exclusive).hash(h);
                    self.feed(h, range.from, depth + 1);
                    self.feed(h, range.to, depth + 1);
                }
                _ => (Tag::Identity, id.0).hash(h),
            },
        }
    }

    fn feed_elements<H: Hasher>(&self, h: &mut H, tag: Tag, items: &[Value], depth: usize) {
        (tag, items.len()).hash(h);
        if depth < MAX_DEPTH {
            for item in items {
                self.feed(h, *item, depth + 1);
            }
        }
    }

    /// Order-independent digest of key/value pairs.
    fn unordered_sum(&self, entries: impl Iterator<Item = [Value; 2]>, depth: usize) -> u64 {
        entries.fold(0u64, |acc, [k, v]| {
            let mut h = table_hasher().build_hasher();
            self.feed(&mut h, k, depth + 1);
            self.feed(&mut h, v, depth + 1);
            acc.wrapping_add(h.finish())
        })
    }

    /// Slot index of `key` in a value-keyed table.
    pub(crate) fn table_find<V>(&self, table: &OpenTable<Value, V>, hash: u64, key: Value) -> Option<usize> {
        table.find(hash, |k| self.equal(*k, key))
    }

    pub(crate) fn table_lookup<V: Copy>(&self, table: &OpenTable<Value, V>, key: Value) -> Option<V> {
        let idx = self.table_find(table, self.hash_value(key), key)?;
        table.entry_at(idx).map(|(_, v)| *v)
    }
}

/// `0.0` and `-0.0` are equal, so they must hash alike.
fn canonical_bits(f: f64) -> u64 {
    if f == 0.0 { 0 } else { f.to_bits() }
}
