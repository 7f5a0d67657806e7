//! `Std::ArrayList` and `Std::ArrayTuple`.
//!
//! Both share indexing rules: a negative index counts from the end, and
//! anything outside `-len...len` is an `IndexError` naming the index.

use crate::core::{ManagedObject, Value};
use crate::errors::{VResult, ValueError, messages};
use crate::runtime::Runtime;

/// Upper bound on the element count `repeat` may produce.
const MAX_REPEAT_LEN: usize = u32::MAX as usize;

impl Runtime {
    fn elements(&self, v: Value) -> Option<&[Value]> {
        match v {
            Value::Ref(id) => match self.heap.get(id) {
                ManagedObject::ArrayList(items) => Some(items.as_slice()),
                ManagedObject::ArrayTuple(items) => Some(&items[..]),
                _ => None,
            },
            _ => None,
        }
    }

    pub(crate) fn list_ref(&self, list: Value) -> VResult<&Vec<Value>> {
        if let Value::Ref(id) = list {
            if let ManagedObject::ArrayList(items) = self.heap.get(id) {
                return Ok(items);
            }
        }
        Err(ValueError::coercion(self.class_name_of(list), "Std::ArrayList"))
    }

    fn list_mut(&mut self, list: Value) -> VResult<&mut Vec<Value>> {
        self.list_ref(list)?;
        match self.heap.get_mut(list.as_reference()) {
            ManagedObject::ArrayList(items) => Ok(items),
            _ => unreachable!("checked by list_ref"),
        }
    }

    pub(crate) fn tuple_ref(&self, tuple: Value) -> VResult<&[Value]> {
        if let Value::Ref(id) = tuple {
            if let ManagedObject::ArrayTuple(items) = self.heap.get(id) {
                return Ok(&items[..]);
            }
        }
        Err(ValueError::coercion(self.class_name_of(tuple), "Std::ArrayTuple"))
    }

    /// Resolves `index` against a collection of `len` elements.
    fn resolve_index(&self, index: Value, len: usize) -> VResult<usize> {
        let number = self
            .number(index)
            .filter(|n| n.kind().is_integer())
            .ok_or_else(|| ValueError::coercion(self.class_name_of(index), "Std::Int"))?;
        let out_of_range = || ValueError::Index {
            index: self.inspect(index),
            len,
        };
        let i = number.to_i64().ok_or_else(out_of_range)?;
        let resolved = if i < 0 { i + len as i64 } else { i };
        if resolved < 0 || resolved >= len as i64 {
            return Err(out_of_range());
        }
        Ok(resolved as usize)
    }

    /// Validates a repeat count and the resulting length.
    fn repeat_count(&self, count: Value, len: usize) -> VResult<usize> {
        let number = self
            .number(count)
            .filter(|n| n.kind().is_integer())
            .ok_or_else(|| ValueError::coercion(self.class_name_of(count), "Std::Int"))?;
        let n = number
            .to_i64()
            .ok_or_else(|| ValueError::out_of_range(messages::REPEAT_TOO_LARGE))?;
        if n < 0 {
            return Err(ValueError::out_of_range(format!("{}: {}", messages::NEGATIVE_REPEAT, n)));
        }
        let n = n as usize;
        match len.checked_mul(n) {
            Some(total) if total <= MAX_REPEAT_LEN => Ok(n),
            _ => Err(ValueError::out_of_range(messages::REPEAT_TOO_LARGE)),
        }
    }

    pub fn array_list_subscript(&self, list: Value, index: Value) -> VResult<Value> {
        let items = self.list_ref(list)?;
        let i = self.resolve_index(index, items.len())?;
        Ok(items[i])
    }

    pub fn array_list_subscript_set(&mut self, list: Value, index: Value, value: Value) -> VResult<()> {
        let len = self.list_ref(list)?.len();
        let i = self.resolve_index(index, len)?;
        self.list_mut(list)?[i] = value;
        Ok(())
    }

    pub fn array_list_append(&mut self, list: Value, value: Value) -> VResult<()> {
        self.list_mut(list)?.push(value);
        Ok(())
    }

    pub fn array_list_length(&self, list: Value) -> VResult<usize> {
        Ok(self.list_ref(list)?.len())
    }

    pub fn array_list_contains(&self, list: Value, value: Value) -> VResult<bool> {
        Ok(self.list_ref(list)?.iter().any(|item| self.equal(*item, value)))
    }

    /// A new list with the elements of `list` followed by those of `other`,
    /// which may be a list or a tuple.
    pub fn array_list_concat(&mut self, list: Value, other: Value) -> VResult<Value> {
        let mut items = self.list_ref(list)?.clone();
        match self.elements(other) {
            Some(more) => items.extend_from_slice(more),
            None => return Err(ValueError::coercion(self.inspect(other), self.inspect(list))),
        }
        Ok(self.array_list(items))
    }

    pub fn array_list_repeat(&mut self, list: Value, count: Value) -> VResult<Value> {
        let items = self.list_ref(list)?;
        let n = self.repeat_count(count, items.len())?;
        let repeated = items.repeat(n);
        Ok(self.array_list(repeated))
    }

    pub fn array_tuple_subscript(&self, tuple: Value, index: Value) -> VResult<Value> {
        let items = self.tuple_ref(tuple)?;
        let i = self.resolve_index(index, items.len())?;
        Ok(items[i])
    }

    pub fn array_tuple_length(&self, tuple: Value) -> VResult<usize> {
        Ok(self.tuple_ref(tuple)?.len())
    }

    pub fn array_tuple_concat(&mut self, tuple: Value, other: Value) -> VResult<Value> {
        let mut items = self.tuple_ref(tuple)?.to_vec();
        match self.elements(other) {
            Some(more) => items.extend_from_slice(more),
            None => return Err(ValueError::coercion(self.inspect(other), self.inspect(tuple))),
        }
        Ok(self.array_tuple(items))
    }

    pub fn array_tuple_repeat(&mut self, tuple: Value, count: Value) -> VResult<Value> {
        let items = self.tuple_ref(tuple)?;
        let n = self.repeat_count(count, items.len())?;
        let repeated = items.repeat(n);
        Ok(self.array_tuple(repeated))
    }
}
