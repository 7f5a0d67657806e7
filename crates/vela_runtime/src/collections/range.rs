//! `Std::Range`. Either end may be `nil` for a beginless or endless range.

use crate::core::{ManagedObject, Value};
use crate::errors::{VResult, ValueError};
use crate::runtime::Runtime;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub from: Value,
    pub to: Value,
    /// `...` excludes `to`, `..` includes it.
    pub exclusive: bool,
}

/// Largest number of elements `to_array_list` materialises.
const MAX_RANGE_LEN: i128 = 1 << 32;

impl Runtime {
    pub fn new_range(&mut self, from: Value, to: Value, exclusive: bool) -> Value {
        self.alloc(ManagedObject::Range(Range { from, to, exclusive }))
    }

    pub(crate) fn range_ref(&self, range: Value) -> VResult<Range> {
        if let Value::Ref(id) = range {
            if let ManagedObject::Range(r) = self.heap.get(id) {
                return Ok(*r);
            }
        }
        Err(ValueError::coercion(self.class_name_of(range), "Std::Range"))
    }

    /// Whether `value` lies within the range, comparing with `<=>`.
    pub fn range_contains(&self, range: Value, value: Value) -> VResult<bool> {
        let r = self.range_ref(range)?;
        if !r.from.is_nil() && !self.greater_equal(value, r.from)? {
            return Ok(false);
        }
        if r.to.is_nil() {
            return Ok(true);
        }
        if r.exclusive {
            self.less(value, r.to)
        } else {
            self.less_equal(value, r.to)
        }
    }

    /// Materialises a bounded range of default `Int`s.
    pub fn range_to_array_list(&mut self, range: Value) -> VResult<Value> {
        let r = self.range_ref(range)?;
        let bound = |v: Value| match v {
            Value::SmallInt(i) => Ok(i),
            Value::Nil => Err(ValueError::out_of_range("cannot convert an unbounded range")),
            other => Err(ValueError::coercion(self.class_name_of(other), "Std::Int")),
        };
        let from = bound(r.from)?;
        let to = bound(r.to)?;
        let span = i128::from(to) - i128::from(from);
        let len = if r.exclusive { span } else { span + 1 }.max(0);
        if len > MAX_RANGE_LEN {
            return Err(ValueError::out_of_range("range is too large"));
        }
        let items = if r.exclusive {
            (from..to).map(Value::SmallInt).collect()
        } else {
            (from..=to).map(Value::SmallInt).collect()
        };
        Ok(self.array_list(items))
    }
}
