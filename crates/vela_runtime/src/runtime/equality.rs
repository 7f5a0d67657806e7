//! Strict and lax equality.
//!
//! Strict equality (`==`) requires the same class: `1 == 1.0` is false.
//! Lax equality (`=~`) compares numbers across kinds. Both compare strings,
//! collections and ranges by content and everything else by identity.

use super::Runtime;
use crate::core::{ManagedObject, Value};
use crate::numeric;

/// Nesting depth past which collections are compared by identity only.
const MAX_DEPTH: usize = 64;

impl Runtime {
    pub fn equal(&self, a: Value, b: Value) -> bool {
        self.equal_at(a, b, false, 0)
    }

    pub fn lax_equal(&self, a: Value, b: Value) -> bool {
        self.equal_at(a, b, true, 0)
    }

    fn equal_at(&self, a: Value, b: Value, lax: bool, depth: usize) -> bool {
        if let (Some(x), Some(y)) = (self.number(a), self.number(b)) {
            return if lax {
                numeric::lax_equal(&x, &y)
            } else {
                numeric::equal(&x, &y)
            };
        }
        let (Value::Ref(x), Value::Ref(y)) = (a, b) else {
            return a == b;
        };
        if x == y {
            return true;
        }
        if depth >= MAX_DEPTH {
            return false;
        }
        let elements_equal = |xs: &[Value], ys: &[Value]| {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys)
                    .all(|(p, q)| self.equal_at(*p, *q, lax, depth + 1))
        };
        match (self.heap.get(x), self.heap.get(y)) {
            (ManagedObject::Str(p), ManagedObject::Str(q)) => p == q,
            (ManagedObject::ArrayList(p), ManagedObject::ArrayList(q)) => elements_equal(&p[..], &q[..]),
            (ManagedObject::ArrayTuple(p), ManagedObject::ArrayTuple(q)) => elements_equal(&p[..], &q[..]),
            (ManagedObject::HashMap(p), ManagedObject::HashMap(q)) => {
                p.len() == q.len()
                    && p.iter().all(|(k, v)| {
                        self.table_lookup(q.table(), *k)
                            .is_some_and(|other| self.equal_at(*v, other, lax, depth + 1))
                    })
            }
            (ManagedObject::HashRecord(p), ManagedObject::HashRecord(q)) => {
                p.len() == q.len()
                    && p.iter().all(|(k, v)| {
                        self.table_lookup(q.table(), *k)
                            .is_some_and(|other| self.equal_at(*v, other, lax, depth + 1))
                    })
            }
            (ManagedObject::HashSet(p), ManagedObject::HashSet(q)) => {
                p.len() == q.len() && p.iter().all(|k| self.table_lookup(q.table(), *k).is_some())
            }
            (ManagedObject::Range(p), ManagedObject::Range(q)) => {
                p.exclusive == q.exclusive
                    && self.equal_at(p.from, q.from, lax, depth + 1)
                    && self.equal_at(p.to, q.to, lax, depth + 1)
            }
            _ => false,
        }
    }
}
