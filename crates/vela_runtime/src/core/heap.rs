//! Heap storage for reference values.
//!
//! Objects live in a single arena and are addressed by [`ObjectId`]. Classes,
//! mixins and modules are long-lived, so nothing is ever freed while the
//! owning [`Runtime`](crate::Runtime) is alive.

use super::text::Text;
use super::value::Value;
use crate::collections::{HashMap, HashRecord, HashSet, Range};
use crate::numeric::BigFloat;
use crate::object::{Class, Object};
use crate::sync::{Once, WaitGroup};
use num_bigint::BigInt;
use std::sync::Arc;

/// Handle to a heap-allocated object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

pub enum ManagedObject {
    Str(Text),
    BigInt(BigInt),
    BigFloat(BigFloat),
    Object(Box<Object>),
    /// Classes, mixins, modules, mixin proxies and singleton classes.
    Class(Box<Class>),
    ArrayList(Vec<Value>),
    ArrayTuple(Box<[Value]>),
    HashMap(HashMap),
    HashSet(HashSet),
    HashRecord(HashRecord),
    Range(Range),
    Once(Arc<Once>),
    WaitGroup(Arc<WaitGroup>),
}

impl ManagedObject {
    /// Short name of the reference kind, used in invariant panics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ManagedObject::Str(_) => "String",
            ManagedObject::BigInt(_) => "BigInt",
            ManagedObject::BigFloat(_) => "BigFloat",
            ManagedObject::Object(_) => "Object",
            ManagedObject::Class(_) => "Class",
            ManagedObject::ArrayList(_) => "ArrayList",
            ManagedObject::ArrayTuple(_) => "ArrayTuple",
            ManagedObject::HashMap(_) => "HashMap",
            ManagedObject::HashSet(_) => "HashSet",
            ManagedObject::HashRecord(_) => "HashRecord",
            ManagedObject::Range(_) => "Range",
            ManagedObject::Once(_) => "Once",
            ManagedObject::WaitGroup(_) => "WaitGroup",
        }
    }
}

#[derive(Default)]
pub struct Heap {
    objects: Vec<ManagedObject>,
}

impl Heap {
    pub fn new() -> Self {
        Self {
            objects: Vec::with_capacity(256),
        }
    }

    /// Allocate a managed object on the heap.
    pub fn alloc(&mut self, obj: ManagedObject) -> ObjectId {
        let id = self.objects.len();
        self.objects.push(obj);
        ObjectId(id)
    }

    /// Panics on a handle that did not come from this heap.
    pub fn get(&self, id: ObjectId) -> &ManagedObject {
        self.objects
            .get(id.0)
            .unwrap_or_else(|| panic!("dangling object handle {}", id.0))
    }

    pub fn get_mut(&mut self, id: ObjectId) -> &mut ManagedObject {
        self.objects
            .get_mut(id.0)
            .unwrap_or_else(|| panic!("dangling object handle {}", id.0))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The class record behind `id`. Panics if `id` is not a class.
    pub fn class(&self, id: ObjectId) -> &Class {
        match self.get(id) {
            ManagedObject::Class(c) => c,
            other => panic!("expected a class, found {}", other.kind_name()),
        }
    }

    pub fn class_mut(&mut self, id: ObjectId) -> &mut Class {
        match self.get_mut(id) {
            ManagedObject::Class(c) => c,
            other => panic!("expected a class, found {}", other.kind_name()),
        }
    }

    pub fn try_class(&self, id: ObjectId) -> Option<&Class> {
        match self.get(id) {
            ManagedObject::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn str(&self, id: ObjectId) -> Option<&Text> {
        match self.get(id) {
            ManagedObject::Str(s) => Some(s),
            _ => None,
        }
    }
}
