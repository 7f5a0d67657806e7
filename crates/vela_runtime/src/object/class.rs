//! The record shared by classes, mixins, modules, mixin proxies and
//! singleton classes.

use super::method::Method;
use crate::collections::KeyedTable;
use crate::core::{ObjectId, Symbol, Value};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Mixin,
    Module,
}

/// Boolean traits of a class. None of them affect lookup order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassFlags {
    pub is_abstract: bool,
    /// A sealed class cannot be subclassed.
    pub sealed: bool,
    pub singleton: bool,
    pub mixin_proxy: bool,
    pub no_ivars: bool,
}

#[derive(Debug, Clone)]
pub struct Class {
    /// Fully qualified name (`Std::Int`); `None` for anonymous classes.
    pub name: Option<Box<str>>,
    pub kind: ClassKind,
    pub parent: Option<ObjectId>,
    /// The class of this class value: its metaclass.
    pub class: ObjectId,
    pub methods: KeyedTable<Symbol, Rc<Method>>,
    pub constants: KeyedTable<Symbol, Value>,
    pub ivars: KeyedTable<Symbol, Value>,
    pub flags: ClassFlags,
    /// For a mixin proxy, the mixin whose tables it copies.
    pub proxied: Option<ObjectId>,
    /// For a singleton class, the value it belongs to.
    pub attached: Option<Value>,
}

impl Class {
    pub fn new(name: Option<Box<str>>, kind: ClassKind, parent: Option<ObjectId>, class: ObjectId) -> Self {
        Self {
            name,
            kind,
            parent,
            class,
            methods: KeyedTable::new(),
            constants: KeyedTable::new(),
            ivars: KeyedTable::new(),
            flags: ClassFlags::default(),
            proxied: None,
            attached: None,
        }
    }

    pub fn is_mixin(&self) -> bool {
        self.kind == ClassKind::Mixin
    }

    pub fn is_module(&self) -> bool {
        self.kind == ClassKind::Module
    }

    pub fn is_proxy(&self) -> bool {
        self.flags.mixin_proxy
    }

    pub fn is_singleton(&self) -> bool {
        self.flags.singleton
    }

    /// The identity used by `is_a` checks: proxies stand in for their mixin.
    pub fn effective_id(&self, own: ObjectId) -> ObjectId {
        self.proxied.unwrap_or(own)
    }
}
