//! Method lookup, mixin inclusion and the rest of the class protocol.
//!
//! Lookup is a linear walk of the parent chain. Mixins take part in that walk
//! through proxy classes: including a mixin copies its tables (and those of
//! every mixin it includes) into fresh proxies spliced in directly above the
//! including class. The mixin itself is never modified.

use super::{Class, ClassKind, Method, MethodKind, NativeFn, Object, check_arity};
use crate::core::{ManagedObject, ObjectId, Symbol, Value};
use crate::errors::{VResult, ValueError, messages};
use crate::runtime::Runtime;
use smallvec::SmallVec;
use std::rc::Rc;

/// A class followed by its parents, nearest first.
pub type Ancestors = SmallVec<[ObjectId; 8]>;

impl Runtime {
    /// The class record behind a class, mixin or module value.
    pub fn class_id(&self, v: Value) -> VResult<ObjectId> {
        match v {
            Value::Ref(id) if self.heap.try_class(id).is_some() => Ok(id),
            other => Err(ValueError::type_error(format!(
                "`{}` is {}",
                self.inspect(other),
                messages::NOT_A_CLASS
            ))),
        }
    }

    /// The class record behind `id`, or a TypeError when `id` is some
    /// other kind of object.
    fn class_record(&self, id: ObjectId) -> VResult<&Class> {
        self.heap.try_class(id).ok_or_else(|| {
            ValueError::type_error(format!(
                "`{}` is {}",
                self.inspect(Value::Ref(id)),
                messages::NOT_A_CLASS
            ))
        })
    }

    fn class_record_mut(&mut self, id: ObjectId) -> VResult<&mut Class> {
        self.class_record(id)?;
        Ok(self.heap.class_mut(id))
    }

    fn qualified_name(&self, namespace: ObjectId, name: &str) -> String {
        match &self.heap.class(namespace).name {
            Some(ns) => format!("{}::{}", ns, name),
            None => name.to_string(),
        }
    }

    /// Checks that `parent` may be subclassed and returns it.
    fn inheritable_parent(&self, parent: Option<ObjectId>) -> VResult<ObjectId> {
        let parent = parent.unwrap_or(self.std.object);
        let record = self.class_record(parent)?;
        if record.kind != ClassKind::Class || record.is_proxy() {
            return Err(ValueError::type_error(format!(
                "`{}` is {}",
                self.class_name(parent),
                messages::NOT_A_CLASS
            )));
        }
        if record.flags.sealed || record.is_singleton() {
            return Err(ValueError::type_error(format!(
                "cannot inherit from sealed class `{}`",
                self.class_name(parent)
            )));
        }
        Ok(parent)
    }

    /// Allocates a class record. Classes get their metaclass straight away so
    /// that class methods defined on any superclass are inherited.
    fn new_class(&mut self, name: Option<String>, kind: ClassKind, parent: Option<ObjectId>) -> VResult<ObjectId> {
        let (parent, metaclass) = match kind {
            ClassKind::Class => (Some(self.inheritable_parent(parent)?), self.std.class),
            ClassKind::Mixin => (None, self.std.mixin),
            ClassKind::Module => (None, self.std.module),
        };
        let record = Class::new(name.map(String::into_boxed_str), kind, parent, metaclass);
        let id = self.heap.alloc(ManagedObject::Class(Box::new(record)));
        if kind == ClassKind::Class {
            self.singleton_class(Value::Ref(id))?;
        }
        tracing::debug!(name = %self.class_name(id), kind = ?kind, "class created");
        Ok(id)
    }

    fn define_named(&mut self, namespace: ObjectId, name: &str, kind: ClassKind, parent: Option<ObjectId>) -> VResult<ObjectId> {
        self.class_record(namespace)?;
        // Reopening an existing class, mixin or module returns it unchanged.
        if let Some(Value::Ref(existing)) = self.constant(namespace, name) {
            if let Some(record) = self.heap.try_class(existing) {
                if record.kind != kind {
                    return Err(ValueError::type_error(format!(
                        "`{}` is already defined as a different kind",
                        self.class_name(existing)
                    )));
                }
                if let Some(p) = parent {
                    if record.parent != Some(p) {
                        return Err(ValueError::type_error(format!(
                            "superclass mismatch for `{}`",
                            self.class_name(existing)
                        )));
                    }
                }
                return Ok(existing);
            }
        }
        let qualified = self.qualified_name(namespace, name);
        let id = self.new_class(Some(qualified), kind, parent)?;
        self.define_constant(namespace, name, Value::Ref(id))?;
        Ok(id)
    }

    /// Defines (or reopens) class `name` in `namespace`. The parent defaults
    /// to `Std::Object`; sealed classes cannot be subclassed.
    pub fn define_class(&mut self, namespace: ObjectId, name: &str, parent: Option<ObjectId>) -> VResult<ObjectId> {
        self.define_named(namespace, name, ClassKind::Class, parent)
    }

    pub fn define_mixin(&mut self, namespace: ObjectId, name: &str) -> VResult<ObjectId> {
        self.define_named(namespace, name, ClassKind::Mixin, None)
    }

    pub fn define_module(&mut self, namespace: ObjectId, name: &str) -> VResult<ObjectId> {
        self.define_named(namespace, name, ClassKind::Module, None)
    }

    pub fn anonymous_class(&mut self, parent: Option<ObjectId>) -> VResult<ObjectId> {
        self.new_class(None, ClassKind::Class, parent)
    }

    pub fn anonymous_mixin(&mut self) -> VResult<ObjectId> {
        self.new_class(None, ClassKind::Mixin, None)
    }

    /// Marks a class abstract: it can no longer be instantiated.
    pub fn set_abstract(&mut self, class: ObjectId) -> VResult<()> {
        self.class_record_mut(class)?.flags.is_abstract = true;
        Ok(())
    }

    pub fn set_sealed(&mut self, class: ObjectId) -> VResult<()> {
        self.class_record_mut(class)?.flags.sealed = true;
        Ok(())
    }

    pub fn set_no_ivars(&mut self, class: ObjectId) -> VResult<()> {
        self.class_record_mut(class)?.flags.no_ivars = true;
        Ok(())
    }

    /// `class` followed by every parent, proxies included.
    pub fn ancestors(&self, class: ObjectId) -> Ancestors {
        let mut out = Ancestors::new();
        let mut current = Some(class);
        while let Some(id) = current {
            out.push(id);
            current = self.heap.class(id).parent;
        }
        out
    }

    /// Finds `name` in `class` or its nearest ancestor that defines it.
    pub fn lookup_method(&self, class: ObjectId, name: Symbol) -> Option<Rc<Method>> {
        let mut current = Some(class);
        while let Some(id) = current {
            let record = self.heap.class(id);
            if let Some(method) = record.methods.get(name) {
                return Some(Rc::clone(method));
            }
            current = record.parent;
        }
        None
    }

    /// [`Runtime::lookup_method`] by name. Names never interned cannot match.
    pub fn lookup_method_named(&self, class: ObjectId, name: &str) -> Option<Rc<Method>> {
        let sym = self.symbols.get(name)?;
        self.lookup_method(class, sym)
    }

    /// A sealed method called `name` anywhere from `start` upwards.
    fn sealed_method(&self, start: Option<ObjectId>, name: Symbol) -> Option<Rc<Method>> {
        let mut current = start;
        while let Some(id) = current {
            let record = self.heap.class(id);
            if let Some(method) = record.methods.get(name) {
                if method.sealed {
                    return Some(Rc::clone(method));
                }
            }
            current = record.parent;
        }
        None
    }

    fn sealed_error(&self, method: &Method, fallback: ObjectId) -> ValueError {
        ValueError::SealedMethod {
            class: self.class_name(method.owner.unwrap_or(fallback)),
            method: self.symbol_name(method.name).to_string(),
        }
    }

    /// Inserts `method` into `class`'s own table, replacing a previous
    /// definition there. Fails without modifying anything when a sealed
    /// method of the same name exists anywhere in the ancestor chain.
    pub fn attach_method(&mut self, class: ObjectId, mut method: Method) -> VResult<()> {
        self.class_record(class)?;
        if let Some(sealed) = self.sealed_method(Some(class), method.name) {
            return Err(self.sealed_error(&sealed, class));
        }
        method.owner.get_or_insert(class);
        let name = method.name;
        self.heap.class_mut(class).methods.insert(name, Rc::new(method));
        Ok(())
    }

    pub fn define_method(&mut self, class: ObjectId, name: &str, f: NativeFn) -> VResult<()> {
        let sym = self.intern(name);
        self.attach_method(class, Method::native(sym, f))
    }

    /// Defines `name` and `name=` reading and writing the instance variable
    /// `name`.
    pub fn define_accessor(&mut self, class: ObjectId, name: &str) -> VResult<()> {
        let ivar = self.intern(name);
        let setter = self.intern(&format!("{}=", name));
        self.attach_method(class, Method::getter(ivar, ivar))?;
        self.attach_method(class, Method::setter(setter, ivar))
    }

    /// Removes a method from `class`'s own table only.
    pub fn remove_method(&mut self, class: ObjectId, name: Symbol) -> VResult<Option<Rc<Method>>> {
        Ok(self.class_record_mut(class)?.methods.remove(name))
    }

    /// Splices proxies of `mixin` and every mixin it includes between `class`
    /// and its parent, preserving the mixin's own order. Each call creates a
    /// fresh proxy chain, even for a mixin that is already included.
    pub fn include_mixin(&mut self, class: ObjectId, mixin: ObjectId) -> VResult<()> {
        self.class_record(class)?;
        if !self.class_record(mixin)?.is_mixin() {
            return Err(ValueError::type_error(format!(
                "`{}` is {}",
                self.class_name(mixin),
                messages::NOT_A_MIXIN
            )));
        }
        let chain = self.ancestors(mixin);
        let original_parent = self.heap.class(class).parent;

        for &node in &chain {
            for (name, _) in self.heap.class(node).methods.iter() {
                if let Some(sealed) = self.sealed_method(original_parent, *name) {
                    return Err(self.sealed_error(&sealed, node));
                }
            }
        }

        let mut parent = original_parent;
        for &node in chain.iter().rev() {
            let source = self.heap.class(node);
            let mut proxy = Class::new(None, ClassKind::Class, parent, source.class);
            proxy.methods = source.methods.clone();
            proxy.constants = source.constants.clone();
            proxy.flags.mixin_proxy = true;
            proxy.flags.no_ivars = true;
            proxy.proxied = Some(source.effective_id(node));
            parent = Some(self.heap.alloc(ManagedObject::Class(Box::new(proxy))));
        }
        self.heap.class_mut(class).parent = parent;

        tracing::debug!(
            class = %self.class_name(class),
            mixin = %self.class_name(mixin),
            proxies = chain.len(),
            "mixin included"
        );
        Ok(())
    }

    pub fn includes_mixin(&self, class: ObjectId, mixin: ObjectId) -> bool {
        self.ancestors(class)
            .iter()
            .any(|&id| self.heap.class(id).proxied == Some(mixin))
    }

    /// Whether `class` is `ancestor` or inherits from it (through a mixin
    /// proxy as well).
    pub fn is_subclass(&self, class: ObjectId, ancestor: ObjectId) -> bool {
        self.ancestors(class)
            .iter()
            .any(|&id| self.heap.class(id).effective_id(id) == ancestor)
    }

    pub fn is_a(&self, value: Value, class: ObjectId) -> bool {
        self.is_subclass(self.class_of(value), class)
    }

    fn new_singleton(&mut self, parent: ObjectId, attached: Value) -> ObjectId {
        let mut record = Class::new(None, ClassKind::Class, Some(parent), self.std.class);
        record.flags.singleton = true;
        record.attached = Some(attached);
        let id = self.heap.alloc(ManagedObject::Class(Box::new(record)));
        tracing::debug!(owner = %self.inspect(attached), "singleton class opened");
        id
    }

    /// The nearest parent of a class that is not a mixin proxy.
    fn superclass(&self, class: ObjectId) -> Option<ObjectId> {
        let mut current = self.heap.class(class).parent;
        while let Some(id) = current {
            let record = self.heap.class(id);
            if !record.is_proxy() {
                return Some(id);
            }
            current = record.parent;
        }
        None
    }

    /// The per-value class of `value`, created on first use. Its parent is the
    /// value's previous class; for classes it is the superclass's singleton
    /// class, so class methods are inherited.
    pub fn singleton_class(&mut self, value: Value) -> VResult<ObjectId> {
        let Value::Ref(id) = value else {
            return Err(ValueError::type_error(messages::PRIMITIVE_SINGLETON));
        };
        match self.heap.get(id) {
            ManagedObject::Object(obj) => {
                let current = obj.class;
                if self.heap.class(current).is_singleton() {
                    return Ok(current);
                }
                let singleton = self.new_singleton(current, value);
                if let ManagedObject::Object(obj) = self.heap.get_mut(id) {
                    obj.class = singleton;
                }
                Ok(singleton)
            }
            ManagedObject::Class(record) => {
                let current = record.class;
                let kind = record.kind;
                if self.heap.class(current).is_singleton() {
                    return Ok(current);
                }
                let parent = match (kind, self.superclass(id)) {
                    (ClassKind::Class, Some(superclass)) => self.singleton_class(Value::Ref(superclass))?,
                    _ => current,
                };
                let singleton = self.new_singleton(parent, value);
                self.heap.class_mut(id).class = singleton;
                Ok(singleton)
            }
            _ => Err(ValueError::type_error(messages::PRIMITIVE_SINGLETON)),
        }
    }

    pub fn define_singleton_method(&mut self, value: Value, method: Method) -> VResult<()> {
        let class = self.singleton_class(value)?;
        self.attach_method(class, method)
    }

    /// Creates an instance of a non-abstract class.
    pub fn create_instance(&mut self, class: ObjectId) -> VResult<Value> {
        let record = self.class_record(class)?;
        if record.kind != ClassKind::Class || record.is_proxy() {
            return Err(ValueError::type_error(format!(
                "`{}` is {}",
                self.class_name(class),
                messages::NOT_A_CLASS
            )));
        }
        if record.flags.is_abstract {
            return Err(ValueError::type_error(format!(
                "{}: `{}`",
                messages::ABSTRACT_CLASS,
                self.class_name(class)
            )));
        }
        if record.is_singleton() {
            return Err(ValueError::type_error(format!(
                "cannot instantiate singleton class `{}`",
                self.class_name(class)
            )));
        }
        Ok(self.alloc(ManagedObject::Object(Box::new(Object::new(class)))))
    }

    pub fn define_constant(&mut self, namespace: ObjectId, name: &str, value: Value) -> VResult<()> {
        let sym = self.intern(name);
        self.class_record_mut(namespace)?.constants.insert(sym, value);
        Ok(())
    }

    /// A constant from `namespace`'s own table.
    pub fn constant(&self, namespace: ObjectId, name: &str) -> Option<Value> {
        let sym = self.symbols.get(name)?;
        self.heap.class(namespace).constants.get(sym).copied()
    }

    /// Looks `name` up in `namespace`, its ancestors and finally `Std`.
    pub fn lookup_constant(&self, namespace: ObjectId, name: &str) -> Option<Value> {
        let sym = self.symbols.get(name)?;
        self.ancestors(namespace)
            .into_iter()
            .chain(std::iter::once(self.std.std))
            .find_map(|id| self.heap.class(id).constants.get(sym).copied())
    }

    /// Resolves a `::`-separated path such as `Std::Sync::Once` from the root.
    pub fn resolve_constant(&self, path: &str) -> VResult<Value> {
        let undefined = |upto: usize| ValueError::UndefinedConstant {
            name: path.split("::").take(upto).collect::<Vec<_>>().join("::"),
        };
        let mut current = Value::Ref(self.std.std);
        for (i, segment) in path.split("::").enumerate() {
            let namespace = match current {
                Value::Ref(id) if self.heap.try_class(id).is_some() => id,
                _ => return Err(undefined(i + 1)),
            };
            current = self.constant(namespace, segment).ok_or_else(|| undefined(i + 1))?;
        }
        Ok(current)
    }

    pub fn get_ivar(&self, value: Value, name: Symbol) -> Option<Value> {
        let Value::Ref(id) = value else {
            return None;
        };
        match self.heap.get(id) {
            ManagedObject::Object(obj) => obj.ivars.get(name).copied(),
            ManagedObject::Class(record) => record.ivars.get(name).copied(),
            _ => None,
        }
    }

    /// Sets an instance variable. Fails with a `TypeError` for values that
    /// carry no instance variables.
    pub fn set_ivar(&mut self, value: Value, name: Symbol, new: Value) -> VResult<()> {
        let allowed = match value {
            Value::Ref(id) => match self.heap.get(id) {
                ManagedObject::Object(obj) => !self.ancestors(obj.class).iter().any(|&c| {
                    let record = self.heap.class(c);
                    !record.is_proxy() && !record.is_singleton() && record.flags.no_ivars
                }),
                ManagedObject::Class(record) => !record.flags.no_ivars,
                _ => false,
            },
            _ => false,
        };
        if !allowed {
            return Err(ValueError::type_error(format!(
                "{} on `{}`",
                messages::NO_IVARS,
                self.class_name_of(value)
            )));
        }
        match self.heap.get_mut(value.as_reference()) {
            ManagedObject::Object(obj) => {
                obj.ivars.insert(name, new);
            }
            ManagedObject::Class(record) => {
                record.ivars.insert(name, new);
            }
            _ => {}
        }
        Ok(())
    }

    pub fn responds_to(&self, value: Value, name: &str) -> bool {
        self.lookup_method_named(self.class_of(value), name).is_some()
    }

    /// Looks `name` up in the class of `receiver` and invokes it. A missing
    /// method becomes a `NoMethod` error here.
    pub fn call_method(&mut self, receiver: Value, name: &str, args: &[Value]) -> VResult<Value> {
        let sym = self.intern(name);
        let Some(method) = self.lookup_method(self.class_of(receiver), sym) else {
            return Err(ValueError::NoMethod {
                class: self.class_name_of(receiver),
                method: name.to_string(),
            });
        };
        match method.kind {
            MethodKind::Native(f) => f(self, receiver, args),
            MethodKind::Getter(ivar) => {
                check_arity(args, 0)?;
                Ok(self.get_ivar(receiver, ivar).unwrap_or(Value::Nil))
            }
            MethodKind::Setter(ivar) => {
                check_arity(args, 1)?;
                self.set_ivar(receiver, ivar, args[0])?;
                Ok(args[0])
            }
        }
    }
}
