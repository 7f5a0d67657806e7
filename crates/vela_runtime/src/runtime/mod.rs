//! The runtime context.
//!
//! [`Runtime`] owns the heap, the symbol table and the bootstrapped `Std`
//! classes. Every operation that needs to look behind a reference goes
//! through it; there is no global state.

mod arith;
mod bootstrap;
mod config;
mod equality;
mod inspect;
mod natives;

pub use bootstrap::StdClasses;
pub use config::RuntimeConfig;

use crate::core::{Heap, ManagedObject, ObjectId, Symbol, SymbolTable, Text, Value};
use crate::errors::{VResult, ValueError};
use crate::numeric::{BigFloat, Int};
use num_bigint::BigInt;

pub struct Runtime {
    pub(crate) heap: Heap,
    pub(crate) symbols: SymbolTable,
    pub(crate) std: StdClasses,
    pub(crate) config: RuntimeConfig,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        let mut heap = Heap::new();
        let mut symbols = SymbolTable::new();
        let std = bootstrap::bootstrap(&mut heap, &mut symbols);
        let mut rt = Self {
            heap,
            symbols,
            std,
            config,
        };
        natives::register(&mut rt);
        tracing::debug!(objects = rt.heap.len(), symbols = rt.symbols.len(), "runtime bootstrapped");
        rt
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn heap_mut(&mut self) -> &mut Heap {
        &mut self.heap
    }

    /// Handles of the bootstrapped `Std` classes.
    pub fn std(&self) -> &StdClasses {
        &self.std
    }

    pub fn intern(&mut self, name: &str) -> Symbol {
        self.symbols.intern(name)
    }

    pub fn symbol_name(&self, sym: Symbol) -> &str {
        self.symbols.name(sym)
    }

    /// A `Symbol` value for `name`.
    pub fn symbol(&mut self, name: &str) -> Value {
        Value::Symbol(self.symbols.intern(name))
    }

    pub fn alloc(&mut self, obj: ManagedObject) -> Value {
        Value::Ref(self.heap.alloc(obj))
    }

    pub fn string(&mut self, s: &str) -> Value {
        self.alloc(ManagedObject::Str(Text::from_str(s)))
    }

    /// The contents of a `String` value.
    pub fn str_of(&self, v: Value) -> Option<&str> {
        match v {
            Value::Ref(id) => self.heap.str(id).map(Text::as_str),
            _ => None,
        }
    }

    /// An `Int` value; fits in a `SmallInt` whenever possible.
    pub fn int(&mut self, i: Int) -> Value {
        match i {
            Int::Small(i) => Value::SmallInt(i),
            Int::Big(b) => self.alloc(ManagedObject::BigInt(b)),
        }
    }

    pub fn big_int(&mut self, b: BigInt) -> Value {
        self.int(Int::normalize(b))
    }

    pub fn big_float(&mut self, f: BigFloat) -> Value {
        self.alloc(ManagedObject::BigFloat(f))
    }

    /// Parses a decimal `BigFloat` literal. Without an explicit precision the
    /// configured default is used.
    pub fn parse_big_float(&mut self, text: &str, precision: Option<u32>) -> VResult<Value> {
        let precision = precision.unwrap_or(self.config.big_float_precision);
        match BigFloat::parse(text, precision) {
            Some(f) => Ok(self.big_float(f)),
            None => Err(ValueError::type_error(format!("invalid BigFloat literal: {:?}", text))),
        }
    }

    pub fn array_list(&mut self, items: Vec<Value>) -> Value {
        self.alloc(ManagedObject::ArrayList(items))
    }

    pub fn array_tuple(&mut self, items: Vec<Value>) -> Value {
        self.alloc(ManagedObject::ArrayTuple(items.into_boxed_slice()))
    }

    /// The class of any value. References dispatch through their own record.
    pub fn class_of(&self, v: Value) -> ObjectId {
        let std = &self.std;
        match v {
            Value::Undefined | Value::Nil => std.nil,
            Value::Bool(true) => std.true_class,
            Value::Bool(false) => std.false_class,
            Value::SmallInt(_) => std.int,
            Value::Float(_) => std.float,
            Value::Int8(_) => std.int8,
            Value::Int16(_) => std.int16,
            Value::Int32(_) => std.int32,
            Value::Int64(_) => std.int64,
            Value::UInt8(_) => std.uint8,
            Value::UInt16(_) => std.uint16,
            Value::UInt32(_) => std.uint32,
            Value::UInt64(_) => std.uint64,
            Value::Float32(_) => std.float32,
            Value::Float64(_) => std.float64,
            Value::Symbol(_) => std.symbol,
            Value::Ref(id) => match self.heap.get(id) {
                ManagedObject::Str(_) => std.string,
                ManagedObject::BigInt(_) => std.int,
                ManagedObject::BigFloat(_) => std.big_float,
                ManagedObject::Object(o) => o.class,
                ManagedObject::Class(c) => c.class,
                ManagedObject::ArrayList(_) => std.array_list,
                ManagedObject::ArrayTuple(_) => std.array_tuple,
                ManagedObject::HashMap(_) => std.hash_map,
                ManagedObject::HashSet(_) => std.hash_set,
                ManagedObject::HashRecord(_) => std.hash_record,
                ManagedObject::Range(_) => std.range,
                ManagedObject::Once(_) => std.once,
                ManagedObject::WaitGroup(_) => std.wait_group,
            },
        }
    }

    /// Display name of a class: its qualified name, `&<owner>` for singleton
    /// classes and `<anonymous>` otherwise. Proxies are named after their mixin.
    pub fn class_name(&self, class: ObjectId) -> String {
        let record = self.heap.class(class);
        if let Some(mixin) = record.proxied {
            return self.class_name(mixin);
        }
        if let Some(name) = &record.name {
            return name.to_string();
        }
        match record.attached {
            Some(owner) => format!("&{}", self.inspect(owner)),
            None => "<anonymous>".to_string(),
        }
    }

    /// The display name of the class of `v`. For a value with a singleton
    /// class this is the class it was created from.
    pub fn class_name_of(&self, v: Value) -> String {
        let mut class = self.class_of(v);
        while self.heap.class(class).is_singleton() {
            match self.heap.class(class).parent {
                Some(parent) => class = parent,
                None => break,
            }
        }
        self.class_name(class)
    }

    /// Materialises `err` as an instance of its `Std` error class carrying a
    /// `message` instance variable.
    pub fn error_value(&mut self, err: &ValueError) -> Value {
        let class = self.std.error_class(err.kind());
        let message = self.string(&err.to_string());
        let key = self.intern("message");
        let mut obj = crate::object::Object::new(class);
        obj.ivars.insert(key, message);
        self.alloc(ManagedObject::Object(Box::new(obj)))
    }
}
