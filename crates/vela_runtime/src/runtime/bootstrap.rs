//! Creation of the `Std` class graph.
//!
//! Order matters: the root classes come first so that every later record can
//! point at `Std::Class` (or `Std::Module`/`Std::Mixin`) as its metaclass,
//! then primitives, numerics, collections, errors and the sync namespace.

use crate::core::{Heap, ManagedObject, ObjectId, SymbolTable, Value};
use crate::errors::ErrorKind;
use crate::object::{Class, ClassFlags, ClassKind};

/// Handles of the classes every runtime starts with.
#[derive(Debug, Clone)]
pub struct StdClasses {
    pub std: ObjectId,
    pub value: ObjectId,
    pub object: ObjectId,
    pub module: ObjectId,
    pub class: ObjectId,
    pub mixin: ObjectId,
    pub nil: ObjectId,
    pub bool: ObjectId,
    pub true_class: ObjectId,
    pub false_class: ObjectId,
    pub symbol: ObjectId,
    pub string: ObjectId,
    pub int: ObjectId,
    pub float: ObjectId,
    pub big_float: ObjectId,
    pub int8: ObjectId,
    pub int16: ObjectId,
    pub int32: ObjectId,
    pub int64: ObjectId,
    pub uint8: ObjectId,
    pub uint16: ObjectId,
    pub uint32: ObjectId,
    pub uint64: ObjectId,
    pub float32: ObjectId,
    pub float64: ObjectId,
    pub array_list: ObjectId,
    pub array_tuple: ObjectId,
    pub hash_map: ObjectId,
    pub hash_set: ObjectId,
    pub hash_record: ObjectId,
    pub range: ObjectId,
    pub error: ObjectId,
    errors: [ObjectId; 8],
    pub sync: ObjectId,
    pub once: ObjectId,
    pub wait_group: ObjectId,
}

impl StdClasses {
    pub fn error_class(&self, kind: ErrorKind) -> ObjectId {
        self.errors[kind as usize]
    }

    /// The classes that carry numeric values, in tower order.
    pub fn numeric(&self) -> [ObjectId; 13] {
        [
            self.int,
            self.float,
            self.big_float,
            self.int8,
            self.int16,
            self.int32,
            self.int64,
            self.uint8,
            self.uint16,
            self.uint32,
            self.uint64,
            self.float32,
            self.float64,
        ]
    }
}

const PRIMITIVE: ClassFlags = ClassFlags {
    is_abstract: true,
    sealed: true,
    singleton: false,
    mixin_proxy: false,
    no_ivars: true,
};

struct Builder<'a> {
    heap: &'a mut Heap,
    symbols: &'a mut SymbolTable,
    metaclass: ObjectId,
    module_class: ObjectId,
}

impl Builder<'_> {
    fn record(&mut self, qualified: String, kind: ClassKind, parent: Option<ObjectId>, flags: ClassFlags) -> ObjectId {
        let class = match kind {
            ClassKind::Module => self.module_class,
            _ => self.metaclass,
        };
        let mut record = Class::new(Some(qualified.into_boxed_str()), kind, parent, class);
        record.flags = flags;
        self.heap.alloc(ManagedObject::Class(Box::new(record)))
    }

    /// Creates `name` inside `namespace` and registers it as a constant there.
    fn define(&mut self, namespace: ObjectId, name: &str, kind: ClassKind, parent: Option<ObjectId>, flags: ClassFlags) -> ObjectId {
        let qualified = match &self.heap.class(namespace).name {
            Some(ns) => format!("{}::{}", ns, name),
            None => name.to_string(),
        };
        let id = self.record(qualified, kind, parent, flags);
        let sym = self.symbols.intern(name);
        self.heap.class_mut(namespace).constants.insert(sym, Value::Ref(id));
        id
    }
}

pub(super) fn bootstrap(heap: &mut Heap, symbols: &mut SymbolTable) -> StdClasses {
    // Root classes reference `Std::Class` before it exists; patched below.
    let placeholder = ObjectId(0);
    let mut b = Builder {
        heap,
        symbols,
        metaclass: placeholder,
        module_class: placeholder,
    };
    let abstract_root = ClassFlags {
        is_abstract: true,
        ..ClassFlags::default()
    };
    let value = b.record("Std::Value".into(), ClassKind::Class, None, abstract_root);
    let object = b.record("Std::Object".into(), ClassKind::Class, Some(value), ClassFlags::default());
    let module = b.record("Std::Module".into(), ClassKind::Class, Some(object), abstract_root);
    let class = b.record("Std::Class".into(), ClassKind::Class, Some(module), abstract_root);
    let mixin = b.record("Std::Mixin".into(), ClassKind::Class, Some(module), abstract_root);
    for id in [value, object, module, class, mixin] {
        b.heap.class_mut(id).class = class;
    }
    b.metaclass = class;
    b.module_class = module;

    let std = b.record("Std".into(), ClassKind::Module, None, ClassFlags::default());
    for (name, id) in [("Value", value), ("Object", object), ("Module", module), ("Class", class), ("Mixin", mixin)] {
        let sym = b.symbols.intern(name);
        b.heap.class_mut(std).constants.insert(sym, Value::Ref(id));
    }
    let sym = b.symbols.intern("Std");
    b.heap.class_mut(std).constants.insert(sym, Value::Ref(std));

    let nil = b.define(std, "Nil", ClassKind::Class, Some(value), PRIMITIVE);
    let bool_class = b.define(std, "Bool", ClassKind::Class, Some(value), PRIMITIVE);
    let true_class = b.define(std, "True", ClassKind::Class, Some(bool_class), PRIMITIVE);
    let false_class = b.define(std, "False", ClassKind::Class, Some(bool_class), PRIMITIVE);
    let symbol = b.define(std, "Symbol", ClassKind::Class, Some(value), PRIMITIVE);
    let string = b.define(std, "String", ClassKind::Class, Some(value), PRIMITIVE);

    let mut numeric = |name: &str| b.define(std, name, ClassKind::Class, Some(value), PRIMITIVE);
    let int = numeric("Int");
    let float = numeric("Float");
    let big_float = numeric("BigFloat");
    let int8 = numeric("Int8");
    let int16 = numeric("Int16");
    let int32 = numeric("Int32");
    let int64 = numeric("Int64");
    let uint8 = numeric("UInt8");
    let uint16 = numeric("UInt16");
    let uint32 = numeric("UInt32");
    let uint64 = numeric("UInt64");
    let float32 = numeric("Float32");
    let float64 = numeric("Float64");

    let array_list = b.define(std, "ArrayList", ClassKind::Class, Some(value), PRIMITIVE);
    let array_tuple = b.define(std, "ArrayTuple", ClassKind::Class, Some(value), PRIMITIVE);
    let hash_map = b.define(std, "HashMap", ClassKind::Class, Some(value), PRIMITIVE);
    let hash_set = b.define(std, "HashSet", ClassKind::Class, Some(value), PRIMITIVE);
    let hash_record = b.define(std, "HashRecord", ClassKind::Class, Some(value), PRIMITIVE);
    let range = b.define(std, "Range", ClassKind::Class, Some(value), PRIMITIVE);

    let error = b.define(std, "Error", ClassKind::Class, Some(object), ClassFlags::default());
    let errors = ErrorKind::ALL.map(|kind| b.define(std, kind.class_name(), ClassKind::Class, Some(error), ClassFlags::default()));

    let sync = b.define(std, "Sync", ClassKind::Module, None, ClassFlags::default());
    let once = b.define(sync, "Once", ClassKind::Class, Some(value), PRIMITIVE);
    let wait_group = b.define(sync, "WaitGroup", ClassKind::Class, Some(value), PRIMITIVE);

    tracing::debug!(classes = b.heap.len(), "std classes created");

    StdClasses {
        std,
        value,
        object,
        module,
        class,
        mixin,
        nil,
        bool: bool_class,
        true_class,
        false_class,
        symbol,
        string,
        int,
        float,
        big_float,
        int8,
        int16,
        int32,
        int64,
        uint8,
        uint16,
        uint32,
        uint64,
        float32,
        float64,
        array_list,
        array_tuple,
        hash_map,
        hash_set,
        hash_record,
        range,
        error,
        errors,
        sync,
        once,
        wait_group,
    }
}
