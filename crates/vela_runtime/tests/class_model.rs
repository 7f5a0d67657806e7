use vela_runtime::errors::ErrorKind;
use vela_runtime::{Method, ObjectId, Runtime, VResult, Value, ValueError};

fn answer_parent(_: &mut Runtime, _: Value, _: &[Value]) -> VResult<Value> {
    Ok(Value::from_small_int(1))
}

fn answer_child(_: &mut Runtime, _: Value, _: &[Value]) -> VResult<Value> {
    Ok(Value::from_small_int(2))
}

fn answer_mixin(_: &mut Runtime, _: Value, _: &[Value]) -> VResult<Value> {
    Ok(Value::from_small_int(3))
}

fn setup() -> (Runtime, ObjectId) {
    let rt = Runtime::new();
    let ns = rt.std().std;
    (rt, ns)
}

#[test]
fn lookup_prefers_own_definition_then_parent() {
    let (mut rt, ns) = setup();
    let parent = rt.define_class(ns, "Parent", None).unwrap();
    let child = rt.define_class(ns, "Child", Some(parent)).unwrap();
    rt.define_method(parent, "m", answer_parent).unwrap();
    rt.define_method(child, "m", answer_child).unwrap();
    let m = rt.intern("m");

    let found = rt.lookup_method(child, m).unwrap();
    assert_eq!(found.owner, Some(child));

    assert!(rt.remove_method(child, m).unwrap().is_some());
    let found = rt.lookup_method(child, m).unwrap();
    assert_eq!(found.owner, Some(parent));

    let missing = rt.intern("missing");
    assert!(rt.lookup_method(child, missing).is_none());
}

#[test]
fn mixin_inclusion_preserves_order() {
    let (mut rt, ns) = setup();
    let object = rt.std().object;
    let inner = rt.define_mixin(ns, "Inner").unwrap();
    let outer = rt.define_mixin(ns, "Outer").unwrap();
    rt.define_method(inner, "only_inner", answer_mixin).unwrap();
    rt.define_method(outer, "shared", answer_mixin).unwrap();
    rt.include_mixin(outer, inner).unwrap();

    let class = rt.define_class(ns, "Host", None).unwrap();
    let outer_methods = rt.heap().class(outer).methods.len();
    rt.include_mixin(class, outer).unwrap();

    let chain = rt.ancestors(class);
    assert_eq!(chain[0], class);
    let first = rt.heap().class(chain[1]);
    let second = rt.heap().class(chain[2]);
    assert!(first.is_proxy() && second.is_proxy());
    assert_eq!(first.proxied, Some(outer));
    assert_eq!(second.proxied, Some(inner));
    assert_eq!(chain[3], object);

    let only_inner = rt.intern("only_inner");
    let found = rt.lookup_method(class, only_inner).unwrap();
    assert_eq!(found.owner, Some(inner));

    // The mixin itself is untouched.
    assert_eq!(rt.heap().class(outer).methods.len(), outer_methods);
    assert_eq!(rt.ancestors(outer).len(), 2);

    let instance = rt.create_instance(class).unwrap();
    assert!(rt.is_a(instance, outer));
    assert!(rt.is_a(instance, inner));
    assert!(rt.includes_mixin(class, outer));
    assert_eq!(rt.call_method(instance, "only_inner", &[]).unwrap(), Value::from_small_int(3));
}

#[test]
fn including_twice_creates_two_proxy_chains() {
    let (mut rt, ns) = setup();
    let mixin = rt.define_mixin(ns, "Twice").unwrap();
    let class = rt.define_class(ns, "Twiced", None).unwrap();
    rt.include_mixin(class, mixin).unwrap();
    rt.include_mixin(class, mixin).unwrap();
    let proxies = rt
        .ancestors(class)
        .iter()
        .filter(|&&id| rt.heap().class(id).proxied == Some(mixin))
        .count();
    assert_eq!(proxies, 2);
}

#[test]
fn include_rejects_non_mixins() {
    let (mut rt, ns) = setup();
    let class = rt.define_class(ns, "A", None).unwrap();
    let other = rt.define_class(ns, "B", None).unwrap();
    let err = rt.include_mixin(class, other).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeError);
}

#[test]
fn sealed_method_cannot_be_overridden() {
    let (mut rt, ns) = setup();
    let parent = rt.define_class(ns, "Sealer", None).unwrap();
    let child = rt.define_class(ns, "Overrider", Some(parent)).unwrap();
    let m = rt.intern("m");
    rt.attach_method(parent, Method::native(m, answer_parent).sealed()).unwrap();

    let err = rt.attach_method(child, Method::native(m, answer_child)).unwrap_err();
    assert_eq!(
        err,
        ValueError::SealedMethod {
            class: "Std::Sealer".to_string(),
            method: "m".to_string()
        }
    );
    assert!(rt.heap().class(child).methods.is_empty());
    assert_eq!(rt.lookup_method(child, m).unwrap().owner, Some(parent));

    // Redefining in the sealing class itself is refused too.
    let err = rt.attach_method(parent, Method::native(m, answer_child)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SealedMethodError);
}

#[test]
fn mixin_cannot_override_sealed_method() {
    let (mut rt, ns) = setup();
    let parent = rt.define_class(ns, "Base", None).unwrap();
    let child = rt.define_class(ns, "Derived", Some(parent)).unwrap();
    let mixin = rt.define_mixin(ns, "Sneaky").unwrap();
    let m = rt.intern("m");
    rt.attach_method(parent, Method::native(m, answer_parent).sealed()).unwrap();
    rt.attach_method(mixin, Method::native(m, answer_mixin)).unwrap();

    let before = rt.ancestors(child);
    let err = rt.include_mixin(child, mixin).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SealedMethodError);
    assert_eq!(rt.ancestors(child), before);
}

#[test]
fn singleton_class_is_created_once() {
    let (mut rt, ns) = setup();
    let class = rt.define_class(ns, "Single", None).unwrap();
    let a = rt.create_instance(class).unwrap();
    let b = rt.create_instance(class).unwrap();

    let singleton = rt.singleton_class(a).unwrap();
    assert_eq!(rt.singleton_class(a).unwrap(), singleton);
    assert_eq!(rt.heap().class(singleton).parent, Some(class));
    assert!(rt.is_a(a, class));

    let greet = rt.intern("greet");
    rt.define_singleton_method(a, Method::native(greet, answer_child)).unwrap();
    assert_eq!(rt.call_method(a, "greet", &[]).unwrap(), Value::from_small_int(2));
    assert_eq!(
        rt.call_method(b, "greet", &[]).unwrap_err(),
        ValueError::NoMethod {
            class: "Std::Single".to_string(),
            method: "greet".to_string()
        }
    );
    assert_eq!(rt.class_name_of(a), "Std::Single");
}

#[test]
fn primitives_have_no_singleton_class() {
    let mut rt = Runtime::new();
    let err = rt.singleton_class(Value::from_small_int(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeError);
}

#[test]
fn class_methods_are_inherited() {
    let (mut rt, ns) = setup();
    let parent = rt.define_class(ns, "Factory", None).unwrap();
    let child = rt.define_class(ns, "SubFactory", Some(parent)).unwrap();
    let make = rt.intern("make");
    rt.define_singleton_method(Value::Ref(parent), Method::native(make, answer_parent)).unwrap();
    assert_eq!(rt.call_method(Value::Ref(child), "make", &[]).unwrap(), Value::from_small_int(1));
}

#[test]
fn instantiation_rules() {
    let (mut rt, ns) = setup();
    let std = rt.std().clone();
    assert_eq!(rt.create_instance(std.int).unwrap_err().kind(), ErrorKind::TypeError);

    let mixin = rt.define_mixin(ns, "NotInstantiable").unwrap();
    assert_eq!(rt.create_instance(mixin).unwrap_err().kind(), ErrorKind::TypeError);

    let shape = rt.define_class(ns, "Shape", None).unwrap();
    rt.set_abstract(shape).unwrap();
    assert_eq!(rt.create_instance(shape).unwrap_err().kind(), ErrorKind::TypeError);

    let err = rt.define_class(ns, "MyInt", Some(std.int)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeError);
}

#[test]
fn reopening_a_class_returns_it() {
    let (mut rt, ns) = setup();
    let first = rt.define_class(ns, "Again", None).unwrap();
    let second = rt.define_class(ns, "Again", None).unwrap();
    assert_eq!(first, second);
    let other = rt.define_class(ns, "Other", None).unwrap();
    assert!(rt.define_class(ns, "Again", Some(other)).is_err());
}

#[test]
fn constants_resolve_through_ancestors() {
    let (mut rt, ns) = setup();
    let parent = rt.define_class(ns, "Holder", None).unwrap();
    let child = rt.define_class(ns, "SubHolder", Some(parent)).unwrap();
    rt.define_constant(parent, "LIMIT", Value::from_small_int(10)).unwrap();

    assert_eq!(rt.constant(parent, "LIMIT"), Some(Value::from_small_int(10)));
    assert_eq!(rt.constant(child, "LIMIT"), None);
    assert_eq!(rt.lookup_constant(child, "LIMIT"), Some(Value::from_small_int(10)));
    assert_eq!(rt.lookup_constant(child, "Int"), Some(Value::Ref(rt.std().int)));

    let once = rt.std().once;
    assert_eq!(rt.resolve_constant("Std::Sync::Once").unwrap(), Value::Ref(once));
    assert_eq!(
        rt.resolve_constant("Std::Nope::Deeper").unwrap_err(),
        ValueError::UndefinedConstant {
            name: "Std::Nope".to_string()
        }
    );
}

#[test]
fn accessors_and_instance_variables() {
    let (mut rt, ns) = setup();
    let class = rt.define_class(ns, "Person", None).unwrap();
    rt.define_accessor(class, "name").unwrap();
    let person = rt.create_instance(class).unwrap();

    assert_eq!(rt.call_method(person, "name", &[]).unwrap(), Value::NIL);
    let name = rt.string("Ada");
    rt.call_method(person, "name=", &[name]).unwrap();
    assert_eq!(rt.call_method(person, "name", &[]).unwrap(), name);

    let ivar = rt.intern("name");
    assert_eq!(rt.get_ivar(person, ivar), Some(name));
}

#[test]
fn no_ivars_trait_blocks_instance_variables() {
    let (mut rt, ns) = setup();
    let class = rt.define_class(ns, "Bare", None).unwrap();
    rt.set_no_ivars(class).unwrap();
    let obj = rt.create_instance(class).unwrap();
    let x = rt.intern("x");
    assert_eq!(rt.set_ivar(obj, x, Value::NIL).unwrap_err().kind(), ErrorKind::TypeError);
    assert_eq!(
        rt.set_ivar(Value::from_small_int(1), x, Value::NIL).unwrap_err().kind(),
        ErrorKind::TypeError
    );
}

#[test]
fn call_method_dispatches_natives() {
    let mut rt = Runtime::new();
    let sum = rt
        .call_method(Value::from_small_int(2), "+", &[Value::from_small_int(3)])
        .unwrap();
    assert_eq!(sum, Value::from_small_int(5));
    let lt = rt
        .call_method(Value::from_int8(2), "<", &[Value::from_int8(3)])
        .unwrap();
    assert_eq!(lt, Value::TRUE);
    let err = rt.call_method(Value::NIL, "+", &[Value::NIL]).unwrap_err();
    assert_eq!(
        err,
        ValueError::NoMethod {
            class: "Std::Nil".to_string(),
            method: "+".to_string()
        }
    );
    let arity = rt.call_method(Value::from_small_int(1), "+", &[]).unwrap_err();
    assert_eq!(arity.kind(), ErrorKind::TypeError);
}

#[test]
fn errors_become_error_objects() {
    let mut rt = Runtime::new();
    let std = rt.std().clone();
    let err = rt.divide(Value::from_small_int(1), Value::from_small_int(0)).unwrap_err();
    let value = rt.error_value(&err);
    assert!(rt.is_a(value, std.error_class(ErrorKind::ZeroDivisionError)));
    assert!(rt.is_a(value, std.error));
    assert_eq!(rt.class_name_of(value), "Std::ZeroDivisionError");
    let message = rt.call_method(value, "message", &[]).unwrap();
    assert_eq!(rt.str_of(message), Some("division by zero"));
}

#[test]
fn class_operations_reject_non_class_ids() {
    let (mut rt, ns) = setup();
    let Value::Ref(list) = rt.array_list(vec![]) else {
        panic!("lists are references");
    };
    let class = rt.define_class(ns, "Target", None).unwrap();
    let mixin = rt.define_mixin(ns, "Extra").unwrap();
    let m = rt.intern("m");

    let kind = |r: VResult<()>| r.unwrap_err().kind();
    assert_eq!(kind(rt.define_method(list, "m", answer_parent)), ErrorKind::TypeError);
    assert_eq!(kind(rt.include_mixin(list, mixin)), ErrorKind::TypeError);
    assert_eq!(kind(rt.include_mixin(class, list)), ErrorKind::TypeError);
    assert_eq!(kind(rt.set_abstract(list)), ErrorKind::TypeError);
    assert_eq!(kind(rt.set_sealed(list)), ErrorKind::TypeError);
    assert_eq!(kind(rt.define_constant(list, "X", Value::NIL)), ErrorKind::TypeError);
    assert_eq!(rt.remove_method(list, m).unwrap_err().kind(), ErrorKind::TypeError);
    assert_eq!(rt.create_instance(list).unwrap_err().kind(), ErrorKind::TypeError);
    assert_eq!(rt.define_class(list, "Inner", None).unwrap_err().kind(), ErrorKind::TypeError);
    assert_eq!(rt.define_class(ns, "Orphan", Some(list)).unwrap_err().kind(), ErrorKind::TypeError);
    assert_eq!(rt.anonymous_class(Some(list)).unwrap_err().kind(), ErrorKind::TypeError);

    let err = rt.create_instance(list).unwrap_err();
    assert_eq!(err.to_string(), "`[]` is not a class");
}
