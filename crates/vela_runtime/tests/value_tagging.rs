use proptest::prelude::*;
use vela_runtime::{Runtime, Value};

#[test]
fn inline_constructors_round_trip() {
    assert_eq!(Value::from_int8(-5).as_int8(), Some(-5));
    assert_eq!(Value::from_int16(300).as_int16(), Some(300));
    assert_eq!(Value::from_int32(-70_000).as_int32(), Some(-70_000));
    assert_eq!(Value::from_int64(i64::MIN).as_int64(), Some(i64::MIN));
    assert_eq!(Value::from_uint8(255).as_uint8(), Some(255));
    assert_eq!(Value::from_uint16(65_535).as_uint16(), Some(65_535));
    assert_eq!(Value::from_uint32(u32::MAX).as_uint32(), Some(u32::MAX));
    assert_eq!(Value::from_uint64(u64::MAX).as_uint64(), Some(u64::MAX));
    assert_eq!(Value::from_float32(2.5).as_float32(), Some(2.5));
    assert_eq!(Value::from_float64(-0.25).as_float64(), Some(-0.25));
    assert_eq!(Value::from_bool(true).as_bool(), Some(true));

    for v in [
        Value::NIL,
        Value::TRUE,
        Value::from_small_int(1),
        Value::from_float(1.0),
        Value::from_int8(1),
        Value::from_uint64(1),
        Value::from_float32(1.0),
    ] {
        assert!(!v.is_reference(), "{:?} should be inline", v);
        assert_eq!(v.reference(), None);
    }
}

#[test]
fn accessors_reject_other_discriminants() {
    assert_eq!(Value::from_int8(1).as_int16(), None);
    assert_eq!(Value::from_small_int(1).as_int64(), None);
    assert_eq!(Value::from_float(1.0).as_float64(), None);
}

#[test]
fn references_preserve_identity() {
    let mut rt = Runtime::new();
    let s = rt.string("hello");
    assert!(s.is_reference());
    let id = s.as_reference();
    assert_eq!(Value::from_reference(id), s);
    assert_eq!(rt.str_of(s), Some("hello"));

    let other = rt.string("hello");
    assert_ne!(other.as_reference(), id);
    assert!(rt.equal(s, other));
}

#[test]
#[should_panic]
fn as_reference_panics_on_inline_value() {
    Value::from_small_int(3).as_reference();
}

#[test]
fn class_of_dispatches_on_discriminant() {
    let mut rt = Runtime::new();
    let big = rt.add(Value::from_small_int(i64::MAX), Value::from_small_int(1)).unwrap();
    let list = rt.array_list(vec![]);
    let cases = [
        (Value::NIL, "Std::Nil"),
        (Value::TRUE, "Std::True"),
        (Value::FALSE, "Std::False"),
        (Value::from_small_int(1), "Std::Int"),
        (big, "Std::Int"),
        (Value::from_float(1.0), "Std::Float"),
        (Value::from_int16(1), "Std::Int16"),
        (Value::from_uint32(1), "Std::UInt32"),
        (Value::from_float64(1.0), "Std::Float64"),
        (list, "Std::ArrayList"),
    ];
    for (value, name) in cases {
        assert_eq!(rt.class_name_of(value), name);
    }
    let sym = rt.symbol("foo");
    assert_eq!(rt.class_name_of(sym), "Std::Symbol");
    let s = rt.string("x");
    assert_eq!(rt.class_name_of(s), "Std::String");
}

#[test]
fn inspect_primitives() {
    let mut rt = Runtime::new();
    let cases = [
        (Value::NIL, "nil"),
        (Value::TRUE, "true"),
        (Value::from_small_int(5), "5"),
        (Value::from_small_int(-12), "-12"),
        (Value::from_float(2.5), "2.5"),
        (Value::from_float(5.0), "5.0"),
        (Value::from_float(f64::NAN), "NaN"),
        (Value::from_float(f64::INFINITY), "+Inf"),
        (Value::from_float(f64::NEG_INFINITY), "-Inf"),
        (Value::from_int8(5), "5i8"),
        (Value::from_uint16(5), "5u16"),
        (Value::from_int64(-3), "-3i64"),
        (Value::from_float32(2.5), "2.5f32"),
        (Value::from_float64(2.5), "2.5f64"),
    ];
    for (value, expected) in cases {
        assert_eq!(rt.inspect(value), expected);
    }
    let sym = rt.symbol("foo");
    assert_eq!(rt.inspect(sym), ":foo");
    let odd = rt.symbol("foo bar");
    assert_eq!(rt.inspect(odd), ":\"foo bar\"");
    let s = rt.string("fo\"o\n");
    assert_eq!(rt.inspect(s), "\"fo\\\"o\\n\"");
    let bf = rt.parse_big_float("2.5", None).unwrap();
    assert_eq!(rt.inspect(bf), "2.5bf");
}

#[test]
fn inspect_collections() {
    let mut rt = Runtime::new();
    let one = Value::from_small_int(1);
    let two = Value::from_small_int(2);
    let list = rt.array_list(vec![one, two]);
    assert_eq!(rt.inspect(list), "[1, 2]");
    let tuple = rt.array_tuple(vec![one, two]);
    assert_eq!(rt.inspect(tuple), "%[1, 2]");
    let map = rt.hash_map_from_pairs(&[(one, two)]).unwrap();
    assert_eq!(rt.inspect(map), "{1 => 2}");
    let record = rt.hash_record_from_pairs(&[(one, two)]);
    assert_eq!(rt.inspect(record), "%{1 => 2}");
    let set = rt.hash_set_from(&[one]).unwrap();
    assert_eq!(rt.inspect(set), "^[1]");
    let empty = rt.new_hash_map();
    assert_eq!(rt.inspect(empty), "{}");
}

#[test]
fn inspect_guards_against_cycles() {
    let mut rt = Runtime::new();
    let list = rt.array_list(vec![Value::from_small_int(1)]);
    rt.array_list_append(list, list).unwrap();
    assert_eq!(rt.inspect(list), "[1, ...]");
}

#[test]
fn inspect_objects_and_classes() {
    let mut rt = Runtime::new();
    let std = rt.std().clone();
    let foo = rt.define_class(std.std, "Foo", None).unwrap();
    assert_eq!(rt.inspect(Value::Ref(foo)), "Std::Foo");
    let obj = rt.create_instance(foo).unwrap();
    let a = rt.intern("a");
    rt.set_ivar(obj, a, Value::from_small_int(1)).unwrap();
    let expected = format!("Std::Foo{{&: {:#x}, a: 1}}", obj.as_reference().0);
    assert_eq!(rt.inspect(obj), expected);
}

proptest! {
    #[test]
    fn small_int_round_trips(i in any::<i64>()) {
        let v = Value::from_small_int(i);
        prop_assert_eq!(v.as_small_int(), Some(i));
        prop_assert!(!v.is_reference());
    }

    #[test]
    fn float64_round_trips_bitwise(bits in any::<u64>()) {
        let f = f64::from_bits(bits);
        let v = Value::from_float64(f);
        prop_assert_eq!(v.as_float64().map(f64::to_bits), Some(bits));
        prop_assert!(v.is_identical(&Value::from_float64(f)));
    }
}
