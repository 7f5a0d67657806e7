use vela_runtime::errors::ErrorKind;
use vela_runtime::{Runtime, Value, ValueError};

fn int(i: i64) -> Value {
    Value::from_small_int(i)
}

#[test]
fn list_concat_accepts_lists_and_tuples() {
    let mut rt = Runtime::new();
    let foo = rt.string("foo");
    let left = rt.array_list(vec![int(2)]);
    let right = rt.array_list(vec![int(3), foo]);
    let joined = rt.array_list_concat(left, right).unwrap();

    let foo_again = rt.string("foo");
    let expected = rt.array_list(vec![int(2), int(3), foo_again]);
    assert!(rt.equal(joined, expected));
    assert_eq!(rt.inspect(joined), "[2, 3, \"foo\"]");
    // Operands are left alone.
    assert_eq!(rt.array_list_length(left).unwrap(), 1);

    let tuple = rt.array_tuple(vec![int(4)]);
    let with_tuple = rt.array_list_concat(left, tuple).unwrap();
    assert_eq!(rt.inspect(with_tuple), "[2, 4]");
}

#[test]
fn list_concat_rejects_other_values() {
    let mut rt = Runtime::new();
    let list = rt.array_list(vec![int(2)]);
    let err = rt.array_list_concat(list, Value::from_int8(5)).unwrap_err();
    assert_eq!(
        err,
        ValueError::TypeCoercion {
            from: "5i8".to_string(),
            into: "[2]".to_string()
        }
    );
    assert_eq!(err.to_string(), "`5i8` cannot be coerced into `[2]`");
}

#[test]
fn indexing() {
    let mut rt = Runtime::new();
    let list = rt.array_list(vec![int(10), int(20), int(30)]);
    assert_eq!(rt.array_list_subscript(list, int(0)).unwrap(), int(10));
    assert_eq!(rt.array_list_subscript(list, int(-1)).unwrap(), int(30));
    assert_eq!(rt.array_list_subscript(list, int(-3)).unwrap(), int(10));
    assert_eq!(rt.array_list_subscript(list, Value::from_uint8(1)).unwrap(), int(20));

    let err = rt.array_list_subscript(list, int(3)).unwrap_err();
    assert_eq!(err.to_string(), "index 3 out of range: -3...3");
    assert_eq!(err.kind(), ErrorKind::IndexError);
    let err = rt.array_list_subscript(list, int(-4)).unwrap_err();
    assert_eq!(err.to_string(), "index -4 out of range: -3...3");

    let err = rt.array_list_subscript(list, Value::from_float(1.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeError);

    rt.array_list_subscript_set(list, int(-2), int(99)).unwrap();
    assert_eq!(rt.inspect(list), "[10, 99, 30]");
    assert!(rt.array_list_subscript_set(list, int(5), int(0)).is_err());

    let empty = rt.array_list(Vec::new());
    let err = rt.array_list_subscript(empty, int(0)).unwrap_err();
    assert_eq!(err.to_string(), "index 0 out of range: 0...0");
}

#[test]
fn append_and_contains() {
    let mut rt = Runtime::new();
    let list = rt.array_list(Vec::new());
    rt.array_list_append(list, int(1)).unwrap();
    let text = rt.string("a");
    rt.array_list_append(list, text).unwrap();
    assert_eq!(rt.array_list_length(list).unwrap(), 2);

    let probe = rt.string("a");
    assert!(rt.array_list_contains(list, probe).unwrap());
    assert!(!rt.array_list_contains(list, Value::from_float(1.0)).unwrap());

    let returned = rt.call_method(list, "<<", &[int(3)]).unwrap();
    assert_eq!(returned, list);
    assert_eq!(rt.call_method(list, "length", &[]).unwrap(), int(3));
}

#[test]
fn repetition() {
    let mut rt = Runtime::new();
    let list = rt.array_list(vec![int(1), int(2)]);
    let twice = rt.array_list_repeat(list, int(2)).unwrap();
    assert_eq!(rt.inspect(twice), "[1, 2, 1, 2]");
    let none = rt.array_list_repeat(list, int(0)).unwrap();
    assert_eq!(rt.inspect(none), "[]");

    let err = rt.array_list_repeat(list, int(-1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRangeError);
    assert_eq!(err.to_string(), "repeat count cannot be negative: -1");
    let err = rt.array_list_repeat(list, int(i64::MAX)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRangeError);

    let tuple = rt.array_tuple(vec![int(7)]);
    let thrice = rt.array_tuple_repeat(tuple, int(3)).unwrap();
    assert_eq!(rt.inspect(thrice), "%[7, 7, 7]");
}

#[test]
fn tuples() {
    let mut rt = Runtime::new();
    let tuple = rt.array_tuple(vec![int(1), int(2)]);
    assert_eq!(rt.array_tuple_length(tuple).unwrap(), 2);
    assert_eq!(rt.array_tuple_subscript(tuple, int(-1)).unwrap(), int(2));
    let err = rt.array_tuple_subscript(tuple, int(2)).unwrap_err();
    assert_eq!(err.to_string(), "index 2 out of range: -2...2");

    let list = rt.array_list(vec![int(3)]);
    let joined = rt.array_tuple_concat(tuple, list).unwrap();
    assert_eq!(rt.inspect(joined), "%[1, 2, 3]");
    assert_eq!(rt.class_name_of(joined), "Std::ArrayTuple");

    assert!(rt.call_method(tuple, "[]=", &[int(0), int(5)]).is_err());

    let other = rt.array_tuple(vec![int(1), int(2)]);
    assert!(rt.equal(tuple, other));
    let as_list = rt.array_list(vec![int(1), int(2)]);
    assert!(!rt.equal(tuple, as_list));
}

#[test]
fn range_inspection() {
    let mut rt = Runtime::new();
    let endless = rt.new_range(int(3), Value::NIL, false);
    assert_eq!(rt.inspect(endless), "3..");
    let beginless = rt.new_range(Value::NIL, int(5), true);
    assert_eq!(rt.inspect(beginless), "...5");
    let closed = rt.new_range(int(1), int(5), false);
    assert_eq!(rt.inspect(closed), "1..5");
    let open = rt.new_range(int(1), int(5), true);
    assert_eq!(rt.inspect(open), "1...5");
    assert_eq!(rt.class_name_of(open), "Std::Range");
}

#[test]
fn range_membership() {
    let mut rt = Runtime::new();
    let closed = rt.new_range(int(1), int(5), false);
    let open = rt.new_range(int(1), int(5), true);
    let endless = rt.new_range(int(3), Value::NIL, false);
    let beginless = rt.new_range(Value::NIL, int(5), true);

    assert!(rt.range_contains(closed, int(5)).unwrap());
    assert!(!rt.range_contains(open, int(5)).unwrap());
    assert!(rt.range_contains(open, Value::from_float(4.5)).unwrap());
    assert!(!rt.range_contains(closed, int(0)).unwrap());
    assert!(rt.range_contains(endless, int(1_000_000)).unwrap());
    assert!(!rt.range_contains(endless, int(2)).unwrap());
    assert!(rt.range_contains(beginless, int(-100)).unwrap());

    let text = rt.string("a");
    assert!(rt.range_contains(closed, text).is_err());
    assert_eq!(rt.call_method(closed, "contains", &[int(3)]).unwrap(), Value::TRUE);
}

#[test]
fn range_to_list() {
    let mut rt = Runtime::new();
    let closed = rt.new_range(int(1), int(4), false);
    let list = rt.range_to_array_list(closed).unwrap();
    assert_eq!(rt.inspect(list), "[1, 2, 3, 4]");

    let open = rt.new_range(int(1), int(4), true);
    let list = rt.call_method(open, "to_list", &[]).unwrap();
    assert_eq!(rt.inspect(list), "[1, 2, 3]");

    let backwards = rt.new_range(int(4), int(1), false);
    let list = rt.range_to_array_list(backwards).unwrap();
    assert_eq!(rt.array_list_length(list).unwrap(), 0);

    let endless = rt.new_range(int(3), Value::NIL, false);
    let err = rt.range_to_array_list(endless).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRangeError);
}

#[test]
fn range_to_list_at_the_int_boundaries() {
    let mut rt = Runtime::new();
    let top = rt.new_range(int(i64::MAX - 2), int(i64::MAX), false);
    let list = rt.range_to_array_list(top).unwrap();
    assert_eq!(rt.array_list_length(list).unwrap(), 3);
    assert_eq!(rt.array_list_subscript(list, int(-1)).unwrap(), int(i64::MAX));

    let top_open = rt.new_range(int(i64::MAX - 2), int(i64::MAX), true);
    let list = rt.range_to_array_list(top_open).unwrap();
    assert_eq!(rt.inspect(list), "[9223372036854775805, 9223372036854775806]");

    let bottom = rt.new_range(int(i64::MIN), int(i64::MIN + 1), false);
    let list = rt.range_to_array_list(bottom).unwrap();
    assert_eq!(rt.array_list_length(list).unwrap(), 2);

    let everything = rt.new_range(int(i64::MIN), int(i64::MAX), false);
    let err = rt.range_to_array_list(everything).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRangeError);
}

#[test]
fn collection_methods_dispatch() {
    let mut rt = Runtime::new();
    let list = rt.array_list(vec![int(1)]);
    let other = rt.array_list(vec![int(2)]);
    let sum = rt.call_method(list, "+", &[other]).unwrap();
    assert_eq!(rt.inspect(sum), "[1, 2]");
    let repeated = rt.call_method(list, "*", &[int(2)]).unwrap();
    assert_eq!(rt.inspect(repeated), "[1, 1]");
    assert_eq!(rt.call_method(sum, "[]", &[int(1)]).unwrap(), int(2));
    rt.call_method(sum, "[]=", &[int(0), int(9)]).unwrap();
    assert_eq!(rt.inspect(sum), "[9, 2]");
    assert_eq!(rt.call_method(sum, "contains", &[int(9)]).unwrap(), Value::TRUE);

    let copy = rt.array_list(vec![int(9), int(2)]);
    assert_eq!(rt.call_method(sum, "==", &[copy]).unwrap(), Value::TRUE);
    assert_eq!(rt.call_method(sum, "!=", &[copy]).unwrap(), Value::FALSE);
}
