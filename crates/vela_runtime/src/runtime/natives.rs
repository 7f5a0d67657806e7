//! Host methods installed on the bootstrap classes, so that
//! [`Runtime::call_method`] can dispatch operators and the basic protocol.

use super::Runtime;
use crate::core::{ManagedObject, ObjectId, Text, Value};
use crate::errors::{VResult, ValueError};
use crate::object::{Method, NativeFn, check_arity};
use std::cmp::Ordering;
use std::rc::Rc;

fn def(rt: &mut Runtime, class: ObjectId, name: &str, f: NativeFn) {
    let sym = rt.intern(name);
    let mut method = Method::native(sym, f);
    method.owner = Some(class);
    rt.heap.class_mut(class).methods.insert(sym, Rc::new(method));
}

macro_rules! binary {
    ($name:ident, $method:ident) => {
        fn $name(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
            check_arity(args, 1)?;
            rt.$method(recv, args[0])
        }
    };
}

macro_rules! predicate {
    ($name:ident, $method:ident) => {
        fn $name(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
            check_arity(args, 1)?;
            Ok(Value::Bool(rt.$method(recv, args[0])?))
        }
    };
}

binary!(add, add);
binary!(subtract, subtract);
binary!(multiply, multiply);
binary!(divide, divide);
binary!(modulo, modulo);
binary!(exponentiate, exponentiate);
binary!(bitwise_and, bitwise_and);
binary!(bitwise_or, bitwise_or);
binary!(bitwise_xor, bitwise_xor);
binary!(left_shift, left_shift);
binary!(right_shift, right_shift);
predicate!(less, less);
predicate!(less_equal, less_equal);
predicate!(greater, greater);
predicate!(greater_equal, greater_equal);

fn negate(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 0)?;
    rt.negate(recv)
}

fn spaceship(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 1)?;
    Ok(match rt.compare(recv, args[0])? {
        Some(Ordering::Less) => Value::SmallInt(-1),
        Some(Ordering::Equal) => Value::SmallInt(0),
        Some(Ordering::Greater) => Value::SmallInt(1),
        None => Value::Nil,
    })
}

fn equal(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 1)?;
    Ok(Value::Bool(rt.equal(recv, args[0])))
}

fn not_equal(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 1)?;
    Ok(Value::Bool(!rt.equal(recv, args[0])))
}

fn lax_equal(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 1)?;
    Ok(Value::Bool(rt.lax_equal(recv, args[0])))
}

fn inspect(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 0)?;
    let text = rt.inspect(recv);
    Ok(rt.string(&text))
}

fn class(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 0)?;
    let mut class = rt.class_of(recv);
    while rt.heap.class(class).is_singleton() {
        match rt.heap.class(class).parent {
            Some(parent) => class = parent,
            None => break,
        }
    }
    Ok(Value::Ref(class))
}

fn length_value(n: usize) -> Value {
    Value::SmallInt(n as i64)
}

fn string_concat(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 1)?;
    let (Value::Ref(a), Value::Ref(b)) = (recv, args[0]) else {
        return Err(ValueError::coercion(rt.class_name_of(args[0]), "Std::String"));
    };
    let joined = match (rt.heap.str(a), rt.heap.str(b)) {
        (Some(x), Some(y)) => Text::concat2(x, y),
        _ => return Err(ValueError::coercion(rt.class_name_of(args[0]), "Std::String")),
    };
    Ok(rt.alloc(ManagedObject::Str(joined)))
}

fn string_length(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 0)?;
    match recv {
        Value::Ref(id) => match rt.heap.str(id) {
            Some(s) => Ok(length_value(s.char_count())),
            None => Err(ValueError::coercion(rt.class_name_of(recv), "Std::String")),
        },
        _ => Err(ValueError::coercion(rt.class_name_of(recv), "Std::String")),
    }
}

fn list_subscript(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 1)?;
    rt.array_list_subscript(recv, args[0])
}

fn list_subscript_set(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 2)?;
    rt.array_list_subscript_set(recv, args[0], args[1])?;
    Ok(args[1])
}

fn list_append(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 1)?;
    rt.array_list_append(recv, args[0])?;
    Ok(recv)
}

binary!(list_concat, array_list_concat);
binary!(list_repeat, array_list_repeat);
predicate!(list_contains, array_list_contains);

fn list_length(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 0)?;
    Ok(length_value(rt.array_list_length(recv)?))
}

binary!(tuple_subscript, array_tuple_subscript);
binary!(tuple_concat, array_tuple_concat);
binary!(tuple_repeat, array_tuple_repeat);

fn tuple_length(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 0)?;
    Ok(length_value(rt.array_tuple_length(recv)?))
}

fn map_get(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 1)?;
    Ok(rt.hash_map_get(recv, args[0])?.unwrap_or(Value::Nil))
}

fn map_set(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 2)?;
    rt.hash_map_set(recv, args[0], args[1])?;
    Ok(args[1])
}

fn map_delete(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 1)?;
    Ok(rt.hash_map_delete(recv, args[0])?.unwrap_or(Value::Nil))
}

predicate!(map_contains_key, hash_map_contains_key);

fn map_length(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 0)?;
    Ok(length_value(rt.hash_map_length(recv)?))
}

fn map_capacity(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 0)?;
    Ok(length_value(rt.hash_map_capacity(recv)?))
}

fn set_add(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 1)?;
    rt.hash_set_add(recv, args[0])?;
    Ok(recv)
}

predicate!(set_contains, hash_set_contains);
predicate!(set_delete, hash_set_delete);

fn set_length(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 0)?;
    Ok(length_value(rt.hash_set_length(recv)?))
}

fn record_get(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 1)?;
    Ok(rt.hash_record_get(recv, args[0])?.unwrap_or(Value::Nil))
}

fn record_set(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 2)?;
    rt.hash_record_set(recv, args[0], args[1])?;
    Ok(args[1])
}

fn record_length(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 0)?;
    Ok(length_value(rt.hash_record_length(recv)?))
}

predicate!(range_contains, range_contains);

fn range_to_list(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 0)?;
    rt.range_to_array_list(recv)
}

fn wait_group_add(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 1)?;
    let delta = rt
        .number(args[0])
        .and_then(|n| n.to_i64())
        .ok_or_else(|| ValueError::coercion(rt.class_name_of(args[0]), "Std::Int"))?;
    rt.wait_group(recv)?.add(delta)?;
    Ok(Value::Nil)
}

fn wait_group_done(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 0)?;
    rt.wait_group(recv)?.done()?;
    Ok(Value::Nil)
}

fn wait_group_wait(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 0)?;
    rt.wait_group(recv)?.wait();
    Ok(Value::Nil)
}

fn once_completed(rt: &mut Runtime, recv: Value, args: &[Value]) -> VResult<Value> {
    check_arity(args, 0)?;
    Ok(Value::Bool(rt.once(recv)?.is_completed()))
}

pub(super) fn register(rt: &mut Runtime) {
    let std = rt.std.clone();

    def(rt, std.value, "inspect", inspect);
    def(rt, std.value, "class", class);
    def(rt, std.value, "==", equal);
    def(rt, std.value, "!=", not_equal);
    def(rt, std.value, "=~", lax_equal);

    for numeric in std.numeric() {
        def(rt, numeric, "+", add);
        def(rt, numeric, "-", subtract);
        def(rt, numeric, "*", multiply);
        def(rt, numeric, "/", divide);
        def(rt, numeric, "%", modulo);
        def(rt, numeric, "**", exponentiate);
        def(rt, numeric, "-@", negate);
        def(rt, numeric, "<=>", spaceship);
        def(rt, numeric, "<", less);
        def(rt, numeric, "<=", less_equal);
        def(rt, numeric, ">", greater);
        def(rt, numeric, ">=", greater_equal);
    }
    let integers = [
        std.int, std.int8, std.int16, std.int32, std.int64, std.uint8, std.uint16, std.uint32, std.uint64,
    ];
    for integer in integers {
        def(rt, integer, "&", bitwise_and);
        def(rt, integer, "|", bitwise_or);
        def(rt, integer, "^", bitwise_xor);
        def(rt, integer, "<<", left_shift);
        def(rt, integer, ">>", right_shift);
    }

    def(rt, std.string, "+", string_concat);
    def(rt, std.string, "length", string_length);
    def(rt, std.string, "<=>", spaceship);
    def(rt, std.string, "<", less);
    def(rt, std.string, ">", greater);

    def(rt, std.array_list, "[]", list_subscript);
    def(rt, std.array_list, "[]=", list_subscript_set);
    def(rt, std.array_list, "<<", list_append);
    def(rt, std.array_list, "+", list_concat);
    def(rt, std.array_list, "concat", list_concat);
    def(rt, std.array_list, "*", list_repeat);
    def(rt, std.array_list, "contains", list_contains);
    def(rt, std.array_list, "length", list_length);

    def(rt, std.array_tuple, "[]", tuple_subscript);
    def(rt, std.array_tuple, "+", tuple_concat);
    def(rt, std.array_tuple, "concat", tuple_concat);
    def(rt, std.array_tuple, "*", tuple_repeat);
    def(rt, std.array_tuple, "length", tuple_length);

    def(rt, std.hash_map, "[]", map_get);
    def(rt, std.hash_map, "[]=", map_set);
    def(rt, std.hash_map, "delete", map_delete);
    def(rt, std.hash_map, "contains_key", map_contains_key);
    def(rt, std.hash_map, "length", map_length);
    def(rt, std.hash_map, "capacity", map_capacity);

    def(rt, std.hash_set, "<<", set_add);
    def(rt, std.hash_set, "contains", set_contains);
    def(rt, std.hash_set, "delete", set_delete);
    def(rt, std.hash_set, "length", set_length);

    def(rt, std.hash_record, "[]", record_get);
    def(rt, std.hash_record, "[]=", record_set);
    def(rt, std.hash_record, "length", record_length);

    def(rt, std.range, "contains", range_contains);
    def(rt, std.range, "to_list", range_to_list);

    def(rt, std.wait_group, "add", wait_group_add);
    def(rt, std.wait_group, "done", wait_group_done);
    def(rt, std.wait_group, "wait", wait_group_wait);
    def(rt, std.once, "completed?", once_completed);

    let message = rt.intern("message");
    let mut getter = Method::getter(message, message);
    getter.owner = Some(std.error);
    rt.heap.class_mut(std.error).methods.insert(message, Rc::new(getter));
}
