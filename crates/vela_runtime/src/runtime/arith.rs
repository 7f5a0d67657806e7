//! Value-level entry points into the numeric tower.

use super::Runtime;
use crate::core::{ManagedObject, Value};
use crate::errors::{VResult, ValueError};
use crate::numeric::{self, ArithOp, BitOp, Int, Number};
use std::cmp::Ordering;

impl Runtime {
    /// Lifts a numeric value into a [`Number`]; `None` for anything else.
    pub fn number(&self, v: Value) -> Option<Number> {
        Some(match v {
            Value::SmallInt(i) => Number::Int(Int::Small(i)),
            Value::Float(f) => Number::Float(f),
            Value::Int8(i) => Number::Int8(i),
            Value::Int16(i) => Number::Int16(i),
            Value::Int32(i) => Number::Int32(i),
            Value::Int64(i) => Number::Int64(i),
            Value::UInt8(i) => Number::UInt8(i),
            Value::UInt16(i) => Number::UInt16(i),
            Value::UInt32(i) => Number::UInt32(i),
            Value::UInt64(i) => Number::UInt64(i),
            Value::Float32(f) => Number::Float32(f),
            Value::Float64(f) => Number::Float64(f),
            Value::Ref(id) => match self.heap.get(id) {
                ManagedObject::BigInt(b) => Number::Int(Int::Big(b.clone())),
                ManagedObject::BigFloat(f) => Number::BigFloat(f.clone()),
                _ => return None,
            },
            _ => return None,
        })
    }

    /// Lowers a [`Number`] back into a value, allocating for `BigInt` and
    /// `BigFloat` results.
    pub fn number_value(&mut self, n: Number) -> Value {
        match n {
            Number::Int(i) => self.int(i),
            Number::Float(f) => Value::Float(f),
            Number::BigFloat(f) => self.big_float(f),
            Number::Int8(i) => Value::Int8(i),
            Number::Int16(i) => Value::Int16(i),
            Number::Int32(i) => Value::Int32(i),
            Number::Int64(i) => Value::Int64(i),
            Number::UInt8(i) => Value::UInt8(i),
            Number::UInt16(i) => Value::UInt16(i),
            Number::UInt32(i) => Value::UInt32(i),
            Number::UInt64(i) => Value::UInt64(i),
            Number::Float32(f) => Value::Float32(f),
            Number::Float64(f) => Value::Float64(f),
        }
    }

    pub fn is_number(&self, v: Value) -> bool {
        self.number(v).is_some()
    }

    /// Both operands as numbers. A non-numeric right operand is a coercion
    /// error naming both classes; a non-numeric receiver lacks the operator.
    fn operands(&self, a: Value, b: Value, op: &str) -> VResult<(Number, Number)> {
        let Some(x) = self.number(a) else {
            return Err(ValueError::NoMethod {
                class: self.class_name_of(a),
                method: op.to_string(),
            });
        };
        let Some(y) = self.number(b) else {
            return Err(ValueError::coercion(self.class_name_of(b), self.class_name_of(a)));
        };
        Ok((x, y))
    }

    fn arith(&mut self, op: ArithOp, symbol: &str, a: Value, b: Value) -> VResult<Value> {
        let (x, y) = self.operands(a, b, symbol)?;
        let result = numeric::arith(op, x, y, self.config.max_pow_bits)?;
        Ok(self.number_value(result))
    }

    pub fn add(&mut self, a: Value, b: Value) -> VResult<Value> {
        self.arith(ArithOp::Add, "+", a, b)
    }

    pub fn subtract(&mut self, a: Value, b: Value) -> VResult<Value> {
        self.arith(ArithOp::Subtract, "-", a, b)
    }

    pub fn multiply(&mut self, a: Value, b: Value) -> VResult<Value> {
        self.arith(ArithOp::Multiply, "*", a, b)
    }

    pub fn divide(&mut self, a: Value, b: Value) -> VResult<Value> {
        self.arith(ArithOp::Divide, "/", a, b)
    }

    pub fn modulo(&mut self, a: Value, b: Value) -> VResult<Value> {
        self.arith(ArithOp::Modulo, "%", a, b)
    }

    pub fn exponentiate(&mut self, a: Value, b: Value) -> VResult<Value> {
        self.arith(ArithOp::Exponentiate, "**", a, b)
    }

    pub fn negate(&mut self, a: Value) -> VResult<Value> {
        let Some(x) = self.number(a) else {
            return Err(ValueError::NoMethod {
                class: self.class_name_of(a),
                method: "-@".to_string(),
            });
        };
        let result = numeric::negate(x);
        Ok(self.number_value(result))
    }

    fn bitwise(&mut self, op: BitOp, symbol: &str, a: Value, b: Value) -> VResult<Value> {
        let (x, y) = self.operands(a, b, symbol)?;
        let result = numeric::bitwise(op, x, y)?;
        Ok(self.number_value(result))
    }

    pub fn bitwise_and(&mut self, a: Value, b: Value) -> VResult<Value> {
        self.bitwise(BitOp::And, "&", a, b)
    }

    pub fn bitwise_or(&mut self, a: Value, b: Value) -> VResult<Value> {
        self.bitwise(BitOp::Or, "|", a, b)
    }

    pub fn bitwise_xor(&mut self, a: Value, b: Value) -> VResult<Value> {
        self.bitwise(BitOp::Xor, "^", a, b)
    }

    pub fn left_shift(&mut self, a: Value, count: Value) -> VResult<Value> {
        let (x, n) = self.operands(a, count, "<<")?;
        let result = numeric::left_shift(x, &n, self.config.max_shift)?;
        Ok(self.number_value(result))
    }

    pub fn right_shift(&mut self, a: Value, count: Value) -> VResult<Value> {
        let (x, n) = self.operands(a, count, ">>")?;
        let result = numeric::right_shift(x, &n, self.config.max_shift)?;
        Ok(self.number_value(result))
    }

    /// Numeric and string ordering. `Ok(None)` when unordered (NaN).
    pub fn compare(&self, a: Value, b: Value) -> VResult<Option<Ordering>> {
        if let (Some(x), Some(y)) = (self.str_of(a), self.str_of(b)) {
            return Ok(Some(x.cmp(y)));
        }
        if self.str_of(a).is_some() {
            return Err(ValueError::coercion(self.class_name_of(b), self.class_name_of(a)));
        }
        let (x, y) = self.operands(a, b, "<=>")?;
        numeric::compare(x, y)
    }

    fn ordered(&self, a: Value, b: Value, accept: fn(Ordering) -> bool) -> VResult<bool> {
        Ok(self.compare(a, b)?.is_some_and(accept))
    }

    pub fn less(&self, a: Value, b: Value) -> VResult<bool> {
        self.ordered(a, b, Ordering::is_lt)
    }

    pub fn less_equal(&self, a: Value, b: Value) -> VResult<bool> {
        self.ordered(a, b, Ordering::is_le)
    }

    pub fn greater(&self, a: Value, b: Value) -> VResult<bool> {
        self.ordered(a, b, Ordering::is_gt)
    }

    pub fn greater_equal(&self, a: Value, b: Value) -> VResult<bool> {
        self.ordered(a, b, Ordering::is_ge)
    }
}
