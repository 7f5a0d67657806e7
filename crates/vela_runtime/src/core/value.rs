//! Runtime value representation.
//!
//! A [`Value`] is a two-word tagged union: primitives are encoded inline and
//! everything variable-sized or mutable lives in the [`Heap`](super::heap::Heap)
//! behind a [`Value::Ref`] handle. The set of discriminants is closed, so an
//! ill-tagged value cannot be constructed.

use super::heap::ObjectId;
use super::symbol::Symbol;
use std::fmt;

#[derive(Copy, Clone, PartialEq)]
pub enum Value {
    /// An absent value, distinct from `nil`. Never produced by user code.
    Undefined,
    Nil,
    Bool(bool),
    /// The small half of the default `Int`. Overflow promotes to a heap `BigInt`.
    SmallInt(i64),
    /// The default `Float`.
    Float(f64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Symbol(Symbol),
    Ref(ObjectId),
}

impl Default for Value {
    fn default() -> Self {
        Self::NIL
    }
}

impl Value {
    pub const NIL: Value = Value::Nil;
    pub const TRUE: Value = Value::Bool(true);
    pub const FALSE: Value = Value::Bool(false);
    pub const UNDEFINED: Value = Value::Undefined;

    #[inline(always)]
    pub fn from_bool(b: bool) -> Self {
        Value::Bool(b)
    }

    #[inline(always)]
    pub fn from_small_int(i: i64) -> Self {
        Value::SmallInt(i)
    }

    #[inline(always)]
    pub fn from_float(f: f64) -> Self {
        Value::Float(f)
    }

    pub fn from_int8(i: i8) -> Self {
        Value::Int8(i)
    }
    pub fn from_int16(i: i16) -> Self {
        Value::Int16(i)
    }
    pub fn from_int32(i: i32) -> Self {
        Value::Int32(i)
    }
    pub fn from_int64(i: i64) -> Self {
        Value::Int64(i)
    }
    pub fn from_uint8(i: u8) -> Self {
        Value::UInt8(i)
    }
    pub fn from_uint16(i: u16) -> Self {
        Value::UInt16(i)
    }
    pub fn from_uint32(i: u32) -> Self {
        Value::UInt32(i)
    }
    pub fn from_uint64(i: u64) -> Self {
        Value::UInt64(i)
    }
    pub fn from_float32(f: f32) -> Self {
        Value::Float32(f)
    }
    pub fn from_float64(f: f64) -> Self {
        Value::Float64(f)
    }
    pub fn from_symbol(s: Symbol) -> Self {
        Value::Symbol(s)
    }

    #[inline(always)]
    pub fn from_reference(id: ObjectId) -> Self {
        Value::Ref(id)
    }

    #[inline(always)]
    pub fn is_reference(&self) -> bool {
        matches!(self, Value::Ref(_))
    }

    /// Returns the heap handle of a reference value.
    ///
    /// Panics when called on an inline value; check [`Value::is_reference`] first.
    #[inline(always)]
    pub fn as_reference(&self) -> ObjectId {
        match self {
            Value::Ref(id) => *id,
            other => panic!("Value::as_reference called on inline value {:?}", other),
        }
    }

    pub fn reference(&self) -> Option<ObjectId> {
        match self {
            Value::Ref(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// `nil` and `false` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false) | Value::Undefined)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
    pub fn as_small_int(&self) -> Option<i64> {
        match self {
            Value::SmallInt(i) => Some(*i),
            _ => None,
        }
    }
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
    pub fn as_int8(&self) -> Option<i8> {
        match self {
            Value::Int8(i) => Some(*i),
            _ => None,
        }
    }
    pub fn as_int16(&self) -> Option<i16> {
        match self {
            Value::Int16(i) => Some(*i),
            _ => None,
        }
    }
    pub fn as_int32(&self) -> Option<i32> {
        match self {
            Value::Int32(i) => Some(*i),
            _ => None,
        }
    }
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }
    pub fn as_uint8(&self) -> Option<u8> {
        match self {
            Value::UInt8(i) => Some(*i),
            _ => None,
        }
    }
    pub fn as_uint16(&self) -> Option<u16> {
        match self {
            Value::UInt16(i) => Some(*i),
            _ => None,
        }
    }
    pub fn as_uint32(&self) -> Option<u32> {
        match self {
            Value::UInt32(i) => Some(*i),
            _ => None,
        }
    }
    pub fn as_uint64(&self) -> Option<u64> {
        match self {
            Value::UInt64(i) => Some(*i),
            _ => None,
        }
    }
    pub fn as_float32(&self) -> Option<f32> {
        match self {
            Value::Float32(f) => Some(*f),
            _ => None,
        }
    }
    pub fn as_float64(&self) -> Option<f64> {
        match self {
            Value::Float64(f) => Some(*f),
            _ => None,
        }
    }
    pub fn as_symbol(&self) -> Option<Symbol> {
        match self {
            Value::Symbol(s) => Some(*s),
            _ => None,
        }
    }

    /// Identity comparison: same discriminant and same payload bits.
    ///
    /// Unlike `==` on floats this treats two NaNs with equal bits as identical.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Float(a), Value::Float(b)) | (Value::Float64(a), Value::Float64(b)) => {
                a.to_bits() == b.to_bits()
            }
            (Value::Float32(a), Value::Float32(b)) => a.to_bits() == b.to_bits(),
            _ => self == other,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::SmallInt(i) => write!(f, "SmallInt({})", i),
            Value::Float(x) => write!(f, "Float({})", x),
            Value::Int8(i) => write!(f, "Int8({})", i),
            Value::Int16(i) => write!(f, "Int16({})", i),
            Value::Int32(i) => write!(f, "Int32({})", i),
            Value::Int64(i) => write!(f, "Int64({})", i),
            Value::UInt8(i) => write!(f, "UInt8({})", i),
            Value::UInt16(i) => write!(f, "UInt16({})", i),
            Value::UInt32(i) => write!(f, "UInt32({})", i),
            Value::UInt64(i) => write!(f, "UInt64({})", i),
            Value::Float32(x) => write!(f, "Float32({})", x),
            Value::Float64(x) => write!(f, "Float64({})", x),
            Value::Symbol(s) => write!(f, "Symbol({})", s.index()),
            Value::Ref(id) => write!(f, "Ref(id={:?})", id),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::Ref(id)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}
