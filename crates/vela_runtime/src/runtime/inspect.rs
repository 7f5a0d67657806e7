//! Debug representation of values, as shown by a REPL.

use super::Runtime;
use crate::core::{ManagedObject, ObjectId, Symbol, Value};
use crate::numeric::float::{format_f32, format_f64};
use smallvec::SmallVec;
use std::fmt::Write;

/// References currently being printed; a repeat means a cycle.
type Seen = SmallVec<[ObjectId; 8]>;

fn push_int(out: &mut String, i: impl itoa::Integer, suffix: &str) {
    let mut buf = itoa::Buffer::new();
    out.push_str(buf.format(i));
    out.push_str(suffix);
}

/// Quotes and escapes a string the way a literal is written.
pub(crate) fn quote(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{1b}' => out.push_str("\\e"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    let rest: Vec<char> = chars.collect();
    let body = match rest.last() {
        Some('?' | '!' | '=') => &rest[..rest.len() - 1],
        _ => &rest[..],
    };
    body.iter().all(|c| c.is_alphanumeric() || *c == '_')
}

impl Runtime {
    pub fn inspect(&self, v: Value) -> String {
        let mut out = String::new();
        let mut seen = Seen::new();
        self.inspect_into(&mut out, v, &mut seen);
        out
    }

    fn inspect_symbol(&self, out: &mut String, sym: Symbol) {
        let name = self.symbol_name(sym);
        out.push(':');
        if is_plain_identifier(name) {
            out.push_str(name);
        } else {
            quote(out, name);
        }
    }

    fn inspect_into(&self, out: &mut String, v: Value, seen: &mut Seen) {
        match v {
            Value::Undefined => out.push_str("undefined"),
            Value::Nil => out.push_str("nil"),
            Value::Bool(b) => out.push_str(if b { "true" } else { "false" }),
            Value::SmallInt(i) => push_int(out, i, ""),
            Value::Float(f) => out.push_str(&format_f64(f)),
            Value::Int8(i) => push_int(out, i, "i8"),
            Value::Int16(i) => push_int(out, i, "i16"),
            Value::Int32(i) => push_int(out, i, "i32"),
            Value::Int64(i) => push_int(out, i, "i64"),
            Value::UInt8(i) => push_int(out, i, "u8"),
            Value::UInt16(i) => push_int(out, i, "u16"),
            Value::UInt32(i) => push_int(out, i, "u32"),
            Value::UInt64(i) => push_int(out, i, "u64"),
            Value::Float32(f) => {
                out.push_str(&format_f32(f));
                out.push_str("f32");
            }
            Value::Float64(f) => {
                out.push_str(&format_f64(f));
                out.push_str("f64");
            }
            Value::Symbol(sym) => self.inspect_symbol(out, sym),
            Value::Ref(id) => self.inspect_ref(out, id, seen),
        }
    }

    fn inspect_ref(&self, out: &mut String, id: ObjectId, seen: &mut Seen) {
        if seen.contains(&id) {
            out.push_str("...");
            return;
        }
        match self.heap.get(id) {
            ManagedObject::Str(s) => quote(out, s.as_str()),
            ManagedObject::BigInt(b) => out.push_str(&b.to_string()),
            ManagedObject::BigFloat(f) => {
                out.push_str(&f.to_decimal_string());
                out.push_str("bf");
            }
            ManagedObject::Class(_) => out.push_str(&self.class_name(id)),
            ManagedObject::Range(r) => {
                seen.push(id);
                if !r.from.is_nil() {
                    self.inspect_into(out, r.from, seen);
                }
                out.push_str(if r.exclusive { "..." } else { ".." });
                if !r.to.is_nil() {
                    self.inspect_into(out, r.to, seen);
                }
                seen.pop();
            }
            ManagedObject::ArrayList(items) => self.inspect_sequence(out, id, "[", items, seen),
            ManagedObject::ArrayTuple(items) => self.inspect_sequence(out, id, "%[", items, seen),
            ManagedObject::HashSet(set) => {
                let items: Vec<Value> = set.iter().copied().collect();
                self.inspect_sequence(out, id, "^[", &items, seen);
            }
            ManagedObject::HashMap(map) => {
                let entries: Vec<(Value, Value)> = map.iter().map(|(k, v)| (*k, *v)).collect();
                self.inspect_pairs(out, id, "{", &entries, seen);
            }
            ManagedObject::HashRecord(record) => {
                let entries: Vec<(Value, Value)> = record.iter().map(|(k, v)| (*k, *v)).collect();
                self.inspect_pairs(out, id, "%{", &entries, seen);
            }
            ManagedObject::Object(obj) => {
                let mut ivars: Vec<(Symbol, Value)> = obj.ivars.iter().map(|(k, v)| (*k, *v)).collect();
                ivars.sort_by_key(|(k, _)| *k);
                let _ = write!(out, "{}{{&: {:#x}", self.class_name_of(Value::Ref(id)), id.0);
                seen.push(id);
                for (name, value) in ivars {
                    out.push_str(", ");
                    out.push_str(self.symbol_name(name));
                    out.push_str(": ");
                    self.inspect_into(out, value, seen);
                }
                seen.pop();
                out.push('}');
            }
            ManagedObject::Once(_) | ManagedObject::WaitGroup(_) => {
                let _ = write!(out, "{}{{&: {:#x}}}", self.class_name_of(Value::Ref(id)), id.0);
            }
        }
    }

    fn inspect_sequence(&self, out: &mut String, id: ObjectId, open: &str, items: &[Value], seen: &mut Seen) {
        seen.push(id);
        out.push_str(open);
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.inspect_into(out, *item, seen);
        }
        out.push(']');
        seen.pop();
    }

    fn inspect_pairs(&self, out: &mut String, id: ObjectId, open: &str, entries: &[(Value, Value)], seen: &mut Seen) {
        seen.push(id);
        out.push_str(open);
        for (i, (k, v)) in entries.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.inspect_into(out, *k, seen);
            out.push_str(" => ");
            self.inspect_into(out, *v, seen);
        }
        out.push('}');
        seen.pop();
    }
}
