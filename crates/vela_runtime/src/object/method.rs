//! Method records stored in class method tables.

use crate::core::{ObjectId, Symbol, Value};
use crate::errors::VResult;
use crate::runtime::Runtime;

/// Signature of a host-implemented method: `(runtime, receiver, args)`.
pub type NativeFn = fn(&mut Runtime, Value, &[Value]) -> VResult<Value>;

#[derive(Clone, Copy)]
pub enum MethodKind {
    Native(NativeFn),
    /// Reads the named instance variable, `nil` when unset.
    Getter(Symbol),
    /// Writes its single argument into the named instance variable.
    Setter(Symbol),
}

#[derive(Clone)]
pub struct Method {
    pub name: Symbol,
    /// The class, mixin or module the method was defined in. Proxies share
    /// method records with their mixin, so this is never a proxy.
    pub owner: Option<ObjectId>,
    pub sealed: bool,
    pub kind: MethodKind,
}

impl Method {
    pub fn native(name: Symbol, f: NativeFn) -> Self {
        Self {
            name,
            owner: None,
            sealed: false,
            kind: MethodKind::Native(f),
        }
    }

    pub fn getter(name: Symbol, ivar: Symbol) -> Self {
        Self {
            name,
            owner: None,
            sealed: false,
            kind: MethodKind::Getter(ivar),
        }
    }

    pub fn setter(name: Symbol, ivar: Symbol) -> Self {
        Self {
            name,
            owner: None,
            sealed: false,
            kind: MethodKind::Setter(ivar),
        }
    }

    pub fn sealed(mut self) -> Self {
        self.sealed = true;
        self
    }
}

impl std::fmt::Debug for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            MethodKind::Native(_) => "native",
            MethodKind::Getter(_) => "getter",
            MethodKind::Setter(_) => "setter",
        };
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("sealed", &self.sealed)
            .field("kind", &kind)
            .finish()
    }
}

/// Fails with a `TypeError` unless exactly `expected` arguments were passed.
pub fn check_arity(args: &[Value], expected: usize) -> VResult<()> {
    if args.len() != expected {
        return Err(crate::errors::ValueError::type_error(format!(
            "wrong number of arguments, given: {}, expected: {}",
            args.len(),
            expected
        )));
    }
    Ok(())
}
