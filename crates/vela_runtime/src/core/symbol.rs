//! Interned names.
//!
//! Method tables, constant tables and instance variables are keyed by
//! [`Symbol`], so name lookups never touch the heap.

use indexmap::IndexSet;
use std::hash::BuildHasherDefault;

/// An interned name. Cheap to copy and compare; resolve it through the
/// [`SymbolTable`] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    pub fn index(self) -> u32 {
        self.0
    }
}

type SymbolHasher = BuildHasherDefault<ahash::AHasher>;

#[derive(Default)]
pub struct SymbolTable {
    names: IndexSet<Box<str>, SymbolHasher>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, name: &str) -> Symbol {
        if let Some(idx) = self.names.get_index_of(name) {
            return Symbol(idx as u32);
        }
        let (idx, _) = self.names.insert_full(name.into());
        Symbol(idx as u32)
    }

    /// Returns the symbol for `name` if it was interned before.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.names.get_index_of(name).map(|idx| Symbol(idx as u32))
    }

    /// Panics if `sym` was not created by this table.
    pub fn name(&self, sym: Symbol) -> &str {
        self.names
            .get_index(sym.0 as usize)
            .expect("symbol from a foreign table")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
