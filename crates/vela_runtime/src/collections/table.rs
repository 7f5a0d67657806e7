//! Open-addressed hash table shared by every hash collection.
//!
//! Slots are probed linearly from `hash & (capacity - 1)`. A deleted slot
//! becomes a tombstone: it still counts as occupied, so probe chains that ran
//! through it stay intact. Each full slot caches its hash, which lets a resize
//! rehash without access to the heap the keys point into.
//!
//! Invariant: `len() <= occupied_slots() <= capacity()` and, after every
//! insertion, `len() / capacity() <= 3/4`.

use std::hash::Hash;

const MIN_CAPACITY: usize = 4;
const LOAD_NUM: usize = 3;
const LOAD_DEN: usize = 4;

#[derive(Clone, Debug)]
pub enum Slot<K, V> {
    Empty,
    Deleted,
    Full { hash: u64, key: K, value: V },
}

impl<K, V> Slot<K, V> {
    fn is_free(&self) -> bool {
        !matches!(self, Slot::Full { .. })
    }
}

#[derive(Clone, Debug)]
pub struct OpenTable<K, V> {
    slots: Vec<Slot<K, V>>,
    occupied: usize,
    elements: usize,
}

impl<K, V> Default for OpenTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-seed hasher so that table layout is reproducible between runs.
pub fn table_hasher() -> ahash::RandomState {
    ahash::RandomState::with_seeds(0, 0, 0, 0)
}

pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    table_hasher().hash_one(value)
}

/// Smallest power-of-two capacity that holds `elements` within the load factor.
fn capacity_for(elements: usize) -> usize {
    if elements == 0 {
        return 0;
    }
    let needed = (elements * LOAD_DEN).div_ceil(LOAD_NUM);
    needed.max(MIN_CAPACITY).next_power_of_two()
}

impl<K, V> OpenTable<K, V> {
    /// A zero-capacity table: every lookup misses without probing.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            occupied: 0,
            elements: 0,
        }
    }

    pub fn with_capacity(elements: usize) -> Self {
        let cap = capacity_for(elements);
        let mut slots = Vec::with_capacity(cap);
        slots.resize_with(cap, || Slot::Empty);
        Self {
            slots,
            occupied: 0,
            elements: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Full slots plus tombstones.
    pub fn occupied_slots(&self) -> usize {
        self.occupied
    }

    #[inline]
    fn start(&self, hash: u64) -> usize {
        (hash as usize) & (self.slots.len() - 1)
    }

    /// Index of the full slot whose key satisfies `eq`, if any.
    pub fn find(&self, hash: u64, mut eq: impl FnMut(&K) -> bool) -> Option<usize> {
        let cap = self.slots.len();
        if cap == 0 || self.elements == 0 {
            return None;
        }
        let mut idx = self.start(hash);
        for _ in 0..cap {
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Deleted => {}
                Slot::Full { hash: h, key, .. } => {
                    if *h == hash && eq(key) {
                        return Some(idx);
                    }
                }
            }
            idx = (idx + 1) & (cap - 1);
        }
        None
    }

    pub fn entry_at(&self, idx: usize) -> Option<(&K, &V)> {
        match self.slots.get(idx)? {
            Slot::Full { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    pub fn value_at_mut(&mut self, idx: usize) -> Option<&mut V> {
        match self.slots.get_mut(idx)? {
            Slot::Full { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Replaces the value of a full slot and returns the previous one.
    pub fn replace_at(&mut self, idx: usize, value: V) -> Option<V> {
        self.value_at_mut(idx).map(|slot| std::mem::replace(slot, value))
    }

    /// Inserts a key that the caller has just looked up with [`OpenTable::find`]
    /// and not found. Grows the table first when the insert would push the load
    /// factor past 3/4.
    pub fn insert_new(&mut self, hash: u64, key: K, value: V) {
        if (self.elements + 1) * LOAD_DEN > self.slots.len() * LOAD_NUM {
            let cap = (self.slots.len() * 2).max(MIN_CAPACITY);
            self.rehash(cap);
        } else if (self.occupied + 1) * LOAD_DEN > self.slots.len() * LOAD_NUM {
            // Mostly tombstones: clean up in place.
            self.rehash(self.slots.len());
        }
        self.place(hash, key, value);
    }

    fn place(&mut self, hash: u64, key: K, value: V) {
        let cap = self.slots.len();
        let mut idx = self.start(hash);
        while !self.slots[idx].is_free() {
            idx = (idx + 1) & (cap - 1);
        }
        if matches!(self.slots[idx], Slot::Empty) {
            self.occupied += 1;
        }
        self.slots[idx] = Slot::Full { hash, key, value };
        self.elements += 1;
    }

    fn rehash(&mut self, new_cap: usize) {
        tracing::trace!(
            from = self.slots.len(),
            to = new_cap,
            elements = self.elements,
            "hash table resize"
        );
        let mut fresh = Vec::with_capacity(new_cap);
        fresh.resize_with(new_cap, || Slot::Empty);
        let old = std::mem::replace(&mut self.slots, fresh);
        self.occupied = 0;
        self.elements = 0;
        for slot in old {
            if let Slot::Full { hash, key, value } = slot {
                self.place(hash, key, value);
            }
        }
    }

    pub fn remove_at(&mut self, idx: usize) -> Option<(K, V)> {
        let slot = self.slots.get_mut(idx)?;
        if slot.is_free() {
            return None;
        }
        match std::mem::replace(slot, Slot::Deleted) {
            Slot::Full { key, value, .. } => {
                self.elements -= 1;
                Some((key, value))
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.occupied = 0;
        self.elements = 0;
    }

    /// Live entries in table order. A resize reshuffles this order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Full { key, value, .. } => Some((key, value)),
            _ => None,
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    /// Live entries with their cached hashes.
    pub fn hashed_entries(&self) -> impl Iterator<Item = (u64, &K, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Full { hash, key, value } => Some((*hash, key, value)),
            _ => None,
        })
    }
}

/// Table keyed by a type with its own `Eq + Hash`, such as [`Symbol`].
///
/// [`Symbol`]: crate::core::symbol::Symbol
#[derive(Clone, Debug)]
pub struct KeyedTable<K, V> {
    table: OpenTable<K, V>,
}

impl<K, V> Default for KeyedTable<K, V> {
    fn default() -> Self {
        Self { table: OpenTable::new() }
    }
}

impl<K: Hash + Eq + Copy, V> KeyedTable<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: K) -> Option<&V> {
        let hash = hash_one(&key);
        let idx = self.table.find(hash, |k| *k == key)?;
        self.table.entry_at(idx).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = hash_one(&key);
        match self.table.find(hash, |k| *k == key) {
            Some(idx) => self.table.replace_at(idx, value),
            None => {
                self.table.insert_new(hash, key, value);
                None
            }
        }
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        let hash = hash_one(&key);
        let idx = self.table.find(hash, |k| *k == key)?;
        self.table.remove_at(idx).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.table.iter()
    }
}
