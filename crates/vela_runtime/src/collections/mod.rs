//! Collections: open-addressed hash tables, lists, tuples and ranges.

mod array_list;
mod hash_key;
mod hash_map;
mod hash_record;
mod hash_set;
mod range;
pub mod table;

pub use hash_map::HashMap;
pub use hash_record::HashRecord;
pub use hash_set::HashSet;
pub use range::Range;
pub use table::{KeyedTable, OpenTable, Slot, hash_one, table_hasher};
