use proptest::prelude::*;
use std::collections::BTreeMap;
use vela_runtime::collections::{OpenTable, hash_one};
use vela_runtime::errors::ErrorKind;
use vela_runtime::{Runtime, RuntimeConfig, Value, ValueError};

fn int(i: i64) -> Value {
    Value::from_small_int(i)
}

fn table_insert(table: &mut OpenTable<u64, u64>, key: u64, value: u64) {
    let hash = hash_one(&key);
    match table.find(hash, |k| *k == key) {
        Some(idx) => {
            table.replace_at(idx, value);
        }
        None => table.insert_new(hash, key, value),
    }
}

fn table_remove(table: &mut OpenTable<u64, u64>, key: u64) -> Option<u64> {
    let idx = table.find(hash_one(&key), |k| *k == key)?;
    table.remove_at(idx).map(|(_, v)| v)
}

fn table_get(table: &OpenTable<u64, u64>, key: u64) -> Option<u64> {
    let idx = table.find(hash_one(&key), |k| *k == key)?;
    table.entry_at(idx).map(|(_, v)| *v)
}

#[test]
fn set_get_and_delete() {
    let mut rt = Runtime::new();
    let map = rt.new_hash_map();
    assert_eq!(rt.hash_map_get(map, int(1)).unwrap(), None);

    rt.hash_map_set(map, int(1), int(10)).unwrap();
    rt.hash_map_set(map, int(2), int(20)).unwrap();
    rt.hash_map_set(map, int(1), int(11)).unwrap();
    assert_eq!(rt.hash_map_length(map).unwrap(), 2);
    assert_eq!(rt.hash_map_get(map, int(1)).unwrap(), Some(int(11)));
    assert!(rt.hash_map_contains_key(map, int(2)).unwrap());

    assert_eq!(rt.hash_map_delete(map, int(2)).unwrap(), Some(int(20)));
    assert_eq!(rt.hash_map_delete(map, int(2)).unwrap(), None);
    assert_eq!(rt.hash_map_length(map).unwrap(), 1);
    assert!(!rt.hash_map_contains_key(map, int(2)).unwrap());
}

#[test]
fn strings_and_lists_are_keyed_by_content() {
    let mut rt = Runtime::new();
    let map = rt.new_hash_map();
    let a = rt.string("key");
    let b = rt.string("key");
    rt.hash_map_set(map, a, int(1)).unwrap();
    assert_eq!(rt.hash_map_get(map, b).unwrap(), Some(int(1)));

    let list_a = rt.array_list(vec![int(1), int(2)]);
    let list_b = rt.array_list(vec![int(1), int(2)]);
    rt.hash_map_set(map, list_a, int(2)).unwrap();
    assert_eq!(rt.hash_map_get(map, list_b).unwrap(), Some(int(2)));
    assert_eq!(rt.hash_value(list_a), rt.hash_value(list_b));
}

#[test]
fn numeric_keys_are_strict() {
    let mut rt = Runtime::new();
    let map = rt.new_hash_map();
    rt.hash_map_set(map, int(1), int(1)).unwrap();
    assert_eq!(rt.hash_map_get(map, Value::from_float(1.0)).unwrap(), None);
    assert_eq!(rt.hash_map_get(map, Value::from_int8(1)).unwrap(), None);

    rt.hash_map_set(map, Value::from_float(0.0), int(0)).unwrap();
    assert_eq!(rt.hash_map_get(map, Value::from_float(-0.0)).unwrap(), Some(int(0)));
}

#[test]
fn objects_are_keyed_by_identity() {
    let mut rt = Runtime::new();
    let ns = rt.std().std;
    let class = rt.define_class(ns, "Key", None).unwrap();
    let a = rt.create_instance(class).unwrap();
    let b = rt.create_instance(class).unwrap();
    let map = rt.new_hash_map();
    rt.hash_map_set(map, a, int(1)).unwrap();
    assert_eq!(rt.hash_map_get(map, a).unwrap(), Some(int(1)));
    assert_eq!(rt.hash_map_get(map, b).unwrap(), None);
}

#[test]
fn capacity_follows_configuration() {
    let mut rt = Runtime::with_config(RuntimeConfig {
        initial_table_capacity: 10,
        ..RuntimeConfig::default()
    });
    let map = rt.new_hash_map();
    assert_eq!(rt.hash_map_capacity(map).unwrap(), 16);
    let set = rt.new_hash_set();
    assert_eq!(rt.hash_set_capacity(set).unwrap(), 16);

    let mut rt = Runtime::new();
    let map = rt.new_hash_map();
    assert_eq!(rt.hash_map_capacity(map).unwrap(), 0);
    rt.hash_map_set(map, int(1), int(1)).unwrap();
    assert_eq!(rt.hash_map_capacity(map).unwrap(), 4);
    for i in 2..=4 {
        rt.hash_map_set(map, int(i), int(i)).unwrap();
    }
    assert_eq!(rt.hash_map_capacity(map).unwrap(), 8);
}

#[test]
fn records_are_frozen() {
    let mut rt = Runtime::new();
    let a = rt.symbol("a");
    let b = rt.symbol("b");
    let record = rt.hash_record_from_pairs(&[(a, int(1)), (b, int(2)), (a, int(3))]);
    assert_eq!(rt.hash_record_length(record).unwrap(), 2);
    assert_eq!(rt.hash_record_get(record, a).unwrap(), Some(int(3)));

    let err = rt.hash_record_set(record, a, int(4)).unwrap_err();
    assert_eq!(err, ValueError::Frozen("Std::HashRecord".to_string()));
    assert_eq!(err.kind(), ErrorKind::FrozenError);
    assert!(rt.hash_record_delete(record, a).is_err());
    assert_eq!(rt.hash_record_get(record, a).unwrap(), Some(int(3)));

    let err = rt.call_method(record, "[]=", &[a, int(5)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FrozenError);
}

#[test]
fn sets_ignore_duplicates() {
    let mut rt = Runtime::new();
    let x = rt.string("x");
    let y = rt.string("x");
    let set = rt.hash_set_from(&[int(1), int(1), x, y]).unwrap();
    assert_eq!(rt.hash_set_length(set).unwrap(), 2);
    assert!(!rt.hash_set_add(set, int(1)).unwrap());
    assert!(rt.hash_set_add(set, int(2)).unwrap());
    assert!(rt.hash_set_contains(set, x).unwrap());
    assert!(rt.hash_set_delete(set, x).unwrap());
    assert!(!rt.hash_set_delete(set, x).unwrap());
    assert_eq!(rt.hash_set_length(set).unwrap(), 2);
}

#[test]
fn maps_compare_by_content() {
    let mut rt = Runtime::new();
    let a = rt.hash_map_from_pairs(&[(int(1), int(2)), (int(3), int(4))]).unwrap();
    let b = rt.hash_map_from_pairs(&[(int(3), int(4)), (int(1), int(2))]).unwrap();
    let c = rt.hash_map_from_pairs(&[(int(1), int(2))]).unwrap();
    assert!(rt.equal(a, b));
    assert!(!rt.equal(a, c));
    assert_eq!(rt.hash_value(a), rt.hash_value(b));

    let s1 = rt.hash_set_from(&[int(1), int(2)]).unwrap();
    let s2 = rt.hash_set_from(&[int(2), int(1)]).unwrap();
    assert!(rt.equal(s1, s2));
}

#[test]
fn map_natives() {
    let mut rt = Runtime::new();
    let map = rt.new_hash_map();
    let k = rt.symbol("k");
    rt.call_method(map, "[]=", &[k, int(1)]).unwrap();
    assert_eq!(rt.call_method(map, "[]", &[k]).unwrap(), int(1));
    assert_eq!(rt.call_method(map, "length", &[]).unwrap(), int(1));
    assert_eq!(rt.call_method(map, "contains_key", &[k]).unwrap(), Value::TRUE);
    assert_eq!(rt.call_method(map, "delete", &[k]).unwrap(), int(1));
    assert_eq!(rt.call_method(map, "[]", &[k]).unwrap(), Value::NIL);
}

#[test]
fn empty_table_lookups_miss() {
    let table: OpenTable<u64, u64> = OpenTable::new();
    assert_eq!(table.capacity(), 0);
    assert_eq!(table_get(&table, 7), None);
}

proptest! {
    #[test]
    fn load_factor_stays_below_three_quarters(keys in proptest::collection::vec(any::<u64>(), 0..200)) {
        let mut table = OpenTable::new();
        for key in keys {
            table_insert(&mut table, key, key);
            prop_assert!(table.len() * 4 <= table.capacity() * 3);
            prop_assert!(table.len() <= table.occupied_slots());
            prop_assert!(table.occupied_slots() <= table.capacity());
            prop_assert!(table.capacity().is_power_of_two());
        }
    }

    #[test]
    fn table_behaves_like_a_map(ops in proptest::collection::vec((any::<bool>(), 0u64..32, any::<u64>()), 0..300)) {
        let mut table = OpenTable::new();
        let mut model = BTreeMap::new();
        for (insert, key, value) in ops {
            if insert {
                table_insert(&mut table, key, value);
                model.insert(key, value);
            } else {
                prop_assert_eq!(table_remove(&mut table, key), model.remove(&key));
            }
            prop_assert_eq!(table.len(), model.len());
            prop_assert!(table.occupied_slots() <= table.capacity());
        }
        for (key, value) in &model {
            prop_assert_eq!(table_get(&table, *key), Some(*value));
        }
    }

    #[test]
    fn runtime_map_keeps_its_load_factor(keys in proptest::collection::vec(-1000i64..1000, 0..150)) {
        let mut rt = Runtime::new();
        let map = rt.new_hash_map();
        for key in &keys {
            rt.hash_map_set(map, int(*key), int(*key)).unwrap();
            let len = rt.hash_map_length(map).unwrap();
            let cap = rt.hash_map_capacity(map).unwrap();
            prop_assert!(len * 4 <= cap * 3);
        }
        for key in &keys {
            prop_assert_eq!(rt.hash_map_get(map, int(*key)).unwrap(), Some(int(*key)));
        }
    }
}
