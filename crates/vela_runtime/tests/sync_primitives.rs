use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use vela_runtime::errors::ErrorKind;
use vela_runtime::sync::{Once, WaitGroup};
use vela_runtime::{Runtime, Value};

#[test]
fn once_runs_a_single_time_across_threads() {
    let once = Arc::new(Once::new());
    let runs = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let once = Arc::clone(&once);
            let runs = Arc::clone(&runs);
            thread::spawn(move || {
                once.call(|| {
                    runs.fetch_add(1, Ordering::SeqCst);
                });
                assert!(once.is_completed());
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(once.is_completed());

    once.call(|| panic!("already ran"));
}

#[test]
fn wait_group_releases_waiter_when_workers_finish() {
    let group = Arc::new(WaitGroup::new());
    let finished = Arc::new(AtomicUsize::new(0));
    group.add(4).unwrap();
    for _ in 0..4 {
        let group = Arc::clone(&group);
        let finished = Arc::clone(&finished);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(5));
            finished.fetch_add(1, Ordering::SeqCst);
            group.done().unwrap();
        });
    }
    group.wait();
    assert_eq!(finished.load(Ordering::SeqCst), 4);
    assert_eq!(group.count(), 0);
}

#[test]
fn wait_on_zero_counter_returns_immediately() {
    let group = WaitGroup::new();
    group.wait();
    group.add(2).unwrap();
    group.add(-2).unwrap();
    group.wait();
}

#[test]
fn wait_group_counter_cannot_go_negative() {
    let group = WaitGroup::new();
    let err = group.done().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRangeError);
    assert_eq!(group.count(), 0);

    group.add(1).unwrap();
    assert!(group.add(-2).is_err());
    assert_eq!(group.count(), 1);
}

#[test]
fn runtime_values_share_the_primitive() {
    let mut rt = Runtime::new();
    let once = rt.new_once();
    assert_eq!(rt.class_name_of(once), "Std::Sync::Once");
    assert!(rt.inspect(once).starts_with("Std::Sync::Once{&: 0x"));
    assert_eq!(rt.call_method(once, "completed?", &[]).unwrap(), Value::FALSE);
    rt.once(once).unwrap().call(|| {});
    assert_eq!(rt.call_method(once, "completed?", &[]).unwrap(), Value::TRUE);

    let group = rt.new_wait_group();
    assert_eq!(rt.class_name_of(group), "Std::Sync::WaitGroup");
    let handle = rt.wait_group(group).unwrap();
    rt.call_method(group, "add", &[Value::from_small_int(2)]).unwrap();
    assert_eq!(handle.count(), 2);

    let worker = {
        let handle = Arc::clone(&handle);
        thread::spawn(move || {
            handle.done().unwrap();
            handle.done().unwrap();
        })
    };
    rt.call_method(group, "wait", &[]).unwrap();
    worker.join().unwrap();
    assert_eq!(handle.count(), 0);

    let err = rt.call_method(group, "done", &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRangeError);
    let err = rt.call_method(group, "add", &[Value::NIL]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeError);
}

#[test]
fn handles_reject_other_values() {
    let mut rt = Runtime::new();
    let list = rt.array_list(Vec::new());
    assert_eq!(rt.once(list).unwrap_err().kind(), ErrorKind::TypeError);
    assert_eq!(rt.wait_group(Value::NIL).unwrap_err().kind(), ErrorKind::TypeError);
}
