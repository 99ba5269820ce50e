use serde_capture::template::Template;
use serde_capture::{Cache, Error};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

#[test]
fn test_zero_capacity() {
    let err = Cache::<String, u32>::new(0).unwrap_err();
    assert!(matches!(err, Error::InvalidCapacity { capacity: 0 }));
    assert!(err.to_string().contains("at least 1"));
}

#[test]
fn test_single_flight_under_contention() {
    const THREADS: usize = 8;

    let cache: Arc<Cache<&'static str, u64>> = Arc::new(Cache::new(4).unwrap());
    let calls = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                cache.fetch("answer", || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(20));
                    42
                })
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 42);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_distinct_keys_produce_independently() {
    let cache: Arc<Cache<usize, usize>> = Arc::new(Cache::new(64).unwrap());
    let handles: Vec<_> = (0..16)
        .map(|i| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.fetch(i, || i * 10))
        })
        .collect();

    let mut values: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    values.sort_unstable();
    assert_eq!(values, (0..16).map(|i| i * 10).collect::<Vec<_>>());
    assert_eq!(cache.len(), 16);
}

#[test]
fn test_capacity_is_never_exceeded() {
    let cache = Cache::new(3).unwrap();
    for i in 0..10 {
        cache.fetch(i, || i);
        assert!(cache.len() <= 3);
    }
    assert!(cache.is_full());
    assert!(cache.contains(&9));
    assert!(!cache.contains(&0));
}

#[test]
fn test_recently_fetched_key_survives() {
    let cache = Cache::new(2).unwrap();
    cache.fetch("a", || 1);
    cache.fetch("b", || 2);
    cache.fetch("a", || 0);
    cache.fetch("c", || 3);

    assert_eq!(cache.get(&"a"), Some(1));
    assert_eq!(cache.get(&"b"), None);
    assert_eq!(cache.get(&"c"), Some(3));
}

#[test]
fn test_template_cache() {
    let cache: Cache<String, Arc<Template>> = Cache::new(16).unwrap();
    let text = "{User} did {Action}";

    let first = cache.fetch(text.to_string(), || Arc::new(Template::parse(text)));
    let second = cache.fetch(text.to_string(), || unreachable!("already cached"));
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.holes().count(), 2);
}
