use std::sync::Arc;
use std::thread;

use format_logger::format_cache::{builtin_registry, cached_format_count, compiled};
use format_logger::{Error, FieldDescriptor};

#[test]
fn test_same_text_shares_one_compilation() {
    let first = compiled("cache: %d of %d").unwrap();
    let second = compiled("cache: %d of %d").unwrap();
    assert!(
        Arc::ptr_eq(&first, &second),
        "identical literals must resolve to the same cached format"
    );
}

#[test]
fn test_distinct_texts_get_distinct_formats() {
    let ints = compiled("value %d").unwrap();
    let strings = compiled("value %s").unwrap();
    assert!(!Arc::ptr_eq(&ints, &strings));
    assert_ne!(ints.fields(), strings.fields());
}

#[test]
fn test_compile_errors_repeat_and_miss_the_cache() {
    // A faulty literal fails identically on every call.
    assert!(matches!(
        compiled("broken %"),
        Err(Error::UnterminatedEscape { .. })
    ));
    assert!(matches!(
        compiled("broken %"),
        Err(Error::UnterminatedEscape { .. })
    ));
}

#[test]
fn test_cache_grows_on_first_use() {
    let before = cached_format_count();
    compiled("unique literal for growth test %d").unwrap();
    // Other tests insert concurrently, so only monotonicity is checkable.
    assert!(cached_format_count() > before);
}

#[test]
fn test_concurrent_first_use_converges() {
    // All threads race to compile the same text; whichever insert wins,
    // every caller must end up holding the same cached value.
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| compiled("race: %s took %llu ns").unwrap()))
        .collect();

    let formats: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let reference = compiled("race: %s took %llu ns").unwrap();
    for format in &formats {
        assert_eq!(format.as_ref(), reference.as_ref());
        assert!(Arc::ptr_eq(format, &reference));
    }
}

#[test]
fn test_builtin_registry_backs_the_cache() {
    let registry = builtin_registry();
    assert!(registry.resolve(b'd').is_some());
    assert!(registry.resolve(b'%').is_some());
    assert!(registry.resolve(b'q').is_none());

    let format = compiled("%4s").unwrap();
    assert_eq!(format.fields(), &[FieldDescriptor::fixed_string(4)]);
}
