pub(crate) mod fixtures;

mod property_cursor;

/// Iteration count for the quickcheck properties.
pub(crate) fn quickcheck_tests() -> u64 {
    if cfg!(miri) {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}
