//! Assertion macros for keytally harnesses.

/// Assert a snapshot's count for one key.
///
/// ```rust
/// assert_count!(snapshot, "Key.space", 3);
/// ```
#[macro_export]
macro_rules! assert_count {
    ($snapshot:expr, $id:expr, $expected:expr) => {{
        let snapshot: &keytally_core::Snapshot = &$snapshot;
        let id: &str = $id;
        let expected: u64 = $expected;
        let actual = snapshot.get(id);
        if actual != expected {
            panic!(
                "assert_count! failed for {:?}\n  expected: {}\n  actual:   {}\n  tally:    {:?}",
                id,
                expected,
                actual,
                snapshot.as_map()
            );
        }
    }};
}

/// Assert that `first` appears on an earlier line of rendered output than
/// `second`.
#[macro_export]
macro_rules! assert_line_order {
    ($text:expr, $first:expr, $second:expr) => {{
        let text: &str = &$text;
        let line_of = |needle: &str| {
            text.lines().position(|l| l.contains(needle)).unwrap_or_else(|| {
                panic!("assert_line_order! failed: {:?} not found in\n{}", needle, text)
            })
        };
        let (a, b) = (line_of($first), line_of($second));
        if a >= b {
            panic!(
                "assert_line_order! failed: {:?} (line {}) is not before {:?} (line {})\n{}",
                $first, a, $second, b, text
            );
        }
    }};
}
