//! Shared proptest generators for parameter names and listings.

use proptest::prelude::*;

/// Generate a single name segment using the parameter character set.
pub fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{1,12}"
}

/// Generate hierarchical parameter names (`/a/b/c`).
pub fn hierarchical_name_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..5).prop_map(|segments| {
        format!("/{}", segments.join("/"))
    })
}

/// Generate parameter names with or without leading separators, including
/// flat names and names with repeated separators.
pub fn parameter_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        hierarchical_name_strategy(),
        segment_strategy(),
        ("/{0,4}", "[a-z0-9_/.-]{0,30}").prop_map(|(lead, rest)| format!("{lead}{rest}")),
    ]
}

/// Generate a set of distinct hierarchical names whose mapped keys are
/// also distinct, using only separator-free segments.
pub fn collision_free_names_strategy(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z][a-z0-9-]{0,8}", 0..max).prop_map(|set| {
        set.into_iter()
            .map(|leaf| format!("/app/{leaf}"))
            .collect()
    })
}

/// Generate a pair of distinct names that map to the same local key:
/// one uses `_` where the other uses `/`.
pub fn colliding_pair_strategy() -> impl Strategy<Value = (String, String)> {
    ("[a-z]{1,8}", "[a-z]{1,8}", "[a-z]{1,8}").prop_map(|(root, left, right)| {
        (
            format!("/{root}/{left}_{right}"),
            format!("/{root}/{left}/{right}"),
        )
    })
}

/// Generate a page size for paginated listings.
pub fn page_size_strategy() -> impl Strategy<Value = usize> {
    1usize..6
}

/// Generate tag key/value pairs.
pub fn tag_strategy() -> impl Strategy<Value = (String, String)> {
    ("[a-z]{1,8}", "[a-z0-9-]{1,12}")
}
