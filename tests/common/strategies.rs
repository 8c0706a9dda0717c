#![allow(dead_code)] // Each test binary uses a different subset of the helpers.

//! Proptest strategies shared by the property-based tests.

use proptest::prelude::*;

/// Strategy for item sequences handed to producers under test, the empty
/// sequence included.
pub fn item_vec_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(any::<i64>(), 0..50)
}

/// Strategy for bounded handoff capacities, starting at the single-slot
/// default.
pub fn handoff_capacity_strategy() -> impl Strategy<Value = usize> {
    1usize..=8
}

/// Strategy for an item sequence plus an error injection point within it
/// (0 means the producer fails before the first item).
pub fn faulty_producer_strategy() -> impl Strategy<Value = (Vec<i64>, usize)> {
    item_vec_strategy().prop_flat_map(|items| {
        let len = items.len();
        (Just(items), 0..=len)
    })
}
