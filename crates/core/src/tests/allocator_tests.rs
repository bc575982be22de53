// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::allocator::allocate;
use crate::error::StoreError;
use crate::tests::helpers::FakeDirectory;
use time::macros::date;

#[test]
fn test_first_allocation_of_a_year_starts_at_one() {
    let mut directory = FakeDirectory::default();
    let id = allocate(&mut directory, date!(2025 - 06 - 15)).unwrap();
    assert_eq!(id.to_string(), "25-0001-001");
}

#[test]
fn test_sequence_increments_from_latest() {
    let mut directory = FakeDirectory::with_taken(&["25-0001-001"]);
    let id = allocate(&mut directory, date!(2025 - 06 - 15)).unwrap();
    assert_eq!(id.sequence(), 2);
    assert_eq!(id.to_string(), "25-0002-002");
}

#[test]
fn test_collision_retries_until_free() {
    // The latest read is stale: it reports no identifiers, but three
    // allocations have committed since.
    let mut directory = FakeDirectory::with_taken(&["25-0001-001", "25-0002-002", "25-0003-003"]);
    directory.latest_override = Some(String::from("25-0001-001"));

    let id = allocate(&mut directory, date!(2025 - 06 - 15)).unwrap();
    assert_eq!(id.sequence(), 4);
    assert_eq!(id.to_string(), "25-0004-004");
}

#[test]
fn test_malformed_latest_falls_back_to_one() {
    // A malformed stored identifier restarts the sequence; the existence
    // re-check still walks past taken identifiers.
    let mut directory = FakeDirectory::with_taken(&["25-0001-001"]);
    directory.latest_override = Some(String::from("25/0001/001"));

    let id = allocate(&mut directory, date!(2025 - 06 - 15)).unwrap();
    assert_eq!(id.to_string(), "25-0002-002");
}

#[test]
fn test_other_years_do_not_affect_the_sequence() {
    let mut directory = FakeDirectory::with_taken(&["24-0009-009"]);
    let id = allocate(&mut directory, date!(2025 - 06 - 15)).unwrap();
    assert_eq!(id.to_string(), "25-0001-001");
}

#[test]
fn test_allocated_identifiers_are_pairwise_distinct_and_increasing() {
    let mut directory = FakeDirectory::default();
    let mut previous_sequence: u32 = 0;
    for _ in 0..5 {
        let id = allocate(&mut directory, date!(2025 - 06 - 15)).unwrap();
        assert!(id.sequence() > previous_sequence);
        previous_sequence = id.sequence();
        // Commit the allocation so the next call sees it.
        directory.taken.push(id.to_string());
    }
    let mut unique = directory.taken.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 5);
}

#[test]
fn test_storage_failure_is_propagated() {
    let mut directory = FakeDirectory::failing();
    let result = allocate(&mut directory, date!(2025 - 06 - 15));
    assert_eq!(
        result,
        Err(StoreError(String::from("directory unavailable")))
    );
}
