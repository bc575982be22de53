// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account identifier allocation.
//!
//! Allocation is an optimistic, lock-free read of the year's latest
//! identifier followed by an existence re-check before commit. Two
//! concurrent approvals may race on the "next sequence" read; the
//! re-check (backed by the storage layer's uniqueness constraint)
//! guarantees no two applications ever receive the same identifier, at
//! the cost of an occasional extra retry. Approvals are low-frequency
//! administrator actions, so no global allocation lock is taken.

use crate::error::StoreError;
use enrolink_domain::AccountId;
use time::Date;
use tracing::{debug, warn};

/// Storage lookups the allocator needs.
///
/// Implemented by the persistence layer; tests supply in-memory fakes.
pub trait IdentifierDirectory {
    /// Returns the lexicographically greatest assigned identifier with
    /// the given prefix, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn latest_with_prefix(&mut self, prefix: &str) -> Result<Option<String>, StoreError>;

    /// Whether the exact identifier string is already assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn identifier_exists(&mut self, identifier: &str) -> Result<bool, StoreError>;
}

/// The result of probing one candidate sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationAttempt {
    /// The candidate is free and has been claimed.
    Allocated(AccountId),
    /// The candidate is taken; try the next sequence number.
    Retry,
    /// The existence check failed.
    Failed(StoreError),
}

/// Probes a single candidate identifier.
fn probe(
    directory: &mut dyn IdentifierDirectory,
    year: i32,
    sequence: u32,
) -> AllocationAttempt {
    let candidate: AccountId = AccountId::new(year, sequence);
    match directory.identifier_exists(&candidate.to_string()) {
        Ok(false) => AllocationAttempt::Allocated(candidate),
        Ok(true) => AllocationAttempt::Retry,
        Err(err) => AllocationAttempt::Failed(err),
    }
}

/// Allocates the next unique account identifier for the approval year.
///
/// The starting sequence comes from the year's latest assigned
/// identifier plus one, or 1 when the year has none. A stored identifier
/// that does not parse cleanly restarts the sequence at 1; that is a
/// defensive degradation signalling possible data irregularity, so it is
/// logged. Uniqueness is still guaranteed by the existence re-check.
///
/// No upper bound is placed on retries: each retry implies another
/// allocation committed between the read and the check, which cannot
/// happen indefinitely.
///
/// # Errors
///
/// Returns `StoreError` if a directory lookup fails. No partially
/// allocated identifier is ever returned.
pub fn allocate(
    directory: &mut dyn IdentifierDirectory,
    approved_on: Date,
) -> Result<AccountId, StoreError> {
    let year: i32 = approved_on.year();
    let prefix: String = AccountId::year_prefix(year);

    let start: u32 = match directory.latest_with_prefix(&prefix)? {
        Some(latest) => match AccountId::parse(&latest) {
            Ok(id) => id.sequence() + 1,
            Err(err) => {
                warn!(
                    identifier = %latest,
                    error = %err,
                    "latest stored identifier did not parse; restarting year sequence at 1"
                );
                1
            }
        },
        None => 1,
    };

    let mut sequence: u32 = start;
    loop {
        match probe(directory, year, sequence) {
            AllocationAttempt::Allocated(id) => return Ok(id),
            AllocationAttempt::Retry => {
                debug!(sequence, "candidate identifier already assigned, retrying");
                sequence += 1;
            }
            AllocationAttempt::Failed(err) => return Err(err),
        }
    }
}
