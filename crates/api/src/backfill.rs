// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Startup credential backfill.
//!
//! Approved applications whose temporary-credential state is
//! inconsistent (imported or migrated without going through the normal
//! approval path) are repaired in one batch. Running it again with no
//! new inconsistencies repairs nothing.

use tracing::info;

use crate::credentials::TempPasswordGenerator;
use crate::error::ApiError;
use enrolink::needs_credential_repair;
use enrolink_persistence::{CredentialRepair, Persistence};

/// Scans approved applications and repairs inconsistent temporary
/// credentials.
///
/// Each repaired application receives a freshly generated temporary
/// password, marked active; an application with no permanent password
/// has it seeded from the same value. All repairs persist in one batch.
///
/// This runs at process startup (or on demand), not on behalf of an
/// administrator, so it takes no acting principal.
///
/// # Returns
///
/// The number of repaired applications.
///
/// # Errors
///
/// Returns an error if listing or the batch update fails; on failure
/// nothing is persisted.
pub fn run_backfill(persistence: &mut Persistence) -> Result<usize, ApiError> {
    let generator: TempPasswordGenerator = TempPasswordGenerator::new();
    let approved = persistence.list_approved_applications()?;

    let repairs: Vec<CredentialRepair> = approved
        .iter()
        .filter(|application| needs_credential_repair(application))
        .map(|application| CredentialRepair {
            application_id: application.application_id,
            temp_password: generator.generate(),
            seed_permanent: application
                .password_hash
                .as_deref()
                .is_none_or(str::is_empty),
        })
        .collect();

    if repairs.is_empty() {
        return Ok(0);
    }

    let repaired: usize = persistence.batch_apply_credential_repairs(&repairs)?;
    info!(
        repaired,
        "backfilled temporary passwords for approved applications"
    );
    Ok(repaired)
}
