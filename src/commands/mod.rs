// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod emi;
pub mod exporter;
pub mod loans;
pub mod reports;
pub mod session;
pub mod transactions;
pub mod transfer;

use crate::error::StoreError;
use anyhow::Result;

/// Persistence failures are non-fatal: the mutation took effect in memory,
/// so warn and skip the confirmation. Every other store error aborts.
pub(crate) fn warn_if_unsaved<T>(res: Result<T, StoreError>) -> Result<Option<T>> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_persistence() => {
            eprintln!("warning: change applied but not saved: {}", e);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
