// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod assets;
pub mod balances;
pub mod calendar;
pub mod cards;
pub mod liabilities;
pub mod loans;
pub mod transactions;

use crate::coordinator::{LedgerError, Receipt};

/// Every mutation surfaces exactly one outcome: a success line, an inline
/// validation message, or a failure line (the rollback has already run).
pub(crate) fn report(
    result: Result<Receipt, LedgerError>,
    success: impl FnOnce(&Receipt) -> String,
) {
    match result {
        Ok(receipt) => println!("{}", success(&receipt)),
        Err(LedgerError::Validation { field, reason }) => eprintln!("Invalid {}: {}", field, reason),
        Err(err) => eprintln!("{} — local changes rolled back", err),
    }
}
