// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Optimistic sync: commit a mutation locally so the UI feels instant, then
//! persist it, and undo the local commit if persistence fails.
//!
//! Every mutation moves `Idle -> OptimisticallyApplied -> {Confirmed |
//! RolledBack}` and is terminal per attempt; there is no retry state. `Ok` is
//! Confirmed (the server's canonical echo has been merged), `Err` is either a
//! validation failure (nothing was touched) or a persistence failure (the
//! rollback has already run). Persistence errors never propagate unhandled
//! past this layer.
//!
//! Rollback always goes through the same reverse-effect primitive delete
//! uses, so a failed `add_expense` restores all three touched collections,
//! not just the transaction list. The coordinator holds `&mut Store` across
//! its single suspension point (the network call), so mutations are
//! serialized end-to-end and a rollback reverses a delta against the live
//! collections rather than restoring a stale snapshot.

use crate::api::{ApiError, PersistApi};
use crate::models::{
    self, AccountRef, Asset, CalendarEvent, CreditCard, Liability, Loan, Transaction,
    TransactionDraft,
};
use crate::store::Store;
use crate::{effects, resolver};

#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    /// Caught before any local state is touched; shown inline by the UI.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("transaction '{0}' not found")]
    UnknownTransaction(String),
    /// The optimistic change has already been rolled back.
    #[error("persistence failed: {0}")]
    Persistence(#[from] ApiError),
}

/// Confirmed terminal state of a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Canonical id of the record (server-assigned on create).
    pub id: String,
    /// Store revision after the echo merge.
    pub revision: u64,
}

pub struct Coordinator<A> {
    api: A,
}

impl<A: PersistApi> Coordinator<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Record a transaction, resolving its account label against the live
    /// assets and cards.
    pub async fn add_transaction(
        &self,
        store: &mut Store,
        draft: TransactionDraft,
    ) -> Result<Receipt, LedgerError> {
        validate_draft(&draft)?;
        let source = resolver::resolve_account(
            &draft.account,
            draft.amount,
            &store.assets,
            &store.credit_cards,
        );
        let tx = draft.into_transaction(models::new_id(), source);
        self.persist_new_transaction(store, tx).await
    }

    /// Record an expense charged to an explicit payment source (the form
    /// already knows which asset or card paid). The amount is coerced
    /// negative.
    pub async fn add_expense(
        &self,
        store: &mut Store,
        draft: TransactionDraft,
        source: AccountRef,
    ) -> Result<Receipt, LedgerError> {
        validate_draft(&draft)?;
        validate_source(store, &source)?;
        let mut tx = draft.into_transaction(models::new_id(), source);
        tx.amount = -tx.amount.abs();
        self.persist_new_transaction(store, tx).await
    }

    async fn persist_new_transaction(
        &self,
        store: &mut Store,
        tx: Transaction,
    ) -> Result<Receipt, LedgerError> {
        let prior_liabilities = liability_ids(store);
        store.commit_collections(effects::apply(&tx, &store.collections()));
        store.insert_transaction(tx.clone());

        match self.api.create_transaction(&tx).await {
            Ok(echo) => {
                store.replace_transaction(&tx.id, echo.clone());
                tracing::debug!(tx_id = %echo.id, revision = store.revision, "transaction confirmed");
                Ok(Receipt {
                    id: echo.id,
                    revision: store.revision,
                })
            }
            Err(err) => {
                store.commit_collections(effects::reverse(&tx, &store.collections()));
                store.remove_transaction(&tx.id);
                prune_created_liabilities(store, &prior_liabilities);
                tracing::warn!(tx_id = %tx.id, error = %err, "create rejected; optimistic transaction rolled back");
                Err(err.into())
            }
        }
    }

    /// Edit as reverse-old + apply-new in one local commit, never a field
    /// patch, so balance correctness is inherited from the two primitives.
    pub async fn update_transaction(
        &self,
        store: &mut Store,
        id: &str,
        draft: TransactionDraft,
    ) -> Result<Receipt, LedgerError> {
        validate_draft(&draft)?;
        let index = store
            .transaction_index(id)
            .ok_or_else(|| LedgerError::UnknownTransaction(id.to_string()))?;
        let old = store.transactions[index].clone();

        let source = resolver::resolve_account(
            &draft.account,
            draft.amount,
            &store.assets,
            &store.credit_cards,
        );
        let new_tx = draft.into_transaction(old.id.clone(), source);

        let prior_liabilities = liability_ids(store);
        let stepped = effects::apply(&new_tx, &effects::reverse(&old, &store.collections()));
        store.commit_collections(stepped);
        store.replace_transaction(id, new_tx.clone());

        match self.api.update_transaction(&new_tx).await {
            Ok(echo) => {
                store.replace_transaction(id, echo);
                tracing::debug!(tx_id = %id, revision = store.revision, "edit confirmed");
                Ok(Receipt {
                    id: id.to_string(),
                    revision: store.revision,
                })
            }
            Err(err) => {
                let restored =
                    effects::apply(&old, &effects::reverse(&new_tx, &store.collections()));
                store.commit_collections(restored);
                store.replace_transaction(id, old);
                prune_created_liabilities(store, &prior_liabilities);
                tracing::warn!(tx_id = %id, error = %err, "edit rejected; previous record restored");
                Err(err.into())
            }
        }
    }

    /// Reverse the transaction's effect and drop the record; on persistence
    /// failure both come back, the record at its original position.
    pub async fn delete_transaction(
        &self,
        store: &mut Store,
        id: &str,
    ) -> Result<Receipt, LedgerError> {
        let index = store
            .transaction_index(id)
            .ok_or_else(|| LedgerError::UnknownTransaction(id.to_string()))?;
        let tx = store.transactions[index].clone();

        store.commit_collections(effects::reverse(&tx, &store.collections()));
        store.remove_transaction(id);

        match self.api.delete_transaction(id).await {
            Ok(()) => {
                tracing::debug!(tx_id = %id, revision = store.revision, "delete confirmed");
                Ok(Receipt {
                    id: id.to_string(),
                    revision: store.revision,
                })
            }
            Err(err) => {
                store.commit_collections(effects::apply(&tx, &store.collections()));
                store.insert_transaction_at(index, tx);
                tracing::warn!(tx_id = %id, error = %err, "delete rejected; transaction restored");
                Err(err.into())
            }
        }
    }

    pub async fn add_asset(&self, store: &mut Store, asset: Asset) -> Result<Receipt, LedgerError> {
        require_nonempty("name", &asset.name)?;
        store.push_asset(asset.clone());
        match self.api.create_asset(&asset).await {
            Ok(echo) => {
                store.replace_asset(&asset.id, echo.clone());
                Ok(Receipt {
                    id: echo.id,
                    revision: store.revision,
                })
            }
            Err(err) => {
                store.remove_asset(&asset.id);
                tracing::warn!(asset_id = %asset.id, error = %err, "asset create rejected; rolled back");
                Err(err.into())
            }
        }
    }

    pub async fn add_loan(&self, store: &mut Store, loan: Loan) -> Result<Receipt, LedgerError> {
        require_nonempty("name", &loan.name)?;
        store.push_loan(loan.clone());
        match self.api.create_loan(&loan).await {
            Ok(echo) => {
                store.replace_loan(&loan.id, echo.clone());
                Ok(Receipt {
                    id: echo.id,
                    revision: store.revision,
                })
            }
            Err(err) => {
                store.remove_loan(&loan.id);
                tracing::warn!(loan_id = %loan.id, error = %err, "loan create rejected; rolled back");
                Err(err.into())
            }
        }
    }

    pub async fn add_credit_card(
        &self,
        store: &mut Store,
        card: CreditCard,
    ) -> Result<Receipt, LedgerError> {
        require_nonempty("brand", &card.brand)?;
        if card.last4.len() != 4 || !card.last4.chars().all(|c| c.is_ascii_digit()) {
            return Err(LedgerError::Validation {
                field: "last4",
                reason: "must be exactly four digits".to_string(),
            });
        }
        store.push_credit_card(card.clone());
        match self.api.create_credit_card(&card).await {
            Ok(echo) => {
                store.replace_credit_card(&card.id, echo.clone());
                Ok(Receipt {
                    id: echo.id,
                    revision: store.revision,
                })
            }
            Err(err) => {
                store.remove_credit_card(&card.id);
                tracing::warn!(card_id = %card.id, error = %err, "card create rejected; rolled back");
                Err(err.into())
            }
        }
    }

    pub async fn add_liability(
        &self,
        store: &mut Store,
        liability: Liability,
    ) -> Result<Receipt, LedgerError> {
        require_nonempty("name", &liability.name)?;
        store.push_liability(liability.clone());
        match self.api.create_liability(&liability).await {
            Ok(echo) => {
                store.replace_liability(&liability.id, echo.clone());
                Ok(Receipt {
                    id: echo.id,
                    revision: store.revision,
                })
            }
            Err(err) => {
                store.remove_liability(&liability.id);
                tracing::warn!(liability_id = %liability.id, error = %err, "liability create rejected; rolled back");
                Err(err.into())
            }
        }
    }

    pub async fn add_calendar_event(
        &self,
        store: &mut Store,
        event: CalendarEvent,
    ) -> Result<Receipt, LedgerError> {
        require_nonempty("title", &event.title)?;
        store.push_calendar_event(event.clone());
        match self.api.create_calendar_event(&event).await {
            Ok(echo) => {
                store.replace_calendar_event(&event.id, echo.clone());
                Ok(Receipt {
                    id: echo.id,
                    revision: store.revision,
                })
            }
            Err(err) => {
                store.remove_calendar_event(&event.id);
                tracing::warn!(event_id = %event.id, error = %err, "calendar create rejected; rolled back");
                Err(err.into())
            }
        }
    }
}

fn validate_draft(draft: &TransactionDraft) -> Result<(), LedgerError> {
    require_nonempty("description", &draft.description)?;
    require_nonempty("account", &draft.account)?;
    if draft.amount.is_zero() {
        return Err(LedgerError::Validation {
            field: "amount",
            reason: "must be non-zero".to_string(),
        });
    }
    Ok(())
}

/// An explicit payment source must point at a record that exists.
fn validate_source(store: &Store, source: &AccountRef) -> Result<(), LedgerError> {
    let known = match source {
        AccountRef::Asset { id } => store.assets.iter().any(|a| a.id == *id),
        AccountRef::CreditCard { id } => store.credit_cards.iter().any(|c| c.id == *id),
        AccountRef::Unlinked => true,
    };
    if known {
        Ok(())
    } else {
        Err(LedgerError::Validation {
            field: "paymentSource",
            reason: format!("{} does not exist", source),
        })
    }
}

fn require_nonempty(field: &'static str, value: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        return Err(LedgerError::Validation {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn liability_ids(store: &Store) -> Vec<String> {
    store.liabilities.iter().map(|l| l.id.clone()).collect()
}

/// Drop mirror liabilities that only exist because the rolled-back mutation
/// lazily created them; `reverse` zeroes their delta but cannot know the
/// record itself is new.
fn prune_created_liabilities(store: &mut Store, prior: &[String]) {
    if store.liabilities.len() != prior.len() {
        store.retain_liabilities(|l| prior.iter().any(|id| id == &l.id));
    }
}
