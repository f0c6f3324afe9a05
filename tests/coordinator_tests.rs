// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Mutex;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallybook::api::{ApiError, PersistApi};
use tallybook::coordinator::{Coordinator, LedgerError};
use tallybook::models::{
    AccountRef, Asset, AssetKind, CalendarEvent, CreditCard, Liability, Loan, Transaction,
    TransactionDraft,
};
use tallybook::store::Store;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
}

/// In-process persistence double: echoes requests back (optionally renaming
/// ids the way a server assigning its own keys would), or rejects everything.
#[derive(Default)]
struct StubApi {
    fail: bool,
    canonical_id: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl StubApi {
    fn ok() -> Self {
        Self::default()
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn renaming(id: &str) -> Self {
        Self {
            canonical_id: Some(id.to_string()),
            ..Self::default()
        }
    }

    fn record(&self, call: &str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call.to_string());
        if self.fail {
            return Err(ApiError::Rejected("503 simulated outage".into()));
        }
        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl PersistApi for StubApi {
    async fn create_transaction(&self, tx: &Transaction) -> Result<Transaction, ApiError> {
        self.record("POST /transactions")?;
        let mut echo = tx.clone();
        if let Some(id) = &self.canonical_id {
            echo.id = id.clone();
        }
        Ok(echo)
    }

    async fn update_transaction(&self, tx: &Transaction) -> Result<Transaction, ApiError> {
        self.record("PUT /transactions")?;
        Ok(tx.clone())
    }

    async fn delete_transaction(&self, _id: &str) -> Result<(), ApiError> {
        self.record("DELETE /transactions")
    }

    async fn create_asset(&self, asset: &Asset) -> Result<Asset, ApiError> {
        self.record("POST /assets")?;
        Ok(asset.clone())
    }

    async fn create_loan(&self, loan: &Loan) -> Result<Loan, ApiError> {
        self.record("POST /loans")?;
        Ok(loan.clone())
    }

    async fn create_credit_card(&self, card: &CreditCard) -> Result<CreditCard, ApiError> {
        self.record("POST /credit-cards")?;
        Ok(card.clone())
    }

    async fn create_liability(&self, liability: &Liability) -> Result<Liability, ApiError> {
        self.record("POST /liabilities")?;
        Ok(liability.clone())
    }

    async fn create_calendar_event(
        &self,
        event: &CalendarEvent,
    ) -> Result<CalendarEvent, ApiError> {
        self.record("POST /calendar")?;
        Ok(event.clone())
    }
}

fn seeded_store() -> Store {
    let mut store = Store::new();
    store.assets.push(Asset {
        id: "a1".into(),
        name: "Checking".into(),
        kind: AssetKind::Cash,
        value: d("5000"),
        institution: None,
    });
    store.credit_cards.push(CreditCard {
        id: "c1".into(),
        brand: "Visa".into(),
        last4: "1234".into(),
        limit: d("50000"),
        balance: d("1000"),
        apr: None,
        points_balance: None,
        bill_due_date: None,
        bill_amount: None,
    });
    store
}

fn draft(amount: &str, account: &str) -> TransactionDraft {
    TransactionDraft {
        date: date(),
        description: "Groceries".into(),
        amount: d(amount),
        category: "Food".into(),
        account: account.into(),
    }
}

#[tokio::test]
async fn add_transaction_applies_and_confirms() {
    let coord = Coordinator::new(StubApi::ok());
    let mut store = seeded_store();

    let receipt = coord
        .add_transaction(&mut store, draft("-500", "Checking"))
        .await
        .unwrap();

    assert_eq!(store.assets[0].value, d("4500"));
    assert_eq!(store.transactions.len(), 1);
    assert_eq!(store.transactions[0].id, receipt.id);
    assert_eq!(
        store.transactions[0].payment_source,
        AccountRef::Asset { id: "a1".into() }
    );
}

#[tokio::test]
async fn server_assigned_id_replaces_the_optimistic_one() {
    let coord = Coordinator::new(StubApi::renaming("srv-1"));
    let mut store = seeded_store();

    let receipt = coord
        .add_transaction(&mut store, draft("-500", "Checking"))
        .await
        .unwrap();

    assert_eq!(receipt.id, "srv-1");
    assert_eq!(store.transactions[0].id, "srv-1");
}

#[tokio::test]
async fn failed_create_rolls_back_record_and_balance() {
    let coord = Coordinator::new(StubApi::failing());
    let mut store = seeded_store();

    let err = coord
        .add_transaction(&mut store, draft("-200", "Checking"))
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::Persistence(_)));
    assert!(store.transactions.is_empty());
    assert_eq!(store.assets[0].value, d("5000"));
}

#[tokio::test]
async fn card_expense_mirrors_liability() {
    let coord = Coordinator::new(StubApi::ok());
    let mut store = seeded_store();

    coord
        .add_expense(
            &mut store,
            draft("-300", "VISA 1234"),
            AccountRef::CreditCard { id: "c1".into() },
        )
        .await
        .unwrap();

    assert_eq!(store.credit_cards[0].balance, d("1300"));
    assert_eq!(store.liabilities.len(), 1);
    assert_eq!(store.liabilities[0].name, "VISA 1234");
    assert_eq!(store.liabilities[0].balance, d("1300"));
}

#[tokio::test]
async fn failed_card_expense_restores_all_three_collections() {
    let coord = Coordinator::new(StubApi::failing());
    let mut store = seeded_store();

    let err = coord
        .add_expense(
            &mut store,
            draft("-300", "VISA 1234"),
            AccountRef::CreditCard { id: "c1".into() },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::Persistence(_)));
    assert!(store.transactions.is_empty());
    assert_eq!(store.credit_cards[0].balance, d("1000"));
    // The lazily created mirror is pruned, not left behind at the old balance.
    assert!(store.liabilities.is_empty());
}

#[tokio::test]
async fn expense_amount_is_coerced_negative() {
    let coord = Coordinator::new(StubApi::ok());
    let mut store = seeded_store();

    coord
        .add_expense(
            &mut store,
            draft("300", "Checking"),
            AccountRef::Asset { id: "a1".into() },
        )
        .await
        .unwrap();

    assert_eq!(store.transactions[0].amount, d("-300"));
    assert_eq!(store.assets[0].value, d("4700"));
}

#[tokio::test]
async fn expense_against_unknown_source_is_a_validation_error() {
    let coord = Coordinator::new(StubApi::ok());
    let mut store = seeded_store();
    let before = store.clone();

    let err = coord
        .add_expense(
            &mut store,
            draft("-300", "whatever"),
            AccountRef::CreditCard { id: "ghost".into() },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::Validation { .. }));
    assert_eq!(store, before);
    assert!(coord_calls(&coord).is_empty());
}

#[tokio::test]
async fn unresolvable_account_is_recorded_without_balance_effect() {
    let coord = Coordinator::new(StubApi::ok());
    let mut store = seeded_store();

    coord
        .add_transaction(&mut store, draft("-75", "Venmo"))
        .await
        .unwrap();

    assert_eq!(store.transactions.len(), 1);
    assert!(store.transactions[0].payment_source.is_unlinked());
    assert_eq!(store.assets[0].value, d("5000"));
    assert_eq!(store.credit_cards[0].balance, d("1000"));
    assert!(store.liabilities.is_empty());
}

#[tokio::test]
async fn validation_failure_touches_nothing() {
    let coord = Coordinator::new(StubApi::ok());
    let mut store = seeded_store();
    let before = store.clone();

    let mut bad = draft("-500", "Checking");
    bad.description = "  ".into();
    let err = coord.add_transaction(&mut store, bad).await.unwrap_err();

    assert!(matches!(err, LedgerError::Validation { .. }));
    assert_eq!(store, before);
    assert!(coord_calls(&coord).is_empty());
}

#[tokio::test]
async fn delete_scenario_round_trips_checking() {
    let coord = Coordinator::new(StubApi::ok());
    let mut store = seeded_store();

    let receipt = coord
        .add_transaction(&mut store, draft("-500", "Checking"))
        .await
        .unwrap();
    assert_eq!(store.assets[0].value, d("4500"));

    coord.delete_transaction(&mut store, &receipt.id).await.unwrap();
    assert_eq!(store.assets[0].value, d("5000"));
    assert!(store.transactions.is_empty());
    assert_eq!(
        coord_calls(&coord),
        vec!["POST /transactions", "DELETE /transactions"]
    );
}

#[tokio::test]
async fn failed_delete_restores_record_at_its_position() {
    let ok = Coordinator::new(StubApi::ok());
    let mut store = seeded_store();
    let first = ok
        .add_transaction(&mut store, draft("-100", "Checking"))
        .await
        .unwrap();
    ok.add_transaction(&mut store, draft("-200", "Checking"))
        .await
        .unwrap();
    let before = store.clone();

    let failing = Coordinator::new(StubApi::failing());
    let err = failing
        .delete_transaction(&mut store, &first.id)
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::Persistence(_)));
    assert_eq!(store.transactions, before.transactions);
    assert_eq!(store.assets, before.assets);
}

#[tokio::test]
async fn delete_of_unknown_transaction_is_an_error_without_side_effects() {
    let coord = Coordinator::new(StubApi::ok());
    let mut store = seeded_store();
    let before = store.clone();

    let err = coord.delete_transaction(&mut store, "ghost").await.unwrap_err();

    assert!(matches!(err, LedgerError::UnknownTransaction(_)));
    assert_eq!(store, before);
}

#[tokio::test]
async fn edit_moves_balance_by_the_net_difference() {
    let coord = Coordinator::new(StubApi::ok());
    let mut store = seeded_store();
    let receipt = coord
        .add_transaction(&mut store, draft("-500", "Checking"))
        .await
        .unwrap();
    assert_eq!(store.assets[0].value, d("4500"));

    coord
        .update_transaction(&mut store, &receipt.id, draft("-800", "Checking"))
        .await
        .unwrap();

    // Net movement is -300, not -800.
    assert_eq!(store.assets[0].value, d("4200"));
    assert_eq!(store.transactions.len(), 1);
    assert_eq!(store.transactions[0].amount, d("-800"));
}

#[tokio::test]
async fn edit_can_move_a_charge_between_accounts() {
    let coord = Coordinator::new(StubApi::ok());
    let mut store = seeded_store();
    let receipt = coord
        .add_transaction(&mut store, draft("-500", "Checking"))
        .await
        .unwrap();

    coord
        .update_transaction(&mut store, &receipt.id, draft("-500", "VISA 1234"))
        .await
        .unwrap();

    assert_eq!(store.assets[0].value, d("5000"));
    assert_eq!(store.credit_cards[0].balance, d("1500"));
    assert_eq!(store.liabilities[0].balance, d("1500"));
}

#[tokio::test]
async fn failed_edit_restores_the_previous_record_and_balances() {
    let ok = Coordinator::new(StubApi::ok());
    let mut store = seeded_store();
    let receipt = ok
        .add_transaction(&mut store, draft("-500", "Checking"))
        .await
        .unwrap();
    let before = store.clone();

    let failing = Coordinator::new(StubApi::failing());
    let err = failing
        .update_transaction(&mut store, &receipt.id, draft("-800", "Checking"))
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::Persistence(_)));
    assert_eq!(store.transactions, before.transactions);
    assert_eq!(store.assets, before.assets);
    assert_eq!(store.liabilities, before.liabilities);
}

#[tokio::test]
async fn entity_creates_confirm_or_roll_back() {
    let ok = Coordinator::new(StubApi::ok());
    let mut store = Store::new();
    ok.add_asset(
        &mut store,
        Asset {
            id: "a9".into(),
            name: "Savings".into(),
            kind: AssetKind::Cash,
            value: d("100"),
            institution: Some("Bank".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(store.assets.len(), 1);

    let failing = Coordinator::new(StubApi::failing());
    let err = failing
        .add_loan(
            &mut store,
            Loan {
                id: "lo1".into(),
                name: "Car".into(),
                principal: d("20000"),
                balance: d("18000"),
                apr: d("6.5"),
                monthly_payment: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Persistence(_)));
    assert!(store.loans.is_empty());
}

#[tokio::test]
async fn card_create_validates_last4() {
    let coord = Coordinator::new(StubApi::ok());
    let mut store = Store::new();

    let err = coord
        .add_credit_card(
            &mut store,
            CreditCard {
                id: "c9".into(),
                brand: "Visa".into(),
                last4: "12x4".into(),
                limit: d("1000"),
                balance: d("0"),
                apr: None,
                points_balance: None,
                bill_due_date: None,
                bill_amount: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::Validation { field: "last4", .. }));
    assert!(store.credit_cards.is_empty());
}

#[tokio::test]
async fn revision_grows_with_every_committed_mutation() {
    let coord = Coordinator::new(StubApi::ok());
    let mut store = seeded_store();
    assert_eq!(store.revision, 0);

    let r1 = coord
        .add_transaction(&mut store, draft("-500", "Checking"))
        .await
        .unwrap();
    let r2 = coord
        .add_transaction(&mut store, draft("-100", "Checking"))
        .await
        .unwrap();

    assert!(r1.revision > 0);
    assert!(r2.revision > r1.revision);
}

fn coord_calls(coord: &Coordinator<StubApi>) -> Vec<String> {
    coord.api().calls()
}
