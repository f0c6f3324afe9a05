// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::{de_decimal, de_opt_decimal};

/// Fresh provisional id for an optimistically created record. The server may
/// replace it with its own id in the canonical echo.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Where a transaction's money came from, resolved once at creation and
/// stored on the record. Serialized as the `paymentSource: {type, id}` wire
/// shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AccountRef {
    Asset { id: String },
    CreditCard { id: String },
    Unlinked,
}

impl AccountRef {
    pub fn is_unlinked(&self) -> bool {
        matches!(self, AccountRef::Unlinked)
    }
}

impl std::fmt::Display for AccountRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountRef::Asset { id } => write!(f, "asset:{}", id),
            AccountRef::CreditCard { id } => write!(f, "card:{}", id),
            AccountRef::Unlinked => write!(f, "unlinked"),
        }
    }
}

/// A ledger entry. `amount` is signed: negative is an expense, positive is
/// income. `account` keeps the label exactly as the user entered it;
/// `payment_source` is the resolved reference that apply/reverse consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    #[serde(deserialize_with = "de_decimal")]
    pub amount: Decimal,
    pub category: String,
    pub account: String,
    pub payment_source: AccountRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Cash,
    Investment,
    Property,
    Other,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AssetKind::Cash => "cash",
            AssetKind::Investment => "investment",
            AssetKind::Property => "property",
            AssetKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// `value` is derived-but-stored: baseline plus the signed sum of all
/// transactions whose payment source resolves to this asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    #[serde(deserialize_with = "de_decimal")]
    pub value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

/// Unlike `Asset.value`, card `balance` is debt: it grows by |amount| on
/// every expense charged to the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: String,
    pub brand: String,
    pub last4: String,
    #[serde(deserialize_with = "de_decimal")]
    pub limit: Decimal,
    #[serde(deserialize_with = "de_decimal")]
    pub balance: Decimal,
    #[serde(
        default,
        deserialize_with = "de_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub apr: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "de_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub points_balance: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_due_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "de_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub bill_amount: Option<Decimal>,
}

impl CreditCard {
    /// Display name of the card's mirror liability, e.g. "VISA 1234".
    pub fn mirror_name(&self) -> String {
        format!("{} {}", self.brand.to_uppercase(), self.last4)
    }
}

/// Non-loan liability. A card mirror carries `mirror_of_card_id` and tracks
/// its card's balance exactly; the synthesized name is display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liability {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "de_decimal")]
    pub balance: Decimal,
    #[serde(
        default,
        deserialize_with = "de_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub apr: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror_of_card_id: Option<String>,
}

/// Loans have their own CRUD lifecycle and no part in the ledger invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "de_decimal")]
    pub principal: Decimal,
    #[serde(deserialize_with = "de_decimal")]
    pub balance: Decimal,
    #[serde(deserialize_with = "de_decimal")]
    pub apr: Decimal,
    #[serde(
        default,
        deserialize_with = "de_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub monthly_payment: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(
        default,
        deserialize_with = "de_opt_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Validated-but-unresolved transaction input, as it arrives from a form.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub account: String,
}

impl TransactionDraft {
    pub fn into_transaction(self, id: String, payment_source: AccountRef) -> Transaction {
        Transaction {
            id,
            date: self.date,
            description: self.description,
            amount: self.amount,
            category: self.category,
            account: self.account,
            payment_source,
        }
    }
}
