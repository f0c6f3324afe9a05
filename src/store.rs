// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The single mutable owner of every entity collection. Constructed once at
//! startup and passed by `&mut` reference; all commits are synchronous, so
//! mutations are linearized by the borrow checker. `revision` is a monotonic
//! version token bumped on every commit.

use serde::{Deserialize, Serialize};

use crate::effects::Collections;
use crate::models::{Asset, CalendarEvent, CreditCard, Liability, Loan, Transaction};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Store {
    pub transactions: Vec<Transaction>,
    pub assets: Vec<Asset>,
    pub credit_cards: Vec<CreditCard>,
    pub liabilities: Vec<Liability>,
    pub loans: Vec<Loan>,
    pub calendar_events: Vec<CalendarEvent>,
    pub revision: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    /// Detached copy of the balance triple for the effect applier.
    pub fn collections(&self) -> Collections {
        Collections {
            assets: self.assets.clone(),
            credit_cards: self.credit_cards.clone(),
            liabilities: self.liabilities.clone(),
        }
    }

    pub fn commit_collections(&mut self, collections: Collections) {
        self.assets = collections.assets;
        self.credit_cards = collections.credit_cards;
        self.liabilities = collections.liabilities;
        self.bump();
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn transaction_index(&self, id: &str) -> Option<usize> {
        self.transactions.iter().position(|t| t.id == id)
    }

    pub fn insert_transaction(&mut self, tx: Transaction) {
        self.transactions.push(tx);
        self.bump();
    }

    /// Re-insert at a remembered position (delete rollback).
    pub fn insert_transaction_at(&mut self, index: usize, tx: Transaction) {
        let index = index.min(self.transactions.len());
        self.transactions.insert(index, tx);
        self.bump();
    }

    pub fn replace_transaction(&mut self, id: &str, tx: Transaction) -> bool {
        match self.transaction_index(id) {
            Some(i) => {
                self.transactions[i] = tx;
                self.bump();
                true
            }
            None => false,
        }
    }

    pub fn remove_transaction(&mut self, id: &str) -> Option<Transaction> {
        let i = self.transaction_index(id)?;
        let tx = self.transactions.remove(i);
        self.bump();
        Some(tx)
    }

    pub fn push_asset(&mut self, asset: Asset) {
        self.assets.push(asset);
        self.bump();
    }

    pub fn replace_asset(&mut self, id: &str, asset: Asset) -> bool {
        match self.assets.iter().position(|a| a.id == id) {
            Some(i) => {
                self.assets[i] = asset;
                self.bump();
                true
            }
            None => false,
        }
    }

    pub fn remove_asset(&mut self, id: &str) -> Option<Asset> {
        let i = self.assets.iter().position(|a| a.id == id)?;
        let asset = self.assets.remove(i);
        self.bump();
        Some(asset)
    }

    pub fn push_credit_card(&mut self, card: CreditCard) {
        self.credit_cards.push(card);
        self.bump();
    }

    pub fn replace_credit_card(&mut self, id: &str, card: CreditCard) -> bool {
        match self.credit_cards.iter().position(|c| c.id == id) {
            Some(i) => {
                self.credit_cards[i] = card;
                self.bump();
                true
            }
            None => false,
        }
    }

    pub fn remove_credit_card(&mut self, id: &str) -> Option<CreditCard> {
        let i = self.credit_cards.iter().position(|c| c.id == id)?;
        let card = self.credit_cards.remove(i);
        self.bump();
        Some(card)
    }

    pub fn push_liability(&mut self, liability: Liability) {
        self.liabilities.push(liability);
        self.bump();
    }

    pub fn replace_liability(&mut self, id: &str, liability: Liability) -> bool {
        match self.liabilities.iter().position(|l| l.id == id) {
            Some(i) => {
                self.liabilities[i] = liability;
                self.bump();
                true
            }
            None => false,
        }
    }

    pub fn remove_liability(&mut self, id: &str) -> Option<Liability> {
        let i = self.liabilities.iter().position(|l| l.id == id)?;
        let liability = self.liabilities.remove(i);
        self.bump();
        Some(liability)
    }

    /// Keep only the liabilities the predicate accepts. Used by rollback to
    /// drop mirrors a failed mutation lazily created.
    pub fn retain_liabilities(&mut self, keep: impl FnMut(&Liability) -> bool) {
        self.liabilities.retain(keep);
        self.bump();
    }

    pub fn push_loan(&mut self, loan: Loan) {
        self.loans.push(loan);
        self.bump();
    }

    pub fn replace_loan(&mut self, id: &str, loan: Loan) -> bool {
        match self.loans.iter().position(|l| l.id == id) {
            Some(i) => {
                self.loans[i] = loan;
                self.bump();
                true
            }
            None => false,
        }
    }

    pub fn remove_loan(&mut self, id: &str) -> Option<Loan> {
        let i = self.loans.iter().position(|l| l.id == id)?;
        let loan = self.loans.remove(i);
        self.bump();
        Some(loan)
    }

    pub fn push_calendar_event(&mut self, event: CalendarEvent) {
        self.calendar_events.push(event);
        self.bump();
    }

    pub fn replace_calendar_event(&mut self, id: &str, event: CalendarEvent) -> bool {
        match self.calendar_events.iter().position(|e| e.id == id) {
            Some(i) => {
                self.calendar_events[i] = event;
                self.bump();
                true
            }
            None => false,
        }
    }

    pub fn remove_calendar_event(&mut self, id: &str) -> Option<CalendarEvent> {
        let i = self.calendar_events.iter().position(|e| e.id == id)?;
        let event = self.calendar_events.remove(i);
        self.bump();
        Some(event)
    }
}
