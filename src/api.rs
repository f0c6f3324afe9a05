// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The remote persistence boundary. The server is a single opaque REST
//! collaborator: it echoes the canonical record on success, and every
//! non-2xx status or transport failure is one failure class.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::{Asset, CalendarEvent, CreditCard, Liability, Loan, Transaction};

const UA: &str = concat!(
    "tallybook/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/tallybook/tallybook)"
);

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("persistence api rejected the request: {0}")]
    Rejected(String),
}

#[allow(async_fn_in_trait)]
pub trait PersistApi {
    async fn create_transaction(&self, tx: &Transaction) -> Result<Transaction, ApiError>;
    async fn update_transaction(&self, tx: &Transaction) -> Result<Transaction, ApiError>;
    async fn delete_transaction(&self, id: &str) -> Result<(), ApiError>;
    async fn create_asset(&self, asset: &Asset) -> Result<Asset, ApiError>;
    async fn create_loan(&self, loan: &Loan) -> Result<Loan, ApiError>;
    async fn create_credit_card(&self, card: &CreditCard) -> Result<CreditCard, ApiError>;
    async fn create_liability(&self, liability: &Liability) -> Result<Liability, ApiError>;
    async fn create_calendar_event(&self, event: &CalendarEvent)
    -> Result<CalendarEvent, ApiError>;
}

pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent(UA)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        resp: reqwest::Response,
        path: &str,
    ) -> Result<T, ApiError> {
        if !resp.status().is_success() {
            return Err(ApiError::Rejected(format!("{} {}", resp.status(), path)));
        }
        Ok(resp.json().await?)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(resp, path).await
    }
}

impl PersistApi for RestClient {
    async fn create_transaction(&self, tx: &Transaction) -> Result<Transaction, ApiError> {
        self.post("/transactions", tx).await
    }

    async fn update_transaction(&self, tx: &Transaction) -> Result<Transaction, ApiError> {
        let path = format!("/transactions/{}", tx.id);
        let resp = self.http.put(self.url(&path)).json(tx).send().await?;
        Self::decode(resp, &path).await
    }

    async fn delete_transaction(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/transactions/{}", id);
        let resp = self.http.delete(self.url(&path)).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Rejected(format!("{} {}", resp.status(), path)));
        }
        Ok(())
    }

    async fn create_asset(&self, asset: &Asset) -> Result<Asset, ApiError> {
        self.post("/assets", asset).await
    }

    async fn create_loan(&self, loan: &Loan) -> Result<Loan, ApiError> {
        self.post("/loans", loan).await
    }

    async fn create_credit_card(&self, card: &CreditCard) -> Result<CreditCard, ApiError> {
        self.post("/credit-cards", card).await
    }

    async fn create_liability(&self, liability: &Liability) -> Result<Liability, ApiError> {
        self.post("/liabilities", liability).await
    }

    async fn create_calendar_event(
        &self,
        event: &CalendarEvent,
    ) -> Result<CalendarEvent, ApiError> {
        self.post("/calendar", event).await
    }
}
