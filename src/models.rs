// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxType {
    Income,
    Expense,
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxType::Income => write!(f, "Income"),
            TxType::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TxType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Income" => Ok(TxType::Income),
            "Expense" => Ok(TxType::Expense),
            other => Err(format!("unknown tx_type '{}'", other)),
        }
    }
}

/// A ledger row. `date` is `None` when the stored cell did not parse as a
/// calendar date; such rows never match a date-range filter but stay visible
/// in unfiltered listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: Option<NaiveDate>,
    pub project: String,
    pub tx_type: TxType,
    pub category: String,
    pub vendor: String,
    pub description: String,
    pub qty: Decimal,
    pub unit_price: Decimal,
    pub vat_percent: Decimal,
    pub payment: String,
    pub status: String,
    pub reference: String,
    pub created_at: String,
}

/// Sales target row. `month == 0` is the annual target for `year`;
/// `1..=12` is a per-month override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub year: i32,
    pub month: u32,
    pub target: Decimal,
}

/// Amounts derived from a transaction, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Amounts {
    pub base: Decimal,
    pub vat: Decimal,
    pub net: Decimal,
}
