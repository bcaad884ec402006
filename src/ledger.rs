// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation engine: derived amounts, date/search filtering, and
//! monthly P&L rollups. No I/O here; callers load rows through `store`.

use crate::models::{Amounts, Transaction, TxType};
use crate::utils::month_end;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// Inclusive calendar-date range. Time-of-day never participates in
/// filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn month(year: i32, month: u32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| anyhow::anyhow!("Invalid month {}-{:02}", year, month))?;
        Ok(Self {
            start,
            end: month_end(year, month)?,
        })
    }

    pub fn year(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| anyhow::anyhow!("Invalid year {}", year))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| anyhow::anyhow!("Invalid year {}", year))?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        self.start <= d && d <= self.end
    }
}

/// base = qty * unit_price; vat = base * vat_percent / 100; net = base + vat.
/// Inputs already default to zero at the store boundary, so this never fails.
pub fn derive(tx: &Transaction) -> Amounts {
    let base = tx.qty * tx.unit_price;
    let vat = base * tx.vat_percent / Decimal::ONE_HUNDRED;
    Amounts {
        base,
        vat,
        net: base + vat,
    }
}

/// Keep rows whose date falls inside `range` (rows without a parseable date
/// never match), then apply the free-text search: case-insensitive substring
/// over project, category, vendor, description and reference.
pub fn filter(txs: &[Transaction], range: Option<DateRange>, search: &str) -> Vec<Transaction> {
    let needle = search.trim().to_lowercase();
    txs.iter()
        .filter(|t| match range {
            Some(r) => t.date.map(|d| r.contains(d)).unwrap_or(false),
            None => true,
        })
        .filter(|t| {
            if needle.is_empty() {
                return true;
            }
            let blob = format!(
                "{} {} {} {} {}",
                t.project, t.category, t.vendor, t.description, t.reference
            )
            .to_lowercase();
            blob.contains(&needle)
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

/// Sum of net per type. Empty input is all-zero, not an error.
pub fn totals_by_type(txs: &[Transaction]) -> Totals {
    let mut out = Totals::default();
    for t in txs {
        let net = derive(t).net;
        match t.tx_type {
            TxType::Income => out.income += net,
            TxType::Expense => out.expense += net,
        }
    }
    out
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MonthPoint {
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Dense 12-point series for one year's rows: months with no transactions
/// appear with zero sums.
pub fn monthly_series(txs_for_year: &[Transaction]) -> Vec<MonthPoint> {
    let mut points: Vec<MonthPoint> = (1..=12)
        .map(|m| MonthPoint {
            month: m,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        })
        .collect();
    for t in txs_for_year {
        let Some(d) = t.date else { continue };
        let idx = (d.month() - 1) as usize;
        let net = derive(t).net;
        match t.tx_type {
            TxType::Income => points[idx].income += net,
            TxType::Expense => points[idx].expense += net,
        }
    }
    points
}

pub fn profit(income: Decimal, expense: Decimal) -> Decimal {
    income - expense
}

/// Profit as a percentage of income; zero when there is no income.
pub fn margin_percent(income: Decimal, expense: Decimal) -> Decimal {
    if income > Decimal::ZERO {
        profit(income, expense) / income * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}
