// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Presentation transforms over engine output. Nothing here touches the
//! store: filtered transactions go in, display rows / chart series / CSV
//! or JSON exports come out.

use crate::ledger::{self, MonthPoint};
use crate::models::Transaction;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

pub const DISPLAY_HEADERS: [&str; 16] = [
    "ID",
    "Date",
    "Project",
    "Type",
    "Category",
    "Vendor",
    "Description",
    "Qty",
    "Unit Price",
    "VAT %",
    "Amount",
    "VAT",
    "Net",
    "Payment",
    "Status",
    "Ref",
];

/// One flat display row: stored columns plus the derived amounts, with the
/// date normalized to an ISO calendar-date string (empty when unparseable).
#[derive(Debug, Clone, Serialize)]
pub struct LedgerRow {
    pub id: i64,
    pub date: String,
    pub project: String,
    pub tx_type: String,
    pub category: String,
    pub vendor: String,
    pub description: String,
    pub qty: Decimal,
    pub unit_price: Decimal,
    pub vat_percent: Decimal,
    pub base: Decimal,
    pub vat: Decimal,
    pub net: Decimal,
    pub payment: String,
    pub status: String,
    pub reference: String,
}

impl LedgerRow {
    fn from_tx(tx: &Transaction) -> Self {
        let amounts = ledger::derive(tx);
        Self {
            id: tx.id,
            date: tx.date.map(|d| d.to_string()).unwrap_or_default(),
            project: tx.project.clone(),
            tx_type: tx.tx_type.to_string(),
            category: tx.category.clone(),
            vendor: tx.vendor.clone(),
            description: tx.description.clone(),
            qty: tx.qty,
            unit_price: tx.unit_price,
            vat_percent: tx.vat_percent,
            base: amounts.base,
            vat: amounts.vat,
            net: amounts.net,
            payment: tx.payment.clone(),
            status: tx.status.clone(),
            reference: tx.reference.clone(),
        }
    }
}

/// Flat view of filtered transactions, newest first (date desc, id desc).
/// Rows without a date sort last.
pub fn table_rows(txs: &[Transaction]) -> Vec<LedgerRow> {
    let mut sorted: Vec<&Transaction> = txs.iter().collect();
    sorted.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));
    sorted.into_iter().map(LedgerRow::from_tx).collect()
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SeriesPoint {
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
}

/// Chart-ready dense 12-point series with profit appended.
pub fn chart_series(points: &[MonthPoint]) -> Vec<SeriesPoint> {
    points
        .iter()
        .map(|p| SeriesPoint {
            month: p.month,
            income: p.income,
            expense: p.expense,
            profit: ledger::profit(p.income, p.expense),
        })
        .collect()
}

/// Delimited export for spreadsheet hand-off: UTF-8 with BOM, display
/// header names, and Amount/VAT/Net rounded to whole units. Qty and unit
/// price keep full precision.
pub fn write_csv<W: Write>(rows: &[LedgerRow], mut out: W) -> anyhow::Result<()> {
    out.write_all(b"\xEF\xBB\xBF")?;
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(DISPLAY_HEADERS)?;
    for r in rows {
        wtr.write_record([
            r.id.to_string(),
            r.date.clone(),
            r.project.clone(),
            r.tx_type.clone(),
            r.category.clone(),
            r.vendor.clone(),
            r.description.clone(),
            r.qty.to_string(),
            r.unit_price.to_string(),
            r.vat_percent.to_string(),
            r.base.round().to_string(),
            r.vat.round().to_string(),
            r.net.round().to_string(),
            r.payment.clone(),
            r.status.clone(),
            r.reference.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Full-precision JSON export of the same rows.
pub fn write_json<W: Write>(rows: &[LedgerRow], mut out: W) -> anyhow::Result<()> {
    out.write_all(serde_json::to_string_pretty(rows)?.as_bytes())?;
    Ok(())
}
