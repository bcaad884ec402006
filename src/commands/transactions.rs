// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{month_from_args, month_range_from_args, search_from_args};
use crate::ledger::{self, DateRange};
use crate::models::{Transaction, TxType};
use crate::report::{self, LedgerRow};
use crate::store::{next_id, Store};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::Local;
use rust_decimal::Decimal;

pub fn handle(store: &dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("delete", sub)) => delete(store, sub)?,
        Some(("sample", sub)) => sample(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg_or_empty(sub: &clap::ArgMatches, name: &str) -> String {
    sub.get_one::<String>(name).cloned().unwrap_or_default()
}

fn add(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let tx_type: TxType = sub
        .get_one::<String>("type")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;
    let qty = parse_decimal(sub.get_one::<String>("qty").unwrap())?;
    let unit_price = parse_decimal(sub.get_one::<String>("unit-price").unwrap())?;
    let vat_percent = parse_decimal(sub.get_one::<String>("vat").unwrap())?;

    let existing = store.load_transactions()?;
    let tx = Transaction {
        id: next_id(&existing),
        date: Some(date),
        project: arg_or_empty(sub, "project"),
        tx_type,
        category: arg_or_empty(sub, "category"),
        vendor: arg_or_empty(sub, "vendor"),
        description: arg_or_empty(sub, "description"),
        qty,
        unit_price,
        vat_percent,
        payment: arg_or_empty(sub, "payment"),
        status: arg_or_empty(sub, "status"),
        reference: arg_or_empty(sub, "ref"),
        created_at: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
    };
    store.append_transaction(&tx)?;
    let net = ledger::derive(&tx).net;
    println!(
        "Recorded #{} {} {} on {} ({})",
        tx.id,
        tx.tx_type,
        fmt_money(&net),
        date,
        tx.category
    );
    Ok(())
}

fn list(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.project.clone(),
                    r.tx_type.clone(),
                    r.category.clone(),
                    r.vendor.clone(),
                    fmt_money(&r.base),
                    fmt_money(&r.vat),
                    fmt_money(&r.net),
                    r.status.clone(),
                    r.reference.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID", "Date", "Project", "Type", "Category", "Vendor", "Amount", "VAT", "Net",
                    "Status", "Ref",
                ],
                data,
            )
        );
    }
    Ok(())
}

/// Filtered, sorted display rows for `tx list` and the exporter.
pub fn query_rows(store: &dyn Store, sub: &clap::ArgMatches) -> Result<Vec<LedgerRow>> {
    let range = month_range_from_args(sub)?;
    let search = search_from_args(sub);
    let all = store.load_transactions()?;
    let filtered = ledger::filter(&all, Some(range), &search);
    let mut rows = report::table_rows(&filtered);
    // Shared with the exporter, whose subcommand defines no --limit.
    if let Ok(Some(limit)) = sub.try_get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn delete(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if store.delete_transaction(id)? {
        println!("Deleted transaction #{}", id);
    } else {
        println!("Transaction #{} not found (already deleted?)", id);
    }
    Ok(())
}

/// The two demo rows the dashboard tour expects: one income milestone and
/// one VAT-bearing studio expense, dated the first of the month.
fn sample(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = month_from_args(sub)?;
    let start = DateRange::month(year, month)?.start;
    let created = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    let nid = next_id(&store.load_transactions()?);

    let demo = [
        Transaction {
            id: nid,
            date: Some(start),
            project: "Client A - TVC".into(),
            tx_type: TxType::Income,
            category: "Production Fee".into(),
            vendor: "Client A".into(),
            description: "Milestone payment".into(),
            qty: Decimal::ONE,
            unit_price: Decimal::from(50000),
            vat_percent: Decimal::ZERO,
            payment: "Bank Transfer".into(),
            status: "Received".into(),
            reference: "INV-001".into(),
            created_at: created.clone(),
        },
        Transaction {
            id: nid + 1,
            date: Some(start),
            project: "Client A - TVC".into(),
            tx_type: TxType::Expense,
            category: "Studio".into(),
            vendor: "Studio X".into(),
            description: "Studio rental".into(),
            qty: Decimal::ONE,
            unit_price: Decimal::from(3500),
            vat_percent: Decimal::from(7),
            payment: "Bank Transfer".into(),
            status: "Paid".into(),
            reference: "RC-001".into(),
            created_at: created,
        },
    ];
    for tx in &demo {
        store.append_transaction(tx)?;
    }
    println!("Added {} sample transactions for {}-{:02}", demo.len(), year, month);
    Ok(())
}
