// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use prodbook::ledger;
use prodbook::models::{Transaction, TxType};
use prodbook::store::{sheet::SheetStore, Store};
use prodbook::{cli, commands::transactions};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn setup(dir: &std::path::Path) -> SheetStore {
    let store = SheetStore::open(dir.to_path_buf()).unwrap();
    for i in 1..=3 {
        store
            .append_transaction(&Transaction {
                id: i,
                date: NaiveDate::from_ymd_opt(2025, 1, i as u32),
                project: "P".into(),
                tx_type: TxType::Expense,
                category: "Cat1".into(),
                vendor: "V".into(),
                description: String::new(),
                qty: Decimal::ONE,
                unit_price: Decimal::from(10),
                vat_percent: Decimal::ZERO,
                payment: String::new(),
                status: String::new(),
                reference: String::new(),
                created_at: String::new(),
            })
            .unwrap();
    }
    store
}

#[test]
fn list_limit_respected_newest_first() {
    let dir = tempdir().unwrap();
    let store = setup(dir.path());
    let matches = cli::build_cli().get_matches_from([
        "prodbook", "tx", "list", "--month", "2025-01", "--limit", "2",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&store, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-01-03");
            assert_eq!(rows[1].date, "2025-01-02");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn sample_seeds_the_demo_month() {
    let dir = tempdir().unwrap();
    let store = SheetStore::open(dir.path().to_path_buf()).unwrap();
    let matches = cli::build_cli().get_matches_from([
        "prodbook", "tx", "sample", "--month", "2025-01",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(&store, tx_m).unwrap();
    } else {
        panic!("no tx subcommand");
    }

    let loaded = store.load_transactions().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id, 1);
    assert_eq!(loaded[1].id, 2);
    assert_eq!(loaded[0].date, NaiveDate::from_ymd_opt(2025, 1, 1));
    let totals = ledger::totals_by_type(&loaded);
    assert_eq!(totals.income, Decimal::from(50000));
    assert_eq!(totals.expense, Decimal::from(3745));
}
