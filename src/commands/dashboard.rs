// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{month_from_args, search_from_args};
use crate::ledger::{self, DateRange};
use crate::report;
use crate::store::Store;
use crate::targets::{self, Achievement};
use crate::utils::{fmt_money, pretty_table};
use anyhow::Result;

pub fn handle(store: &dyn Store, m: &clap::ArgMatches) -> Result<()> {
    let (year, month) = month_from_args(m)?;
    let search = search_from_args(m);

    let all = store.load_transactions()?;
    let month_txs = ledger::filter(&all, Some(DateRange::month(year, month)?), &search);
    let year_txs = ledger::filter(&all, Some(DateRange::year(year)?), "");

    let month_totals = ledger::totals_by_type(&month_txs);
    let year_totals = ledger::totals_by_type(&year_txs);
    let profit = ledger::profit(month_totals.income, month_totals.expense);
    let margin = ledger::margin_percent(month_totals.income, month_totals.expense);

    println!("P&L for {}-{:02}", year, month);
    println!(
        "{}",
        pretty_table(
            &["Total Income", "Total Expense", "Profit", "Margin"],
            vec![vec![
                fmt_money(&month_totals.income),
                fmt_money(&month_totals.expense),
                fmt_money(&profit),
                format!("{}%", margin.round_dp(1)),
            ]],
        )
    );

    let series = report::chart_series(&ledger::monthly_series(&year_txs));
    let rows: Vec<Vec<String>> = series
        .iter()
        .map(|p| {
            vec![
                format!("{}-{:02}", year, p.month),
                fmt_money(&p.income),
                fmt_money(&p.expense),
                fmt_money(&p.profit),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expense", "Profit"], rows));

    let year_targets = targets::targets_for_year(&store.load_targets()?, year);
    let monthly_target = targets::effective_monthly_target(&year_targets, month);
    print_achievement(
        &format!("Monthly target ({}-{:02})", year, month),
        targets::achievement(month_totals.income, monthly_target),
    );
    print_achievement(
        &format!("Annual target ({})", year),
        targets::achievement(year_totals.income, year_targets.annual),
    );
    Ok(())
}

fn print_achievement(title: &str, a: Achievement) {
    match a.percent {
        Some(pct) => {
            println!(
                "{}: {} / {} = {}% ({}% of bar), to go {}",
                title,
                fmt_money(&a.current),
                fmt_money(&a.target),
                pct.round_dp(1),
                a.percent_clamped.round_dp(1),
                fmt_money(&a.shortfall),
            );
        }
        None => {
            // No target set is not 0% achieved.
            println!(
                "{}: {} / - (no target set; use `prodbook target set`)",
                title,
                fmt_money(&a.current)
            );
        }
    }
}
