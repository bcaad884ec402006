// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(store: &dyn Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let year = *sub.get_one::<i32>("year").unwrap();
    let month = *sub.get_one::<u32>("month").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    store.upsert_target(year, month, amount)?;
    if month == 0 {
        println!("Annual target for {} = {}", year, fmt_money(&amount));
    } else {
        println!(
            "Monthly target for {}-{:02} = {}",
            year,
            month,
            fmt_money(&amount)
        );
    }
    Ok(())
}

fn list(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = sub.get_one::<i32>("year").copied();

    let mut rows = store.load_targets()?;
    if let Some(y) = year {
        rows.retain(|t| t.year == y);
    }
    rows.sort_by_key(|t| (t.year, t.month));

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data: Vec<Vec<String>> = rows
            .iter()
            .map(|t| {
                vec![
                    t.year.to_string(),
                    if t.month == 0 {
                        "annual".to_string()
                    } else {
                        format!("{:02}", t.month)
                    },
                    fmt_money(&t.target),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Year", "Month", "Target"], data));
    }
    Ok(())
}
