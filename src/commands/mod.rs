// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod dashboard;
pub mod exporter;
pub mod targets;
pub mod transactions;

use crate::ledger::DateRange;
use crate::utils::parse_month;
use anyhow::Result;
use chrono::{Datelike, Local};

/// Resolve the `--month` flag (current month when absent) to (year, month).
pub fn month_from_args(m: &clap::ArgMatches) -> Result<(i32, u32)> {
    match m.get_one::<String>("month") {
        Some(s) => parse_month(s),
        None => {
            let today = Local::now().date_naive();
            Ok((today.year(), today.month()))
        }
    }
}

pub fn month_range_from_args(m: &clap::ArgMatches) -> Result<DateRange> {
    let (year, month) = month_from_args(m)?;
    DateRange::month(year, month)
}

pub fn search_from_args(m: &clap::ArgMatches) -> String {
    m.get_one::<String>("search").cloned().unwrap_or_default()
}
