// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use prodbook::models::Target;
use prodbook::targets::{achievement, effective_monthly_target, targets_for_year};
use rust_decimal::Decimal;

fn target(year: i32, month: u32, value: i64) -> Target {
    Target {
        year,
        month,
        target: Decimal::from(value),
    }
}

#[test]
fn annual_and_overrides_resolve_per_year() {
    let rows = vec![
        target(2025, 0, 120000),
        target(2025, 3, 5000),
        target(2024, 0, 90000),
        target(2024, 3, 7777),
    ];
    let t = targets_for_year(&rows, 2025);
    assert_eq!(t.annual, Decimal::from(120000));
    assert_eq!(t.monthly[2], Decimal::from(5000));
    assert_eq!(t.monthly[0], Decimal::ZERO);
}

#[test]
fn duplicate_annual_rows_resolve_to_max() {
    let rows = vec![target(2025, 0, 100000), target(2025, 0, 120000)];
    let t = targets_for_year(&rows, 2025);
    assert_eq!(t.annual, Decimal::from(120000));
}

#[test]
fn effective_target_falls_back_to_annual_twelfth() {
    let t = targets_for_year(&[target(2025, 0, 120000)], 2025);
    assert_eq!(effective_monthly_target(&t, 5), Decimal::from(10000));
}

#[test]
fn nonzero_override_beats_annual_twelfth() {
    let rows = vec![target(2025, 0, 120000), target(2025, 5, 4000)];
    let t = targets_for_year(&rows, 2025);
    assert_eq!(effective_monthly_target(&t, 5), Decimal::from(4000));
    assert_eq!(effective_monthly_target(&t, 6), Decimal::from(10000));
}

#[test]
fn no_targets_at_all_yields_zero() {
    let t = targets_for_year(&[], 2025);
    assert_eq!(t.annual, Decimal::ZERO);
    assert_eq!(effective_monthly_target(&t, 1), Decimal::ZERO);
}

#[test]
fn achievement_percent_and_shortfall() {
    let a = achievement(Decimal::from(8000), Decimal::from(10000));
    assert_eq!(a.percent, Some(Decimal::from(80)));
    assert_eq!(a.percent_clamped, Decimal::from(80));
    assert_eq!(a.shortfall, Decimal::from(2000));
}

#[test]
fn achievement_over_target_clamps_bar_not_percent() {
    let a = achievement(Decimal::from(15000), Decimal::from(10000));
    assert_eq!(a.percent, Some(Decimal::from(150)));
    assert_eq!(a.percent_clamped, Decimal::from(100));
    assert_eq!(a.shortfall, Decimal::ZERO);
}

#[test]
fn no_target_is_not_zero_percent() {
    let a = achievement(Decimal::from(8000), Decimal::ZERO);
    assert_eq!(a.percent, None);
    assert_eq!(a.shortfall, Decimal::ZERO);
}
