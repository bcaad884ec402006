// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Sales-target tracking: resolve the targets that apply to a year and
//! measure realized income against them.

use crate::models::Target;
use rust_decimal::Decimal;
use serde::Serialize;

/// Targets in effect for one year: the annual figure (month=0 row) and a
/// dense per-month override table, zero where no override exists.
#[derive(Debug, Clone, Default)]
pub struct YearTargets {
    pub annual: Decimal,
    pub monthly: [Decimal; 12],
}

/// Resolve target rows for `year`. Duplicate annual rows are tolerated by
/// taking the maximum; duplicate monthly rows resolve last-write-wins.
// TODO: surface duplicate annual rows in `target list` so they can be cleaned up.
pub fn targets_for_year(rows: &[Target], year: i32) -> YearTargets {
    let mut out = YearTargets::default();
    for r in rows.iter().filter(|r| r.year == year) {
        match r.month {
            0 => out.annual = out.annual.max(r.target),
            1..=12 => out.monthly[(r.month - 1) as usize] = r.target,
            _ => {}
        }
    }
    out
}

/// The target a month is measured against: the explicit override when
/// nonzero, else one twelfth of the annual target, else zero.
pub fn effective_monthly_target(targets: &YearTargets, month: u32) -> Decimal {
    let override_val = match month {
        1..=12 => targets.monthly[(month - 1) as usize],
        _ => Decimal::ZERO,
    };
    if !override_val.is_zero() {
        override_val
    } else if targets.annual > Decimal::ZERO {
        targets.annual / Decimal::from(12)
    } else {
        Decimal::ZERO
    }
}

/// Progress against a target. `percent` is `None` when no positive target is
/// set; "no target" and "0% achieved" are different answers and callers must
/// not collapse them.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Achievement {
    pub current: Decimal,
    pub target: Decimal,
    pub percent: Option<Decimal>,
    pub percent_clamped: Decimal,
    pub shortfall: Decimal,
}

pub fn achievement(current: Decimal, target: Decimal) -> Achievement {
    let percent = if target > Decimal::ZERO {
        Some(current / target * Decimal::ONE_HUNDRED)
    } else {
        None
    };
    let percent_clamped = percent
        .map(|p| p.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO);
    Achievement {
        current,
        target,
        percent,
        percent_clamped,
        shortfall: (target - current).max(Decimal::ZERO),
    }
}
