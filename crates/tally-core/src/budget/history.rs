//! History aggregation: expense rows to per-category monthly series

use std::collections::BTreeMap;

use chrono::Datelike;

use super::store::ExpenseLedger;
use crate::error::Result;
use crate::models::{Expense, MonthBucket, MonthlyTotal};

/// Linear month index; December → January steps by exactly one
pub fn period_index(year: i32, month: u32) -> i32 {
    year * 12 + month as i32
}

/// Collapse month buckets into a chronological, sparse series
///
/// Buckets for the same month are summed. Months without a bucket produce no
/// entry.
pub fn aggregate_monthly<I>(buckets: I) -> Vec<MonthlyTotal>
where
    I: IntoIterator<Item = MonthBucket>,
{
    let mut by_index: BTreeMap<i32, f64> = BTreeMap::new();
    for bucket in buckets {
        *by_index
            .entry(period_index(bucket.year, bucket.month))
            .or_insert(0.0) += bucket.total;
    }

    by_index
        .into_iter()
        .map(|(period_index, total)| MonthlyTotal {
            period_index,
            total,
        })
        .collect()
}

/// Group raw expense rows of one category into month buckets
pub fn bucket_expenses<'a, I>(expenses: I) -> Vec<MonthBucket>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for e in expenses {
        *by_month
            .entry((e.date.year(), e.date.month()))
            .or_insert(0.0) += e.amount;
    }

    by_month
        .into_iter()
        .map(|((year, month), total)| MonthBucket { year, month, total })
        .collect()
}

/// Monthly spending series for one user and category
pub fn monthly_series<L>(ledger: &L, user_id: i64, category_id: i64) -> Result<Vec<MonthlyTotal>>
where
    L: ExpenseLedger + ?Sized,
{
    Ok(aggregate_monthly(
        ledger.series_by_category(user_id, category_id)?,
    ))
}
