use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{level::Level, side::Side};

/// Merge raw levels into coarser price buckets.
///
/// Prices bucket toward the centre of the book: bids round down to a
/// multiple of `grouping`, asks round up, so a grouped level never crosses
/// the true best price. Sizes landing in the same bucket are summed and the
/// output keeps the side's sort order (bids descending, asks ascending).
///
/// When `grouping` is zero or no coarser than the market tick there is
/// nothing to merge and the input is returned unchanged, skipping the
/// rounding arithmetic entirely.
#[must_use]
pub fn group(levels: &[Level], grouping: Decimal, tick_size: Decimal, side: Side) -> Vec<Level> {
    if grouping <= Decimal::ZERO || grouping <= tick_size {
        return levels.to_vec();
    }

    let dp = grouping.normalize().scale();
    let mut buckets: BTreeMap<Decimal, Decimal> = BTreeMap::new();
    for level in levels {
        let steps = level.price / grouping;
        let bucket = match side {
            Side::Bid => steps.floor() * grouping,
            Side::Ask => steps.ceil() * grouping,
        };
        *buckets.entry(bucket.round_dp(dp)).or_insert(Decimal::ZERO) += level.size;
    }

    let rows = buckets.into_iter().map(|(price, size)| Level::new(price, size));
    if side.is_bid() {
        rows.rev().collect()
    } else {
        rows.collect()
    }
}
