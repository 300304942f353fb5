use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

use crate::level::Level;

/// A render-ready depth row.
///
/// `size_percent` scales the running cumulative size against the combined
/// visible total; `max_size_percent` scales this row's own size against the
/// largest visible level. Both drive bar widths directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregatedLevel {
    pub price: Decimal,
    pub size: Decimal,
    pub cumulative_size: Decimal,
    pub size_percent: u8,
    pub max_size_percent: u8,
    pub highlighted: bool,
}

/// Combined visible size and largest single visible level across both
/// sides, truncated to `depth` rows per side. Computed once per snapshot so
/// bid and ask bar widths share one scale.
#[must_use]
pub fn side_totals(bids: &[Level], asks: &[Level], depth: usize) -> (Decimal, Decimal) {
    let mut total = Decimal::ZERO;
    let mut max = Decimal::ZERO;
    for level in bids.iter().take(depth).chain(asks.iter().take(depth)) {
        total += level.size;
        if level.size > max {
            max = level.size;
        }
    }
    (total, max)
}

/// Convert one grouped, sorted side into cumulative depth rows.
///
/// At most `depth` rows are taken. Cumulative size runs in iteration order;
/// `reverse` flips the finished sequence for the far side of a mirrored or
/// stacked layout without changing what the cumulative figures mean.
#[must_use]
pub fn aggregate(
    levels: &[Level],
    total_size: Decimal,
    max_size: Decimal,
    depth: usize,
    reverse: bool,
) -> Vec<AggregatedLevel> {
    let mut cumulative = Decimal::ZERO;
    let mut rows = Vec::with_capacity(depth.min(levels.len()));
    for level in levels.iter().take(depth) {
        cumulative += level.size;
        rows.push(AggregatedLevel {
            price: level.price,
            size: level.size,
            cumulative_size: cumulative,
            size_percent: percent_of(cumulative, total_size),
            max_size_percent: percent_of(level.size, max_size),
            highlighted: false,
        });
    }
    if reverse {
        rows.reverse();
    }
    rows
}

// Denominator is floored at one so an empty book yields 0% instead of a
// division by zero.
#[inline]
fn percent_of(part: Decimal, whole: Decimal) -> u8 {
    let whole = whole.max(Decimal::ONE);
    let pct = (part / whole * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    pct.to_u8().map_or(100, |p| p.min(100))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{aggregate, side_totals};
    use crate::level::Level;

    fn levels(raw: &[(Decimal, Decimal)]) -> Vec<Level> {
        raw.iter().map(|&(price, size)| Level::new(price, size)).collect()
    }

    #[test]
    fn test_depth_truncation_and_cumulative() {
        let bids = levels(&[(dec!(10), dec!(1)), (dec!(9), dec!(2)), (dec!(8), dec!(3))]);
        let rows = aggregate(&bids, dec!(6), dec!(3), 2, false);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cumulative_size, dec!(1));
        assert_eq!(rows[1].cumulative_size, dec!(3));
    }

    #[test]
    fn test_cumulative_is_monotonic_and_percents_bounded() {
        let bids = levels(&[
            (dec!(10), dec!(1.5)),
            (dec!(9), dec!(0.2)),
            (dec!(8), dec!(4.3)),
            (dec!(7), dec!(2)),
        ]);
        let (total, max) = side_totals(&bids, &[], 4);
        let rows = aggregate(&bids, total, max, 4, false);

        for pair in rows.windows(2) {
            assert!(pair[1].cumulative_size >= pair[0].cumulative_size);
        }
        for row in &rows {
            assert!(row.size_percent <= 100);
            assert!(row.max_size_percent <= 100);
        }
        assert_eq!(rows.last().unwrap().size_percent, 100);
    }

    #[test]
    fn test_reverse_flips_rows_not_meaning() {
        let bids = levels(&[(dec!(10), dec!(1)), (dec!(9), dec!(2))]);
        let rows = aggregate(&bids, dec!(3), dec!(2), 2, true);
        // Deepest row first after the flip, cumulative figures untouched.
        assert_eq!(rows[0].price, dec!(9));
        assert_eq!(rows[0].cumulative_size, dec!(3));
        assert_eq!(rows[1].price, dec!(10));
        assert_eq!(rows[1].cumulative_size, dec!(1));
    }

    #[test]
    fn test_empty_side() {
        assert!(aggregate(&[], Decimal::ZERO, Decimal::ZERO, 10, false).is_empty());
    }

    #[test]
    fn test_zero_totals_do_not_divide_by_zero() {
        let bids = levels(&[(dec!(10), dec!(0.4))]);
        let rows = aggregate(&bids, Decimal::ZERO, Decimal::ZERO, 1, false);
        assert_eq!(rows[0].size_percent, 40);
        assert_eq!(rows[0].max_size_percent, 40);
    }

    #[test]
    fn test_side_totals_span_both_sides() {
        let bids = levels(&[(dec!(10), dec!(1)), (dec!(9), dec!(2)), (dec!(8), dec!(9))]);
        let asks = levels(&[(dec!(11), dec!(5))]);
        // Depth 2 ignores the 9-lot bid entirely.
        let (total, max) = side_totals(&bids, &asks, 2);
        assert_eq!(total, dec!(8));
        assert_eq!(max, dec!(5));
    }
}
