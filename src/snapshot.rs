use crate::level::Level;

/// One full order-book snapshot from the upstream source.
///
/// Bids are held descending by price and asks ascending, so index zero is
/// the best level on either side. Snapshots are value types: equality is a
/// deep comparison of both sequences, which the refresh scheduler relies on
/// because upstream sources routinely re-deliver unchanged content in fresh
/// allocations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderbookSnapshot {
    pub bids: Vec<Level>,
    pub asks: Vec<Level>,
}

impl OrderbookSnapshot {
    /// Build a snapshot, normalising the ordering invariant regardless of
    /// how the source ordered its arrays.
    #[must_use]
    pub fn new(mut bids: Vec<Level>, mut asks: Vec<Level>) -> Self {
        bids.sort_by(|a, b| b.price.cmp(&a.price));
        asks.sort_by(|a, b| a.price.cmp(&b.price));
        Self { bids, asks }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn best_bid(&self) -> Option<Level> {
        self.bids.first().copied()
    }

    #[inline]
    #[must_use]
    pub fn best_ask(&self) -> Option<Level> {
        self.asks.first().copied()
    }
}
