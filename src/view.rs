use rust_decimal::Decimal;

use crate::{
    aggregate::{aggregate, side_totals, AggregatedLevel},
    group::group,
    highlight::is_highlighted,
    market::Market,
    side::Side,
    snapshot::OrderbookSnapshot,
    spread::{spread, Spread},
};

/// Which side gets reversed for rendering.
///
/// Stacked lays asks above the spread row with the best ask at the bottom,
/// so ask rows are reversed. Mirrored renders bids right-to-left beside the
/// asks, so bid rows are reversed instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Stacked,
    Mirrored,
}

/// User-tunable pipeline inputs. Changing any of these forces the next
/// scheduler tick to recompute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParams {
    pub depth: usize,
    pub grouping: Decimal,
    pub layout: Layout,
}

impl ViewParams {
    #[must_use]
    pub fn new(market: &Market, depth: usize) -> Self {
        Self { depth, grouping: market.default_grouping(), layout: Layout::Stacked }
    }
}

/// The render-ready order book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookView {
    pub bids: Vec<AggregatedLevel>,
    pub asks: Vec<AggregatedLevel>,
    pub spread: Option<Spread>,
}

impl BookView {
    /// Run the full chain for one snapshot: group both sides, aggregate to
    /// depth rows with a shared bar scale, derive the spread from the
    /// grouped bests.
    #[must_use]
    pub fn build(snapshot: &OrderbookSnapshot, market: &Market, params: &ViewParams) -> Self {
        let bids = group(&snapshot.bids, params.grouping, market.tick_size, Side::Bid);
        let asks = group(&snapshot.asks, params.grouping, market.tick_size, Side::Ask);

        let (total_size, max_size) = side_totals(&bids, &asks, params.depth);
        let best_bid = bids.first().map(|level| level.price);
        let best_ask = asks.first().map(|level| level.price);

        let (reverse_bids, reverse_asks) = match params.layout {
            Layout::Stacked => (false, true),
            Layout::Mirrored => (true, false),
        };

        Self {
            bids: aggregate(&bids, total_size, max_size, params.depth, reverse_bids),
            asks: aggregate(&asks, total_size, max_size, params.depth, reverse_asks),
            spread: spread(best_bid, best_ask),
        }
    }

    /// Flag rows whose bucket contains one of the user's open orders. Runs
    /// as an independent pass over the finished rows.
    pub fn highlight_open_orders(&mut self, open_order_prices: &[Decimal], grouping: Decimal) {
        for row in self.bids.iter_mut().chain(self.asks.iter_mut()) {
            row.highlighted = is_highlighted(open_order_prices, row.price, grouping);
        }
    }
}
