use std::time::Duration;

use log::trace;
use rust_decimal::Decimal;

use crate::{
    market::Market,
    snapshot::OrderbookSnapshot,
    view::{BookView, Layout, ViewParams},
};

/// Recommended cadence for driving [`RefreshScheduler::tick`]. The timer
/// itself belongs to the host loop, which makes it trivial to replace with
/// direct `tick()` calls in tests.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(400);

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The parked snapshot matched the rendered one and no parameter
    /// changed; the view was left untouched.
    Unchanged,
    /// The pipeline re-ran and the view was replaced.
    Recomputed,
}

/// Bounded-rate gate in front of the depth pipeline.
///
/// Snapshots arrive at whatever rate the upstream source produces them;
/// [`submit`](Self::submit) only parks the latest. Work happens on `tick`:
/// the parked snapshot is compared by value against the one behind the
/// current view, and the chain re-runs only when content or parameters
/// actually changed. Each tick completes synchronously, so the rendered
/// view always reflects the most recently accepted snapshot and nothing is
/// ever applied half-way.
#[derive(Debug)]
pub struct RefreshScheduler {
    market: Market,
    params: ViewParams,
    params_dirty: bool,
    pending: Option<OrderbookSnapshot>,
    rendered: Option<OrderbookSnapshot>,
    view: BookView,
}

impl RefreshScheduler {
    #[must_use]
    pub fn new(market: Market, params: ViewParams) -> Self {
        Self { market, params, params_dirty: false, pending: None, rendered: None, view: BookView::default() }
    }

    /// Park the most recent snapshot. Earlier unconsumed snapshots are
    /// dropped; the view only ever advances to the latest one.
    pub fn submit(&mut self, snapshot: OrderbookSnapshot) {
        self.pending = Some(snapshot);
    }

    pub fn set_depth(&mut self, depth: usize) {
        if self.params.depth != depth {
            self.params.depth = depth;
            self.params_dirty = true;
        }
    }

    pub fn set_grouping(&mut self, grouping: Decimal) {
        if self.params.grouping != grouping {
            self.params.grouping = grouping;
            self.params_dirty = true;
        }
    }

    pub fn set_layout(&mut self, layout: Layout) {
        if self.params.layout != layout {
            self.params.layout = layout;
            self.params_dirty = true;
        }
    }

    #[inline]
    #[must_use]
    pub fn view(&self) -> &BookView {
        &self.view
    }

    #[inline]
    #[must_use]
    pub fn params(&self) -> &ViewParams {
        &self.params
    }

    #[inline]
    #[must_use]
    pub fn market(&self) -> &Market {
        &self.market
    }

    /// One scheduler tick: compare, then either skip or recompute.
    pub fn tick(&mut self, open_order_prices: &[Decimal]) -> TickOutcome {
        let snapshot_changed = match (&self.pending, &self.rendered) {
            (Some(next), Some(current)) => next != current,
            (Some(_), None) => true,
            (None, _) => false,
        };

        if !snapshot_changed && !self.params_dirty {
            // A parked duplicate has nothing left to offer.
            self.pending = None;
            trace!("tick: book unchanged, skipping recompute");
            return TickOutcome::Unchanged;
        }

        if let Some(next) = self.pending.take() {
            self.rendered = Some(next);
        }

        let mut view = match &self.rendered {
            Some(snapshot) => BookView::build(snapshot, &self.market, &self.params),
            None => BookView::default(),
        };
        // Identity groupings still need a tick-wide bucket for the
        // membership test.
        let bucket_width = self.params.grouping.max(self.market.tick_size);
        view.highlight_open_orders(open_order_prices, bucket_width);

        self.view = view;
        self.params_dirty = false;
        trace!("tick: recomputed {} bid rows, {} ask rows", self.view.bids.len(), self.view.asks.len());
        TickOutcome::Recomputed
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::{RefreshScheduler, TickOutcome};
    use crate::{
        level::Level,
        market::Market,
        snapshot::OrderbookSnapshot,
        view::{Layout, ViewParams},
    };

    fn scheduler() -> RefreshScheduler {
        let market = Market::new("SOL", "USDC", dec!(0.01), dec!(0.1)).unwrap();
        let params = ViewParams { depth: 10, grouping: dec!(0.05), layout: Layout::Stacked };
        RefreshScheduler::new(market, params)
    }

    fn snapshot() -> OrderbookSnapshot {
        OrderbookSnapshot::new(
            vec![Level::new(dec!(100.03), dec!(5)), Level::new(dec!(100.01), dec!(3))],
            vec![Level::new(dec!(100.07), dec!(2))],
        )
    }

    #[test]
    fn test_duplicate_snapshot_skips_recompute() {
        let mut scheduler = scheduler();

        scheduler.submit(snapshot());
        assert_eq!(scheduler.tick(&[]), TickOutcome::Recomputed);

        // Fresh allocation, identical content: value comparison must catch it.
        scheduler.submit(snapshot());
        assert_eq!(scheduler.tick(&[]), TickOutcome::Unchanged);
        assert_eq!(scheduler.tick(&[]), TickOutcome::Unchanged);
    }

    #[test]
    fn test_changed_snapshot_recomputes() {
        let mut scheduler = scheduler();
        scheduler.submit(snapshot());
        scheduler.tick(&[]);

        let mut next = snapshot();
        next.bids[0].size = dec!(6);
        scheduler.submit(next);
        assert_eq!(scheduler.tick(&[]), TickOutcome::Recomputed);
        assert_eq!(scheduler.view().bids[0].size, dec!(9));
    }

    #[test]
    fn test_parameter_change_recomputes_without_new_snapshot() {
        let mut scheduler = scheduler();
        scheduler.submit(snapshot());
        scheduler.tick(&[]);

        scheduler.set_depth(1);
        assert_eq!(scheduler.tick(&[]), TickOutcome::Recomputed);
        assert_eq!(scheduler.view().bids.len(), 1);

        scheduler.set_grouping(dec!(0.01));
        assert_eq!(scheduler.tick(&[]), TickOutcome::Recomputed);

        scheduler.set_layout(Layout::Mirrored);
        assert_eq!(scheduler.tick(&[]), TickOutcome::Recomputed);
    }

    #[test]
    fn test_setting_same_parameters_is_a_noop() {
        let mut scheduler = scheduler();
        scheduler.submit(snapshot());
        scheduler.tick(&[]);

        scheduler.set_depth(10);
        scheduler.set_grouping(dec!(0.05));
        scheduler.set_layout(Layout::Stacked);
        assert_eq!(scheduler.tick(&[]), TickOutcome::Unchanged);
    }

    #[test]
    fn test_latest_snapshot_wins() {
        let mut scheduler = scheduler();

        scheduler.submit(snapshot());
        let newer = OrderbookSnapshot::new(vec![Level::new(dec!(101.00), dec!(1))], vec![]);
        scheduler.submit(newer);

        scheduler.tick(&[]);
        assert_eq!(scheduler.view().bids[0].price, dec!(101.00));
        assert!(scheduler.view().spread.is_none());
    }

    #[test]
    fn test_tick_without_data_is_idle() {
        let mut scheduler = scheduler();
        assert_eq!(scheduler.tick(&[]), TickOutcome::Unchanged);
        assert!(scheduler.view().bids.is_empty());
    }

    #[test]
    fn test_open_orders_highlight_on_recompute() {
        let mut scheduler = scheduler();
        scheduler.submit(snapshot());
        scheduler.tick(&[dec!(100.02)]);
        assert!(scheduler.view().bids[0].highlighted);
    }
}
