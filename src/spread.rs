use rust_decimal::Decimal;

/// Best-bid/best-ask spread for the aggregated book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spread {
    /// Absolute spread (ask - bid)
    pub spread: Decimal,
    /// Spread as a percentage of the best ask
    ///
    /// The ask is the historical base for this figure. Rebasing onto the
    /// mid price would silently change every displayed value, so the ask
    /// base stays until product signs off on a switch.
    pub spread_percent: Decimal,
}

/// Absent whenever either side of the book is empty; the caller renders a
/// placeholder in that case.
#[must_use]
pub fn spread(best_bid: Option<Decimal>, best_ask: Option<Decimal>) -> Option<Spread> {
    let (bid, ask) = (best_bid?, best_ask?);
    let spread = ask - bid;
    let spread_percent =
        if ask > Decimal::ZERO { spread / ask * Decimal::ONE_HUNDRED } else { Decimal::ZERO };
    Some(Spread { spread, spread_percent })
}
