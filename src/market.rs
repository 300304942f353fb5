use rust_decimal::Decimal;
use thiserror::Error;

/// Multipliers applied to the tick size to build the selectable grouping
/// ladder. Offering only powers of ten keeps every grouping an exact
/// multiple of the tick, so grouped prices always land on valid increments.
pub const GROUPING_MULTIPLIERS: [u32; 5] = [1, 10, 100, 1_000, 10_000];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarketError {
    #[error("tick size must be positive, got {0}")]
    InvalidTickSize(Decimal),
    #[error("minimum order size must be positive, got {0}")]
    InvalidMinOrderSize(Decimal),
}

/// Read-only metadata for the selected market.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Market {
    pub base: String,
    pub quote: String,
    pub tick_size: Decimal,
    pub min_order_size: Decimal,
}

impl Market {
    pub fn new(
        base: impl Into<String>,
        quote: impl Into<String>,
        tick_size: Decimal,
        min_order_size: Decimal,
    ) -> Result<Self, MarketError> {
        if tick_size <= Decimal::ZERO {
            return Err(MarketError::InvalidTickSize(tick_size));
        }
        if min_order_size <= Decimal::ZERO {
            return Err(MarketError::InvalidMinOrderSize(min_order_size));
        }
        Ok(Self { base: base.into(), quote: quote.into(), tick_size, min_order_size })
    }

    #[must_use]
    pub fn symbol(&self) -> String {
        format!("{}-{}", self.base, self.quote)
    }

    /// Groupings offered to the user, finest first.
    #[must_use]
    pub fn grouping_options(&self) -> [Decimal; GROUPING_MULTIPLIERS.len()] {
        GROUPING_MULTIPLIERS.map(|m| self.tick_size * Decimal::from(m))
    }

    #[inline]
    #[must_use]
    pub fn default_grouping(&self) -> Decimal {
        self.tick_size
    }

    /// Decimal places used to format prices at the given grouping. Falls
    /// back to the tick precision for unset groupings.
    #[must_use]
    pub fn price_dp(&self, grouping: Decimal) -> u32 {
        let step = if grouping > Decimal::ZERO { grouping } else { self.tick_size };
        step.normalize().scale()
    }
}
