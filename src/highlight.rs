use rust_decimal::Decimal;

/// Whether any of the user's open-order prices falls inside the bucket
/// `[bucket_price, bucket_price + grouping)`.
///
/// The interval is half-open and the same for both sides, so an order
/// sitting exactly on a bucket boundary lights up exactly one row.
#[inline]
#[must_use]
pub fn is_highlighted(open_order_prices: &[Decimal], bucket_price: Decimal, grouping: Decimal) -> bool {
    let upper = bucket_price + grouping;
    open_order_prices.iter().any(|&price| price >= bucket_price && price < upper)
}
