//! Order-book depth view pipeline.
//!
//! Turns raw order-book snapshots into render-ready depth rows: price
//! levels are merged into coarser buckets, truncated to the visible depth,
//! annotated with cumulative sizes and bar-width percentages, and topped
//! with the bid/ask spread. A bounded-rate scheduler gates how often the
//! chain re-runs, so the rendering layer never redraws faster than its
//! tick no matter how fast snapshots arrive.
//!
//! All price and size arithmetic is `rust_decimal::Decimal`; feeds deliver
//! exchange-native fixed-point values and binary floats can merge or split
//! buckets incorrectly.

pub mod aggregate;
pub mod group;
pub mod highlight;
pub mod level;
pub mod market;
pub mod scheduler;
pub mod side;
pub mod snapshot;
pub mod spread;
pub mod view;
