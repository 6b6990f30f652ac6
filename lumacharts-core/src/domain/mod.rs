//! Domain types: calendar windows, sampling intervals, price series.

pub mod interval;
pub mod series;
pub mod window;

pub use interval::{pick_interval, SamplingInterval};
pub use series::{floor_to_day, floor_to_minute, PricePoint, PriceSeries};
pub use window::{last_trading_day, plan_window, RangeKey, TimeWindow};
