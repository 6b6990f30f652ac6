//! Chart adaptation: display formats and the serializable figure descriptor.

pub mod figure;
pub mod format;

pub use figure::{price_figure, ChartDescriptor, ChartLayout, PriceTrace};
pub use format::ChartFormat;
