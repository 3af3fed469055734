//! Per-run conversion state.
//!
//! A `ConversionSession` owns both id spaces and the unique-card registries
//! behind them. Every stage takes it explicitly; there is no global state.

pub mod allocator;

pub use allocator::ConversionSession;
