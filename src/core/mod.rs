//! Core business logic abstractions

pub mod card;
pub mod config;
pub mod currency;
pub mod format;
pub mod log;
pub mod market;
pub mod presenter;
pub mod tracker;

// Re-export main types for cleaner imports
pub use currency::Currency;
pub use market::{DisplayState, MarketDataProvider, MarketSnapshot};
pub use presenter::Presenter;
pub use tracker::{Command, Tracker, TrackerSettings};
