#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! Indicator computations over marshaled quotes, producing raw per-period records.

/// Foundational traits and the engine error type.
pub mod core;
/// Built-in indicator implementations.
pub mod indicators;
/// Raw per-period result records.
pub mod records;
/// Warm-up detection and removal over raw records.
pub mod warmup;

/// Re-export of the core traits and error type to make the crate easy to consume.
pub use crate::core::{EngineError, Indicator, Input};
pub use crate::indicators::{ChandelierParams, ChandelierType};
pub use crate::records::{ChandelierRaw, RawResult, SmaExtendedRaw, SmaRaw};
pub use crate::warmup::{condense, remove_warmup_periods, warmup_periods};
