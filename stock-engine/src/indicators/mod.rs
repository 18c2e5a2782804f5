//! Built-in indicator implementations provided by the crate.

pub mod atr;
pub mod chandelier;
pub mod sma;

pub use atr::Atr;
pub use chandelier::{Chandelier, ChandelierParams, ChandelierType};
pub use sma::Sma;
