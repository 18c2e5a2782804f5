//! Core domain types shared by the stock indicator crates.

pub mod quote;

pub use quote::Quote;
