// src/portfolio/mod.rs
mod error;
mod models;
mod service;
mod share_value;
mod worth;

pub use error::ValuationError;
pub use models::*;
pub use service::*;
pub use share_value::{share_value, PriceIndex};
pub use worth::*;
