//! Aging-bucket classification of outstanding amounts

pub mod buckets;
pub mod classifier;

pub use buckets::*;
pub use classifier::*;
