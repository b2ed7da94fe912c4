//! Running-balance ledger computation

pub mod accumulator;

pub use accumulator::*;
