//! Tax computation modules

pub mod tds;
