//! Core data types for reprolint

pub mod analysis;
pub mod procedure;
