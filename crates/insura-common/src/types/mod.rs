//! Core data types for Insura

pub mod claim_table;
pub mod period;
pub mod quote;
