//! Foundational value types: entities, bank codes, transaction records.

pub mod entity;
pub mod transaction;
