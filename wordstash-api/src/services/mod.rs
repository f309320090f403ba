//! Outbound integrations and background work

pub mod dictionary;
pub mod enrichment;
