//! Irish tax calculations for sole traders and small companies: civil
//! service allowances, vehicle capital allowances, relief scanning,
//! cross-border VAT and the annual returns built from them.

pub mod core;
pub mod report;
pub mod tax;
