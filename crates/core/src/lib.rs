//! Domain core for the sponsorship-operations platform.
//!
//! This crate has no internal dependencies so it can be used by the
//! repository layer, the API server, and any future CLI tooling. It owns the
//! shared type aliases, the error taxonomy, the status enumerations, the
//! archive/restore lifecycle rules, the request principal model, and the
//! claim eligibility rules.

pub mod activity;
pub mod claims;
pub mod error;
pub mod lifecycle;
pub mod principal;
pub mod status;
pub mod token;
pub mod types;
