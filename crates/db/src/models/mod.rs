//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod activity;
pub mod brand_kit;
pub mod claim;
pub mod comment;
pub mod deal;
pub mod deliverable;
pub mod organization;
pub mod proof;
pub mod sponsor;
pub mod ticket;
pub mod user;
