//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods for one
//! table. Read methods accept `&SqlitePool`; mutating methods accept
//! `&mut SqliteConnection` so handlers can compose the entity write and its
//! activity event on a single transaction.

pub mod activity_repo;
pub mod brand_kit_repo;
pub mod claim_repo;
pub mod comment_repo;
pub mod deal_repo;
pub mod deliverable_repo;
pub mod lifecycle_repo;
pub mod organization_repo;
pub mod proof_repo;
pub mod sponsor_repo;
pub mod ticket_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use brand_kit_repo::BrandKitRepo;
pub use claim_repo::ClaimRepo;
pub use comment_repo::CommentRepo;
pub use deal_repo::DealRepo;
pub use deliverable_repo::DeliverableRepo;
pub use lifecycle_repo::LifecycleRepo;
pub use organization_repo::OrganizationRepo;
pub use proof_repo::ProofRepo;
pub use sponsor_repo::SponsorRepo;
pub use ticket_repo::{TicketMessageRepo, TicketRepo};
pub use user_repo::UserRepo;
