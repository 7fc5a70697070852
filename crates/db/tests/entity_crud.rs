//! Integration tests for the repository layer.
//!
//! Exercises the full entity hierarchy against a real database:
//! organization -> sponsor -> deal -> deliverable, plus proofs, comments,
//! tickets, and claims.

use sqlx::SqlitePool;

use sponsorops_core::status::{ClaimStatus, DealStatus, DeliverableStatus, TicketPriority};
use sponsorops_db::models::claim::{CreateClaim, DecideClaim, UpdateClaim};
use sponsorops_db::models::deal::{CreateDeal, UpdateDeal};
use sponsorops_db::models::deliverable::{CreateDeliverable, UpdateDeliverable};
use sponsorops_db::models::proof::CreateProof;
use sponsorops_db::models::sponsor::CreateSponsor;
use sponsorops_core::status::ProofKind;
use sponsorops_db::repositories::{
    ClaimRepo, CommentRepo, DealRepo, DeliverableRepo, OrganizationRepo, ProofRepo, SponsorRepo,
    TicketMessageRepo, TicketRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(s: &str) -> chrono::NaiveDate {
    s.parse().unwrap()
}

fn new_sponsor(organization_id: i64, name: &str) -> CreateSponsor {
    CreateSponsor {
        organization_id,
        name: name.to_string(),
        contact_email: None,
    }
}

fn new_deal(sponsor_id: i64, name: &str) -> CreateDeal {
    CreateDeal {
        sponsor_id,
        name: name.to_string(),
        start_date: date("2026-03-01"),
        end_date: date("2026-03-31"),
        total_value: Some(5000.0),
        guarantee_cap_pct: 0.15,
        cure_days: 5,
    }
}

fn new_deliverable(title: &str, guaranteed: bool) -> CreateDeliverable {
    CreateDeliverable {
        title: title.to_string(),
        kind: "tiktok".to_string(),
        due_date: date("2026-03-10"),
        owner: None,
        brief: None,
        value: Some(300.0),
        guaranteed,
        sponsor_approval_required: false,
    }
}

async fn seed_deal(pool: &SqlitePool) -> (i64, i64, i64) {
    let mut conn = pool.acquire().await.unwrap();
    let org = OrganizationRepo::create(&mut conn, "Night Crew").await.unwrap();
    let sponsor = SponsorRepo::create(&mut conn, &new_sponsor(org.id, "Voltage Energy"))
        .await
        .unwrap();
    let deal = DealRepo::create(&mut conn, org.id, &new_deal(sponsor.id, "Spring Push"))
        .await
        .unwrap();
    (org.id, sponsor.id, deal.id)
}

// ---------------------------------------------------------------------------
// Organizations and sponsors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_find_sponsor_scoped_by_org(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let org = OrganizationRepo::create(&mut conn, "Night Crew").await.unwrap();
    let other = OrganizationRepo::create(&mut conn, "Other Org").await.unwrap();
    let sponsor = SponsorRepo::create(&mut conn, &new_sponsor(org.id, "Voltage Energy"))
        .await
        .unwrap();
    drop(conn);

    let found = SponsorRepo::find_by_id(&pool, org.id, sponsor.id).await.unwrap();
    assert!(found.is_some());

    // The same id through another organization's scope reads as missing.
    let cross = SponsorRepo::find_by_id(&pool, other.id, sponsor.id).await.unwrap();
    assert!(cross.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sponsor_portal_tokens_are_unique_and_resolvable(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let org = OrganizationRepo::create(&mut conn, "Night Crew").await.unwrap();
    let a = SponsorRepo::create(&mut conn, &new_sponsor(org.id, "Sponsor A")).await.unwrap();
    let b = SponsorRepo::create(&mut conn, &new_sponsor(org.id, "Sponsor B")).await.unwrap();
    drop(conn);

    assert_ne!(a.portal_token, b.portal_token);
    assert_eq!(a.portal_token.len(), 22);

    let resolved = SponsorRepo::find_by_token(&pool, &a.portal_token).await.unwrap();
    assert_eq!(resolved.unwrap().id, a.id);

    let unknown = SponsorRepo::find_by_token(&pool, "not-a-real-token").await.unwrap();
    assert!(unknown.is_none());
}

// ---------------------------------------------------------------------------
// Deals
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn deal_starts_as_draft_with_contract_figures(pool: SqlitePool) {
    let (org_id, _, deal_id) = seed_deal(&pool).await;

    let deal = DealRepo::find_by_id(&pool, org_id, deal_id).await.unwrap().unwrap();
    assert_eq!(deal.status, DealStatus::Draft);
    assert_eq!(deal.guarantee_cap_pct, 0.15);
    assert_eq!(deal.cure_days, 5);
    assert!(deal.completed_at.is_none());
    assert!(deal.archived_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deal_update_applies_only_provided_fields(pool: SqlitePool) {
    let (org_id, _, deal_id) = seed_deal(&pool).await;

    let mut conn = pool.acquire().await.unwrap();
    let updated = DealRepo::update(
        &mut conn,
        org_id,
        deal_id,
        &UpdateDeal {
            name: Some("Spring Push v2".to_string()),
            start_date: None,
            end_date: None,
            total_value: None,
            guarantee_cap_pct: None,
            cure_days: None,
            status: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Spring Push v2");
    // Untouched fields keep their values.
    assert_eq!(updated.guarantee_cap_pct, 0.15);
    assert_eq!(updated.start_date, date("2026-03-01"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deal_tokens_resolve_exactly_one_deal(pool: SqlitePool) {
    let (org_id, sponsor_id, deal_id) = seed_deal(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    let second = DealRepo::create(&mut conn, org_id, &new_deal(sponsor_id, "Summer Push"))
        .await
        .unwrap();
    drop(conn);

    let first = DealRepo::find_by_id(&pool, org_id, deal_id).await.unwrap().unwrap();
    assert_ne!(first.portal_token, second.portal_token);

    let resolved = DealRepo::find_by_token(&pool, &second.portal_token).await.unwrap();
    assert_eq!(resolved.unwrap().id, second.id);
}

// ---------------------------------------------------------------------------
// Deliverables
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn deliverable_status_can_be_reassigned_freely(pool: SqlitePool) {
    let (_, _, deal_id) = seed_deal(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    let d = DeliverableRepo::create(&mut conn, deal_id, &new_deliverable("TikTok #1", true))
        .await
        .unwrap();
    assert_eq!(d.status, DeliverableStatus::Draft);

    // Jump straight to delivered, then back to internal review. No
    // transition graph is enforced.
    let d = DeliverableRepo::set_status(&mut conn, d.id, DeliverableStatus::Delivered)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(d.status, DeliverableStatus::Delivered);

    let d = DeliverableRepo::set_status(&mut conn, d.id, DeliverableStatus::InternalReview)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(d.status, DeliverableStatus::InternalReview);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approval_stamp_is_set_once(pool: SqlitePool) {
    let (_, _, deal_id) = seed_deal(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    let d = DeliverableRepo::create(&mut conn, deal_id, &new_deliverable("Integration", true))
        .await
        .unwrap();

    let first = DeliverableRepo::approve(&mut conn, d.id, "maya@sponsor.example")
        .await
        .unwrap()
        .unwrap();
    let stamp = first.sponsor_approved_at.unwrap();
    assert_eq!(first.sponsor_approved_by.as_deref(), Some("maya@sponsor.example"));

    let second = DeliverableRepo::approve(&mut conn, d.id, "someone-else")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.sponsor_approved_at.unwrap(), stamp);
    assert_eq!(second.sponsor_approved_by.as_deref(), Some("maya@sponsor.example"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_change_does_not_clear_approval_stamp(pool: SqlitePool) {
    let (_, _, deal_id) = seed_deal(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    let d = DeliverableRepo::create(&mut conn, deal_id, &new_deliverable("Integration", true))
        .await
        .unwrap();
    let approved = DeliverableRepo::approve(&mut conn, d.id, "sponsor").await.unwrap().unwrap();
    let stamp = approved.sponsor_approved_at.unwrap();

    let patched = DeliverableRepo::update(
        &mut conn,
        d.id,
        &UpdateDeliverable {
            title: None,
            kind: None,
            due_date: None,
            status: Some(DeliverableStatus::Posted),
            owner: None,
            brief: None,
            value: None,
            guaranteed: None,
            sponsor_approval_required: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(patched.status, DeliverableStatus::Posted);
    assert_eq!(patched.sponsor_approved_at.unwrap(), stamp);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancel_stamps_once_and_restore_clears(pool: SqlitePool) {
    let (_, _, deal_id) = seed_deal(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    let d = DeliverableRepo::create(&mut conn, deal_id, &new_deliverable("Stream Mention", false))
        .await
        .unwrap();

    let canceled = DeliverableRepo::cancel(&mut conn, d.id, "ops@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(canceled.status, DeliverableStatus::Canceled);
    let stamp = canceled.canceled_at.unwrap();

    // Cancel again: first stamp survives.
    let again = DeliverableRepo::cancel(&mut conn, d.id, "late@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again.canceled_at.unwrap(), stamp);
    assert_eq!(again.canceled_by.as_deref(), Some("ops@example.com"));

    let changed = DeliverableRepo::clear_cancellation(&mut conn, d.id).await.unwrap();
    assert!(changed);
    drop(conn);

    let restored = DeliverableRepo::find_by_id(&pool, d.id).await.unwrap().unwrap();
    assert!(restored.canceled_at.is_none());
    assert!(restored.canceled_by.is_none());
    assert_eq!(restored.status, DeliverableStatus::Draft);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unsettled_count_drives_deal_completion(pool: SqlitePool) {
    let (_, _, deal_id) = seed_deal(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    let a = DeliverableRepo::create(&mut conn, deal_id, &new_deliverable("A", false))
        .await
        .unwrap();
    let b = DeliverableRepo::create(&mut conn, deal_id, &new_deliverable("B", false))
        .await
        .unwrap();

    assert_eq!(DeliverableRepo::count_unsettled(&mut conn, deal_id).await.unwrap(), 2);

    DeliverableRepo::set_status(&mut conn, a.id, DeliverableStatus::Delivered)
        .await
        .unwrap();
    DeliverableRepo::cancel(&mut conn, b.id, "ops").await.unwrap();

    assert_eq!(DeliverableRepo::count_unsettled(&mut conn, deal_id).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Proofs and comments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn proofs_and_comments_append_under_a_deal(pool: SqlitePool) {
    let (_, _, deal_id) = seed_deal(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    let d = DeliverableRepo::create(&mut conn, deal_id, &new_deliverable("TikTok #1", true))
        .await
        .unwrap();

    ProofRepo::create(
        &mut conn,
        d.id,
        &CreateProof {
            kind: ProofKind::Link,
            url: Some("https://tiktok.example/v/123".to_string()),
            note: Some("first cut".to_string()),
            file_path: None,
            file_name: None,
            mime_type: None,
        },
    )
    .await
    .unwrap();
    CommentRepo::create(&mut conn, d.id, "ops@example.com", "Looks good").await.unwrap();
    CommentRepo::create(&mut conn, d.id, "sponsor", "Ship it").await.unwrap();
    drop(conn);

    let proofs = ProofRepo::list_for_deal(&pool, deal_id).await.unwrap();
    assert_eq!(proofs.len(), 1);
    assert_eq!(proofs[0].kind, ProofKind::Link);

    let comments = CommentRepo::list_for_deliverable(&pool, d.id).await.unwrap();
    assert_eq!(comments.len(), 2);
    // Thread order: oldest first.
    assert_eq!(comments[0].author, "ops@example.com");
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn deal_scoped_tickets_are_invisible_at_org_level(pool: SqlitePool) {
    let (org_id, _, deal_id) = seed_deal(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    let org_ticket = TicketRepo::create(
        &mut conn,
        org_id,
        None,
        "Billing question",
        "Where is the invoice?",
        TicketPriority::Normal,
    )
    .await
    .unwrap();
    let deal_ticket = TicketRepo::create(
        &mut conn,
        org_id,
        Some(deal_id),
        "Asset missing",
        "Logo pack 404s",
        TicketPriority::High,
    )
    .await
    .unwrap();
    TicketMessageRepo::create(&mut conn, deal_ticket.id, "sponsor", "Logo pack 404s")
        .await
        .unwrap();
    drop(conn);

    // Org-level lookup only reaches tickets without a deal scope.
    assert!(TicketRepo::find_org_level(&pool, org_id, org_ticket.id).await.unwrap().is_some());
    assert!(TicketRepo::find_org_level(&pool, org_id, deal_ticket.id).await.unwrap().is_none());

    // Deal lookup only reaches its own tickets.
    assert!(TicketRepo::find_in_deal(&pool, deal_id, deal_ticket.id).await.unwrap().is_some());
    assert!(TicketRepo::find_in_deal(&pool, deal_id, org_ticket.id).await.unwrap().is_none());

    let messages = TicketMessageRepo::list_for_deal(&pool, deal_id).await.unwrap();
    assert_eq!(messages.len(), 1);
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_decide_bundles_status_and_payout(pool: SqlitePool) {
    let (org_id, _, deal_id) = seed_deal(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    let d = DeliverableRepo::create(&mut conn, deal_id, &new_deliverable("TikTok #1", true))
        .await
        .unwrap();
    let claim = ClaimRepo::create(
        &mut conn,
        org_id,
        deal_id,
        &CreateClaim {
            deliverable_id: d.id,
            reason: "late post".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(claim.status, ClaimStatus::Submitted);

    let decided = ClaimRepo::decide(
        &mut conn,
        org_id,
        claim.id,
        &DecideClaim {
            status: ClaimStatus::Approved,
            payout_type: Some(sponsorops_core::status::PayoutType::Credit),
            payout_amount: Some(300.0),
            notes: Some("cure window missed".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(decided.status, ClaimStatus::Approved);
    assert_eq!(decided.payout_amount, Some(300.0));
    assert_eq!(decided.notes.as_deref(), Some("cure window missed"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_override_reassigns_status_directly(pool: SqlitePool) {
    let (org_id, _, deal_id) = seed_deal(&pool).await;
    let mut conn = pool.acquire().await.unwrap();
    let d = DeliverableRepo::create(&mut conn, deal_id, &new_deliverable("TikTok #1", true))
        .await
        .unwrap();
    let claim = ClaimRepo::create(
        &mut conn,
        org_id,
        deal_id,
        &CreateClaim {
            deliverable_id: d.id,
            reason: "missed tags".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();

    // Straight to paid, skipping approval. The override re-checks nothing.
    let paid = ClaimRepo::update(
        &mut conn,
        org_id,
        claim.id,
        &UpdateClaim {
            status: Some(ClaimStatus::Paid),
            payout_type: None,
            payout_amount: None,
            notes: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(paid.status, ClaimStatus::Paid);

    // And back to submitted to correct the mistake.
    let back = ClaimRepo::update(
        &mut conn,
        org_id,
        claim.id,
        &UpdateClaim {
            status: Some(ClaimStatus::Submitted),
            payout_type: None,
            payout_amount: None,
            notes: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(back.status, ClaimStatus::Submitted);
}
