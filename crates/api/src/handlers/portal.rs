//! Handlers for the `/portal` resource: token-authorized sponsor access.
//!
//! No bearer credential is used or honored here. A sponsor token resolves to
//! one sponsor (deal summaries + organization-level tickets); a deal token
//! resolves to one deal and its subgraph, and never to sibling deals. Token
//! resolution failures are uniformly NotFound: the response does not reveal
//! whether a token was unknown, malformed, or pointed at an archived record.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use sponsorops_core::activity::{actions, entity_types};
use sponsorops_core::claims::validate_submission;
use sponsorops_core::error::CoreError;
use sponsorops_core::principal::Principal;
use sponsorops_core::status::{DeliverableStatus, ProofKind, TicketPriority};
use sponsorops_core::types::DbId;
use sponsorops_db::models::activity::NewActivityEvent;
use sponsorops_db::models::brand_kit::BrandKit;
use sponsorops_db::models::claim::{Claim, CreateClaim};
use sponsorops_db::models::comment::Comment;
use sponsorops_db::models::deal::{Deal, DealSummary};
use sponsorops_db::models::deliverable::Deliverable;
use sponsorops_db::models::proof::{CreateProof, Proof};
use sponsorops_db::models::sponsor::Sponsor;
use sponsorops_db::models::ticket::{Ticket, TicketMessage};
use sponsorops_db::repositories::{
    ActivityRepo, BrandKitRepo, ClaimRepo, CommentRepo, DealRepo, DeliverableRepo, ProofRepo,
    SponsorRepo, TicketMessageRepo, TicketRepo,
};

use crate::error::{AppError, AppResult};
use crate::handlers::deliverables::validate_proof;
use crate::query::{DealTokenParams, SponsorTokenParams};
use crate::state::AppState;

/// Actor label for unattributed portal mutations.
const ACTOR_SPONSOR: &str = "sponsor";

// ---------------------------------------------------------------------------
// Token resolution
// ---------------------------------------------------------------------------

/// Resolve a sponsor token to a sponsor-portal principal.
async fn resolve_sponsor(state: &AppState, token: &str) -> AppResult<(Sponsor, Principal)> {
    let sponsor = SponsorRepo::find_by_token(&state.pool, token)
        .await?
        .filter(|s| s.archived_at.is_none())
        .ok_or_else(|| AppError::NotFound("Sponsor not found".into()))?;
    let principal = Principal::SponsorPortal {
        sponsor_id: sponsor.id,
        organization_id: sponsor.organization_id,
    };
    Ok((sponsor, principal))
}

/// Resolve a deal token to a deal-portal principal.
async fn resolve_deal(state: &AppState, token: &str) -> AppResult<(Deal, Principal)> {
    let deal = DealRepo::find_by_token(&state.pool, token)
        .await?
        .filter(|d| d.archived_at.is_none())
        .ok_or_else(|| AppError::NotFound("Deal not found".into()))?;
    let principal = Principal::DealPortal {
        deal_id: deal.id,
        sponsor_id: deal.sponsor_id,
        organization_id: deal.organization_id,
    };
    Ok((deal, principal))
}

/// Load a deliverable through a deal-portal principal. An id outside the
/// token's deal reads as missing.
async fn load_deliverable(
    state: &AppState,
    principal: &Principal,
    id: DbId,
) -> AppResult<Deliverable> {
    let deliverable = DeliverableRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Deliverable not found".into()))?;
    principal
        .require_deal(deliverable.deal_id)
        .map_err(|_| AppError::NotFound("Deliverable not found".into()))?;
    Ok(deliverable)
}

// ---------------------------------------------------------------------------
// Portal views
// ---------------------------------------------------------------------------

/// Everything a sponsor token may see.
#[derive(Debug, Serialize)]
pub struct SponsorPortalView {
    pub sponsor: Sponsor,
    pub deals: Vec<DealSummary>,
}

/// Everything a deal token may see: the deal's full subgraph.
#[derive(Debug, Serialize)]
pub struct DealPortalView {
    pub deal: Deal,
    pub deliverables: Vec<Deliverable>,
    pub proofs: Vec<Proof>,
    pub comments: Vec<Comment>,
    pub brandkit: Option<BrandKit>,
    pub claims: Vec<Claim>,
    pub tickets: Vec<Ticket>,
    pub ticket_messages: Vec<TicketMessage>,
}

/// GET /api/v1/portal/sponsor/{token}
pub async fn sponsor_portal(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<SponsorPortalView>> {
    let (sponsor, _) = resolve_sponsor(&state, &token).await?;
    let deals = DealRepo::summaries_for_sponsor(&state.pool, sponsor.id).await?;
    Ok(Json(SponsorPortalView { sponsor, deals }))
}

/// GET /api/v1/portal/deal/{token}
pub async fn deal_portal(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<DealPortalView>> {
    let (deal, _) = resolve_deal(&state, &token).await?;

    let deliverables = DeliverableRepo::list_for_deal(&state.pool, deal.id, true).await?;
    let proofs = ProofRepo::list_for_deal(&state.pool, deal.id).await?;
    let comments = CommentRepo::list_for_deal(&state.pool, deal.id).await?;
    let claims = ClaimRepo::list_for_deal(&state.pool, deal.id).await?;
    let tickets = TicketRepo::list_for_deal(&state.pool, deal.id).await?;
    let ticket_messages = TicketMessageRepo::list_for_deal(&state.pool, deal.id).await?;
    let brandkit = match BrandKitRepo::find_by_deal(&state.pool, deal.id).await? {
        Some(row) => Some(BrandKit::try_from(row).map_err(AppError::Core)?),
        None => None,
    };

    Ok(Json(DealPortalView {
        deal,
        deliverables,
        proofs,
        comments,
        brandkit,
        claims,
        tickets,
        ticket_messages,
    }))
}

/// GET /api/v1/portal/brandkit?deal_token=
pub async fn get_brandkit(
    State(state): State<AppState>,
    Query(params): Query<DealTokenParams>,
) -> AppResult<Json<BrandKit>> {
    let (deal, _) = resolve_deal(&state, &params.deal_token).await?;
    let mut tx = state.pool.begin().await?;
    let row = BrandKitRepo::get_or_create(&mut tx, deal.id).await?;
    tx.commit().await?;
    Ok(Json(BrandKit::try_from(row).map_err(AppError::Core)?))
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

/// Request body for `POST /portal/tickets`.
#[derive(Debug, Deserialize)]
pub struct PortalTicketCreate {
    pub sponsor_token: String,
    pub subject: String,
    pub body: String,
    /// When present, scopes the ticket to a deal the sponsor owns.
    pub deal_token: Option<String>,
}

/// Request body for `POST /portal/tickets/{id}/reply`.
#[derive(Debug, Deserialize)]
pub struct PortalTicketReply {
    pub sponsor_token: String,
    pub deal_token: Option<String>,
    pub message: String,
}

/// A ticket with its full message thread.
#[derive(Debug, Serialize)]
pub struct PortalTicketView {
    pub ticket: Ticket,
    pub messages: Vec<TicketMessage>,
}

/// Locate a ticket reachable by this sponsor: organization-level tickets
/// directly, deal-scoped tickets only through a matching deal token.
async fn load_sponsor_ticket(
    state: &AppState,
    sponsor: &Sponsor,
    deal_token: Option<&str>,
    id: DbId,
) -> AppResult<Ticket> {
    if let Some(ticket) = TicketRepo::find_org_level(&state.pool, sponsor.organization_id, id).await?
    {
        return Ok(ticket);
    }
    if let Some(token) = deal_token {
        let (deal, _) = resolve_deal(state, token).await?;
        if deal.sponsor_id == sponsor.id {
            if let Some(ticket) = TicketRepo::find_in_deal(&state.pool, deal.id, id).await? {
                return Ok(ticket);
            }
        }
    }
    Err(AppError::NotFound("Ticket not found".into()))
}

/// POST /api/v1/portal/tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(input): Json<PortalTicketCreate>,
) -> AppResult<Json<Ticket>> {
    let (sponsor, _) = resolve_sponsor(&state, &input.sponsor_token).await?;
    if input.subject.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Ticket subject is required".into(),
        )));
    }

    // A deal token must belong to this sponsor to scope the ticket.
    let deal_id = match &input.deal_token {
        Some(token) => {
            let (deal, _) = resolve_deal(&state, token).await?;
            if deal.sponsor_id != sponsor.id {
                return Err(AppError::NotFound("Deal not found".into()));
            }
            Some(deal.id)
        }
        None => None,
    };

    let mut tx = state.pool.begin().await?;
    let ticket = TicketRepo::create(
        &mut tx,
        sponsor.organization_id,
        deal_id,
        input.subject.trim(),
        &input.body,
        TicketPriority::Normal,
    )
    .await?;
    TicketMessageRepo::create(&mut tx, ticket.id, ACTOR_SPONSOR, &input.body).await?;
    TicketRepo::touch_last_reply(&mut tx, ticket.id).await?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: sponsor.organization_id,
            deal_id,
            entity_type: entity_types::TICKET,
            entity_id: ticket.id,
            action: actions::CREATED,
            actor: ACTOR_SPONSOR.to_string(),
            summary: format!("Ticket created: {}", ticket.subject),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(ticket))
}

/// GET /api/v1/portal/tickets/{id}?sponsor_token=&deal_token=
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<SponsorTokenParams>,
) -> AppResult<Json<PortalTicketView>> {
    let (sponsor, _) = resolve_sponsor(&state, &params.sponsor_token).await?;
    let ticket = load_sponsor_ticket(&state, &sponsor, params.deal_token.as_deref(), id).await?;
    let messages = TicketMessageRepo::list_for_ticket(&state.pool, ticket.id).await?;
    Ok(Json(PortalTicketView { ticket, messages }))
}

/// POST /api/v1/portal/tickets/{id}/reply
///
/// Appends a sponsor message. No ticket status is changed automatically.
pub async fn reply_ticket(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PortalTicketReply>,
) -> AppResult<Json<TicketMessage>> {
    let (sponsor, _) = resolve_sponsor(&state, &input.sponsor_token).await?;
    if input.message.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Reply message is required".into(),
        )));
    }
    let ticket = load_sponsor_ticket(&state, &sponsor, input.deal_token.as_deref(), id).await?;

    let mut tx = state.pool.begin().await?;
    let message = TicketMessageRepo::create(&mut tx, ticket.id, ACTOR_SPONSOR, &input.message).await?;
    TicketRepo::touch_last_reply(&mut tx, ticket.id).await?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: sponsor.organization_id,
            deal_id: ticket.deal_id,
            entity_type: entity_types::TICKET,
            entity_id: ticket.id,
            action: actions::REPLIED,
            actor: ACTOR_SPONSOR.to_string(),
            summary: format!("Reply on ticket: {}", ticket.subject),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(message))
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

/// Request body for `POST /portal/claims`.
#[derive(Debug, Deserialize)]
pub struct PortalClaimCreate {
    pub deal_token: String,
    pub deliverable_id: DbId,
    pub reason: String,
    pub description: Option<String>,
}

/// POST /api/v1/portal/claims
///
/// Eligibility-checked submission: the deliverable must belong to the
/// token's deal and be guaranteed, and the reason must be non-empty.
pub async fn create_claim(
    State(state): State<AppState>,
    Json(input): Json<PortalClaimCreate>,
) -> AppResult<Json<Claim>> {
    let (deal, _) = resolve_deal(&state, &input.deal_token).await?;

    let deliverable = DeliverableRepo::find_by_id(&state.pool, input.deliverable_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Deliverable not found".into()))?;
    validate_submission(
        deliverable.id,
        deliverable.deal_id,
        deal.id,
        deliverable.guaranteed,
        &input.reason,
    )
    .map_err(AppError::Core)?;

    let mut tx = state.pool.begin().await?;
    let claim = ClaimRepo::create(
        &mut tx,
        deal.organization_id,
        deal.id,
        &CreateClaim {
            deliverable_id: deliverable.id,
            reason: input.reason.clone(),
            description: input.description.clone(),
        },
    )
    .await?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: deal.organization_id,
            deal_id: Some(deal.id),
            entity_type: entity_types::CLAIM,
            entity_id: claim.id,
            action: actions::CREATED,
            actor: ACTOR_SPONSOR.to_string(),
            summary: format!("Claim submitted: {}", claim.reason),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(claim))
}

// ---------------------------------------------------------------------------
// Deliverables
// ---------------------------------------------------------------------------

/// Request body for `POST /portal/deliverables/{id}/approve`.
#[derive(Debug, Deserialize)]
pub struct PortalApprove {
    pub deal_token: String,
    pub approved_by: Option<String>,
}

/// Request body for `POST /portal/deliverables/{id}/comments`.
#[derive(Debug, Deserialize)]
pub struct PortalComment {
    pub deal_token: String,
    pub author: Option<String>,
    pub body: String,
}

/// Request body for `POST /portal/deliverables/{id}/proofs`.
#[derive(Debug, Deserialize)]
pub struct PortalProof {
    pub deal_token: String,
    #[serde(default = "default_proof_kind")]
    pub kind: ProofKind,
    pub url: Option<String>,
    pub note: Option<String>,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

fn default_proof_kind() -> ProofKind {
    ProofKind::Link
}

/// POST /api/v1/portal/deliverables/{id}/approve
///
/// Stamps `sponsor_approved_at`/`sponsor_approved_by` exactly once; a
/// repeat call is a no-op returning the existing stamp. A first approval
/// also advances a pre-approval status to approved.
pub async fn approve_deliverable(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PortalApprove>,
) -> AppResult<Json<Deliverable>> {
    let (deal, principal) = resolve_deal(&state, &input.deal_token).await?;
    let before = load_deliverable(&state, &principal, id).await?;

    if before.sponsor_approved_at.is_some() {
        // Already approved: idempotent no-op, no event.
        return Ok(Json(before));
    }

    let approved_by = input
        .approved_by
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(ACTOR_SPONSOR);

    let mut tx = state.pool.begin().await?;
    let mut deliverable = DeliverableRepo::approve(&mut tx, id, approved_by)
        .await?
        .ok_or_else(|| AppError::NotFound("Deliverable not found".into()))?;
    if before.status.is_pre_approval() {
        deliverable = DeliverableRepo::set_status(&mut tx, id, DeliverableStatus::Approved)
            .await?
            .ok_or_else(|| AppError::NotFound("Deliverable not found".into()))?;
    }
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: deal.organization_id,
            deal_id: Some(deal.id),
            entity_type: entity_types::DELIVERABLE,
            entity_id: id,
            action: actions::APPROVED,
            actor: approved_by.to_string(),
            summary: format!("Deliverable approved: {}", deliverable.title),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(deliverable))
}

/// GET /api/v1/portal/deliverables/{id}/comments?deal_token=
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<DealTokenParams>,
) -> AppResult<Json<Vec<Comment>>> {
    let (_, principal) = resolve_deal(&state, &params.deal_token).await?;
    load_deliverable(&state, &principal, id).await?;
    let comments = CommentRepo::list_for_deliverable(&state.pool, id).await?;
    Ok(Json(comments))
}

/// POST /api/v1/portal/deliverables/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PortalComment>,
) -> AppResult<Json<Comment>> {
    let (deal, principal) = resolve_deal(&state, &input.deal_token).await?;
    let deliverable = load_deliverable(&state, &principal, id).await?;
    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment body is required".into(),
        )));
    }
    let author = input
        .author
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(ACTOR_SPONSOR);

    let mut tx = state.pool.begin().await?;
    let comment = CommentRepo::create(&mut tx, id, author, &input.body).await?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: deal.organization_id,
            deal_id: Some(deal.id),
            entity_type: entity_types::DELIVERABLE,
            entity_id: comment.id,
            action: actions::COMMENTED,
            actor: author.to_string(),
            summary: format!("Comment on deliverable: {}", deliverable.title),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(comment))
}

/// POST /api/v1/portal/deliverables/{id}/proofs
///
/// Appends a proof. When the deliverable is already posted (or proofed),
/// the status advances to proofed as part of the same operation.
pub async fn add_proof(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PortalProof>,
) -> AppResult<Json<Proof>> {
    let (deal, principal) = resolve_deal(&state, &input.deal_token).await?;
    let deliverable = load_deliverable(&state, &principal, id).await?;

    let create = CreateProof {
        kind: input.kind,
        url: input.url.clone(),
        note: input.note.clone(),
        file_path: input.file_path.clone(),
        file_name: input.file_name.clone(),
        mime_type: input.mime_type.clone(),
    };
    validate_proof(&create).map_err(AppError::Core)?;

    let mut tx = state.pool.begin().await?;
    let proof = ProofRepo::create(&mut tx, id, &create).await?;
    if matches!(
        deliverable.status,
        DeliverableStatus::Posted | DeliverableStatus::Proofed
    ) {
        DeliverableRepo::set_status(&mut tx, id, DeliverableStatus::Proofed).await?;
    }
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: deal.organization_id,
            deal_id: Some(deal.id),
            entity_type: entity_types::PROOF,
            entity_id: proof.id,
            action: actions::CREATED,
            actor: ACTOR_SPONSOR.to_string(),
            summary: format!("Proof added for deliverable: {}", deliverable.title),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(proof))
}
