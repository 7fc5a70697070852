//! Handlers for the `/tickets` resource (staff side).

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use sponsorops_core::activity::{actions, entity_types};
use sponsorops_core::error::CoreError;
use sponsorops_core::lifecycle::LifecycleOp;
use sponsorops_core::status::TicketPriority;
use sponsorops_core::types::DbId;
use sponsorops_db::models::activity::NewActivityEvent;
use sponsorops_db::models::ticket::{CreateTicket, Ticket, TicketMessage, UpdateTicket};
use sponsorops_db::repositories::lifecycle_repo::ArchivableKind;
use sponsorops_db::repositories::{ActivityRepo, DealRepo, TicketMessageRepo, TicketRepo};

use crate::auth::staff::Staff;
use crate::error::{AppError, AppResult};
use crate::handlers::apply_lifecycle;
use crate::query::IncludeArchivedParams;
use crate::response::LifecycleResponse;
use crate::state::AppState;

/// Sender label for staff-authored ticket messages.
const SENDER_STAFF: &str = "staff";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Ticket",
        id,
    })
}

/// A ticket with its full message thread.
#[derive(Debug, Serialize)]
pub struct TicketWithMessages {
    pub ticket: Ticket,
    pub messages: Vec<TicketMessage>,
}

/// Request body for `POST /tickets/{id}/reply`.
#[derive(Debug, Deserialize)]
pub struct TicketReply {
    pub message: String,
}

/// GET /api/v1/tickets
pub async fn list_tickets(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Query(params): Query<IncludeArchivedParams>,
) -> AppResult<Json<Vec<Ticket>>> {
    let org_id = principal.require_staff()?;
    let tickets = TicketRepo::list(&state.pool, org_id, params.include_archived).await?;
    Ok(Json(tickets))
}

/// POST /api/v1/tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Json(input): Json<CreateTicket>,
) -> AppResult<Json<Ticket>> {
    let org_id = principal.require_staff()?;
    if input.subject.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Ticket subject is required".into(),
        )));
    }
    if let Some(deal_id) = input.deal_id {
        DealRepo::find_by_id(&state.pool, org_id, deal_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Deal",
                id: deal_id,
            }))?;
    }

    let mut tx = state.pool.begin().await?;
    let ticket = TicketRepo::create(
        &mut tx,
        org_id,
        input.deal_id,
        input.subject.trim(),
        &input.body,
        input.priority.unwrap_or(TicketPriority::Normal),
    )
    .await?;
    TicketMessageRepo::create(&mut tx, ticket.id, SENDER_STAFF, &input.body).await?;
    TicketRepo::touch_last_reply(&mut tx, ticket.id).await?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: ticket.deal_id,
            entity_type: entity_types::TICKET,
            entity_id: ticket.id,
            action: actions::CREATED,
            actor: principal.actor().to_string(),
            summary: format!("Ticket created: {}", ticket.subject),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(ticket))
}

/// GET /api/v1/tickets/{id}
pub async fn get_ticket(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<TicketWithMessages>> {
    let org_id = principal.require_staff()?;
    let ticket = TicketRepo::find_by_id(&state.pool, org_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let messages = TicketMessageRepo::list_for_ticket(&state.pool, id).await?;
    Ok(Json(TicketWithMessages { ticket, messages }))
}

/// PATCH /api/v1/tickets/{id}
pub async fn update_ticket(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTicket>,
) -> AppResult<Json<Ticket>> {
    let org_id = principal.require_staff()?;

    let mut tx = state.pool.begin().await?;
    let ticket = TicketRepo::update(&mut tx, org_id, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: ticket.deal_id,
            entity_type: entity_types::TICKET,
            entity_id: ticket.id,
            action: actions::UPDATED,
            actor: principal.actor().to_string(),
            summary: format!("Ticket updated: {}", ticket.subject),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(ticket))
}

/// POST /api/v1/tickets/{id}/reply
///
/// Appends a staff message. No ticket status is changed automatically.
pub async fn reply_ticket(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
    Json(input): Json<TicketReply>,
) -> AppResult<Json<TicketMessage>> {
    let org_id = principal.require_staff()?;
    if input.message.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Reply message is required".into(),
        )));
    }
    let ticket = TicketRepo::find_by_id(&state.pool, org_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let mut tx = state.pool.begin().await?;
    let message = TicketMessageRepo::create(&mut tx, id, SENDER_STAFF, &input.message).await?;
    TicketRepo::touch_last_reply(&mut tx, id).await?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: ticket.deal_id,
            entity_type: entity_types::TICKET,
            entity_id: ticket.id,
            action: actions::REPLIED,
            actor: principal.actor().to_string(),
            summary: format!("Reply on ticket: {}", ticket.subject),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(message))
}

/// POST /api/v1/tickets/{id}/archive
pub async fn archive_ticket(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<LifecycleResponse>> {
    let org_id = principal.require_staff()?;
    let response = apply_lifecycle(
        &state,
        org_id,
        principal.actor(),
        ArchivableKind::Ticket,
        id,
        LifecycleOp::Archive,
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/tickets/{id}/restore
pub async fn restore_ticket(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<LifecycleResponse>> {
    let org_id = principal.require_staff()?;
    let response = apply_lifecycle(
        &state,
        org_id,
        principal.actor(),
        ArchivableKind::Ticket,
        id,
        LifecycleOp::Restore,
    )
    .await?;
    Ok(Json(response))
}
