use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sponsorops_core::status::{TicketPriority, TicketStatus};
use sponsorops_core::types::{DbId, Timestamp};

/// A support ticket: organization-level, or scoped to one deal when
/// `deal_id` is set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ticket {
    pub id: DbId,
    pub organization_id: DbId,
    pub deal_id: Option<DbId>,
    pub subject: String,
    pub body: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub last_reply_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A message in a ticket thread. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TicketMessage {
    pub id: DbId,
    pub ticket_id: DbId,
    pub sender: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// Staff create payload. Portal ticket creation goes through the portal
/// handlers, which resolve the organization (and optional deal) from tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicket {
    pub deal_id: Option<DbId>,
    pub subject: String,
    pub body: String,
    pub priority: Option<TicketPriority>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTicket {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
}
