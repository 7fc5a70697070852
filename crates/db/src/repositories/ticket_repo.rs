//! Repositories for the `tickets` and `ticket_messages` tables.

use sqlx::{SqliteConnection, SqlitePool};

use sponsorops_core::status::{TicketPriority, TicketStatus};
use sponsorops_core::types::DbId;

use crate::models::ticket::{Ticket, TicketMessage, UpdateTicket};

const COLUMNS: &str = "id, organization_id, deal_id, subject, body, status, priority, \
    last_reply_at, archived_at, created_at";

const MESSAGE_COLUMNS: &str = "id, ticket_id, sender, message, created_at";

/// Provides CRUD operations for tickets.
pub struct TicketRepo;

impl TicketRepo {
    pub async fn create(
        conn: &mut SqliteConnection,
        organization_id: DbId,
        deal_id: Option<DbId>,
        subject: &str,
        body: &str,
        priority: TicketPriority,
    ) -> Result<Ticket, sqlx::Error> {
        let query = format!(
            "INSERT INTO tickets (organization_id, deal_id, subject, body, status, priority,
                                  created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(organization_id)
            .bind(deal_id)
            .bind(subject)
            .bind(body)
            .bind(TicketStatus::Open)
            .bind(priority)
            .bind(chrono::Utc::now())
            .fetch_one(conn)
            .await
    }

    /// Find a ticket by id within an organization scope.
    pub async fn find_by_id(
        pool: &SqlitePool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = ? AND organization_id = ?");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an organization-level ticket (no deal scope). Used by the
    /// sponsor portal, which may not see deal-scoped threads.
    pub async fn find_org_level(
        pool: &SqlitePool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tickets \
             WHERE id = ? AND organization_id = ? AND deal_id IS NULL"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a ticket only if it is scoped to `deal_id`. Used by the deal
    /// portal.
    pub async fn find_in_deal(
        pool: &SqlitePool,
        deal_id: DbId,
        id: DbId,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = ? AND deal_id = ?");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(deal_id)
            .fetch_optional(pool)
            .await
    }

    /// List tickets for an organization, newest first.
    pub async fn list(
        pool: &SqlitePool,
        organization_id: DbId,
        include_archived: bool,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        let filter = if include_archived {
            ""
        } else {
            " AND archived_at IS NULL"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM tickets WHERE organization_id = ?{filter} \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// List a deal's tickets, newest first (portal subgraph view).
    pub async fn list_for_deal(pool: &SqlitePool, deal_id: DbId) -> Result<Vec<Ticket>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tickets WHERE deal_id = ? ORDER BY created_at DESC");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(deal_id)
            .fetch_all(pool)
            .await
    }

    /// Update subject/body/status/priority. Only non-`None` fields apply.
    /// No status value is ever set as a side effect of anything else.
    pub async fn update(
        conn: &mut SqliteConnection,
        organization_id: DbId,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET
                subject = COALESCE(?, subject),
                body = COALESCE(?, body),
                status = COALESCE(?, status),
                priority = COALESCE(?, priority)
             WHERE id = ? AND organization_id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(&input.subject)
            .bind(&input.body)
            .bind(input.status)
            .bind(input.priority)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(conn)
            .await
    }

    /// Stamp `last_reply_at`.
    pub async fn touch_last_reply(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE tickets SET last_reply_at = ? WHERE id = ?")
            .bind(chrono::Utc::now())
            .bind(id)
            .execute(conn)
            .await?;
        Ok(())
    }
}

/// Provides append and read operations for ticket messages.
pub struct TicketMessageRepo;

impl TicketMessageRepo {
    pub async fn create(
        conn: &mut SqliteConnection,
        ticket_id: DbId,
        sender: &str,
        message: &str,
    ) -> Result<TicketMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO ticket_messages (ticket_id, sender, message, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING {MESSAGE_COLUMNS}"
        );
        sqlx::query_as::<_, TicketMessage>(&query)
            .bind(ticket_id)
            .bind(sender)
            .bind(message)
            .bind(chrono::Utc::now())
            .fetch_one(conn)
            .await
    }

    /// List a ticket's messages in thread order.
    pub async fn list_for_ticket(
        pool: &SqlitePool,
        ticket_id: DbId,
    ) -> Result<Vec<TicketMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM ticket_messages WHERE ticket_id = ? \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, TicketMessage>(&query)
            .bind(ticket_id)
            .fetch_all(pool)
            .await
    }

    /// List every message on a deal's tickets (portal subgraph view).
    pub async fn list_for_deal(
        pool: &SqlitePool,
        deal_id: DbId,
    ) -> Result<Vec<TicketMessage>, sqlx::Error> {
        sqlx::query_as::<_, TicketMessage>(
            "SELECT m.id, m.ticket_id, m.sender, m.message, m.created_at \
             FROM ticket_messages m \
             JOIN tickets t ON t.id = m.ticket_id \
             WHERE t.deal_id = ? \
             ORDER BY m.created_at ASC",
        )
        .bind(deal_id)
        .fetch_all(pool)
        .await
    }
}
