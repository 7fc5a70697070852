//! Closed status enumerations for every stateful entity.
//!
//! Each set is a tagged enum serialized as its snake_case name, both over the
//! wire (serde) and in the database (sqlx TEXT). Deliverable and ticket
//! statuses carry no transition graph: any value may be assigned from any
//! other. That mirrors the production behavior and is intentional; the
//! invariants that do exist (approval stamps, cancellation markers) live on
//! separate columns and are enforced by the operations that own them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
        #[serde(rename_all = "snake_case")]
        #[sqlx(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every member of the set, in conventional order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Parse from the snake_case wire form.
            pub fn parse(s: &str) -> Result<Self, CoreError> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(CoreError::Validation(format!(
                        concat!("Invalid ", $label, " '{}'. Must be one of: {}"),
                        other,
                        Self::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

status_enum! {
    /// Deal lifecycle status. `completed` additionally requires every
    /// deliverable to be delivered or canceled at the time of the change.
    DealStatus, "deal status" {
        Draft => "draft",
        Active => "active",
        Completed => "completed",
        Archived => "archived",
    }
}

status_enum! {
    /// Deliverable workflow status. Ordered by convention only; the engine
    /// permits direct reassignment between any two values.
    DeliverableStatus, "deliverable status" {
        Draft => "draft",
        InternalReview => "internal_review",
        SponsorReview => "sponsor_review",
        Approved => "approved",
        Scheduled => "scheduled",
        Posted => "posted",
        Proofed => "proofed",
        Delivered => "delivered",
        Late => "late",
        Canceled => "canceled",
    }
}

status_enum! {
    TicketStatus, "ticket status" {
        Open => "open",
        Pending => "pending",
        Closed => "closed",
    }
}

status_enum! {
    TicketPriority, "ticket priority" {
        Low => "low",
        Normal => "normal",
        High => "high",
    }
}

status_enum! {
    /// Guarantee-claim status. The happy path is submitted -> approved ->
    /// paid (or submitted -> denied); the administrative override may set
    /// any value directly.
    ClaimStatus, "claim status" {
        Submitted => "submitted",
        Approved => "approved",
        Denied => "denied",
        Paid => "paid",
    }
}

status_enum! {
    PayoutType, "payout type" {
        Credit => "credit",
        Refund => "refund",
        MakeGood => "make_good",
    }
}

status_enum! {
    ProofKind, "proof kind" {
        Link => "link",
        File => "file",
    }
}

impl DeliverableStatus {
    /// Statuses from which a sponsor approval also advances the workflow.
    pub fn is_pre_approval(&self) -> bool {
        matches!(
            self,
            DeliverableStatus::Draft
                | DeliverableStatus::InternalReview
                | DeliverableStatus::SponsorReview
        )
    }

    /// A deal can only be completed once every deliverable is settled.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            DeliverableStatus::Delivered | DeliverableStatus::Canceled
        )
    }
}
