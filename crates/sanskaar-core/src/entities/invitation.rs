//! Invitation entity - a single-use, time-limited token to join a family

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Invitation lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    #[default]
    Pending,
    Accepted,
    Expired,
    Cancelled,
}

impl InvitationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "expired" => Some(Self::Expired),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Family invitation entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyInvitation {
    pub id: Snowflake,
    pub family_id: Snowflake,
    pub token: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: InvitationStatus,
    pub expires_at: DateTime<Utc>,
    pub message: Option<String>,
    pub accepted_by: Option<Snowflake>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl FamilyInvitation {
    /// Create a pending invitation that expires `ttl` from now
    pub fn new(
        id: Snowflake,
        family_id: Snowflake,
        token: String,
        created_by: Snowflake,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            family_id,
            token,
            email: None,
            phone: None,
            status: InvitationStatus::Pending,
            expires_at: now + ttl,
            message: None,
            accepted_by: None,
            accepted_at: None,
            created_by,
            created_at: now,
        }
    }

    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone;
        self
    }

    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    /// Expiry is strict: an invitation is still valid at exactly `expires_at`
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// A pending invitation past its deadline that should be flipped to `expired`
    #[inline]
    pub fn needs_expiry(&self, now: DateTime<Utc>) -> bool {
        self.status == InvitationStatus::Pending && self.is_expired_at(now)
    }

    /// Check the invitation can be accepted at `now`
    ///
    /// Expiry is checked before status so that a stale pending invitation
    /// reports `InvitationExpired` rather than a conflict.
    pub fn check_acceptable(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.is_expired_at(now) {
            return Err(DomainError::InvitationExpired);
        }
        match self.status {
            InvitationStatus::Pending => Ok(()),
            status => Err(DomainError::InvitationNotPending(status.as_str().to_string())),
        }
    }

    /// Transition `pending -> accepted`
    pub fn accept(&mut self, user_id: Snowflake, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.check_acceptable(now)?;
        self.status = InvitationStatus::Accepted;
        self.accepted_by = Some(user_id);
        self.accepted_at = Some(now);
        Ok(())
    }

    /// Transition `pending -> expired`; no-op for any other state
    pub fn expire(&mut self) {
        if self.status == InvitationStatus::Pending {
            self.status = InvitationStatus::Expired;
        }
    }

    /// Transition `pending -> cancelled`
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        match self.status {
            InvitationStatus::Pending => {
                self.status = InvitationStatus::Cancelled;
                Ok(())
            }
            status => Err(DomainError::InvitationNotPending(status.as_str().to_string())),
        }
    }
}

/// Generate an unguessable invitation token (32 lowercase hex chars)
pub fn generate_invitation_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
