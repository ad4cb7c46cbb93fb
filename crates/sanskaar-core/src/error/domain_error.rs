//! Errors raised by family, roster, tree and invitation rules

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Coarse outcome class shared by every error layer.
///
/// Each layer maps its own variants onto a kind; the HTTP edge only ever
/// looks at the kind to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Invalid,
    Unauthenticated,
    Forbidden,
    NotFound,
    Conflict,
    Gone,
    Throttled,
    Internal,
}

impl ErrorKind {
    /// HTTP status for this kind
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Invalid => 400,
            Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Gone => 410,
            Self::Throttled => 429,
            Self::Internal => 500,
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Family not found: {0}")]
    FamilyNotFound(Snowflake),

    #[error("Invite code not found")]
    UnknownInviteCode,

    #[error("Family member not found: {0}")]
    MemberNotFound(Snowflake),

    #[error("Relationship not found: {0}")]
    RelationshipNotFound(Snowflake),

    #[error("Invitation not found")]
    InvitationNotFound,

    #[error("Family tree not found: {0}")]
    LegacyTreeNotFound(Snowflake),

    #[error("User {0} is not on the family roster")]
    NotOnRoster(Snowflake),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("A member cannot be related to themselves")]
    SelfRelationship,

    #[error("End date precedes start date")]
    InvalidDateRange,

    #[error("Not a member of this family")]
    NotFamilyMember,

    #[error("Family admin role required")]
    NotFamilyAdmin,

    #[error("The family owner's membership cannot be changed")]
    OwnerImmutable,

    #[error("Cannot leave a family you own")]
    CannotLeaveOwnedFamily,

    #[error("Members are not allowed to invite in this family")]
    MemberInvitesDisabled,

    #[error("Already a member of this family")]
    AlreadyMember,

    #[error("Relationship already exists")]
    RelationshipExists,

    #[error("Invite code already exists")]
    InviteCodeExists,

    #[error("Invitation token already exists")]
    InvitationTokenExists,

    /// Carries the invitation's current status
    #[error("Invitation is {0}")]
    InvitationNotPending(String),

    #[error("Invitation has expired")]
    InvitationExpired,

    // storage failures surfaced through repository traits
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Stable machine-readable code, sent as `error.code`
    pub fn code(&self) -> &'static str {
        match self {
            Self::FamilyNotFound(_) => "UNKNOWN_FAMILY",
            Self::UnknownInviteCode => "UNKNOWN_INVITE_CODE",
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::RelationshipNotFound(_) => "UNKNOWN_RELATIONSHIP",
            Self::InvitationNotFound => "UNKNOWN_INVITATION",
            Self::LegacyTreeNotFound(_) => "UNKNOWN_TREE",
            Self::NotOnRoster(_) => "UNKNOWN_ROSTER_ENTRY",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::SelfRelationship => "SELF_RELATIONSHIP",
            Self::InvalidDateRange => "INVALID_DATE_RANGE",
            Self::NotFamilyMember => "NOT_FAMILY_MEMBER",
            Self::NotFamilyAdmin => "NOT_FAMILY_ADMIN",
            Self::OwnerImmutable => "OWNER_IMMUTABLE",
            Self::CannotLeaveOwnedFamily => "CANNOT_LEAVE_OWNED_FAMILY",
            Self::MemberInvitesDisabled => "MEMBER_INVITES_DISABLED",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::RelationshipExists => "RELATIONSHIP_EXISTS",
            Self::InviteCodeExists => "INVITE_CODE_EXISTS",
            Self::InvitationTokenExists => "INVITATION_TOKEN_EXISTS",
            Self::InvitationNotPending(_) => "INVITATION_NOT_PENDING",
            Self::InvitationExpired => "INVITATION_EXPIRED",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FamilyNotFound(_)
            | Self::UnknownInviteCode
            | Self::MemberNotFound(_)
            | Self::RelationshipNotFound(_)
            | Self::InvitationNotFound
            | Self::LegacyTreeNotFound(_)
            | Self::NotOnRoster(_) => ErrorKind::NotFound,

            Self::ValidationError(_) | Self::SelfRelationship | Self::InvalidDateRange => {
                ErrorKind::Invalid
            }

            Self::NotFamilyMember
            | Self::NotFamilyAdmin
            | Self::OwnerImmutable
            | Self::CannotLeaveOwnedFamily
            | Self::MemberInvitesDisabled => ErrorKind::Forbidden,

            Self::AlreadyMember
            | Self::RelationshipExists
            | Self::InviteCodeExists
            | Self::InvitationTokenExists
            | Self::InvitationNotPending(_) => ErrorKind::Conflict,

            Self::InvitationExpired => ErrorKind::Gone,

            Self::DatabaseError(_) | Self::InternalError(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::UnknownInviteCode.code(), "UNKNOWN_INVITE_CODE");
        assert_eq!(DomainError::InvitationExpired.code(), "INVITATION_EXPIRED");
        assert_eq!(
            DomainError::FamilyNotFound(Snowflake::new(1)).code(),
            "UNKNOWN_FAMILY"
        );
    }

    #[test]
    fn test_kinds() {
        let cases = [
            (DomainError::FamilyNotFound(Snowflake::new(1)), ErrorKind::NotFound, 404),
            (DomainError::SelfRelationship, ErrorKind::Invalid, 400),
            (DomainError::CannotLeaveOwnedFamily, ErrorKind::Forbidden, 403),
            (DomainError::RelationshipExists, ErrorKind::Conflict, 409),
            (DomainError::InvitationExpired, ErrorKind::Gone, 410),
            (DomainError::DatabaseError("boom".into()), ErrorKind::Internal, 500),
        ];
        for (err, kind, status) in cases {
            assert_eq!(err.kind(), kind, "{err:?}");
            assert_eq!(err.kind().http_status(), status);
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(DomainError::UnknownInviteCode.to_string(), "Invite code not found");
        assert_eq!(DomainError::InvitationExpired.to_string(), "Invitation has expired");
        assert_eq!(
            DomainError::InvitationNotPending("accepted".into()).to_string(),
            "Invitation is accepted"
        );
    }
}
