//! Family entity - the tenancy root for members, relationships, and invitations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum length of a family name
pub const MAX_FAMILY_NAME_LEN: usize = 100;

/// Length of a generated family invite code
pub const INVITE_CODE_LEN: usize = 8;

/// Role of a platform user on a family roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyRole {
    Admin,
    #[default]
    Member,
}

impl FamilyRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "member" => Some(Self::Member),
            _ => None,
        }
    }

    #[inline]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Who may see the family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyPrivacy {
    #[default]
    Private,
    Members,
}

impl FamilyPrivacy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Members => "members",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "private" => Some(Self::Private),
            "members" => Some(Self::Members),
            _ => None,
        }
    }
}

/// Family-level switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilySettings {
    /// Plain members may issue invitations
    pub allow_member_invite: bool,
    /// Currently inert: joins are always approved
    pub auto_approve_members: bool,
}

impl Default for FamilySettings {
    fn default() -> Self {
        Self {
            allow_member_invite: false,
            auto_approve_members: true,
        }
    }
}

/// A roster entry linking a platform user to a family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub user_id: Snowflake,
    pub role: FamilyRole,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(user_id: Snowflake, role: FamilyRole) -> Self {
        Self {
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }
}

/// Family aggregate
///
/// The owner is always on the roster with the `admin` role; every roster
/// mutation goes through methods that keep that true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    pub id: Snowflake,
    pub name: String,
    pub owner_id: Snowflake,
    pub invite_code: String,
    pub description: Option<String>,
    pub privacy: FamilyPrivacy,
    pub settings: FamilySettings,
    pub members: Vec<Membership>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Family {
    /// Create a new family with the owner seated as admin
    pub fn new(id: Snowflake, name: String, owner_id: Snowflake, invite_code: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            owner_id,
            invite_code,
            description: None,
            privacy: FamilyPrivacy::default(),
            settings: FamilySettings::default(),
            members: vec![Membership {
                user_id: owner_id,
                role: FamilyRole::Admin,
                joined_at: now,
            }],
            created_at: now,
            updated_at: now,
        }
    }

    /// Trim and check a family name
    pub fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError(
                "Family name must not be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_FAMILY_NAME_LEN {
            return Err(DomainError::ValidationError(format!(
                "Family name must be at most {MAX_FAMILY_NAME_LEN} characters"
            )));
        }
        Ok(trimmed.to_string())
    }

    #[inline]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    /// Roster entry for a user, if any
    pub fn membership(&self, user_id: Snowflake) -> Option<&Membership> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    pub fn role_of(&self, user_id: Snowflake) -> Option<FamilyRole> {
        self.membership(user_id).map(|m| m.role)
    }

    #[inline]
    pub fn is_member(&self, user_id: Snowflake) -> bool {
        self.membership(user_id).is_some()
    }

    #[inline]
    pub fn is_admin(&self, user_id: Snowflake) -> bool {
        self.role_of(user_id).is_some_and(FamilyRole::is_admin)
    }

    #[inline]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Return the caller's role or fail if they are not on the roster
    pub fn require_member(&self, user_id: Snowflake) -> Result<FamilyRole, DomainError> {
        self.role_of(user_id).ok_or(DomainError::NotFamilyMember)
    }

    /// Fail unless the caller is an admin
    pub fn require_admin(&self, user_id: Snowflake) -> Result<(), DomainError> {
        match self.require_member(user_id)? {
            FamilyRole::Admin => Ok(()),
            FamilyRole::Member => Err(DomainError::NotFamilyAdmin),
        }
    }

    /// Whether the user may issue invitations for this family
    pub fn can_invite(&self, user_id: Snowflake) -> bool {
        match self.role_of(user_id) {
            Some(FamilyRole::Admin) => true,
            Some(FamilyRole::Member) => self.settings.allow_member_invite,
            None => false,
        }
    }

    /// Seat a user on the roster
    pub fn add_member(&mut self, user_id: Snowflake, role: FamilyRole) -> Result<&Membership, DomainError> {
        if self.is_member(user_id) {
            return Err(DomainError::AlreadyMember);
        }
        self.members.push(Membership::new(user_id, role));
        self.updated_at = Utc::now();
        Ok(&self.members[self.members.len() - 1])
    }

    /// Take a user off the roster. The owner cannot be removed.
    pub fn remove_member(&mut self, user_id: Snowflake) -> Result<Membership, DomainError> {
        if self.is_owner(user_id) {
            return Err(DomainError::OwnerImmutable);
        }
        let pos = self
            .members
            .iter()
            .position(|m| m.user_id == user_id)
            .ok_or(DomainError::NotOnRoster(user_id))?;
        self.updated_at = Utc::now();
        Ok(self.members.remove(pos))
    }

    /// Change a roster role. The owner stays admin.
    pub fn set_role(&mut self, user_id: Snowflake, role: FamilyRole) -> Result<(), DomainError> {
        if self.is_owner(user_id) && role != FamilyRole::Admin {
            return Err(DomainError::OwnerImmutable);
        }
        let entry = self
            .members
            .iter_mut()
            .find(|m| m.user_id == user_id)
            .ok_or(DomainError::NotOnRoster(user_id))?;
        entry.role = role;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.updated_at = Utc::now();
    }

    pub fn set_privacy(&mut self, privacy: FamilyPrivacy) {
        self.privacy = privacy;
        self.updated_at = Utc::now();
    }

    pub fn set_settings(&mut self, settings: FamilySettings) {
        self.settings = settings;
        self.updated_at = Utc::now();
    }
}

/// Generate a random alphanumeric family invite code
///
/// Uniqueness is enforced by the store; callers retry on collision.
pub fn generate_invite_code() -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::thread_rng();
    (0..INVITE_CODE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
