//! Relationship entity - a directed, typed edge between two family members
//!
//! Edges are never mirrored automatically: a `parent` edge from A to B does
//! not imply a `child` edge from B to A. Callers insert both directions when
//! they want symmetry.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Kind of a relationship edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    Parent,
    Child,
    Spouse,
    Sibling,
    AdoptedParent,
    AdoptedChild,
    StepParent,
    StepChild,
}

impl RelationType {
    pub const ALL: [RelationType; 8] = [
        Self::Parent,
        Self::Child,
        Self::Spouse,
        Self::Sibling,
        Self::AdoptedParent,
        Self::AdoptedChild,
        Self::StepParent,
        Self::StepChild,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Spouse => "spouse",
            Self::Sibling => "sibling",
            Self::AdoptedParent => "adopted_parent",
            Self::AdoptedChild => "adopted_child",
            Self::StepParent => "step_parent",
            Self::StepChild => "step_child",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    /// `from` is a (birth, adoptive, or step) parent of `to`
    #[inline]
    pub fn is_parent_kind(self) -> bool {
        matches!(self, Self::Parent | Self::AdoptedParent | Self::StepParent)
    }

    /// `from` is a (birth, adoptive, or step) child of `to`
    #[inline]
    pub fn is_child_kind(self) -> bool {
        matches!(self, Self::Child | Self::AdoptedChild | Self::StepChild)
    }
}

/// Identity of an edge for the uniqueness rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationshipKey {
    pub family_id: Snowflake,
    pub from_member_id: Snowflake,
    pub to_member_id: Snowflake,
    pub relation_type: RelationType,
}

/// Relationship entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: Snowflake,
    pub family_id: Snowflake,
    pub from_member_id: Snowflake,
    pub to_member_id: Snowflake,
    pub relation_type: RelationType,
    /// Opaque client payload, never interpreted here
    pub meta: Option<serde_json::Value>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Relationship {
    pub fn new(
        id: Snowflake,
        family_id: Snowflake,
        from_member_id: Snowflake,
        to_member_id: Snowflake,
        relation_type: RelationType,
        created_by: Snowflake,
    ) -> Self {
        Self {
            id,
            family_id,
            from_member_id,
            to_member_id,
            relation_type,
            meta: None,
            start_date: None,
            end_date: None,
            notes: None,
            created_by,
            created_at: Utc::now(),
        }
    }

    pub fn key(&self) -> RelationshipKey {
        RelationshipKey {
            family_id: self.family_id,
            from_member_id: self.from_member_id,
            to_member_id: self.to_member_id,
            relation_type: self.relation_type,
        }
    }

    /// Check the edge is not a self-loop and its dates are ordered
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.from_member_id == self.to_member_id {
            return Err(DomainError::SelfRelationship);
        }
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if end < start => Err(DomainError::InvalidDateRange),
            _ => Ok(()),
        }
    }

    /// `(parent, child)` if this is a parental edge in either orientation
    pub fn parent_child(&self) -> Option<(Snowflake, Snowflake)> {
        if self.relation_type.is_parent_kind() {
            Some((self.from_member_id, self.to_member_id))
        } else if self.relation_type.is_child_kind() {
            Some((self.to_member_id, self.from_member_id))
        } else {
            None
        }
    }

    #[inline]
    pub fn is_spouse(&self) -> bool {
        self.relation_type == RelationType::Spouse
    }

    /// Whether the edge touches the given member on either end
    #[inline]
    pub fn involves(&self, member_id: Snowflake) -> bool {
        self.from_member_id == member_id || self.to_member_id == member_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: i64, to: i64, relation_type: RelationType) -> Relationship {
        Relationship::new(
            Snowflake::new(1000),
            Snowflake::new(1),
            Snowflake::new(from),
            Snowflake::new(to),
            relation_type,
            Snowflake::new(100),
        )
    }

    #[test]
    fn test_parent_child_orientation() {
        let dad = 10;
        let me = 11;
        assert_eq!(
            edge(dad, me, RelationType::Parent).parent_child(),
            Some((Snowflake::new(dad), Snowflake::new(me)))
        );
        assert_eq!(
            edge(me, dad, RelationType::Child).parent_child(),
            Some((Snowflake::new(dad), Snowflake::new(me)))
        );
        assert_eq!(
            edge(dad, me, RelationType::StepParent).parent_child(),
            Some((Snowflake::new(dad), Snowflake::new(me)))
        );
        assert_eq!(edge(dad, me, RelationType::Spouse).parent_child(), None);
        assert_eq!(edge(dad, me, RelationType::Sibling).parent_child(), None);
    }

    #[test]
    fn test_validate_rejects_self_loop_and_bad_dates() {
        assert!(matches!(
            edge(5, 5, RelationType::Sibling).validate(),
            Err(DomainError::SelfRelationship)
        ));

        let mut marriage = edge(5, 6, RelationType::Spouse);
        marriage.start_date = NaiveDate::from_ymd_opt(2000, 2, 1);
        marriage.end_date = NaiveDate::from_ymd_opt(1999, 2, 1);
        assert!(matches!(marriage.validate(), Err(DomainError::InvalidDateRange)));

        marriage.end_date = None;
        assert!(marriage.validate().is_ok());
    }

    #[test]
    fn test_key_distinguishes_direction_and_type() {
        let a = edge(1, 2, RelationType::Parent).key();
        let b = edge(2, 1, RelationType::Parent).key();
        let c = edge(1, 2, RelationType::AdoptedParent).key();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, edge(1, 2, RelationType::Parent).key());
    }

    #[test]
    fn test_relation_type_strings() {
        for kind in RelationType::ALL {
            assert_eq!(RelationType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(
            serde_json::to_string(&RelationType::AdoptedChild).unwrap(),
            "\"adopted_child\""
        );
        assert_eq!(RelationType::parse("cousin"), None);
    }
}
