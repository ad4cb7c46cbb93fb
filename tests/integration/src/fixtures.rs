//! Test fixtures and data generators

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use sanskaar_core::{Snowflake, SnowflakeGenerator};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique suffix for names within one test run
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Fresh user id; unique across runs against the same database
pub fn new_user_id() -> Snowflake {
    static USERS: OnceLock<SnowflakeGenerator> = OnceLock::new();
    USERS.get_or_init(SnowflakeGenerator::default).generate()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFamilyRequest {
    pub name: String,
    pub description: Option<String>,
}

impl CreateFamilyRequest {
    pub fn unique() -> Self {
        Self {
            name: format!("Family {}", unique_suffix()),
            description: Some("Integration test family".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub user_id: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyResponse {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub invite_code: String,
    pub members: Vec<RosterEntry>,
    pub settings: Value,
}

impl FamilyResponse {
    pub fn role_of(&self, user_id: Snowflake) -> Option<&str> {
        let user_id = user_id.to_string();
        self.members
            .iter()
            .find(|m| m.user_id == user_id)
            .map(|m| m.role.as_str())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub display_name: String,
    pub relation: String,
    pub is_alive: bool,
}

/// Body for adding a person with a relation label
pub fn member_body(name: &str, relation: &str) -> Value {
    json!({ "displayName": name, "relation": relation })
}

/// Body for a directed edge
pub fn edge_body(from: &str, to: &str, relation_type: &str) -> Value {
    json!({ "fromMemberId": from, "toMemberId": to, "relationType": relation_type })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationResponse {
    pub id: String,
    pub token: String,
    pub status: String,
    pub accepted_by: Option<String>,
}
