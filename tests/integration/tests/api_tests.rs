//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use sanskaar_core::Snowflake;
use serde_json::{json, Value};

/// Server plus a fresh user and a family they own
async fn server_with_family() -> (TestServer, Snowflake, String, FamilyResponse) {
    let server = TestServer::start().await.expect("Failed to start server");
    let owner = new_user_id();
    let token = server.token_for(owner).unwrap();

    let response = server
        .post_auth("/families", &token, &CreateFamilyRequest::unique())
        .await
        .unwrap();
    let family: FamilyResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    (server, owner, token, family)
}

// ============================================================================
// Health and Auth
// ============================================================================

#[tokio::test]
async fn test_health_probes() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_raw("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_raw("/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/families/@me").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");
}

// ============================================================================
// Families and Roster
// ============================================================================

#[tokio::test]
async fn test_family_lifecycle() {
    if !check_test_env() {
        return;
    }

    let (server, owner, token, family) = server_with_family().await;
    assert_eq!(family.owner_id, owner.to_string());
    assert_eq!(family.role_of(owner), Some("admin"));
    assert_eq!(family.invite_code.len(), 8);
    assert_eq!(family.settings["allowMemberInvite"], false);

    let response = server.get_auth("/families/@me", &token).await.unwrap();
    let mine: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(mine.iter().any(|s| s["family"]["id"] == family.id.as_str()));

    let path = format!("/families/{}", family.id);
    let response = server
        .patch_auth(&path, &token, &json!({ "name": "Renamed", "settings": { "allowMemberInvite": true } }))
        .await
        .unwrap();
    let updated: FamilyResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.settings["allowMemberInvite"], true);
    assert_eq!(updated.settings["autoApproveMembers"], true);

    let stranger = server.token_for(new_user_id()).unwrap();
    let response = server.get_auth(&path, &stranger).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_FAMILY_MEMBER");

    let response = server.delete_auth(&path, &token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&path, &token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_join_by_code_and_leave() {
    if !check_test_env() {
        return;
    }

    let (server, owner, owner_token, family) = server_with_family().await;
    let relative = new_user_id();
    let token = server.token_for(relative).unwrap();

    let body = json!({ "inviteCode": family.invite_code });
    let response = server.post_auth("/families/join", &token, &body).await.unwrap();
    let joined: FamilyResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(joined.role_of(relative), Some("member"));

    let response = server.post_auth("/families/join", &token, &body).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_MEMBER");

    let response = server
        .post_auth("/families/join", &token, &json!({ "inviteCode": "NOPE0000" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let leave = format!("/families/{}/roster/@me", family.id);
    let response = server.delete_auth(&leave, &owner_token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "CANNOT_LEAVE_OWNED_FAMILY");

    let response = server.delete_auth(&leave, &token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/families/{}", family.id), &owner_token)
        .await
        .unwrap();
    let family: FamilyResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(family.members.len(), 1);
    assert_eq!(family.role_of(owner), Some("admin"));
}

#[tokio::test]
async fn test_roster_role_changes() {
    if !check_test_env() {
        return;
    }

    let (server, owner, owner_token, family) = server_with_family().await;
    let relative = new_user_id();
    let token = server.token_for(relative).unwrap();
    server
        .post_auth("/families/join", &token, &json!({ "inviteCode": family.invite_code }))
        .await
        .unwrap();

    let relative_path = format!("/families/{}/roster/{relative}", family.id);
    let response = server
        .patch_auth(&relative_path, &token, &json!({ "role": "admin" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(&relative_path, &owner_token, &json!({ "role": "admin" }))
        .await
        .unwrap();
    let updated: FamilyResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.role_of(relative), Some("admin"));

    // the owner stays admin whoever asks
    let owner_path = format!("/families/{}/roster/{owner}", family.id);
    let response = server
        .patch_auth(&owner_path, &token, &json!({ "role": "member" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "OWNER_IMMUTABLE");

    let response = server.delete_auth(&relative_path, &owner_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Members, Relationships and Tree
// ============================================================================

#[tokio::test]
async fn test_member_paging() {
    if !check_test_env() {
        return;
    }

    let (server, _, token, family) = server_with_family().await;
    let members = format!("/families/{}/members", family.id);

    for (name, relation) in [("Dadi", "grandparent"), ("Papa", "parent"), ("Me", "self")] {
        let response = server
            .post_auth(&members, &token, &member_body(name, relation))
            .await
            .unwrap();
        let member: MemberResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(member.display_name, name);
        assert_eq!(member.relation, relation);
        assert!(member.is_alive);
    }

    let response = server
        .get_auth(&format!("{members}?limit=2"), &token)
        .await
        .unwrap();
    let page: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page["data"].as_array().unwrap().len(), 2);
    assert_eq!(page["pagination"]["hasMore"], true);

    let cursor = page["pagination"]["after"].as_str().unwrap().to_string();
    let response = server
        .get_auth(&format!("{members}?limit=2&after={cursor}"), &token)
        .await
        .unwrap();
    let page: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
    assert_eq!(page["pagination"]["hasMore"], false);
    assert_eq!(page["data"][0]["displayName"], "Me");
}

#[tokio::test]
async fn test_member_update_marks_deceased() {
    if !check_test_env() {
        return;
    }

    let (server, _, token, family) = server_with_family().await;
    let response = server
        .post_auth(
            &format!("/families/{}/members", family.id),
            &token,
            &member_body("Nanaji", "grandparent"),
        )
        .await
        .unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/families/{}/members/{}", family.id, member.id);
    let response = server
        .patch_auth(&path, &token, &json!({ "deathdate": "2001-03-04" }))
        .await
        .unwrap();
    let updated: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!updated.is_alive);
    assert_eq!(updated.display_name, "Nanaji");

    let response = server
        .patch_auth(
            &path,
            &token,
            &json!({ "birthdate": "2010-01-01", "deathdate": "2000-01-01" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_DATE_RANGE");
}

#[tokio::test]
async fn test_relationships_shape_the_tree() {
    if !check_test_env() {
        return;
    }

    let (server, _, token, family) = server_with_family().await;
    let members = format!("/families/{}/members", family.id);
    let mut ids = Vec::new();
    for (name, relation) in [("Papa", "parent"), ("Mummy", "parent"), ("Beta", "child")] {
        let response = server
            .post_auth(&members, &token, &member_body(name, relation))
            .await
            .unwrap();
        let member: MemberResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        ids.push(member.id);
    }

    let tree_path = format!("/families/{}/tree", family.id);
    let response = server.get_auth(&tree_path, &token).await.unwrap();
    let tree: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(tree["layout"], "generations");

    let edges = format!("/families/{}/relationships", family.id);
    for body in [
        edge_body(&ids[0], &ids[1], "spouse"),
        edge_body(&ids[0], &ids[2], "parent"),
    ] {
        let response = server.post_auth(&edges, &token, &body).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .post_auth(&edges, &token, &edge_body(&ids[0], &ids[2], "parent"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "RELATIONSHIP_EXISTS");

    let response = server.get_auth(&tree_path, &token).await.unwrap();
    let tree: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(tree["layout"], "hierarchy");
    assert_eq!(tree["roots"][0]["member"]["displayName"], "Papa");
    assert_eq!(tree["roots"][0]["spouse"]["displayName"], "Mummy");
    assert_eq!(tree["roots"][0]["children"][0]["member"]["displayName"], "Beta");

    // deleting a member takes its edges with it
    let response = server
        .delete_auth(&format!("{members}/{}", ids[2]), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("{edges}?member_id={}", ids[2]), &token)
        .await
        .unwrap();
    let remaining: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(remaining.is_empty());

    let response = server
        .get_auth(&format!("/families/{}/generations", family.id), &token)
        .await
        .unwrap();
    let view: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(view["generations"][0]["label"], "Parents");
}

// ============================================================================
// Invitations
// ============================================================================

#[tokio::test]
async fn test_invitation_accept_flow() {
    if !check_test_env() {
        return;
    }

    let (server, _, owner_token, family) = server_with_family().await;
    let invitations = format!("/families/{}/invitations", family.id);

    let response = server.post_empty_auth(&invitations, &owner_token).await.unwrap();
    let invitation: InvitationResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(invitation.status, "pending");
    assert_eq!(invitation.token.len(), 32);

    let preview_path = format!("/invitations/{}", invitation.token);
    let response = server.get(&preview_path).await.unwrap();
    let preview: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(preview["familyName"], family.name.as_str());
    assert_eq!(preview["status"], "pending");

    let guest = new_user_id();
    let guest_token = server.token_for(guest).unwrap();
    let accept_path = format!("/invitations/{}/accept", invitation.token);
    let response = server.post_empty_auth(&accept_path, &guest_token).await.unwrap();
    let joined: FamilyResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(joined.role_of(guest), Some("member"));

    let latecomer = server.token_for(new_user_id()).unwrap();
    let response = server.post_empty_auth(&accept_path, &latecomer).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "INVITATION_NOT_PENDING");

    let response = server
        .get_auth(&format!("{invitations}?status=accepted"), &owner_token)
        .await
        .unwrap();
    let accepted: Vec<InvitationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].accepted_by.as_deref(), Some(guest.to_string().as_str()));

    // list and cancel are for admins
    let response = server.get_auth(&invitations, &guest_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_invitation_cancel_and_member_invites() {
    if !check_test_env() {
        return;
    }

    let (server, _, owner_token, family) = server_with_family().await;
    let invitations = format!("/families/{}/invitations", family.id);

    let guest_token = server.token_for(new_user_id()).unwrap();
    server
        .post_auth(
            "/families/join",
            &guest_token,
            &json!({ "inviteCode": family.invite_code }),
        )
        .await
        .unwrap();

    let response = server.post_empty_auth(&invitations, &guest_token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "MEMBER_INVITES_DISABLED");

    let response = server
        .post_auth(
            &invitations,
            &owner_token,
            &json!({ "email": "cousin@example.com", "ttlHours": 24 }),
        )
        .await
        .unwrap();
    let invitation: InvitationResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(&invitations, &owner_token, &json!({ "ttlHours": 721 }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let cancel_path = format!("{invitations}/{}", invitation.id);
    let response = server.delete_auth(&cancel_path, &owner_token).await.unwrap();
    let cancelled: InvitationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(cancelled.status, "cancelled");

    let response = server.delete_auth(&cancel_path, &owner_token).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let accept_path = format!("/invitations/{}/accept", invitation.token);
    let outsider = server.token_for(new_user_id()).unwrap();
    let response = server.post_empty_auth(&accept_path, &outsider).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server.get("/invitations/ffffffffffffffffffffffffffffffff").await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_INVITATION");
}

// ============================================================================
// Legacy Trees
// ============================================================================

#[tokio::test]
async fn test_legacy_tree_nodes() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.token_for(new_user_id()).unwrap();

    let response = server
        .post_auth("/legacy-trees", &token, &json!({ "name": "Purana Vriksh" }))
        .await
        .unwrap();
    let tree: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let nodes = format!("/legacy-trees/{}/nodes", tree["id"].as_str().unwrap());

    let response = server
        .post_auth(&nodes, &token, &json!({ "id": "n1", "name": "Pardada" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth(
            &nodes,
            &token,
            &json!({
                "id": "n2",
                "name": "Dada",
                "relationships": [{ "relation": "son", "toNodeId": "n1" }]
            }),
        )
        .await
        .unwrap();
    let tree: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(tree["nodes"].as_array().unwrap().len(), 2);

    let response = server
        .post_auth(
            &nodes,
            &token,
            &json!({
                "id": "n3",
                "name": "Ghost",
                "relationships": [{ "relation": "son", "toNodeId": "n9" }]
            }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let stranger = server.token_for(new_user_id()).unwrap();
    let tree_path = format!("/legacy-trees/{}", tree["id"].as_str().unwrap());
    let response = server.get_auth(&tree_path, &stranger).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete_auth(&tree_path, &token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}
